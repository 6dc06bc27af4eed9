use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::model::list::{List, Snapshot};

/// Trim and lower-case a raw query so it can be compared against
/// lower-cased list text.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// The text a query is matched against: title and every item, space-joined,
/// lower-cased.
fn haystack(list: &List) -> String {
    let mut text = list.title.clone();
    for item in &list.items {
        text.push(' ');
        text.push_str(item);
    }
    text.to_lowercase()
}

/// Whether `list` stays visible under `query`. An empty (or all-whitespace)
/// query shows everything.
pub fn is_visible(list: &List, query: &str) -> bool {
    let query = normalize_query(query);
    query.is_empty() || haystack(list).contains(&query)
}

/// Ids of lists hidden by `query`, in snapshot order
pub fn hidden_ids(snapshot: &Snapshot, query: &str) -> Vec<String> {
    snapshot
        .lists
        .iter()
        .filter(|l| !is_visible(l, query))
        .map(|l| l.id.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Highlighting
// ---------------------------------------------------------------------------

/// Case-insensitive literal matcher for the query, used to highlight hits in
/// rendered titles and items. `None` for an empty query.
pub fn highlight_regex(query: &str) -> Option<Regex> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
pub fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(title: &str, items: &[&str]) -> List {
        List::new(
            title.to_string(),
            items.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let l = list("Bravo", &[]);
        assert!(is_visible(&l, ""));
        assert!(is_visible(&l, "   "));
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        assert!(is_visible(&list("Ali's Crew", &[]), "ali"));
        assert!(is_visible(&list("Ali's Crew", &[]), "  ALI "));
        assert!(!is_visible(&list("Bravo", &["Sara", "Omar"]), "ali"));
    }

    #[test]
    fn test_item_match() {
        let l = list("Bravo", &["Sara", "Khalid"]);
        assert!(is_visible(&l, "khal"));
        assert!(!is_visible(&l, "zzz"));
    }

    #[test]
    fn test_match_spans_title_and_item_boundary() {
        // Title and items are joined with a single space
        let l = list("Team", &["Ali"]);
        assert!(is_visible(&l, "team ali"));
        assert!(!is_visible(&l, "teamali"));
    }

    #[test]
    fn test_hidden_ids_and_clearing_query() {
        let snapshot = Snapshot {
            lists: vec![list("Ali's Crew", &[]), list("Bravo", &["Sara"])],
        };
        let hidden = hidden_ids(&snapshot, "ali");
        assert_eq!(hidden, vec![snapshot.lists[1].id.clone()]);
        assert!(hidden_ids(&snapshot, "").is_empty());
    }

    #[test]
    fn test_highlight_regex_is_literal() {
        assert!(highlight_regex("  ").is_none());
        let re = highlight_regex("a.b").unwrap();
        assert_eq!(find_matches(&re, "A.B axb a.b"), vec![0..3, 8..11]);
    }
}
