//! Terminal-cell arithmetic for list titles and items.
//!
//! Names are often non-Latin, so cursor movement and truncation work on
//! grapheme clusters and measure in display cells rather than bytes.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` down to at most `max_cells` cells, ending in `…` when anything was
/// dropped.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = display_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme after the one starting at `at`, or `None` at
/// the end of the string.
pub fn next_grapheme_boundary(s: &str, at: usize) -> Option<usize> {
    if at >= s.len() {
        return None;
    }
    let step = s[at..].graphemes(true).next().map_or(0, str::len);
    Some(at + step)
}

/// Byte offset of the grapheme ending at `at`, or `None` at the start.
pub fn prev_grapheme_boundary(s: &str, at: usize) -> Option<usize> {
    if at == 0 {
        return None;
    }
    let step = s[..at].graphemes(true).next_back().map_or(0, str::len);
    Some(at - step)
}

fn is_blank(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

/// Start of the word at or before `at` (whitespace-delimited)
pub fn word_boundary_left(s: &str, at: usize) -> usize {
    let mut starts = s[..at.min(s.len())].grapheme_indices(true).rev().peekable();
    while starts.next_if(|(_, g)| is_blank(g)).is_some() {}
    let mut pos = at.min(s.len());
    while let Some((i, _)) = starts.next_if(|(_, g)| !is_blank(g)) {
        pos = i;
    }
    if pos == at.min(s.len()) {
        // Only whitespace before the cursor
        return 0;
    }
    pos
}

/// Start of the next word after `at`, or the end of the string
pub fn word_boundary_right(s: &str, at: usize) -> usize {
    let mut rest = s[at.min(s.len())..]
        .grapheme_indices(true)
        .map(|(i, g)| (at + i, g))
        .peekable();
    while rest.next_if(|(_, g)| !is_blank(g)).is_some() {}
    while rest.next_if(|(_, g)| is_blank(g)).is_some() {}
    rest.peek().map_or(s.len(), |(i, _)| *i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_of_mixed_scripts() {
        assert_eq!(display_width("Ali"), 3);
        assert_eq!(display_width("علی"), 3);
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate_to_width("Sara", 10), "Sara");
        assert_eq!(truncate_to_width("Sara", 4), "Sara");
        assert_eq!(truncate_to_width("Abdullah", 5), "Abdu\u{2026}");
        assert_eq!(truncate_to_width("你好世界", 5), "你好\u{2026}");
        assert_eq!(truncate_to_width("Sara", 1), "\u{2026}");
        assert_eq!(truncate_to_width("Sara", 0), "");
    }

    #[test]
    fn grapheme_steps() {
        let s = "e\u{0301}a";
        assert_eq!(next_grapheme_boundary(s, 0), Some(3));
        assert_eq!(next_grapheme_boundary(s, 3), Some(4));
        assert_eq!(next_grapheme_boundary(s, 4), None);
        assert_eq!(prev_grapheme_boundary(s, 4), Some(3));
        assert_eq!(prev_grapheme_boundary(s, 3), Some(0));
        assert_eq!(prev_grapheme_boundary(s, 0), None);
    }

    #[test]
    fn word_motion() {
        let s = "Team Alpha  crew";
        assert_eq!(word_boundary_left(s, s.len()), 12);
        assert_eq!(word_boundary_left(s, 12), 5);
        assert_eq!(word_boundary_left(s, 5), 0);
        assert_eq!(word_boundary_left("   x", 3), 0);
        assert_eq!(word_boundary_right(s, 0), 5);
        assert_eq!(word_boundary_right(s, 5), 12);
        assert_eq!(word_boundary_right(s, 12), s.len());
    }
}
