use std::path::{Path, PathBuf};

use chrono::Local;
use log::{info, warn};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::kv::FileKv;
use crate::io::persistence;
use crate::logging;
use crate::model::{Snapshot, ThemeMode};
use crate::notify::{Notifier, NotifyKind};
use crate::ops::export;
use crate::ops::list_ops::{Change, ListError, ListStore};
use crate::ops::search;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let Some(cmd) = cli.command else {
        return Err("no command given (run `dw` without arguments for the TUI)".into());
    };
    let mut store = open_store(cli.data_dir.as_deref().map(Path::new))?;

    match cmd {
        // Read commands
        Commands::Lists(args) => cmd_lists(&store, args, json),
        Commands::Show(args) => cmd_show(&store, args, json),

        // Write commands
        Commands::New(args) => cmd_new(&mut store, args, json),
        Commands::Add(args) => cmd_add(&mut store, args, json),
        Commands::Rm(args) => cmd_rm(&mut store, args, json),
        Commands::Edit(args) => cmd_edit(&mut store, args, json),
        Commands::Title(args) => cmd_title(&mut store, args, json),
        Commands::Mv(args) => cmd_mv(&mut store, args, json),
        Commands::Delete(args) => cmd_delete(&mut store, args, json),
        Commands::Clear(args) => cmd_clear(&mut store, args, json),

        // Other
        Commands::Export(args) => cmd_export(&store, args, json),
        Commands::Theme(args) => cmd_theme(&mut store, args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the data directory, read its config, start file logging, and open
/// the list store on it.
fn open_store(data_dir: Option<&Path>) -> Result<ListStore<FileKv>, Box<dyn std::error::Error>> {
    let data_dir: PathBuf = config_io::resolve_data_dir(data_dir);
    let config = config_io::read_config(&data_dir)?;
    if config.log.enabled
        && let Err(e) = logging::init_logging(&config.log.level, &data_dir.join("logs"))
    {
        eprintln!("warning: logging disabled: {}", e);
    }
    info!(
        "event=cli_start module=cli data_dir={}",
        data_dir.display()
    );
    Ok(ListStore::open(FileKv::new(data_dir)))
}

/// Resolve a LIST argument: a 1-based position, or a prefix of exactly one
/// list id. Returns the list id.
pub fn resolve_list(snapshot: &Snapshot, reference: &str) -> Result<String, Box<dyn std::error::Error>> {
    let reference = reference.trim();
    if let Ok(position) = reference.parse::<usize>()
        && position >= 1
        && let Some(list) = snapshot.lists.get(position - 1)
    {
        return Ok(list.id.clone());
    }
    let matches: Vec<&str> = snapshot
        .lists
        .iter()
        .map(|l| l.id.as_str())
        .filter(|id| !reference.is_empty() && id.starts_with(reference))
        .collect();
    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => Err(ListError::NotFound(reference.to_string()).into()),
        _ => Err(format!(
            "ambiguous list reference '{}' ({} lists match)",
            reference,
            matches.len()
        )
        .into()),
    }
}

/// Convert a 1-based item number into an index within `list_id`
fn resolve_item(
    snapshot: &Snapshot,
    list_id: &str,
    number: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let len = snapshot.find(list_id).map_or(0, |l| l.items.len());
    if number == 0 || number > len {
        return Err(format!("no item {} (list has {})", number, len).into());
    }
    Ok(number - 1)
}

/// Print the outcome of a mutation: the list as JSON, or a message
fn report(
    store: &ListStore<FileKv>,
    list_id: &str,
    change: Change,
    message: &str,
    json: bool,
) -> CmdResult {
    if json {
        let snapshot = store.snapshot();
        if let (Some(pos), Some(list)) = (snapshot.position(list_id), snapshot.find(list_id)) {
            println!("{}", serde_json::to_string_pretty(&list_to_json(pos + 1, list))?);
        }
        return Ok(());
    }
    let mut out = StdoutNotifier;
    match change {
        Change::Applied => out.notify(message, NotifyKind::Success),
        Change::Unchanged => out.notify("No change", NotifyKind::Info),
    }
    Ok(())
}

fn print_all(snapshot: &Snapshot) -> CmdResult {
    let lists: Vec<ListJson> = snapshot
        .lists
        .iter()
        .enumerate()
        .map(|(i, l)| list_to_json(i + 1, l))
        .collect();
    println!("{}", serde_json::to_string_pretty(&lists)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_lists(store: &ListStore<FileKv>, args: ListsArgs, json: bool) -> CmdResult {
    let query = args.query.unwrap_or_default();
    let shown: Vec<(usize, &crate::model::List)> = store
        .snapshot()
        .lists
        .iter()
        .enumerate()
        .filter(|(_, l)| search::is_visible(l, &query))
        .map(|(i, l)| (i + 1, l))
        .collect();

    if json {
        let lists: Vec<ListJson> = shown
            .iter()
            .map(|(pos, l)| list_to_json(*pos, l))
            .collect();
        println!("{}", serde_json::to_string_pretty(&lists)?);
        return Ok(());
    }

    if shown.is_empty() {
        if store.snapshot().is_empty() {
            println!("No lists yet");
        } else {
            println!("No lists match \"{}\"", query.trim());
        }
        return Ok(());
    }
    for (pos, list) in shown {
        println!("{}", format_list_line(pos, list));
    }
    Ok(())
}

fn cmd_show(store: &ListStore<FileKv>, args: ShowArgs, json: bool) -> CmdResult {
    let snapshot = store.snapshot();
    let id = resolve_list(snapshot, &args.list)?;
    let pos = snapshot
        .position(&id)
        .ok_or_else(|| ListError::NotFound(id.clone()))?;
    let list = &snapshot.lists[pos];
    if json {
        println!("{}", serde_json::to_string_pretty(&list_to_json(pos + 1, list))?);
    } else {
        println!("{}", format_list_detail(list));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_new(store: &mut ListStore<FileKv>, args: NewArgs, json: bool) -> CmdResult {
    let id = store.create_list(&args.title, args.items)?;
    if json {
        return report(store, &id, Change::Applied, "", json);
    }
    println!("List created [{}]", short_id(&id));
    Ok(())
}

fn cmd_add(store: &mut ListStore<FileKv>, args: AddArgs, json: bool) -> CmdResult {
    let id = resolve_list(store.snapshot(), &args.list)?;
    let text = args.text.trim();
    if text.is_empty() {
        return Err(ListError::Validation("item").into());
    }
    let change = store.add_item(&id, text)?;
    report(store, &id, change, "Name added", json)
}

fn cmd_rm(store: &mut ListStore<FileKv>, args: RmArgs, json: bool) -> CmdResult {
    let id = resolve_list(store.snapshot(), &args.list)?;
    let index = resolve_item(store.snapshot(), &id, args.index)?;
    let change = store.remove_item(&id, index)?;
    report(store, &id, change, "Name deleted", json)
}

fn cmd_edit(store: &mut ListStore<FileKv>, args: EditArgs, json: bool) -> CmdResult {
    let id = resolve_list(store.snapshot(), &args.list)?;
    let index = resolve_item(store.snapshot(), &id, args.index)?;
    // Same rule as committing an inline edit: blank keeps the item
    let text = args.text.trim();
    let change = if text.is_empty() {
        Change::Unchanged
    } else {
        store.update_item(&id, index, text)?
    };
    report(store, &id, change, "Name updated", json)
}

fn cmd_title(store: &mut ListStore<FileKv>, args: TitleArgs, json: bool) -> CmdResult {
    let id = resolve_list(store.snapshot(), &args.list)?;
    let change = store.update_title(&id, &args.title)?;
    report(store, &id, change, "Title updated", json)
}

fn cmd_mv(store: &mut ListStore<FileKv>, args: MvArgs, json: bool) -> CmdResult {
    if args.position == 0 {
        return Err("positions start at 1".into());
    }
    let id = resolve_list(store.snapshot(), &args.list)?;
    let change = store.reorder_list(&id, args.position - 1)?;
    report(store, &id, change, "Order updated", json)
}

fn cmd_delete(store: &mut ListStore<FileKv>, args: DeleteArgs, json: bool) -> CmdResult {
    let id = resolve_list(store.snapshot(), &args.list)?;
    if !args.yes {
        let title = store
            .snapshot()
            .find(&id)
            .map(|l| l.title.clone())
            .unwrap_or_default();
        return Err(format!("refusing to delete \"{}\" without --yes", title).into());
    }
    store.delete_list(&id)?;
    if json {
        return print_all(store.snapshot());
    }
    StdoutNotifier.notify("List removed", NotifyKind::Success);
    Ok(())
}

fn cmd_clear(store: &mut ListStore<FileKv>, args: ClearArgs, json: bool) -> CmdResult {
    if !args.yes {
        return Err("refusing to delete every list without --yes".into());
    }
    let count = store.snapshot().lists.len();
    store.reset()?;
    warn!("event=cli_clear module=cli lists={}", count);
    if json {
        return print_all(store.snapshot());
    }
    StdoutNotifier.notify("All lists cleared", NotifyKind::Success);
    Ok(())
}

// ---------------------------------------------------------------------------
// Other
// ---------------------------------------------------------------------------

fn cmd_export(store: &ListStore<FileKv>, args: ExportArgs, json: bool) -> CmdResult {
    let path = match args.output.as_deref() {
        Some("-") => {
            let text = export::render_text(store.snapshot(), Local::now().naive_local());
            print!("{}", text);
            return Ok(());
        }
        Some(file) => {
            let path = PathBuf::from(file);
            let text = export::render_text(store.snapshot(), Local::now().naive_local());
            crate::io::kv::atomic_write(&path, text.as_bytes())?;
            path
        }
        None => export::export_to_dir(&std::env::current_dir()?, store.snapshot())?,
    };
    info!("event=export module=cli status=ok path={}", path.display());
    if json {
        let out = ExportJson {
            path: path.display().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Lists exported to {}", path.display());
    }
    Ok(())
}

fn cmd_theme(store: &mut ListStore<FileKv>, args: ThemeArgs, json: bool) -> CmdResult {
    let mode = match args.mode {
        Some(requested) => {
            let mode: ThemeMode = requested.parse()?;
            persistence::save_theme(store.kv_mut(), mode)?;
            mode
        }
        None => persistence::load_theme(store.kv()),
    };
    if json {
        let out = ThemeJson {
            theme: mode.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Theme: {}", mode);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::List;

    fn snapshot(ids: &[&str]) -> Snapshot {
        Snapshot {
            lists: ids
                .iter()
                .map(|id| {
                    let mut l = List::new(format!("L-{}", id), vec![]);
                    l.id = id.to_string();
                    l
                })
                .collect(),
        }
    }

    #[test]
    fn resolve_by_position() {
        let snap = snapshot(&["aaa1", "bbb2"]);
        assert_eq!(resolve_list(&snap, "2").unwrap(), "bbb2");
        assert_eq!(resolve_list(&snap, " 1 ").unwrap(), "aaa1");
    }

    #[test]
    fn resolve_by_id_prefix() {
        let snap = snapshot(&["aaa1", "abb2"]);
        assert_eq!(resolve_list(&snap, "aa").unwrap(), "aaa1");
        assert!(resolve_list(&snap, "a").unwrap_err().to_string().contains("ambiguous"));
        assert_eq!(
            resolve_list(&snap, "zz").unwrap_err().to_string(),
            "list not found: zz"
        );
    }

    #[test]
    fn position_out_of_range_falls_back_to_prefix() {
        let snap = snapshot(&["9abc"]);
        assert_eq!(resolve_list(&snap, "9").unwrap(), "9abc");
        assert!(resolve_list(&snap, "0").is_err());
    }

    #[test]
    fn item_numbers_are_one_based() {
        let mut snap = snapshot(&["a"]);
        snap.lists[0].items = vec!["x".into(), "y".into()];
        assert_eq!(resolve_item(&snap, "a", 2).unwrap(), 1);
        assert!(resolve_item(&snap, "a", 0).is_err());
        assert!(resolve_item(&snap, "a", 3).is_err());
    }
}
