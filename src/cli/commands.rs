use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dw", about = concat!("dawat v", env!("CARGO_PKG_VERSION"), " - named lists in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show all lists, optionally filtered
    Lists(ListsArgs),
    /// Show one list with its items
    Show(ShowArgs),
    /// Create a list
    New(NewArgs),
    /// Append an item to a list
    Add(AddArgs),
    /// Remove an item from a list
    Rm(RmArgs),
    /// Replace the text of an item
    Edit(EditArgs),
    /// Rename a list
    Title(TitleArgs),
    /// Move a list to another position
    Mv(MvArgs),
    /// Permanently delete a list
    Delete(DeleteArgs),
    /// Permanently delete every list
    Clear(ClearArgs),
    /// Write all lists as a text document
    Export(ExportArgs),
    /// Show or set the TUI theme
    Theme(ThemeArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListsArgs {
    /// Case-insensitive filter on titles and items
    pub query: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// List position (1-based) or id prefix
    pub list: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct NewArgs {
    /// List title
    pub title: String,
    /// Initial items
    pub items: Vec<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// List position (1-based) or id prefix
    pub list: String,
    /// Item text
    pub text: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// List position (1-based) or id prefix
    pub list: String,
    /// Item number (1-based)
    pub index: usize,
}

#[derive(Args)]
pub struct EditArgs {
    /// List position (1-based) or id prefix
    pub list: String,
    /// Item number (1-based)
    pub index: usize,
    /// New item text
    pub text: String,
}

#[derive(Args)]
pub struct TitleArgs {
    /// List position (1-based) or id prefix
    pub list: String,
    /// New title
    pub title: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// List position (1-based) or id prefix
    pub list: String,
    /// New position (1-based; past the end moves to the end)
    pub position: usize,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// List position (1-based) or id prefix
    pub list: String,
    /// Confirm the deletion
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Confirm deleting everything
    #[arg(long)]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// Other args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ExportArgs {
    /// Output file ("-" for stdout; default: a timestamped file in the
    /// current directory)
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// light or dark (omit to show the current theme)
    pub mode: Option<String>,
}
