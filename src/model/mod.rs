pub mod config;
pub mod list;
pub mod theme;

pub use config::*;
pub use list::*;
pub use theme::*;
