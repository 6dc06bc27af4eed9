pub mod app;
pub mod input;
pub mod render;
pub mod reorder;
pub mod session;
pub mod text_input;
pub mod theme;
pub mod toast;
pub mod view;

pub use app::run;
