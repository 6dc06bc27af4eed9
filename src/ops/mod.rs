pub mod export;
pub mod list_ops;
pub mod search;
