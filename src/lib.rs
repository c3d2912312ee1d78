pub mod app;
pub mod cli;
pub mod config;
pub mod highlight;
pub mod listing;
pub mod storage;
pub mod ui;

pub use config::{AppConfig, ConfigLoader, ConfigPaths};
pub use storage::{NoteHandle, NoteSummary, VaultError, VaultStore};
