pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;

pub use nudge_core as core;
pub use nudge_core::capture;
pub use nudge_core::model;
pub use nudge_core::parser;
pub use nudge_core::storage as db;

pub use nudge_core::AppConfig;
