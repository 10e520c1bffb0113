pub use nudge_tui::cli;
pub use nudge_tui::commands;
pub use nudge_tui::config;
pub use nudge_tui::logging;
pub use nudge_tui::tui;
pub use nudge_tui::AppConfig;

pub use nudge_core as core;
pub use nudge_core::capture;
pub use nudge_core::model;
pub use nudge_core::parser;
pub use nudge_core::storage as db;
pub use nudge_core::Reminders;
