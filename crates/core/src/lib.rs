pub mod capture;
pub mod commands;
pub mod config;
pub mod model;
pub mod parser;
pub mod picker;
pub mod scheduler;
pub mod services;
pub mod storage;
pub mod view;

pub use capture::{ReminderInput, ValidationError};
pub use config::AppConfig;
pub use model::*;
pub use picker::{DateTimePicker, PickerField};
pub use scheduler::{Clock, ManualClock, Scheduler, SystemClock};
pub use services::{Alert, Reminders};
pub use storage::Database;
pub use view::{Entry, EntryState, TaskList};
