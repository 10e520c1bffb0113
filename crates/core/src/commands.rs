//! One-shot operations for non-interactive clients. None of these arm timers.

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::capture::ReminderInput;
use crate::config::AppConfig;
use crate::model::{DeleteResult, Task};
use crate::services::validate;
use crate::storage::Database;

/// Result of [`add_reminder`]; `replaced` holds the record previously stored under the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub task: Task,
    pub replaced: Option<Task>,
}

/// Validate and store a reminder; it is picked up as a pending entry on next start.
pub fn add_reminder(
    config: &AppConfig,
    input: &ReminderInput,
    now: NaiveDateTime,
) -> Result<AddOutcome> {
    let (task, _delay) = validate(now, input)?;
    let database = Database::initialize(config)?;
    let replaced = database.fetch(&task.title)?;
    database.save(&task)?;
    Ok(AddOutcome { task, replaced })
}

pub fn list_reminders(config: &AppConfig) -> Result<Vec<Task>> {
    let database = Database::initialize(config)?;
    database.load_all()
}

/// Delete the reminders with the provided titles and return per-title results.
pub fn delete_reminders(config: &AppConfig, titles: &[String]) -> Result<Vec<DeleteResult>> {
    let database = Database::initialize(config)?;
    titles
        .iter()
        .map(|title| {
            Ok(DeleteResult {
                title: title.clone(),
                deleted: database.delete(title)?,
            })
        })
        .collect()
}
