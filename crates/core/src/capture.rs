use thiserror::Error;

use crate::model::{normalize_description, TaskTime, TimeError};

/// Normalized input for scheduling a reminder from any client (CLI, TUI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderInput {
    pub title: String,
    pub description: Option<String>,
    pub time: TaskTime,
}

impl ReminderInput {
    pub fn new(title: impl Into<String>, description: Option<String>, time: TaskTime) -> Self {
        Self {
            title: title.into(),
            description,
            time,
        }
    }

    pub fn require_title(&self) -> Result<&str, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(title)
    }

    pub(crate) fn description(&self) -> Option<String> {
        normalize_description(self.description.clone())
    }
}

/// Reasons a reminder is rejected before anything is stored or armed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a task title.")]
    EmptyTitle,
    #[error("Please select a valid date: {0}")]
    InvalidTime(#[from] TimeError),
    #[error("Please select a future date.")]
    PastDate,
    #[error("The task time is too close.")]
    TooClose,
}
