mod reminders;

pub use reminders::{validate, Alert, Reminders, MIN_DELAY_MS};
