use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDateTime};

use crate::capture::{ReminderInput, ValidationError};
use crate::model::Task;
use crate::picker::DateTimePicker;
use crate::scheduler::{compute_delay, Clock, Scheduler, SystemClock};
use crate::storage::Database;
use crate::view::TaskList;

/// Shortest delay accepted for a new reminder.
pub const MIN_DELAY_MS: i64 = 1_000;

/// User-facing notification raised when a reminder comes due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    fn due(title: &str) -> Self {
        Self {
            title: title.to_string(),
            message: format!("Time to do: {}", title),
        }
    }
}

/// Check `input` against `now` and build the task it describes, with its delay.
pub fn validate(now: NaiveDateTime, input: &ReminderInput) -> Result<(Task, Duration), ValidationError> {
    let title = input.require_title()?;
    let delay = compute_delay(now, &input.time)?;
    if delay < Duration::zero() {
        return Err(ValidationError::PastDate);
    }
    if delay.num_milliseconds() < MIN_DELAY_MS {
        return Err(ValidationError::TooClose);
    }
    let task = Task::new(title, input.time.clone(), input.description());
    Ok((task, delay))
}

/// Ties persisted reminders, their live timers and the rendered list together.
pub struct Reminders<C: Clock = SystemClock> {
    database: Database,
    scheduler: Scheduler,
    view: TaskList,
    clock: C,
}

impl<C: Clock> Reminders<C> {
    /// Hydrate the list from an opened store. No timers are armed for stored reminders.
    pub fn start(database: Database, clock: C) -> Result<Self> {
        let tasks = database
            .load_all()
            .context("Failed to load stored reminders")?;
        let mut view = TaskList::new();
        for task in tasks {
            view.render(task);
        }
        tracing::debug!(count = view.len(), "hydrated reminder list");

        Ok(Self {
            database,
            scheduler: Scheduler::new(),
            view,
            clock,
        })
    }

    /// Freshly populated picker controls for the current year.
    pub fn picker(&self) -> DateTimePicker {
        DateTimePicker::new(self.current_year())
    }

    pub fn current_year(&self) -> i32 {
        self.clock.now().year()
    }

    /// Validate, persist, render and arm a reminder.
    ///
    /// Rejections leave storage, list and timers untouched. Storage failures after
    /// validation are logged and otherwise ignored.
    pub fn set_notification(&mut self, input: ReminderInput) -> Result<Task, ValidationError> {
        let now = self.clock.now();
        let (task, delay) = validate(now, &input)?;

        self.scheduler.cancel(&task.title);
        if let Err(err) = self.database.save(&task) {
            tracing::warn!(title = task.title.as_str(), error = %err, "failed to persist reminder");
        }
        self.view.render(task.clone());
        self.scheduler.arm(&task.title, delay, now);
        tracing::info!(
            title = task.title.as_str(),
            due = %task.time,
            delay_ms = delay.num_milliseconds(),
            "scheduled reminder"
        );
        Ok(task)
    }

    /// Cancel, forget and unlist `title`. Returns `false` when nothing was known about it.
    pub fn delete(&mut self, title: &str) -> bool {
        let cancelled = self.scheduler.cancel(title) > 0;
        let stored = match self.database.delete(title) {
            Ok(existed) => existed,
            Err(err) => {
                tracing::warn!(title, error = %err, "failed to delete stored reminder");
                false
            }
        };
        let listed = self.view.remove(title);
        cancelled || stored || listed
    }

    /// Flip the visual done flag; nothing is persisted.
    pub fn toggle_done(&mut self, title: &str) -> bool {
        self.view.toggle_done(title)
    }

    /// Fire every timer that is due, marking entries expired.
    pub fn tick(&mut self) -> Vec<Alert> {
        let fired = self.scheduler.poll(self.clock.now());
        fired
            .into_iter()
            .map(|fired| {
                self.view.mark_expired(&fired.title);
                tracing::info!(title = fired.title.as_str(), "reminder due");
                Alert::due(&fired.title)
            })
            .collect()
    }

    pub fn view(&self) -> &TaskList {
        &self.view
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::model::TaskTime;
    use crate::scheduler::ManualClock;
    use crate::view::EntryState;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2031, 3, 14)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .expect("valid moment")
    }

    fn ten_o_clock() -> TaskTime {
        TaskTime::new(2031, 3, 14, 10, 0)
    }

    fn start(dir: &TempDir, clock: &ManualClock) -> Reminders<ManualClock> {
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        let database = Database::initialize(&config).expect("init db");
        Reminders::start(database, clock.clone()).expect("start")
    }

    #[test]
    fn empty_title_is_rejected_without_side_effects() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(at(9, 0, 0));
        let mut reminders = start(&dir, &clock);

        let result = reminders.set_notification(ReminderInput::new("  ", None, ten_o_clock()));

        assert_eq!(result, Err(ValidationError::EmptyTitle));
        assert!(reminders.view().is_empty());
        assert!(reminders.scheduler().is_empty());
        assert!(reminders.database().load_all().expect("load").is_empty());
    }

    #[test]
    fn past_time_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(at(10, 0, 30));
        let mut reminders = start(&dir, &clock);

        let result = reminders.set_notification(ReminderInput::new("Late", None, ten_o_clock()));
        assert_eq!(result, Err(ValidationError::PastDate));
        assert!(reminders.scheduler().is_empty());
    }

    #[test]
    fn delay_under_one_second_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(at(9, 59, 59) + Duration::milliseconds(500));
        let mut reminders = start(&dir, &clock);

        let result = reminders.set_notification(ReminderInput::new("Rush", None, ten_o_clock()));
        assert_eq!(result, Err(ValidationError::TooClose));

        clock.set(at(10, 0, 0));
        let result = reminders.set_notification(ReminderInput::new("Now", None, ten_o_clock()));
        assert_eq!(result, Err(ValidationError::TooClose));
        assert!(reminders.database().load_all().expect("load").is_empty());
    }

    #[test]
    fn delay_of_exactly_one_second_is_accepted() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(at(9, 59, 59));
        let mut reminders = start(&dir, &clock);

        let task = reminders
            .set_notification(ReminderInput::new("Edge", None, ten_o_clock()))
            .expect("accepted");
        assert_eq!(task.title, "Edge");
        assert_eq!(reminders.scheduler().deadline_of("Edge"), Some(at(10, 0, 0)));
    }

    #[test]
    fn invalid_components_are_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(at(9, 0, 0));
        let mut reminders = start(&dir, &clock);

        let result = reminders.set_notification(ReminderInput::new(
            "Leap",
            None,
            TaskTime::new(2031, 2, 29, 9, 0),
        ));
        assert!(matches!(result, Err(ValidationError::InvalidTime(_))));
    }

    #[test]
    fn create_persists_renders_and_arms() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(at(9, 0, 0));
        let mut reminders = start(&dir, &clock);

        let task = reminders
            .set_notification(ReminderInput::new(
                " Buy milk ",
                Some("two litres".into()),
                ten_o_clock(),
            ))
            .expect("scheduled");

        assert_eq!(task.title, "Buy milk");
        assert_eq!(reminders.database().load_all().expect("load"), vec![task]);
        assert_eq!(
            reminders.view().get("Buy milk").map(|e| e.state()),
            Some(EntryState::Pending)
        );
        assert!(reminders.scheduler().is_armed("Buy milk"));
    }

    #[test]
    fn end_to_end_due_alert_fires_exactly_once() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(at(9, 59, 58));
        let mut reminders = start(&dir, &clock);

        reminders
            .set_notification(ReminderInput::new("Buy milk", None, ten_o_clock()))
            .expect("scheduled");
        assert_eq!(
            reminders.view().get("Buy milk").map(|e| e.state()),
            Some(EntryState::Pending)
        );

        clock.advance(Duration::milliseconds(1_999));
        assert!(reminders.tick().is_empty());

        clock.advance(Duration::milliseconds(1));
        let alerts = reminders.tick();
        assert_eq!(
            alerts,
            vec![Alert {
                title: "Buy milk".into(),
                message: "Time to do: Buy milk".into(),
            }]
        );
        assert_eq!(
            reminders.view().get("Buy milk").map(|e| e.state()),
            Some(EntryState::Expired)
        );

        clock.advance(Duration::seconds(30));
        assert!(reminders.tick().is_empty());
        assert_eq!(reminders.database().load_all().expect("load").len(), 1);
    }

    #[test]
    fn delete_cancels_timer_and_removes_everything() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(at(9, 0, 0));
        let mut reminders = start(&dir, &clock);
        reminders
            .set_notification(ReminderInput::new("Gym", None, ten_o_clock()))
            .expect("scheduled");

        assert!(reminders.delete("Gym"));

        assert!(reminders.database().load_all().expect("load").is_empty());
        assert!(reminders.view().get("Gym").is_none());
        clock.advance(Duration::hours(2));
        assert!(reminders.tick().is_empty());

        assert!(!reminders.delete("Gym"));
    }

    #[test]
    fn upsert_keeps_one_record_one_entry_and_one_alert() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(at(9, 0, 0));
        let mut reminders = start(&dir, &clock);

        reminders
            .set_notification(ReminderInput::new("Call", Some("first".into()), ten_o_clock()))
            .expect("first");
        let latest = reminders
            .set_notification(ReminderInput::new(
                "Call",
                Some("second".into()),
                TaskTime::new(2031, 3, 14, 11, 0),
            ))
            .expect("second");

        assert_eq!(reminders.database().load_all().expect("load"), vec![latest]);
        assert_eq!(reminders.view().len(), 1);
        assert_eq!(reminders.scheduler().len(), 1);

        clock.set(at(10, 30, 0));
        assert!(reminders.tick().is_empty());
        clock.set(at(11, 0, 0));
        assert_eq!(reminders.tick().len(), 1);
    }

    #[test]
    fn restart_hydrates_without_arming_timers() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(at(9, 0, 0));
        {
            let mut reminders = start(&dir, &clock);
            reminders
                .set_notification(ReminderInput::new("Water plants", None, ten_o_clock()))
                .expect("scheduled");
            reminders
                .set_notification(ReminderInput::new("Answer mail", None, ten_o_clock()))
                .expect("scheduled");
        }

        let mut restarted = start(&dir, &clock);
        let titles: Vec<&str> = restarted.view().entries().iter().map(|e| e.title()).collect();
        assert_eq!(titles, vec!["Answer mail", "Water plants"]);
        assert!(restarted.scheduler().is_empty());

        clock.set(at(12, 0, 0));
        assert!(restarted.tick().is_empty());
        assert!(restarted
            .view()
            .entries()
            .iter()
            .all(|e| e.state() == EntryState::Pending));
    }

    #[test]
    fn toggle_done_is_visual_only() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(at(9, 0, 0));
        let mut reminders = start(&dir, &clock);
        reminders
            .set_notification(ReminderInput::new("Read", None, ten_o_clock()))
            .expect("scheduled");

        assert!(reminders.toggle_done("Read"));
        assert_eq!(
            reminders.view().get("Read").map(|e| e.state()),
            Some(EntryState::Done)
        );
        assert!(!reminders.toggle_done("Missing"));

        let restarted = start(&dir, &clock);
        assert_eq!(
            restarted.view().get("Read").map(|e| e.state()),
            Some(EntryState::Pending)
        );
    }

    #[test]
    fn picker_defaults_to_clock_year() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(at(9, 0, 0));
        let reminders = start(&dir, &clock);
        assert_eq!(reminders.picker().selection(), TaskTime::new(2031, 1, 1, 0, 0));
    }
}
