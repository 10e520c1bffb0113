use std::cell::Cell;
use std::rc::Rc;

use chrono::{Duration, Local, NaiveDateTime};

use crate::model::{TaskTime, TimeError};

/// Source of the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: NaiveDateTime) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

/// Signed distance from `now` to the due moment, truncated to milliseconds.
pub fn compute_delay(now: NaiveDateTime, time: &TaskTime) -> Result<Duration, TimeError> {
    let target = time.to_naive()?;
    Ok(Duration::milliseconds(
        target.signed_duration_since(now).num_milliseconds(),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub title: String,
    pub deadline: NaiveDateTime,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    title: String,
    deadline: NaiveDateTime,
}

/// In-memory one-shot timers keyed by task title.
///
/// Timers are deadlines; the owner's event loop calls [`Scheduler::poll`] to fire the
/// ones that are due. Nothing here survives the process.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a single firing for `title` once `delay` has elapsed from `now`.
    ///
    /// Existing timers for the same title are left alone; cancel first to re-arm.
    pub fn arm(&mut self, title: &str, delay: Duration, now: NaiveDateTime) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = now + delay;
        tracing::debug!(title, %deadline, "armed reminder timer");
        self.timers.push(Timer {
            id,
            title: title.to_string(),
            deadline,
        });
        id
    }

    /// Cancel every live timer for `title`, returning how many were dropped.
    pub fn cancel(&mut self, title: &str) -> usize {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.title != title);
        let cancelled = before - self.timers.len();
        if cancelled > 0 {
            tracing::debug!(title, cancelled, "cancelled reminder timer");
        }
        cancelled
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn poll(&mut self, now: NaiveDateTime) -> Vec<Fired> {
        let (due, pending): (Vec<Timer>, Vec<Timer>) = self
            .timers
            .drain(..)
            .partition(|timer| timer.deadline <= now);
        self.timers = pending;

        let mut fired: Vec<Fired> = due
            .into_iter()
            .map(|timer| Fired {
                id: timer.id,
                title: timer.title,
                deadline: timer.deadline,
            })
            .collect();
        fired.sort_by_key(|f| (f.deadline, f.id));
        fired
    }

    pub fn is_armed(&self, title: &str) -> bool {
        self.timers.iter().any(|timer| timer.title == title)
    }

    pub fn deadline_of(&self, title: &str) -> Option<NaiveDateTime> {
        self.timers
            .iter()
            .filter(|timer| timer.title == title)
            .map(|timer| timer.deadline)
            .min()
    }

    pub fn next_deadline(&self) -> Option<NaiveDateTime> {
        self.timers.iter().map(|timer| timer.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
