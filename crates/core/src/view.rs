use crate::model::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Pending,
    Expired,
    Done,
}

impl EntryState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryState::Pending => "pending",
            EntryState::Expired => "expired",
            EntryState::Done => "done",
        }
    }
}

/// One rendered reminder. `done` and `expired` are display-only flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub task: Task,
    pub done: bool,
    pub expired: bool,
}

impl Entry {
    fn new(task: Task) -> Self {
        Self {
            task,
            done: false,
            expired: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.task.title
    }

    /// `<title> at HH:MM on DD/MM/YYYY`
    pub fn headline(&self) -> String {
        format!("{} at {}", self.task.title, self.task.time.label())
    }

    pub fn state(&self) -> EntryState {
        if self.done {
            EntryState::Done
        } else if self.expired {
            EntryState::Expired
        } else {
            EntryState::Pending
        }
    }
}

/// Ordered list of rendered reminders, addressed by title.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    entries: Vec<Entry>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `task`. A title that is already listed is replaced in place with fresh flags.
    pub fn render(&mut self, task: Task) {
        match self.position(&task.title) {
            Some(idx) => self.entries[idx] = Entry::new(task),
            None => self.entries.push(Entry::new(task)),
        }
    }

    pub fn remove(&mut self, title: &str) -> bool {
        match self.position(title) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn mark_expired(&mut self, title: &str) -> bool {
        match self.get_mut(title) {
            Some(entry) => {
                entry.expired = true;
                true
            }
            None => false,
        }
    }

    pub fn toggle_done(&mut self, title: &str) -> bool {
        match self.get_mut(title) {
            Some(entry) => {
                entry.done = !entry.done;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, title: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.task.title == title)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_mut(&mut self, title: &str) -> Option<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.task.title == title)
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.task.title == title)
    }
}
