use std::collections::VecDeque;
use std::time::Instant;

use ratatui::style::{Color, Style};
use ratatui::widgets::TableState;

use super::constants::*;
use super::form::ComposeForm;
use crate::config::AppConfig;
use crate::core::scheduler::{Clock, SystemClock};
use crate::core::services::{Alert, Reminders};

mod input;
mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Compose,
    Alert,
    Help,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

/// Blocking message shown in the alert overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Notice {
    Due(Alert),
    Invalid(String),
}

impl Notice {
    fn heading(&self) -> &'static str {
        match self {
            Notice::Due(_) => "🔔 Reminder",
            Notice::Invalid(_) => "⚠️ Cannot schedule",
        }
    }

    fn message(&self) -> &str {
        match self {
            Notice::Due(alert) => &alert.message,
            Notice::Invalid(message) => message,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

pub(crate) struct App<C: Clock = SystemClock> {
    config: AppConfig,
    reminders: Reminders<C>,
    first_run: bool,
    selected: usize,
    table_state: TableState,
    input_mode: InputMode,
    resume_mode: InputMode,
    form: ComposeForm,
    notices: VecDeque<Notice>,
    status: Option<StatusMessage>,
    confirm_choice: ConfirmChoice,
    should_quit: bool,
}

impl<C: Clock> App<C> {
    pub(crate) fn new(config: AppConfig, reminders: Reminders<C>, first_run: bool) -> Self {
        let form = ComposeForm::new(reminders.current_year());
        let mut app = Self {
            config,
            reminders,
            first_run,
            selected: 0,
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            resume_mode: InputMode::Normal,
            form,
            notices: VecDeque::new(),
            status: None,
            confirm_choice: ConfirmChoice::No,
            should_quit: false,
        };
        app.sync_selection();
        app
    }

    /// Expire stale status text and surface reminders that came due.
    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }

        for alert in self.reminders.tick() {
            self.push_notice(Notice::Due(alert));
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn sync_selection(&mut self) {
        let len = self.reminders.view().len();
        if len == 0 {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_next(&mut self) {
        let len = self.reminders.view().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.table_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.reminders.view().is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        self.table_state.select(Some(self.selected));
    }

    fn select_title(&mut self, title: &str) {
        if let Some(idx) = self
            .reminders
            .view()
            .entries()
            .iter()
            .position(|entry| entry.title() == title)
        {
            self.selected = idx;
            self.table_state.select(Some(idx));
        }
    }

    fn selected_title(&self) -> Option<String> {
        self.reminders
            .view()
            .entries()
            .get(self.selected)
            .map(|entry| entry.title().to_string())
    }

    fn start_compose(&mut self) {
        self.input_mode = InputMode::Compose;
        self.set_status_info(STATUS_COMPOSE);
    }

    fn cancel_compose(&mut self) {
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    fn submit_compose(&mut self) {
        match self.reminders.set_notification(self.form.to_input()) {
            Ok(task) => {
                self.form.reset(self.reminders.current_year());
                self.input_mode = InputMode::Normal;
                self.first_run = false;
                self.sync_selection();
                self.select_title(&task.title);
                self.set_status_info(format!("Scheduled '{}' for {}", task.title, task.time));
            }
            Err(err) => {
                tracing::debug!(error = %err, "rejected reminder");
                self.push_notice(Notice::Invalid(err.to_string()));
            }
        }
    }

    fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
        if self.input_mode != InputMode::Alert {
            self.resume_mode = self.input_mode;
            self.input_mode = InputMode::Alert;
        }
    }

    fn dismiss_notice(&mut self) {
        self.notices.pop_front();
        if self.notices.is_empty() {
            self.input_mode = self.resume_mode;
        }
    }

    fn toggle_done(&mut self) {
        let Some(title) = self.selected_title() else {
            self.set_status_info("Nothing to mark done");
            return;
        };
        if self.reminders.toggle_done(&title) {
            self.set_status_info(format!("Toggled '{}'", title));
        }
    }

    fn show_help_overlay(&mut self) {
        self.input_mode = InputMode::Help;
        self.set_status_info(STATUS_HELP);
    }

    fn prompt_delete(&mut self) {
        if self.reminders.view().is_empty() {
            self.set_status_info("Nothing to delete");
            return;
        }
        self.confirm_choice = ConfirmChoice::No;
        self.input_mode = InputMode::ConfirmDelete;
        self.set_status_info(STATUS_CONFIRM_DELETE);
    }

    fn perform_delete(&mut self) {
        let Some(title) = self.selected_title() else {
            self.set_status_info("Nothing to delete");
            return;
        };
        if self.reminders.delete(&title) {
            self.set_status_info("Deleted reminder 🗑️");
        } else {
            self.set_status_error("Reminder not found");
        }
        self.sync_selection();
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }
}
