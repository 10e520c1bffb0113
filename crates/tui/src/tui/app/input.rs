use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::scheduler::Clock;

use super::{App, ConfirmChoice, InputMode};

#[derive(Debug, Clone, Copy)]
pub(crate) enum NormalAction {
    Quit,
    Compose,
    ToggleDone,
    Delete,
    ShowHelp,
    SelectNext,
    SelectPrev,
}

impl NormalAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') => Some(Self::Compose),
            KeyCode::Char('d') | KeyCode::Char(' ') => Some(Self::ToggleDone),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('h') | KeyCode::Char('?') => Some(Self::ShowHelp),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            _ => None,
        }
    }
}

impl<C: Clock> App<C> {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Compose => self.handle_compose_mode(key),
            InputMode::Alert => self.handle_alert_mode(key),
            InputMode::Help => self.handle_help_mode(key),
            InputMode::ConfirmDelete => self.handle_confirm_delete_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action);
        }
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        match action {
            NormalAction::Quit => self.should_quit = true,
            NormalAction::Compose => self.start_compose(),
            NormalAction::ToggleDone => self.toggle_done(),
            NormalAction::Delete => self.prompt_delete(),
            NormalAction::ShowHelp => self.show_help_overlay(),
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
        }
    }

    fn handle_compose_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.cancel_compose(),
            KeyCode::Enter => self.submit_compose(),
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Up => self.form.cycle(-1),
            KeyCode::Down => self.form.cycle(1),
            KeyCode::Left => self.form.move_left(),
            KeyCode::Right => self.form.move_right(),
            KeyCode::Home => self.form.move_home(),
            KeyCode::End => self.form.move_end(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Delete => self.form.delete_char(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.insert_char(ch)
            }
            _ => {}
        }
    }

    fn handle_alert_mode(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.dismiss_notice();
        }
    }

    fn handle_help_mode(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('q')
        ) {
            self.input_mode = InputMode::Normal;
            self.status = None;
        }
    }

    fn handle_confirm_delete_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab | KeyCode::Char(' ') => {
                self.confirm_choice = self.confirm_choice.toggle();
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.input_mode = InputMode::Normal;
                self.perform_delete();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.set_status_info("Deletion cancelled");
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                if self.confirm_choice == ConfirmChoice::Yes {
                    self.perform_delete();
                } else {
                    self.set_status_info("Deletion cancelled");
                }
            }
            _ => {}
        }
    }
}
