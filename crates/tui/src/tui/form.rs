use crate::capture::ReminderInput;
use crate::core::picker::{DateTimePicker, PickerField};

use super::buffer::TextBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Title,
    Description,
    Picker(PickerField),
}

impl FormField {
    const ORDER: [FormField; 7] = [
        FormField::Title,
        FormField::Description,
        FormField::Picker(PickerField::Hours),
        FormField::Picker(PickerField::Minutes),
        FormField::Picker(PickerField::Year),
        FormField::Picker(PickerField::Month),
        FormField::Picker(PickerField::Day),
    ];
}

/// Controls of the compose overlay: two text inputs and the five selectors.
#[derive(Debug, Clone)]
pub(crate) struct ComposeForm {
    title: TextBuffer,
    description: TextBuffer,
    picker: DateTimePicker,
    focus: usize,
}

impl ComposeForm {
    pub(crate) fn new(current_year: i32) -> Self {
        Self {
            title: TextBuffer::new(),
            description: TextBuffer::new(),
            picker: DateTimePicker::new(current_year),
            focus: 0,
        }
    }

    pub(crate) fn focus(&self) -> FormField {
        FormField::ORDER[self.focus]
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FormField::ORDER.len();
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focus = (self.focus + FormField::ORDER.len() - 1) % FormField::ORDER.len();
    }

    pub(crate) fn title(&self) -> &TextBuffer {
        &self.title
    }

    pub(crate) fn description(&self) -> &TextBuffer {
        &self.description
    }

    pub(crate) fn picker(&self) -> &DateTimePicker {
        &self.picker
    }

    #[cfg(test)]
    pub(crate) fn picker_mut(&mut self) -> &mut DateTimePicker {
        &mut self.picker
    }

    fn focused_text(&mut self) -> Option<&mut TextBuffer> {
        match self.focus() {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Picker(_) => None,
        }
    }

    pub(crate) fn insert_char(&mut self, ch: char) {
        if let Some(buffer) = self.focused_text() {
            buffer.insert_char(ch);
        }
    }

    pub(crate) fn backspace(&mut self) {
        if let Some(buffer) = self.focused_text() {
            buffer.backspace();
        }
    }

    pub(crate) fn delete_char(&mut self) {
        if let Some(buffer) = self.focused_text() {
            buffer.delete_char();
        }
    }

    pub(crate) fn move_left(&mut self) {
        match self.focus() {
            FormField::Picker(field) => self.picker.cycle(field, -1),
            _ => {
                if let Some(buffer) = self.focused_text() {
                    buffer.move_left();
                }
            }
        }
    }

    pub(crate) fn move_right(&mut self) {
        match self.focus() {
            FormField::Picker(field) => self.picker.cycle(field, 1),
            _ => {
                if let Some(buffer) = self.focused_text() {
                    buffer.move_right();
                }
            }
        }
    }

    pub(crate) fn move_home(&mut self) {
        if let Some(buffer) = self.focused_text() {
            buffer.move_home();
        }
    }

    pub(crate) fn move_end(&mut self) {
        if let Some(buffer) = self.focused_text() {
            buffer.move_end();
        }
    }

    /// Step the focused selector; no-op while a text input has focus.
    pub(crate) fn cycle(&mut self, delta: isize) {
        if let FormField::Picker(field) = self.focus() {
            self.picker.cycle(field, delta);
        }
    }

    pub(crate) fn to_input(&self) -> ReminderInput {
        let description = self.description.as_str();
        ReminderInput::new(
            self.title.as_str(),
            (!description.trim().is_empty()).then(|| description.to_string()),
            self.picker.selection(),
        )
    }

    pub(crate) fn reset(&mut self, current_year: i32) {
        self.title.clear();
        self.description.clear();
        self.picker.reset(current_year);
        self.focus = 0;
    }
}
