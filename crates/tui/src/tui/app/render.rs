use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::core::picker::PickerField;
use crate::core::scheduler::Clock;
use crate::tui::buffer::TextBuffer;
use crate::tui::constants::APP_VERSION;
use crate::tui::form::FormField;
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, entry_style, inset_rect, state_label, BG_ACCENT,
    BG_BASE, BG_PANEL,
};

use super::{App, ConfirmChoice, InputMode};

impl<C: Clock> App<C> {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_body(f, chunks[1]);
        self.draw_footer(f, chunks[2]);

        // Alerts stack over whatever mode raised them.
        let underlying = if self.input_mode == InputMode::Alert {
            self.resume_mode
        } else {
            self.input_mode
        };
        match underlying {
            InputMode::Compose => self.draw_compose_overlay(f, size),
            InputMode::Help => self.draw_help_overlay(f, size),
            InputMode::ConfirmDelete => self.draw_confirm_overlay(f, size),
            InputMode::Normal | InputMode::Alert => {}
        }
        if self.input_mode == InputMode::Alert {
            self.draw_alert_overlay(f, size);
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let left_line = Line::from(vec![
            Span::styled(
                format!(" nudge v{} ⏰ ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("— {} reminders", self.reminders.view().len())),
            Span::raw("  "),
            Span::styled(
                format!("💾 {}", self.config.db_path().display()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(left_line).style(Style::default().bg(BG_BASE)),
            cols[0],
        );

        let next = match self.reminders.scheduler().next_deadline() {
            Some(deadline) => format!("next alert {} ", deadline.format("%H:%M %d/%m")),
            None => String::from("no alerts armed "),
        };
        let right_para = Paragraph::new(Line::from(vec![Span::styled(
            next,
            Style::default().fg(Color::DarkGray),
        )]))
        .alignment(Alignment::Right)
        .style(Style::default().bg(BG_BASE));
        f.render_widget(right_para, cols[1]);
    }

    fn draw_body(&mut self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Reminders"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));

        if self.reminders.view().is_empty() {
            let inner = block.inner(area);
            f.render_widget(block, area);
            if inner.width == 0 || inner.height == 0 {
                return;
            }
            let lines = self.empty_state();
            let height = (lines.len() as u16).min(inner.height);
            let content_area = centered_rect(inner.width.min(60), height, inner);
            f.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: true })
                    .alignment(Alignment::Center)
                    .style(Style::default().bg(BG_PANEL)),
                content_area,
            );
            return;
        }

        let header = Row::new(vec![
            Cell::from("🔖 State"),
            Cell::from("📝 Title"),
            Cell::from("⏰ Due"),
            Cell::from("🗒 Description"),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .reminders
            .view()
            .entries()
            .iter()
            .map(|entry| {
                Row::new(vec![
                    Cell::from(state_label(entry.state())),
                    Cell::from(entry.title().to_string()),
                    Cell::from(entry.task.time.label()),
                    Cell::from(entry.task.description.clone().unwrap_or_default()),
                ])
                .style(entry_style(entry))
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Percentage(35),
            Constraint::Length(20),
            Constraint::Min(10),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(Style::default().bg(BG_ACCENT).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn empty_state(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(vec![Span::styled(
            "No reminders yet",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )])];
        if self.first_run {
            lines.push(Line::from(vec![Span::styled(
                format!("Created {}", self.config.db_path().display()),
                Style::default().fg(Color::DarkGray),
            )]));
        }
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::raw("Press "),
            Span::styled("a", Style::default().fg(Color::Cyan)),
            Span::raw(" to schedule one, "),
            Span::styled("h", Style::default().fg(Color::Cyan)),
            Span::raw(" for help."),
        ]));
        lines
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.style())])
        } else {
            Line::from(vec![Span::raw("Ready")])
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode {
            InputMode::Normal => {
                "j/k move | a add ✚ | d/space done ✅ | x delete 🗑️ | h help ❔ | q quit"
            }
            InputMode::Compose => "Tab/Shift+Tab focus • ↑/↓ change • Enter save ⏰ • Esc cancel",
            InputMode::Alert => "Enter/Esc to dismiss 🔔",
            InputMode::Help => "Enter/Esc to close ❔",
            InputMode::ConfirmDelete => "←/→ choose • Space toggle • Enter confirm • Esc cancel",
        };
        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_compose_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(10), 72);
        let popup_area = centered_rect(width, 13, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("➕ New Reminder"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let focus = self.form.focus();
        self.draw_text_input(
            f,
            rows[0],
            "Title",
            self.form.title(),
            focus == FormField::Title,
        );
        self.draw_text_input(
            f,
            rows[1],
            "Description",
            self.form.description(),
            focus == FormField::Description,
        );

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 5); 5])
            .split(rows[2]);
        for (field, col) in PickerField::ALL.iter().zip(cols.iter()) {
            let focused = focus == FormField::Picker(*field);
            let value = self.form.picker().value(*field);
            let text = if focused {
                format!("◀ {} ▶", value)
            } else {
                value.to_string()
            };
            let selector = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(input_block(field.label(), focused));
            f.render_widget(selector, *col);
        }

        if rows[3].height > 0 {
            let preview = Line::from(vec![
                Span::styled("Due ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.form.picker().selection().label()),
            ]);
            f.render_widget(Paragraph::new(preview), rows[3]);
        }
    }

    fn draw_text_input(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        label: &str,
        buffer: &TextBuffer,
        focused: bool,
    ) {
        let block = input_block(label, focused);
        let input_area = block.inner(area);
        f.render_widget(Paragraph::new(buffer.as_str()).block(block), area);
        if focused && self.input_mode == InputMode::Compose && input_area.width > 0 {
            let column = (buffer.cursor_column() as u16).min(input_area.width - 1);
            f.set_cursor(input_area.x + column, input_area.y);
        }
    }

    fn draw_alert_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(notice) = self.notices.front() else {
            return;
        };
        let width = min(area.width.saturating_sub(20), 60).max(30);
        let popup_area = centered_rect(width, 7, area);
        f.render_widget(Clear, popup_area);

        let border = match notice {
            super::Notice::Due(_) => Color::Yellow,
            super::Notice::Invalid(_) => Color::Red,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(notice.heading()))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let mut lines = vec![Line::from(vec![Span::styled(
            notice.message().to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )])];
        let pending = self.notices.len().saturating_sub(1);
        if pending > 0 {
            lines.push(Line::from(vec![Span::styled(
                format!("{} more waiting", pending),
                Style::default().fg(Color::DarkGray),
            )]));
        }
        lines.push(Line::default());
        lines.push(Line::from(vec![Span::styled(
            "  OK  ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )]));

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 80);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2)).max(8);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("⌨️ Keyboard Reference"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        if inner.width < 3 || inner.height < 3 {
            return;
        }

        let help_lines: Vec<Line> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Line::from(vec![
                    Span::styled(format!("{:<20}", combo), Style::default().fg(Color::Cyan)),
                    Span::raw(desc),
                ])
            })
            .collect();

        f.render_widget(
            Paragraph::new(help_lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(20), 60).max(40);
        let popup_area = centered_rect(width, 8, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("🗑 Confirm Deletion"))
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let title = self
            .selected_title()
            .unwrap_or_else(|| String::from("selected reminder"));

        let yes_style = if self.confirm_choice == ConfirmChoice::Yes {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };
        let no_style = if self.confirm_choice == ConfirmChoice::No {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let lines = vec![
            Line::from(vec![Span::styled(
                "The reminder and its alert are removed.",
                Style::default().fg(Color::Red),
            )]),
            Line::from(vec![Span::styled(
                format!("Delete '{}'?", title),
                Style::default().fg(Color::White),
            )]),
            Line::default(),
            Line::from(vec![
                Span::styled("  Yes  ", yes_style),
                Span::raw("    "),
                Span::styled("  No  ", no_style),
            ]),
        ];

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }
}

fn input_block(label: &str, focused: bool) -> Block<'static> {
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .title(label.to_string())
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(BG_PANEL))
}
