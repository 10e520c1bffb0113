use std::cmp::min;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::view::{Entry, EntryState};

pub const BG_BASE: Color = Color::Rgb(14, 17, 23);
pub const BG_PANEL: Color = Color::Rgb(22, 26, 34);
pub const BG_ACCENT: Color = Color::Rgb(32, 37, 47);
pub const FG_ACCENT: Color = Color::Rgb(120, 161, 255);

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn inset_rect(area: Rect, padding: u16) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let px = padding.min(area.width / 2);
    let py = padding.min(area.height / 2);
    Rect {
        x: area.x + px,
        y: area.y + py,
        width: area.width.saturating_sub(px * 2),
        height: area.height.saturating_sub(py * 2),
    }
}

pub fn state_label(state: EntryState) -> &'static str {
    match state {
        EntryState::Pending => "⏳ pending",
        EntryState::Expired => "🔔 expired",
        EntryState::Done => "✅ done",
    }
}

/// Row style for an entry: done is struck through, expired is red.
pub fn entry_style(entry: &Entry) -> Style {
    match entry.state() {
        EntryState::Done => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
        EntryState::Expired => Style::default().fg(Color::Red),
        EntryState::Pending => Style::default(),
    }
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("j / k or ↓ / ↑", "Move selection"),
        ("a", "Compose a new reminder"),
        ("d / Space", "Toggle done (display only)"),
        ("x / Delete", "Delete reminder (with confirmation)"),
        ("Tab / Shift+Tab", "Move focus while composing"),
        ("↑ / ↓ (in picker)", "Change hour, minute, year, month or day"),
        ("Enter", "Save reminder / dismiss alert"),
        ("h", "Toggle this help overlay"),
        ("q / Ctrl+C", "Quit"),
        ("Esc", "Cancel/close overlays"),
    ]
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}
