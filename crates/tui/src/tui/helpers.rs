use std::cmp::min;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::Resource;

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

/// Sidebar label: kind icon, title, and the task status when there is one.
pub fn resource_label(resource: &Resource) -> String {
    let title = if resource.title.trim().is_empty() {
        "(untitled)"
    } else {
        resource.title.as_str()
    };
    match resource.task_status() {
        Some(status) => format!("{} {} [{}]", resource.kind.icon(), title, status),
        None => format!("{} {}", resource.kind.icon(), title),
    }
}

/// Rows scrolled off the top so that `line` stays inside a viewport of `height` rows.
pub fn scroll_offset(line: usize, height: u16) -> u16 {
    let height = usize::from(height.max(1));
    let offset = (line + 1).saturating_sub(height);
    u16::try_from(offset).unwrap_or(u16::MAX)
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("j / k or ↓ / ↑", "Move through the resource list"),
        ("Home / End", "Jump to first / last resource"),
        ("Enter", "Open a note, or select a link/task/file"),
        ("Tab / Shift+Tab", "Cycle filter tabs (All, Notes, Links, Tasks, Files)"),
        ("a", "New... (note, link or task)"),
        ("e", "Focus the open note"),
        ("Ctrl+S", "Save the open note"),
        ("Ctrl+D", "Delete the open note (with confirmation)"),
        ("Esc", "Leave the editor, then close the note"),
        ("r", "Reload resources"),
        ("s", "Rescan the vault"),
        ("h / ?", "Toggle this help overlay"),
        ("q / Ctrl+C", "Quit"),
    ]
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}
