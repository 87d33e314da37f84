use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::model::{FilterTab, ResourceKind};
use crate::shell::dashboard::{self, KindCounts};
use crate::shell::{CreateKind, PromptField, PromptKind, StatusKind};
use crate::tui::constants::{
    APP_VERSION, ASIDE_WIDTH, HINT_CONFIRM, HINT_EDITOR, HINT_FORM, HINT_HELP, HINT_PICKER,
    HINT_SIDEBAR, HINT_SIDEBAR_EDITING, SIDEBAR_WIDTH,
};
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, inset_rect, resource_label, scroll_offset,
    BG_ACCENT, BG_BASE, BG_PANEL, FG_ACCENT,
};

use super::{App, ConfirmChoice, Focus, Overlay};

fn panel(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(FG_ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(accent_title(title))
        .border_style(border)
        .style(Style::default().bg(BG_PANEL))
}

fn section_heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_owned(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, rows[0]);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(SIDEBAR_WIDTH),
                Constraint::Min(20),
                Constraint::Length(ASIDE_WIDTH),
            ])
            .split(rows[1]);

        self.draw_sidebar(f, panes[0]);
        if self.shell.editor().is_some() {
            self.draw_editor(f, panes[1]);
        } else {
            self.draw_dashboard(f, panes[1]);
        }
        self.draw_aside(f, panes[2]);
        self.draw_footer(f, rows[2]);

        if self.shell.confirm_delete().is_some() {
            self.draw_confirm_overlay(f, size);
        } else if self.shell.prompt().is_some() {
            self.draw_form_overlay(f, size);
        } else if let Overlay::Picker(index) = self.overlay {
            self.draw_picker_overlay(f, size, index);
        } else if self.overlay == Overlay::Help {
            self.draw_help_overlay(f, size);
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(area);

        let left = Line::from(vec![
            Span::styled(
                format!(" 🧠 brain v{} ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("📂 {}", self.shell.vault_path().display()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(left).style(Style::default().bg(BG_BASE)),
            cols[0],
        );

        let right = if self.in_flight > 0 {
            Span::styled(
                format!("⟳ {} in flight ", self.in_flight),
                Style::default().fg(Color::Yellow),
            )
        } else {
            Span::styled("idle ", Style::default().fg(Color::DarkGray))
        };
        f.render_widget(
            Paragraph::new(Line::from(right))
                .alignment(Alignment::Right)
                .style(Style::default().bg(BG_BASE)),
            cols[1],
        );
    }

    fn draw_sidebar(&mut self, f: &mut Frame<'_>, area: Rect) {
        let block = panel("Universal Brain", self.focus == Focus::Sidebar);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        let titles: Vec<Line> = FilterTab::ALL
            .iter()
            .map(|tab| Line::from(tab.label()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.shell.filter().position())
            .divider("│")
            .padding("", "")
            .highlight_style(
                Style::default()
                    .fg(Color::Green)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, parts[0]);

        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("+ New...", Style::default().fg(FG_ACCENT)),
                Span::styled(" (a)", Style::default().fg(Color::DarkGray)),
            ])),
            parts[1],
        );

        let open_id = self.shell.editor().map(|editor| editor.id.clone());
        let items: Vec<ListItem> = self
            .visible()
            .into_iter()
            .map(|resource| {
                let style = if open_id.as_deref() == Some(resource.id.as_str()) {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(resource_label(resource)).style(style)
            })
            .collect();

        if items.is_empty() {
            f.render_widget(
                Paragraph::new(Span::styled(
                    "Nothing here yet",
                    Style::default().fg(Color::DarkGray),
                )),
                parts[3],
            );
            return;
        }

        let highlight = if self.focus == Focus::Sidebar {
            Style::default().bg(BG_ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(BG_ACCENT)
        };
        let list = List::new(items)
            .highlight_style(highlight)
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, parts[3], &mut self.list_state);
    }

    fn draw_editor(&self, f: &mut Frame<'_>, area: Rect) {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let title_block = panel("Title", self.focus == Focus::Title);
        let title_inner = title_block.inner(parts[0]);
        f.render_widget(
            Paragraph::new(self.title.as_str()).block(title_block),
            parts[0],
        );

        let content_block = panel("Content", self.focus == Focus::Content);
        let content_inner = content_block.inner(parts[1]);
        let (line, col) = self.content.cursor_line_col();
        let offset = scroll_offset(line, content_inner.height);
        f.render_widget(
            Paragraph::new(self.content.as_str())
                .block(content_block)
                .scroll((offset, 0)),
            parts[1],
        );

        f.render_widget(
            Paragraph::new(Span::styled(
                "💾 Save (Ctrl+S)   🗑 Delete (Ctrl+D)",
                Style::default().fg(Color::DarkGray),
            )),
            parts[2],
        );

        match self.focus {
            Focus::Title => {
                let (_, col) = self.title.cursor_line_col();
                set_cursor(f, title_inner, 0, col);
            }
            Focus::Content => {
                set_cursor(f, content_inner, line - usize::from(offset), col);
            }
            Focus::Sidebar => {}
        }
    }

    fn draw_dashboard(&self, f: &mut Frame<'_>, area: Rect) {
        let block = panel("Dashboard", false);
        let inner = inset_rect(block.inner(area), 1);
        f.render_widget(block, area);

        let resources = self.shell.resources();
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(inner);

        let welcome = vec![
            Line::from(Span::styled(
                "Welcome to your Universal Brain",
                Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(dashboard::welcome_message(resources)),
        ];
        f.render_widget(
            Paragraph::new(welcome)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            parts[0],
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(parts[1]);

        let mut tasks = vec![section_heading("☑️ Recent Tasks")];
        let recent = dashboard::recent_tasks(resources);
        if recent.is_empty() {
            tasks.push(Line::from(Span::styled(
                "No tasks yet",
                Style::default().fg(Color::DarkGray),
            )));
        }
        tasks.extend(recent.into_iter().map(|task| Line::from(resource_label(task))));
        f.render_widget(
            Paragraph::new(tasks).wrap(Wrap { trim: true }),
            columns[0],
        );

        let mut links = vec![section_heading("🔗 Quick Links")];
        let quick = dashboard::quick_links(resources);
        if quick.is_empty() {
            links.push(Line::from(Span::styled(
                "No links yet",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for link in quick {
            links.push(Line::from(link.title.to_string()));
            links.push(Line::from(Span::styled(
                format!("  {}", link.href),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            )));
        }
        f.render_widget(
            Paragraph::new(links).wrap(Wrap { trim: true }),
            columns[1],
        );
    }

    fn draw_aside(&self, f: &mut Frame<'_>, area: Rect) {
        let block = panel("Analysis", false);
        let inner = inset_rect(block.inner(area), 1);
        f.render_widget(block, area);

        let counts = KindCounts::tally(self.shell.resources());
        let row = |kind: ResourceKind, label: &str, count: usize| {
            Line::from(vec![
                Span::raw(format!("{} {:<7}", kind.icon(), label)),
                Span::styled(
                    count.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
        };
        let lines = vec![
            row(ResourceKind::Note, "Notes", counts.notes),
            row(ResourceKind::File, "Files", counts.files),
            row(ResourceKind::Link, "Links", counts.links),
            row(ResourceKind::Task, "Tasks", counts.tasks),
            Line::default(),
            Line::from(Span::styled(
                format!("Total {}", counts.total()),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let status = match self.shell.status() {
            Some(status) => {
                let style = match status.kind {
                    StatusKind::Info => Style::default().fg(Color::Cyan),
                    StatusKind::Error => Style::default().fg(Color::Red),
                };
                Line::from(Span::styled(format!(" {}", status.message), style))
            }
            None => Line::default(),
        };

        let hint = if self.shell.confirm_delete().is_some() {
            HINT_CONFIRM
        } else if self.shell.prompt().is_some() {
            HINT_FORM
        } else {
            match (self.overlay, self.focus) {
                (Overlay::Picker(_), _) => HINT_PICKER,
                (Overlay::Help, _) => HINT_HELP,
                (Overlay::None, Focus::Sidebar) if self.shell.editor().is_some() => {
                    HINT_SIDEBAR_EDITING
                }
                (Overlay::None, Focus::Sidebar) => HINT_SIDEBAR,
                (Overlay::None, _) => HINT_EDITOR,
            }
        };

        let lines = vec![
            status,
            Line::from(Span::styled(
                format!(" {hint}"),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines).style(Style::default().bg(BG_BASE)),
            area,
        );
    }

    fn draw_picker_overlay(&self, f: &mut Frame<'_>, area: Rect, index: usize) {
        let popup = centered_rect(28, CreateKind::ALL.len() as u16 + 2, area);
        f.render_widget(Clear, popup);

        let icons = [ResourceKind::Note, ResourceKind::Link, ResourceKind::Task];
        let lines: Vec<Line> = CreateKind::ALL
            .iter()
            .zip(icons)
            .enumerate()
            .map(|(idx, (kind, icon))| {
                let style = if idx == index {
                    Style::default()
                        .fg(Color::Green)
                        .bg(BG_ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(
                    format!(" {} {}", icon.icon(), kind.label()),
                    style,
                ))
            })
            .collect();

        f.render_widget(
            Paragraph::new(lines).block(panel("+ New...", true)),
            popup,
        );
    }

    fn draw_form_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let (Some(prompt), Some(form)) = (self.shell.prompt(), self.form.as_ref()) else {
            return;
        };
        let fields = prompt.fields();
        let title = match prompt.kind {
            PromptKind::Link => "🔗 New Link",
            PromptKind::Task => "☑️ New Task",
        };

        let width = min(area.width.saturating_sub(10), 70).max(30);
        let height = fields.len() as u16 * 3 + 2;
        let popup = centered_rect(width, height, area);
        f.render_widget(Clear, popup);

        let block = panel(title, true);
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(3); fields.len()])
            .split(inner);

        let active = form.field.min(fields.len() - 1);
        for (idx, field) in fields.iter().enumerate() {
            let label = match field {
                PromptField::Title => match prompt.kind {
                    PromptKind::Link => "Link title",
                    PromptKind::Task => "Task",
                },
                PromptField::Url => "URL",
            };
            let field_block = Block::default()
                .borders(Borders::ALL)
                .title(label)
                .border_style(if idx == active {
                    Style::default().fg(FG_ACCENT)
                } else {
                    Style::default().fg(Color::DarkGray)
                });
            let field_inner = field_block.inner(rows[idx]);
            let buffer = form.buffer(*field);
            f.render_widget(
                Paragraph::new(buffer.as_str()).block(field_block),
                rows[idx],
            );
            if idx == active {
                let (_, col) = buffer.cursor_line_col();
                set_cursor(f, field_inner, 0, col);
            }
        }
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 80);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2)).max(10);
        let popup = centered_rect(width, height, area);
        f.render_widget(Clear, popup);

        let block = panel("⌨️ Keyboard Reference", true);
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let help_lines: Vec<Line> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Line::from(vec![
                    Span::styled(format!("{combo:<16}"), Style::default().fg(Color::Cyan)),
                    Span::raw(desc),
                ])
            })
            .collect();

        f.render_widget(
            Paragraph::new(help_lines).wrap(Wrap { trim: true }),
            inset_rect(inner, 1),
        );
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(20), 60).max(40);
        let popup = centered_rect(width, 8, area);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("🗑 Confirm Deletion"))
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let note_title = self
            .shell
            .editor()
            .map(|editor| editor.title.as_str())
            .filter(|title| !title.trim().is_empty())
            .unwrap_or("this note");

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
            Line::from(Span::styled(
                "This removes the note file from the vault.",
                Style::default().fg(Color::Red),
            )),
            Line::from(format!("Delete '{}'?", note_title)),
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
                .alignment(Alignment::Center),
            inset_rect(inner, 1),
        );
    }
}

fn set_cursor(f: &mut Frame<'_>, area: Rect, line: usize, col: usize) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let x = area.x + min(col, usize::from(area.width - 1)) as u16;
    let y = area.y + min(line, usize::from(area.height - 1)) as u16;
    f.set_cursor(x, y);
}
