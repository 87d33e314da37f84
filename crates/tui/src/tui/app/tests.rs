use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tempfile::TempDir;
use tokio::runtime::{Builder, Runtime};

use super::{App, Focus, Overlay};
use crate::config::AppConfig;
use crate::core::{LocalGateway, VaultService};
use crate::model::{FilterTab, Resource, ResourceKind};
use crate::shell::{Action, Selection};
use crate::tui::helpers::{centered_rect, resource_label, scroll_offset};

struct Harness {
    app: App,
    _runtime: Runtime,
    config: AppConfig,
    _dir: TempDir,
}

fn harness() -> Harness {
    let dir = TempDir::new().expect("temp dir");
    let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
    let service = VaultService::new(config.clone()).expect("service");
    let runtime = Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("runtime");
    let app = App::new(
        config.vault_dir().to_path_buf(),
        Arc::new(LocalGateway::new(service)),
        runtime.handle().clone(),
    );
    Harness {
        app,
        _runtime: runtime,
        config,
        _dir: dir,
    }
}

/// Pump the channel until every spawned gateway call has reported back.
fn settle(app: &mut App) {
    for _ in 0..500 {
        app.on_tick();
        if app.in_flight == 0 {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("gateway calls did not finish");
}

fn press(app: &mut App, code: KeyCode) {
    app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn ctrl(app: &mut App, ch: char) {
    app.on_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn render(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 36)).expect("terminal");
    terminal.draw(|f| app.draw(f)).expect("draw");
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer.get(x, y).symbol());
        }
        out.push('\n');
    }
    out
}

fn status(app: &App) -> Option<&str> {
    app.shell.status().map(|s| s.message.as_str())
}

fn new_note(app: &mut App) {
    press(app, KeyCode::Char('a'));
    assert_eq!(app.overlay, Overlay::Picker(0));
    press(app, KeyCode::Enter);
    settle(app);
}

#[test]
fn startup_on_empty_vault_shows_welcome() {
    let mut h = harness();
    h.app.dispatch(Action::Started);
    settle(&mut h.app);

    assert_eq!(status(&h.app), Some("Scanned 0 files"));
    let screen = render(&mut h.app);
    assert!(screen.contains("Universal Brain"));
    assert!(screen.contains("Empty Vault. Create something!"));
    assert!(screen.contains("Analysis"));
    assert!(screen.contains("Scanned 0 files"));
}

#[test]
fn scan_picks_up_existing_vault_files() {
    let mut h = harness();
    std::fs::write(h.config.vault_dir().join("ideas.md"), "# Ideas").unwrap();
    std::fs::write(h.config.vault_dir().join("photo.png"), b"png").unwrap();

    h.app.dispatch(Action::Started);
    settle(&mut h.app);

    assert_eq!(h.app.shell.resources().len(), 2);
    let screen = render(&mut h.app);
    assert!(screen.contains("ideas"));
    assert!(screen.contains("photo.png"));
    assert!(screen.contains("Select an item to view."));
}

#[test]
fn new_note_opens_in_editor_and_saves_to_vault() {
    let mut h = harness();
    new_note(&mut h.app);

    let editor = h.app.shell.editor().expect("note should auto-open").clone();
    assert_eq!(editor.title, "New Note");
    assert_eq!(h.app.focus, Focus::Content);

    type_text(&mut h.app, "hello");
    press(&mut h.app, KeyCode::Enter);
    type_text(&mut h.app, "world");
    ctrl(&mut h.app, 's');
    settle(&mut h.app);

    assert_eq!(status(&h.app), Some("Saved!"));
    assert_eq!(h.app.shell.editor().map(|e| e.id.as_str()), Some(editor.id.as_str()));
    let saved = std::fs::read_to_string(h.config.vault_dir().join("New Note.md")).unwrap();
    assert_eq!(saved, "hello\nworld");
}

#[test]
fn editing_title_updates_list_after_save() {
    let mut h = harness();
    new_note(&mut h.app);

    press(&mut h.app, KeyCode::BackTab);
    assert_eq!(h.app.focus, Focus::Title);
    for _ in 0.."Note".len() {
        press(&mut h.app, KeyCode::Backspace);
    }
    type_text(&mut h.app, "Plans");
    ctrl(&mut h.app, 's');
    settle(&mut h.app);

    let titles: Vec<&str> = h
        .app
        .shell
        .resources()
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(titles, vec!["New Plans"]);
}

#[test]
fn delete_requires_confirmation() {
    let mut h = harness();
    new_note(&mut h.app);

    ctrl(&mut h.app, 'd');
    assert!(render(&mut h.app).contains("Confirm Deletion"));
    press(&mut h.app, KeyCode::Esc);
    assert_eq!(status(&h.app), Some("Deletion cancelled"));
    assert!(h.app.shell.editor().is_some());

    ctrl(&mut h.app, 'd');
    press(&mut h.app, KeyCode::Char('y'));
    settle(&mut h.app);

    assert_eq!(h.app.shell.selection(), &Selection::Unselected);
    assert!(h.app.shell.resources().is_empty());
    assert_eq!(h.app.focus, Focus::Sidebar);
    assert!(!h.config.vault_dir().join("New Note.md").exists());
}

#[test]
fn link_form_creates_quick_link() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Char('a'));
    press(&mut h.app, KeyCode::Char('l'));
    assert!(h.app.shell.prompt().is_some());

    type_text(&mut h.app, "Docs");
    press(&mut h.app, KeyCode::Enter);
    type_text(&mut h.app, "https://x.com");
    press(&mut h.app, KeyCode::Enter);
    settle(&mut h.app);

    assert!(h.app.shell.prompt().is_none());
    assert!(h.app.shell.editor().is_none());
    let screen = render(&mut h.app);
    assert!(screen.contains("Quick Links"));
    assert!(screen.contains("https://x.com"));
}

#[test]
fn empty_task_form_is_aborted_silently() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Char('a'));
    press(&mut h.app, KeyCode::Char('t'));
    type_text(&mut h.app, "   ");
    press(&mut h.app, KeyCode::Enter);

    assert_eq!(h.app.in_flight, 0);
    assert!(h.app.shell.prompt().is_none());
    assert_eq!(status(&h.app), None);
}

#[test]
fn task_shows_on_dashboard_and_filters_apply() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Char('a'));
    press(&mut h.app, KeyCode::Char('t'));
    type_text(&mut h.app, "Buy milk");
    press(&mut h.app, KeyCode::Enter);
    settle(&mut h.app);

    let screen = render(&mut h.app);
    assert!(screen.contains("Recent Tasks"));
    assert!(screen.contains("Buy milk [todo]"));

    press(&mut h.app, KeyCode::Tab);
    assert_eq!(h.app.shell.filter(), FilterTab::Only(ResourceKind::Note));
    assert!(h.app.visible().is_empty());

    press(&mut h.app, KeyCode::BackTab);
    press(&mut h.app, KeyCode::BackTab);
    assert_eq!(h.app.shell.filter(), FilterTab::Only(ResourceKind::File));
    press(&mut h.app, KeyCode::BackTab);
    assert_eq!(h.app.shell.filter(), FilterTab::Only(ResourceKind::Task));
    assert_eq!(h.app.visible().len(), 1);

    press(&mut h.app, KeyCode::Enter);
    assert!(status(&h.app).unwrap().starts_with("Selected task: "));
}

#[test]
fn escape_leaves_editor_then_closes_note() {
    let mut h = harness();
    new_note(&mut h.app);

    type_text(&mut h.app, "draft");
    press(&mut h.app, KeyCode::Esc);
    assert_eq!(h.app.focus, Focus::Sidebar);
    assert!(h.app.shell.editor().is_some());

    press(&mut h.app, KeyCode::Esc);
    assert!(h.app.shell.editor().is_none());
    assert!(h.app.content.is_empty());
}

#[test]
fn help_overlay_toggles() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Char('h'));
    assert!(render(&mut h.app).contains("Keyboard Reference"));
    press(&mut h.app, KeyCode::Esc);
    assert_eq!(h.app.overlay, Overlay::None);
    press(&mut h.app, KeyCode::Char('q'));
    assert!(h.app.should_quit());
}

#[test]
fn centered_rect_keeps_within_bounds() {
    let area = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };
    let rect = centered_rect(40, 10, area);
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (20, 7, 40, 10));
    let clipped = centered_rect(200, 50, area);
    assert_eq!((clipped.width, clipped.height), (80, 24));
}

#[test]
fn scroll_offset_follows_cursor_line() {
    assert_eq!(scroll_offset(0, 5), 0);
    assert_eq!(scroll_offset(4, 5), 0);
    assert_eq!(scroll_offset(5, 5), 1);
    assert_eq!(scroll_offset(3, 0), 3);
}

#[test]
fn resource_label_adds_task_status() {
    let task = Resource {
        id: "t".into(),
        path: None,
        title: "Buy milk".into(),
        kind: ResourceKind::Task,
        extra_metadata: Some(r#"{"status":"todo"}"#.into()),
    };
    assert_eq!(resource_label(&task), "☑️ Buy milk [todo]");

    let untitled = Resource {
        id: "n".into(),
        path: None,
        title: String::new(),
        kind: ResourceKind::Note,
        extra_metadata: None,
    };
    assert_eq!(resource_label(&untitled), "📄 (untitled)");
}
