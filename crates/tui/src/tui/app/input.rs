use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::shell::{Action, CreateKind, PromptField};

use super::super::buffer::TextBuffer;
use super::{App, ConfirmChoice, Focus, Overlay};

#[derive(Debug, Clone, Copy)]
pub(crate) enum SidebarAction {
    Quit,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    Open,
    NextFilter,
    PrevFilter,
    OpenPicker,
    FocusEditor,
    CloseEditor,
    Reload,
    Rescan,
    ShowHelp,
}

impl SidebarAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::End => Some(Self::SelectLast),
            KeyCode::Enter => Some(Self::Open),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Some(Self::NextFilter),
            KeyCode::Left | KeyCode::BackTab => Some(Self::PrevFilter),
            KeyCode::Char('a') | KeyCode::Char('+') => Some(Self::OpenPicker),
            KeyCode::Char('e') => Some(Self::FocusEditor),
            KeyCode::Esc => Some(Self::CloseEditor),
            KeyCode::Char('r') => Some(Self::Reload),
            KeyCode::Char('s') => Some(Self::Rescan),
            KeyCode::Char('h') | KeyCode::Char('?') => Some(Self::ShowHelp),
            _ => None,
        }
    }
}

/// Shared line-editing keys. Returns `true` when the buffer changed.
fn edit_buffer(buffer: &mut TextBuffer, key: &KeyEvent, multiline: bool) -> bool {
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.insert_char(ch);
            true
        }
        KeyCode::Enter if multiline => {
            buffer.insert_newline();
            true
        }
        KeyCode::Backspace => {
            buffer.backspace();
            true
        }
        KeyCode::Delete => {
            buffer.delete_char();
            true
        }
        KeyCode::Left => {
            buffer.move_left();
            false
        }
        KeyCode::Right => {
            buffer.move_right();
            false
        }
        KeyCode::Home => {
            buffer.move_home();
            false
        }
        KeyCode::End => {
            buffer.move_end();
            false
        }
        KeyCode::Up if multiline => {
            buffer.move_up();
            false
        }
        KeyCode::Down if multiline => {
            buffer.move_down();
            false
        }
        _ => false,
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c')) {
            self.should_quit = true;
            return;
        }

        if self.shell.confirm_delete().is_some() {
            self.handle_confirm_key(key);
        } else if self.shell.prompt().is_some() {
            self.handle_form_key(key);
        } else if let Overlay::Picker(index) = self.overlay {
            self.handle_picker_key(key, index);
        } else if self.overlay == Overlay::Help {
            self.handle_help_key(key);
        } else if !(ctrl && self.handle_editor_shortcut(key)) {
            match self.focus {
                Focus::Sidebar => self.handle_sidebar_key(key),
                Focus::Title => self.handle_title_key(key),
                Focus::Content => self.handle_content_key(key),
            }
        }
    }

    fn handle_editor_shortcut(&mut self, key: KeyEvent) -> bool {
        if self.shell.editor().is_none() {
            return false;
        }
        match key.code {
            KeyCode::Char('s') => {
                self.dispatch(Action::Save);
                true
            }
            KeyCode::Char('d') => {
                self.dispatch(Action::RequestDelete);
                true
            }
            _ => false,
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        let Some(action) = SidebarAction::from_event(&key) else {
            return;
        };
        match action {
            SidebarAction::Quit => self.should_quit = true,
            SidebarAction::SelectNext => self.move_cursor(1),
            SidebarAction::SelectPrev => self.move_cursor(-1),
            SidebarAction::SelectFirst => self.move_cursor(isize::MIN),
            SidebarAction::SelectLast => self.move_cursor(isize::MAX),
            SidebarAction::Open => self.open_current(),
            SidebarAction::NextFilter => self.change_filter(self.shell.filter().next()),
            SidebarAction::PrevFilter => self.change_filter(self.shell.filter().prev()),
            SidebarAction::OpenPicker => self.overlay = Overlay::Picker(0),
            SidebarAction::FocusEditor => {
                if self.shell.editor().is_some() {
                    self.focus = Focus::Content;
                }
            }
            SidebarAction::CloseEditor => {
                if self.shell.editor().is_some() {
                    self.dispatch(Action::CloseEditor);
                }
            }
            SidebarAction::Reload => self.dispatch(Action::Reload),
            SidebarAction::Rescan => self.dispatch(Action::Rescan),
            SidebarAction::ShowHelp => self.overlay = Overlay::Help,
        }
    }

    fn change_filter(&mut self, filter: crate::model::FilterTab) {
        self.list_state.select(Some(0));
        self.dispatch(Action::SetFilter(filter));
    }

    fn handle_title_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.focus = Focus::Sidebar,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Enter | KeyCode::Down => {
                self.focus = Focus::Content
            }
            _ => {
                if edit_buffer(&mut self.title, &key, false) {
                    let title = self.title.as_str().to_string();
                    self.dispatch(Action::EditTitle(title));
                }
            }
        }
    }

    fn handle_content_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.focus = Focus::Sidebar,
            KeyCode::Tab | KeyCode::BackTab => self.focus = Focus::Title,
            _ => {
                if edit_buffer(&mut self.content, &key, true) {
                    let content = self.content.as_str().to_string();
                    self.dispatch(Action::EditContent(content));
                }
            }
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent, index: usize) {
        let last = CreateKind::ALL.len() - 1;
        match key.code {
            KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.overlay = Overlay::Picker((index + 1).min(last));
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.overlay = Overlay::Picker(index.saturating_sub(1));
            }
            KeyCode::Char('n') => self.create(CreateKind::Note),
            KeyCode::Char('l') => self.create(CreateKind::Link),
            KeyCode::Char('t') => self.create(CreateKind::Task),
            KeyCode::Enter => {
                let kind = CreateKind::ALL[index.min(last)];
                self.create(kind);
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let fields = match self.shell.prompt() {
            Some(prompt) => prompt.fields(),
            None => return,
        };
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let current = form.field.min(fields.len() - 1);

        match key.code {
            KeyCode::Esc => self.dispatch(Action::PromptCancel),
            KeyCode::Tab | KeyCode::Down => form.field = (current + 1) % fields.len(),
            KeyCode::BackTab | KeyCode::Up => {
                form.field = (current + fields.len() - 1) % fields.len();
            }
            KeyCode::Enter if current + 1 < fields.len() => form.field = current + 1,
            KeyCode::Enter => self.dispatch(Action::PromptSubmit),
            _ => {
                let field: PromptField = fields[current];
                if edit_buffer(form.buffer_mut(field), &key, false) {
                    let value = form.buffer(field).as_str().to_string();
                    self.dispatch(Action::PromptEdit(field, value));
                }
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.confirm_choice = self.confirm_choice.toggle();
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => self.dispatch(Action::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.dispatch(Action::CancelDelete)
            }
            KeyCode::Enter => match self.confirm_choice {
                ConfirmChoice::Yes => self.dispatch(Action::ConfirmDelete),
                ConfirmChoice::No => self.dispatch(Action::CancelDelete),
            },
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            self.overlay = Overlay::None;
        }
    }
}
