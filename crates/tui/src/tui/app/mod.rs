use std::mem;
use std::path::PathBuf;
use std::sync::Arc;

use ratatui::widgets::ListState;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::buffer::TextBuffer;
use crate::core::CommandGateway;
use crate::model::Resource;
use crate::shell::{self, Action, CreateKind, Effect, PromptField, ShellState};

mod input;
mod render;
#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Sidebar,
    Title,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlay {
    None,
    Picker(usize),
    Help,
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

/// Link/task form buffers, mirrored into the shell prompt on every keystroke.
#[derive(Debug, Clone, Default)]
struct FormBuffers {
    field: usize,
    title: TextBuffer,
    url: TextBuffer,
}

impl FormBuffers {
    fn buffer_mut(&mut self, field: PromptField) -> &mut TextBuffer {
        match field {
            PromptField::Title => &mut self.title,
            PromptField::Url => &mut self.url,
        }
    }

    fn buffer(&self, field: PromptField) -> &TextBuffer {
        match field {
            PromptField::Title => &self.title,
            PromptField::Url => &self.url,
        }
    }
}

pub(crate) struct App {
    shell: ShellState,
    gateway: Arc<dyn CommandGateway>,
    runtime: Handle,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
    in_flight: usize,
    focus: Focus,
    overlay: Overlay,
    list_state: ListState,
    title: TextBuffer,
    content: TextBuffer,
    editor_generation: Option<u64>,
    form: Option<FormBuffers>,
    confirm_choice: ConfirmChoice,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(
        vault_path: PathBuf,
        gateway: Arc<dyn CommandGateway>,
        runtime: Handle,
    ) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            shell: ShellState::new(vault_path),
            gateway,
            runtime,
            tx,
            rx,
            in_flight: 0,
            focus: Focus::Sidebar,
            overlay: Overlay::None,
            list_state: ListState::default(),
            title: TextBuffer::new(),
            content: TextBuffer::new(),
            editor_generation: None,
            form: None,
            confirm_choice: ConfirmChoice::No,
            should_quit: false,
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Fold every finished gateway call into the shell.
    pub(crate) fn on_tick(&mut self) {
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
        }
    }

    pub(crate) fn dispatch(&mut self, action: Action) {
        if action.is_completion() {
            self.in_flight = self.in_flight.saturating_sub(1);
        }

        let placeholder = ShellState::new(self.shell.vault_path().to_path_buf());
        let state = mem::replace(&mut self.shell, placeholder);
        let (state, effects) = shell::reduce(state, action);
        self.shell = state;

        self.sync_editor();
        self.sync_form();
        self.clamp_cursor();

        for effect in effects {
            self.spawn(effect);
        }
    }

    fn spawn(&mut self, effect: Effect) {
        self.in_flight += 1;
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        tracing::debug!(command = effect.name(), "dispatching gateway call");
        self.runtime.spawn(async move {
            let action = shell::perform(gateway.as_ref(), effect).await;
            if tx.send(action).is_err() {
                tracing::debug!("shell closed before gateway call finished");
            }
        });
    }

    /// Reset local buffers whenever the shell opens a different editor.
    fn sync_editor(&mut self) {
        let opened = self
            .shell
            .editor()
            .filter(|editor| self.editor_generation != Some(editor.generation))
            .cloned();

        if let Some(editor) = opened {
            self.editor_generation = Some(editor.generation);
            self.title.set(editor.title);
            self.content.set(editor.content);
            self.focus = Focus::Content;
            self.select_resource(&editor.id);
        } else if self.shell.editor().is_none() && self.editor_generation.take().is_some() {
            self.title.clear();
            self.content.clear();
            self.focus = Focus::Sidebar;
        }
        if self.shell.confirm_delete().is_none() {
            self.confirm_choice = ConfirmChoice::No;
        }
    }

    fn sync_form(&mut self) {
        match (self.shell.prompt(), self.form.is_some()) {
            (Some(_), false) => self.form = Some(FormBuffers::default()),
            (None, true) => self.form = None,
            _ => {}
        }
    }

    fn visible(&self) -> Vec<&Resource> {
        self.shell.visible()
    }

    fn cursor(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(self.cursor().min(len - 1)));
        }
    }

    fn select_resource(&mut self, id: &str) {
        let position = self.visible().iter().position(|r| r.id == id);
        if let Some(idx) = position {
            self.list_state.select(Some(idx));
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let next = self.cursor().saturating_add_signed(delta).min(len - 1);
        self.list_state.select(Some(next));
    }

    fn open_current(&mut self) {
        let target = self
            .visible()
            .get(self.cursor())
            .map(|r| (r.id.clone(), r.kind));
        if let Some((id, kind)) = target {
            self.dispatch(Action::Select { id, kind });
        }
    }

    fn create(&mut self, kind: CreateKind) {
        self.overlay = Overlay::None;
        self.dispatch(Action::Create(kind));
    }
}
