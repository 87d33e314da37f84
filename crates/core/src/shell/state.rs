use std::path::{Path, PathBuf};

use crate::model::{visible, FilterTab, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }
}

/// Working copy of the open note. `generation` changes every time a note is (re)opened so
/// views can tell a fresh editor from keystrokes on the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub id: String,
    pub title: String,
    pub content: String,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Editing(EditorState),
}

impl Selection {
    pub fn editor(&self) -> Option<&EditorState> {
        match self {
            Selection::Editing(editor) => Some(editor),
            Selection::Unselected => None,
        }
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editor().map(|editor| editor.id == id).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateKind {
    Note,
    Link,
    Task,
}

impl CreateKind {
    pub const ALL: [CreateKind; 3] = [CreateKind::Note, CreateKind::Link, CreateKind::Task];

    pub fn label(&self) -> &'static str {
        match self {
            CreateKind::Note => "Note",
            CreateKind::Link => "Link",
            CreateKind::Task => "Task",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Link,
    Task,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptField {
    Title,
    Url,
}

/// Creation form for links and tasks. Tasks only use the title field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub title: String,
    pub url: String,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            title: String::new(),
            url: String::new(),
        }
    }

    pub fn fields(&self) -> &'static [PromptField] {
        match self.kind {
            PromptKind::Link => &[PromptField::Title, PromptField::Url],
            PromptKind::Task => &[PromptField::Title],
        }
    }

    pub fn value(&self, field: PromptField) -> &str {
        match field {
            PromptField::Title => &self.title,
            PromptField::Url => &self.url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShellState {
    vault_path: PathBuf,
    resources: Vec<Resource>,
    filter: FilterTab,
    selection: Selection,
    status: Option<Status>,
    prompt: Option<Prompt>,
    confirm_delete: Option<String>,
    pending_open: Option<String>,
    generation: u64,
}

impl ShellState {
    pub fn new(vault_path: impl Into<PathBuf>) -> Self {
        Self {
            vault_path: vault_path.into(),
            resources: Vec::new(),
            filter: FilterTab::All,
            selection: Selection::Unselected,
            status: None,
            prompt: None,
            confirm_delete: None,
            pending_open: None,
            generation: 0,
        }
    }

    pub fn vault_path(&self) -> &Path {
        &self.vault_path
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn visible(&self) -> Vec<&Resource> {
        visible(&self.resources, self.filter)
    }

    pub fn filter(&self) -> FilterTab {
        self.filter
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn editor(&self) -> Option<&EditorState> {
        self.selection.editor()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Id of the note waiting for the user to confirm its deletion.
    pub fn confirm_delete(&self) -> Option<&str> {
        self.confirm_delete.as_deref()
    }

    pub(crate) fn set_resources(&mut self, resources: Vec<Resource>) {
        self.resources = resources;
    }

    pub(crate) fn set_filter(&mut self, filter: FilterTab) {
        self.filter = filter;
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    pub(crate) fn editor_mut(&mut self) -> Option<&mut EditorState> {
        match &mut self.selection {
            Selection::Editing(editor) => Some(editor),
            Selection::Unselected => None,
        }
    }

    pub(crate) fn open_editor(&mut self, id: String, title: String, content: String) {
        self.generation = self.generation.wrapping_add(1);
        self.selection = Selection::Editing(EditorState {
            id,
            title,
            content,
            generation: self.generation,
        });
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection = Selection::Unselected;
        self.confirm_delete = None;
    }

    pub(crate) fn prompt_mut(&mut self) -> Option<&mut Prompt> {
        self.prompt.as_mut()
    }

    pub(crate) fn set_prompt(&mut self, prompt: Option<Prompt>) {
        self.prompt = prompt;
    }

    pub(crate) fn set_confirm_delete(&mut self, id: Option<String>) {
        self.confirm_delete = id;
    }

    pub(crate) fn set_pending_open(&mut self, id: String) {
        self.pending_open = Some(id);
    }

    pub(crate) fn take_pending_open(&mut self) -> Option<String> {
        self.pending_open.take()
    }
}
