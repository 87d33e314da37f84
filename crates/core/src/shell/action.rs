use crate::model::{FilterTab, NoteContent, Resource, ResourceKind};

use super::state::{CreateKind, PromptField};

/// Everything that can change the shell: user intents and gateway results.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Started,
    Rescan,
    Reload,
    SetFilter(FilterTab),
    Select { id: String, kind: ResourceKind },
    CloseEditor,
    EditTitle(String),
    EditContent(String),
    Save,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
    Create(CreateKind),
    PromptEdit(PromptField, String),
    PromptSubmit,
    PromptCancel,

    ScanFinished(Result<String, String>),
    ResourcesLoaded(Result<Vec<Resource>, String>),
    Created(CreateKind, Result<String, String>),
    NoteOpened(String, Result<NoteContent, String>),
    Saved(String, Result<(), String>),
    Deleted(String, Result<(), String>),
}

impl Action {
    /// Results coming back from the gateway, as opposed to user intents.
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Action::ScanFinished(_)
                | Action::ResourcesLoaded(_)
                | Action::Created(..)
                | Action::NoteOpened(..)
                | Action::Saved(..)
                | Action::Deleted(..)
        )
    }
}
