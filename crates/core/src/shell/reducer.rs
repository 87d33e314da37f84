use crate::model::ResourceKind;

use super::action::Action;
use super::effect::Effect;
use super::state::{CreateKind, Prompt, PromptField, PromptKind, ShellState, Status};

pub const NEW_NOTE_TITLE: &str = "New Note";

/// Apply one action. The returned effects are gateway calls the caller must run; each one
/// eventually comes back as a completion action.
pub fn reduce(mut state: ShellState, action: Action) -> (ShellState, Vec<Effect>) {
    let effects = match action {
        Action::Started | Action::Rescan => scan(&mut state),
        Action::Reload => vec![Effect::LoadResources],
        Action::SetFilter(filter) => {
            state.set_filter(filter);
            Vec::new()
        }
        Action::Select { id, kind } => select(&mut state, id, kind),
        Action::CloseEditor => {
            state.clear_selection();
            Vec::new()
        }
        Action::EditTitle(title) => {
            if let Some(editor) = state.editor_mut() {
                editor.title = title;
            }
            Vec::new()
        }
        Action::EditContent(content) => {
            if let Some(editor) = state.editor_mut() {
                editor.content = content;
            }
            Vec::new()
        }
        Action::Save => save(&mut state),
        Action::RequestDelete => {
            if let Some(id) = state.editor().map(|editor| editor.id.clone()) {
                state.set_confirm_delete(Some(id));
            }
            Vec::new()
        }
        Action::ConfirmDelete => match state.confirm_delete().map(str::to_string) {
            Some(id) => {
                state.set_confirm_delete(None);
                vec![Effect::DeleteNote { id }]
            }
            None => Vec::new(),
        },
        Action::CancelDelete => {
            if state.confirm_delete().is_some() {
                state.set_confirm_delete(None);
                state.set_status(Status::info("Deletion cancelled"));
            }
            Vec::new()
        }
        Action::Create(kind) => create(&mut state, kind),
        Action::PromptEdit(field, value) => {
            if let Some(prompt) = state.prompt_mut() {
                match field {
                    PromptField::Title => prompt.title = value,
                    PromptField::Url => prompt.url = value,
                }
            }
            Vec::new()
        }
        Action::PromptSubmit => submit_prompt(&mut state),
        Action::PromptCancel => {
            state.set_prompt(None);
            Vec::new()
        }

        Action::ScanFinished(Ok(message)) => {
            state.set_status(Status::info(message));
            vec![Effect::LoadResources]
        }
        Action::ScanFinished(Err(err)) => {
            state.set_status(Status::error(format!("Error scanning: {err}")));
            Vec::new()
        }
        Action::ResourcesLoaded(result) => {
            match result {
                Ok(resources) => {
                    tracing::debug!(count = resources.len(), "resources reloaded");
                    state.set_resources(resources);
                }
                Err(err) => {
                    state.set_status(Status::error(format!("Error loading resources: {err}")));
                }
            }
            match state.take_pending_open() {
                Some(id) => vec![Effect::OpenNote { id }],
                None => Vec::new(),
            }
        }
        Action::Created(kind, Ok(id)) => {
            if kind == CreateKind::Note {
                state.set_pending_open(id);
            }
            vec![Effect::LoadResources]
        }
        Action::Created(_, Err(err)) => {
            state.set_status(Status::error(format!("Error creating: {err}")));
            Vec::new()
        }
        Action::NoteOpened(id, Ok(note)) => {
            state.open_editor(id, note.title, note.content);
            Vec::new()
        }
        Action::NoteOpened(_, Err(err)) => {
            state.set_status(Status::error(format!("Error opening note: {err}")));
            Vec::new()
        }
        Action::Saved(_, Ok(())) => {
            state.set_status(Status::info("Saved!"));
            vec![Effect::LoadResources]
        }
        Action::Saved(_, Err(err)) => {
            state.set_status(Status::error(format!("Error saving: {err}")));
            Vec::new()
        }
        Action::Deleted(id, Ok(())) => {
            if state.selection().is_editing(&id) {
                state.clear_selection();
            }
            vec![Effect::LoadResources]
        }
        Action::Deleted(_, Err(err)) => {
            state.set_status(Status::error(format!("Error deleting: {err}")));
            Vec::new()
        }
    };

    (state, effects)
}

fn scan(state: &mut ShellState) -> Vec<Effect> {
    state.set_status(Status::info("Scanning..."));
    vec![Effect::ScanVault {
        path: state.vault_path().to_path_buf(),
    }]
}

fn select(state: &mut ShellState, id: String, kind: ResourceKind) -> Vec<Effect> {
    if kind == ResourceKind::Note {
        return vec![Effect::OpenNote { id }];
    }

    state.clear_selection();
    state.set_status(Status::info(format!("Selected {kind}: {id}")));
    Vec::new()
}

fn save(state: &mut ShellState) -> Vec<Effect> {
    let Some(editor) = state.editor().cloned() else {
        return Vec::new();
    };
    state.set_status(Status::info("Saving..."));
    vec![Effect::UpdateNote {
        id: editor.id,
        title: editor.title,
        content: editor.content,
    }]
}

fn create(state: &mut ShellState, kind: CreateKind) -> Vec<Effect> {
    match kind {
        CreateKind::Note => vec![Effect::CreateNote {
            title: NEW_NOTE_TITLE.to_string(),
            content: String::new(),
        }],
        CreateKind::Link => {
            state.set_prompt(Some(Prompt::new(PromptKind::Link)));
            Vec::new()
        }
        CreateKind::Task => {
            state.set_prompt(Some(Prompt::new(PromptKind::Task)));
            Vec::new()
        }
    }
}

fn submit_prompt(state: &mut ShellState) -> Vec<Effect> {
    let Some(prompt) = state.prompt().cloned() else {
        return Vec::new();
    };
    state.set_prompt(None);

    let title = prompt.title.trim();
    if title.is_empty() {
        return Vec::new();
    }

    match prompt.kind {
        PromptKind::Link => {
            let url = prompt.url.trim();
            if url.is_empty() {
                return Vec::new();
            }
            vec![Effect::CreateLink {
                title: title.to_string(),
                url: url.to_string(),
            }]
        }
        PromptKind::Task => vec![Effect::CreateTask {
            title: title.to_string(),
        }],
    }
}
