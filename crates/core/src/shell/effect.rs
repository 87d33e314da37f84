use std::path::PathBuf;

use crate::gateway::CommandGateway;

use super::action::Action;
use super::state::CreateKind;

/// One gateway call requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScanVault { path: PathBuf },
    LoadResources,
    CreateNote { title: String, content: String },
    CreateLink { title: String, url: String },
    CreateTask { title: String },
    OpenNote { id: String },
    UpdateNote { id: String, title: String, content: String },
    DeleteNote { id: String },
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::ScanVault { .. } => "scan_vault",
            Effect::LoadResources => "get_all_resources",
            Effect::CreateNote { .. } => "create_note",
            Effect::CreateLink { .. } => "create_link",
            Effect::CreateTask { .. } => "create_task",
            Effect::OpenNote { .. } => "get_note_content",
            Effect::UpdateNote { .. } => "update_note",
            Effect::DeleteNote { .. } => "delete_note",
        }
    }
}

/// Run `effect` against `gateway` and fold the outcome into the action that reports it.
pub async fn perform(gateway: &dyn CommandGateway, effect: Effect) -> Action {
    let name = effect.name();
    let action = match effect {
        Effect::ScanVault { path } => {
            Action::ScanFinished(gateway.scan_vault(path).await.map_err(|e| e.to_string()))
        }
        Effect::LoadResources => Action::ResourcesLoaded(
            gateway
                .get_all_resources()
                .await
                .map_err(|e| e.to_string()),
        ),
        Effect::CreateNote { title, content } => Action::Created(
            CreateKind::Note,
            gateway
                .create_note(title, content)
                .await
                .map_err(|e| e.to_string()),
        ),
        Effect::CreateLink { title, url } => Action::Created(
            CreateKind::Link,
            gateway
                .create_link(title, url)
                .await
                .map_err(|e| e.to_string()),
        ),
        Effect::CreateTask { title } => Action::Created(
            CreateKind::Task,
            gateway.create_task(title).await.map_err(|e| e.to_string()),
        ),
        Effect::OpenNote { id } => {
            let result = gateway
                .get_note_content(id.clone())
                .await
                .map_err(|e| e.to_string());
            Action::NoteOpened(id, result)
        }
        Effect::UpdateNote { id, title, content } => {
            let result = gateway
                .update_note(id.clone(), title, content)
                .await
                .map_err(|e| e.to_string());
            Action::Saved(id, result)
        }
        Effect::DeleteNote { id } => {
            let result = gateway
                .delete_note(id.clone())
                .await
                .map_err(|e| e.to_string());
            Action::Deleted(id, result)
        }
    };

    if let Some(err) = failure(&action) {
        tracing::debug!(command = name, error = err, "gateway call rejected");
    } else {
        tracing::debug!(command = name, "gateway call finished");
    }
    action
}

fn failure(action: &Action) -> Option<&str> {
    match action {
        Action::ScanFinished(Err(err))
        | Action::ResourcesLoaded(Err(err))
        | Action::Created(_, Err(err))
        | Action::NoteOpened(_, Err(err))
        | Action::Saved(_, Err(err))
        | Action::Deleted(_, Err(err)) => Some(err.as_str()),
        _ => None,
    }
}
