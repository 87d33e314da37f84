//! Asynchronous command surface consumed by the shell, plus the in-process implementation
//! backed by [`VaultService`].

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{NoteContent, Resource};
use crate::services::VaultService;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend ran the command and refused it.
    #[error("{0}")]
    Rejected(String),
    /// The worker running the command never reported back.
    #[error("backend worker failed: {0}")]
    Worker(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// The eight commands the shell may issue. Calls are independent; nothing sequences them.
#[async_trait]
pub trait CommandGateway: Send + Sync {
    async fn scan_vault(&self, path: PathBuf) -> GatewayResult<String>;
    async fn get_all_resources(&self) -> GatewayResult<Vec<Resource>>;
    async fn create_note(&self, title: String, content: String) -> GatewayResult<String>;
    async fn create_link(&self, title: String, url: String) -> GatewayResult<String>;
    async fn create_task(&self, title: String) -> GatewayResult<String>;
    async fn get_note_content(&self, id: String) -> GatewayResult<NoteContent>;
    async fn update_note(&self, id: String, title: String, content: String)
        -> GatewayResult<()>;
    async fn delete_note(&self, id: String) -> GatewayResult<()>;
}

#[derive(Debug, Clone)]
pub struct LocalGateway {
    service: Arc<VaultService>,
}

impl LocalGateway {
    pub fn new(service: VaultService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> &VaultService {
        &self.service
    }

    async fn with_service<T, F>(&self, f: F) -> GatewayResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&VaultService) -> anyhow::Result<T> + Send + 'static,
    {
        let service = Arc::clone(&self.service);
        tokio::task::spawn_blocking(move || f(service.as_ref()))
            .await
            .map_err(|err| GatewayError::Worker(err.to_string()))?
            .map_err(|err| GatewayError::Rejected(format!("{err:#}")))
    }
}

#[async_trait]
impl CommandGateway for LocalGateway {
    async fn scan_vault(&self, path: PathBuf) -> GatewayResult<String> {
        self.with_service(move |service| service.scan_vault(&path))
            .await
    }

    async fn get_all_resources(&self) -> GatewayResult<Vec<Resource>> {
        self.with_service(|service| service.list_resources()).await
    }

    async fn create_note(&self, title: String, content: String) -> GatewayResult<String> {
        self.with_service(move |service| service.create_note(&title, &content))
            .await
    }

    async fn create_link(&self, title: String, url: String) -> GatewayResult<String> {
        self.with_service(move |service| service.create_link(&title, &url))
            .await
    }

    async fn create_task(&self, title: String) -> GatewayResult<String> {
        self.with_service(move |service| service.create_task(&title))
            .await
    }

    async fn get_note_content(&self, id: String) -> GatewayResult<NoteContent> {
        self.with_service(move |service| service.note_content(&id))
            .await
    }

    async fn update_note(
        &self,
        id: String,
        title: String,
        content: String,
    ) -> GatewayResult<()> {
        self.with_service(move |service| service.update_note(&id, &title, &content))
            .await
    }

    async fn delete_note(&self, id: String) -> GatewayResult<()> {
        self.with_service(move |service| service.delete_note(&id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::model::ResourceKind;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn test_gateway() -> (LocalGateway, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        let service = VaultService::new(config).expect("service");
        (LocalGateway::new(service), dir)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn note_lifecycle_through_gateway() {
        let (gateway, _dir) = test_gateway();

        let id = gateway
            .create_note("New Note".into(), String::new())
            .await
            .unwrap();
        gateway
            .update_note(id.clone(), "Plans".into(), "ship it".into())
            .await
            .unwrap();

        let note = gateway.get_note_content(id.clone()).await.unwrap();
        assert_eq!(note.title, "Plans");
        assert_eq!(note.content, "ship it");

        gateway.delete_note(id.clone()).await.unwrap();
        let err = gateway.get_note_content(id).await.unwrap_err();
        assert_eq!(err, GatewayError::Rejected("Note not found".into()));
        assert_eq!(err.to_string(), "Note not found");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn scan_then_list_reports_vault_files() {
        let (gateway, _dir) = test_gateway();
        let vault = gateway.service().config().vault_dir().to_path_buf();
        std::fs::write(vault.join("todo.md"), "- [ ] write").unwrap();

        let message = gateway.scan_vault(vault).await.unwrap();
        assert_eq!(message, "Scanned 1 files");

        gateway.create_task("Water plants".into()).await.unwrap();
        let kinds: Vec<ResourceKind> = gateway
            .get_all_resources()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(kinds, vec![ResourceKind::Task, ResourceKind::Note]);
    }
}
