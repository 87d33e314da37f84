use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::config::AppConfig;
use crate::database::{Database, NewResource};
use crate::model::{NoteContent, Resource, ResourceKind};
use crate::scanner;

const UNTITLED_NOTE: &str = "Untitled";

/// Synchronous backend for the command surface: SQLite for the index, the vault directory
/// for note bodies. Every call opens its own connection.
#[derive(Debug, Clone)]
pub struct VaultService {
    config: AppConfig,
}

impl VaultService {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.ensure_vault_dir()?;
        Database::initialize(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn scan_vault(&self, root: &Path) -> Result<String> {
        let db = self.open_database()?;
        let entries = scanner::scan_directory(root);

        let mut count = 0usize;
        for entry in &entries {
            let content = match entry.kind {
                ResourceKind::Note => fs::read_to_string(&entry.path).unwrap_or_else(|err| {
                    tracing::debug!(path = entry.path.as_str(), error = %err, "unreadable note");
                    String::new()
                }),
                _ => String::new(),
            };
            db.upsert_scanned(entry, &content)
                .with_context(|| format!("Failed to index {}", entry.path))?;
            count += 1;
        }

        tracing::debug!(root = %root.display(), count, "vault scan finished");
        Ok(format!("Scanned {} files", count))
    }

    pub fn list_resources(&self) -> Result<Vec<Resource>> {
        let db = self.open_database()?;
        db.fetch_resources()
    }

    pub fn create_note(&self, title: &str, content: &str) -> Result<String> {
        let path = self.free_note_path(title);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write note at {}", path.display()))?;

        let db = self.open_database()?;
        db.insert_resource(&NewResource::note(
            title,
            path.to_string_lossy().to_string(),
            content,
        ))
    }

    pub fn create_link(&self, title: &str, url: &str) -> Result<String> {
        let db = self.open_database()?;
        db.insert_resource(&NewResource::link(title, url))
    }

    pub fn create_task(&self, title: &str) -> Result<String> {
        let db = self.open_database()?;
        db.insert_resource(&NewResource::task(title))
    }

    pub fn note_content(&self, id: &str) -> Result<NoteContent> {
        let db = self.open_database()?;
        db.fetch_note_content(id)?
            .ok_or_else(|| anyhow!("Note not found"))
    }

    pub fn update_note(&self, id: &str, title: &str, content: &str) -> Result<()> {
        let db = self.open_database()?;
        let resource = db
            .fetch_resource(id)?
            .ok_or_else(|| anyhow!("Note not found"))?;

        if let Some(path) = resource.path.as_deref().filter(|p| !p.is_empty()) {
            fs::write(path, content).with_context(|| format!("Failed to write note at {path}"))?;
        }

        db.update_note(id, title, content)?;
        Ok(())
    }

    /// Deleting an id that no longer exists is not an error.
    pub fn delete_note(&self, id: &str) -> Result<()> {
        let db = self.open_database()?;
        if let Some(resource) = db.fetch_resource(id)? {
            if let Some(path) = resource.path.as_deref().filter(|p| !p.is_empty()) {
                if let Err(err) = fs::remove_file(path) {
                    tracing::debug!(path, error = %err, "note file already gone");
                }
            }
        }
        db.delete_resource(id)?;
        Ok(())
    }

    fn free_note_path(&self, title: &str) -> PathBuf {
        let stem = sanitize_file_stem(title);
        let vault = self.config.vault_dir();
        let mut candidate = vault.join(format!("{stem}.md"));
        let mut suffix = 2;
        while candidate.exists() {
            candidate = vault.join(format!("{stem} {suffix}.md"));
            suffix += 1;
        }
        candidate
    }

    fn open_database(&self) -> Result<Database> {
        Database::initialize(&self.config)
    }
}

fn sanitize_file_stem(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        UNTITLED_NOTE.to_string()
    } else {
        trimmed.to_string()
    }
}
