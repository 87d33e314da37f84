use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use rusqlite::{named_params, Connection, OptionalExtension, Row};
use ulid::Ulid;

use crate::config::AppConfig;
use crate::model::{NoteContent, Resource, ResourceKind};
use crate::scanner::VaultEntry;

/// Row data for a resource that does not exist yet.
#[derive(Debug, Clone)]
pub struct NewResource {
    pub kind: ResourceKind,
    pub title: String,
    pub path: Option<String>,
    pub content: Option<String>,
    pub extra_metadata: Option<String>,
}

impl NewResource {
    pub fn note(title: &str, path: String, content: &str) -> Self {
        Self {
            kind: ResourceKind::Note,
            title: title.to_string(),
            path: Some(path),
            content: Some(content.to_string()),
            extra_metadata: None,
        }
    }

    pub fn link(title: &str, url: &str) -> Self {
        Self {
            kind: ResourceKind::Link,
            title: title.to_string(),
            path: None,
            content: None,
            extra_metadata: Some(serde_json::json!({ "url": url }).to_string()),
        }
    }

    pub fn task(title: &str) -> Self {
        Self {
            kind: ResourceKind::Task,
            title: title.to_string(),
            path: None,
            content: None,
            extra_metadata: Some(serde_json::json!({ "status": "todo" }).to_string()),
        }
    }
}

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let conn = Connection::open(config.db_path()).with_context(|| {
            format!("Failed to open database at {}", config.db_path().display())
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to configure SQLite connection")?;

        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Insert a scanned file, or refresh the content of the row already tracking its path.
    /// Returns the id of the row.
    pub fn upsert_scanned(&self, entry: &VaultEntry, content: &str) -> Result<String> {
        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM resources WHERE path = :path LIMIT 1",
                named_params![":path": &entry.path],
                |row| row.get(0),
            )
            .optional()?;

        let id = existing.unwrap_or_else(|| Ulid::new().to_string());
        let now = timestamp();

        self.conn.execute(
            "INSERT INTO resources (id, type, path, title, content, created_at, updated_at, extra_metadata)
             VALUES (:id, :type, :path, :title, :content, :created_at, :updated_at, NULL)
             ON CONFLICT(id) DO UPDATE SET content = excluded.content, updated_at = excluded.updated_at",
            named_params![
                ":id": &id,
                ":type": entry.kind.as_str(),
                ":path": &entry.path,
                ":title": entry.title(),
                ":content": content,
                ":created_at": &now,
                ":updated_at": &now,
            ],
        )?;
        Ok(id)
    }

    pub fn insert_resource(&self, resource: &NewResource) -> Result<String> {
        let id = Ulid::new().to_string();
        let now = timestamp();

        self.conn.execute(
            "INSERT INTO resources (id, type, path, title, content, created_at, updated_at, extra_metadata)
             VALUES (:id, :type, :path, :title, :content, :created_at, :updated_at, :extra)",
            named_params![
                ":id": &id,
                ":type": resource.kind.as_str(),
                ":path": resource.path.as_deref(),
                ":title": &resource.title,
                ":content": resource.content.as_deref(),
                ":created_at": &now,
                ":updated_at": &now,
                ":extra": resource.extra_metadata.as_deref(),
            ],
        )?;
        Ok(id)
    }

    pub fn fetch_resources(&self) -> Result<Vec<Resource>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, path, title, type, extra_metadata FROM resources \
             ORDER BY updated_at DESC, rowid DESC",
        )?;
        let mut rows = stmt.query([])?;
        let mut resources = Vec::new();
        while let Some(row) = rows.next()? {
            resources.push(map_resource(row)?);
        }
        Ok(resources)
    }

    pub fn fetch_resource(&self, id: &str) -> Result<Option<Resource>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, path, title, type, extra_metadata FROM resources WHERE id = ? LIMIT 1",
        )?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(map_resource(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn fetch_note_content(&self, id: &str) -> Result<Option<NoteContent>> {
        self.conn
            .query_row(
                "SELECT title, content FROM resources WHERE id = :id",
                named_params![":id": id],
                |row| {
                    Ok(NoteContent {
                        id: id.to_string(),
                        title: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                        content: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Returns `false` when no row carries `id`.
    pub fn update_note(&self, id: &str, title: &str, content: &str) -> Result<bool> {
        let updated = self.conn.execute(
            "UPDATE resources SET title = :title, content = :content, updated_at = :updated WHERE id = :id",
            named_params![
                ":title": title,
                ":content": content,
                ":updated": timestamp(),
                ":id": id,
            ],
        )?;
        Ok(updated > 0)
    }

    /// Returns `false` when no row carries `id`.
    pub fn delete_resource(&self, id: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM resources WHERE id = :id", named_params![":id": id])?;
        Ok(affected > 0)
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS resources (
                id TEXT PRIMARY KEY,
                type TEXT NOT NULL,
                path TEXT,
                title TEXT,
                content TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                extra_metadata TEXT
             );
             CREATE TABLE IF NOT EXISTS tags (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL
             );
             CREATE TABLE IF NOT EXISTS resource_tags (
                resource_id TEXT,
                tag_id INTEGER,
                PRIMARY KEY (resource_id, tag_id),
                FOREIGN KEY(resource_id) REFERENCES resources(id) ON DELETE CASCADE,
                FOREIGN KEY(tag_id) REFERENCES tags(id) ON DELETE CASCADE
             );
             CREATE TABLE IF NOT EXISTS links (
                source_id TEXT,
                target_id TEXT,
                type TEXT,
                PRIMARY KEY (source_id, target_id),
                FOREIGN KEY(source_id) REFERENCES resources(id) ON DELETE CASCADE,
                FOREIGN KEY(target_id) REFERENCES resources(id) ON DELETE CASCADE
             );
             CREATE INDEX IF NOT EXISTS idx_resources_path ON resources(path);
             CREATE INDEX IF NOT EXISTS idx_resources_updated ON resources(updated_at);
            ",
        )?;
        Ok(())
    }
}

fn map_resource(row: &Row<'_>) -> Result<Resource> {
    Ok(Resource {
        id: row.get(0)?,
        path: row.get(1)?,
        title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        kind: row.get::<_, String>(3)?.parse()?,
        extra_metadata: row.get(4)?,
    })
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let data_dir = dir.path().to_path_buf();
        std::fs::create_dir_all(&data_dir).expect("create data dir");
        let config = AppConfig::from_data_dir(data_dir).expect("config");
        (config, dir)
    }

    fn entry(path: &str, name: &str, kind: ResourceKind) -> VaultEntry {
        VaultEntry {
            path: path.into(),
            name: name.into(),
            kind,
        }
    }

    #[test]
    fn resources_come_back_newest_first() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("init db");

        let first = db.insert_resource(&NewResource::task("Buy milk")).unwrap();
        let second = db
            .insert_resource(&NewResource::link("Rust", "https://rust-lang.org"))
            .unwrap();
        let third = db.insert_resource(&NewResource::task("Call mum")).unwrap();

        let ids: Vec<String> = db
            .fetch_resources()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![third, second, first]);
    }

    #[test]
    fn link_and_task_rows_carry_metadata() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("init db");

        let link = db
            .insert_resource(&NewResource::link("Rust", "https://rust-lang.org"))
            .unwrap();
        let task = db.insert_resource(&NewResource::task("Buy milk")).unwrap();

        let link = db.fetch_resource(&link).unwrap().unwrap();
        assert_eq!(link.kind, ResourceKind::Link);
        assert_eq!(link.link_url().as_deref(), Some("https://rust-lang.org"));

        let task = db.fetch_resource(&task).unwrap().unwrap();
        assert_eq!(task.task_status().as_deref(), Some("todo"));
        assert_eq!(task.path, None);
    }

    #[test]
    fn rescanning_a_path_keeps_its_id() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("init db");
        let scanned = entry("/vault/ideas.md", "ideas.md", ResourceKind::Note);

        let first = db.upsert_scanned(&scanned, "v1").unwrap();
        let second = db.upsert_scanned(&scanned, "v2").unwrap();

        assert_eq!(first, second);
        assert_eq!(db.fetch_resources().unwrap().len(), 1);
        let note = db.fetch_note_content(&first).unwrap().unwrap();
        assert_eq!(note.title, "ideas");
        assert_eq!(note.content, "v2");
    }

    #[test]
    fn update_and_delete_report_missing_rows() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("init db");
        let id = db
            .insert_resource(&NewResource::note("Draft", "/vault/Draft.md".into(), ""))
            .unwrap();

        assert!(db.update_note(&id, "Final", "body").unwrap());
        assert!(!db.update_note("missing", "x", "y").unwrap());

        let note = db.fetch_note_content(&id).unwrap().unwrap();
        assert_eq!(
            note,
            NoteContent {
                id: id.clone(),
                title: "Final".into(),
                content: "body".into(),
            }
        );

        assert!(db.delete_resource(&id).unwrap());
        assert!(!db.delete_resource(&id).unwrap());
        assert!(db.fetch_note_content(&id).unwrap().is_none());
    }
}
