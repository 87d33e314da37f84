use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;

static DEFAULT_DB_NAME: &str = "brain.sqlite3";
static DEFAULT_LOG_NAME: &str = "brain.log";
static DEFAULT_VAULT_NAME: &str = "vault";
static ENV_DATA_DIR: &str = "BRAIN_DATA_DIR";
static ENV_VAULT_DIR: &str = "BRAIN_VAULT_DIR";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "universal-brain", "brain"));

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    db_path: PathBuf,
    vault_dir: PathBuf,
}

impl AppConfig {
    /// Construct [`AppConfig`] by resolving the data and vault directories using the provided
    /// overrides, environment variables, and platform defaults. Both directories are created
    /// when missing.
    pub fn discover(
        data_dir_override: Option<PathBuf>,
        vault_dir_override: Option<PathBuf>,
    ) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir_override)?;
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory at {}", data_dir.display())
            })?;
        }
        let mut config = Self::from_data_dir(data_dir)?;
        if let Some(vault_dir) = resolve_vault_dir(vault_dir_override) {
            config.vault_dir = vault_dir;
        }
        config.ensure_vault_dir()?;
        Ok(config)
    }

    /// Construct [`AppConfig`] directly from a resolved data directory, with the vault nested
    /// inside it.
    pub fn from_data_dir(data_dir: PathBuf) -> Result<Self> {
        let db_path = data_dir.join(DEFAULT_DB_NAME);
        let vault_dir = data_dir.join(DEFAULT_VAULT_NAME);
        Ok(Self {
            data_dir,
            db_path,
            vault_dir,
        })
    }

    pub fn with_vault_dir(mut self, vault_dir: PathBuf) -> Self {
        self.vault_dir = vault_dir;
        self
    }

    pub fn ensure_vault_dir(&self) -> Result<()> {
        if !self.vault_dir.exists() {
            fs::create_dir_all(&self.vault_dir).with_context(|| {
                format!(
                    "Failed to create vault directory at {}",
                    self.vault_dir.display()
                )
            })?;
        }
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn vault_dir(&self) -> &Path {
        &self.vault_dir
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(DEFAULT_LOG_NAME)
    }
}

fn resolve_vault_dir(vault_dir_override: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(dir) = vault_dir_override {
        return Some(dir);
    }

    env::var(ENV_VAULT_DIR).ok().map(PathBuf::from)
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Ok(env_dir) = env::var(ENV_DATA_DIR) {
        return Ok(PathBuf::from(env_dir));
    }

    if cfg!(debug_assertions) {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let dev_dir = manifest_dir.join("..").join("tmp").join("dev-brain");
        return Ok(dev_dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(base) = BaseDirs::new() {
            return Ok(base.home_dir().join(".brain"));
        }
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok(project.data_dir().to_path_buf());
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(".brain"));
    }

    Ok(env::current_dir()?.join(".brain"))
}
