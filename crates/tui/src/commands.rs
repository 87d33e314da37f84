use std::io::Write;

use anyhow::{anyhow, Result};

use crate::cli::{CliCommand, ListArgs};
use crate::config::AppConfig;
use crate::core::VaultService;
use crate::model::{visible, FilterTab, Resource};

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Scan => handle_scan(config, &mut writer),
        CliCommand::List(args) => handle_list(config, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_scan<W: Write>(config: &AppConfig, mut writer: W) -> Result<()> {
    let service = VaultService::new(config.clone())?;
    let message = service.scan_vault(config.vault_dir())?;
    tracing::info!(vault = %config.vault_dir().display(), "{message}");
    writeln!(writer, "{message}")?;
    Ok(())
}

fn handle_list<W: Write>(config: &AppConfig, args: &ListArgs, mut writer: W) -> Result<()> {
    let service = VaultService::new(config.clone())?;
    let resources = service.list_resources()?;
    let shown = visible(&resources, FilterTab::from(args.kind));

    if shown.is_empty() {
        writeln!(writer, "No resources")?;
        return Ok(());
    }
    for resource in shown {
        writeln!(writer, "{}", ListLine(resource))?;
    }
    Ok(())
}

struct ListLine<'a>(&'a Resource);

impl std::fmt::Display for ListLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let resource = self.0;
        write!(
            f,
            "{} {:<5} {}  {}",
            resource.kind.icon(),
            resource.kind.as_str(),
            resource.id,
            resource.title
        )?;
        if let Some(status) = resource.task_status() {
            write!(f, " [{status}]")?;
        }
        if let Some(url) = resource.link_url() {
            write!(f, " <{url}>")?;
        }
        Ok(())
    }
}
