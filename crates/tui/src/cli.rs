use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::ResourceKind;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "brain",
    version,
    about = "Universal Brain: a keyboard-driven home for notes, links, tasks and files.",
    after_help = "Examples:\n  brain                 Launch the TUI (same as `brain tui`)\n  brain --vault ~/notes scan\n  brain list --type task"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory scanned for notes and files (defaults to <data-dir>/vault)
    #[arg(long, value_name = "PATH", global = true)]
    pub vault: Option<PathBuf>,

    /// Override the tracing filter (e.g. "info", "brain_core=debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the three-pane terminal shell (default command)
    Tui,
    /// Index the vault and print the result
    Scan,
    /// Print resources, newest first
    List(ListArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only show one kind of resource
    #[arg(long = "type", value_enum, value_name = "KIND")]
    pub kind: Option<ResourceKind>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["brain", "list", "--type", "link", "--vault", "/tmp/v"]);
        assert_eq!(cli.vault, Some(PathBuf::from("/tmp/v")));
        match cli.command {
            Some(CliCommand::List(args)) => assert_eq!(args.kind, Some(ResourceKind::Link)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[rstest]
    #[case(&["brain"], None)]
    #[case(&["brain", "tui"], Some("tui"))]
    #[case(&["brain", "scan"], Some("scan"))]
    #[case(&["brain", "--data-dir", "/tmp/b", "list"], Some("list"))]
    fn parses_each_subcommand(#[case] argv: &[&str], #[case] expected: Option<&str>) {
        let cli = Cli::parse_from(argv);
        let name = cli.command.map(|command| match command {
            CliCommand::Tui => "tui",
            CliCommand::Scan => "scan",
            CliCommand::List(_) => "list",
        });
        assert_eq!(name, expected);
    }
}
