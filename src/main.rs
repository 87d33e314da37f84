use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = brain::cli::Cli::parse();
    let config = brain::config::from_cli(&cli)?;

    match cli.command.clone() {
        Some(brain::cli::CliCommand::Tui) | None => {
            brain::logging::init_file(&config.log_path(), cli.log_filter.clone())?;
            brain::tui::run(config)?;
        }
        Some(command) => {
            brain::logging::init_stderr(cli.log_filter.clone())?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            brain::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
