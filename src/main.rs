use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = nudge::cli::Cli::parse();
    let config = nudge::config::from_cli(&cli)?;
    nudge::logging::init(&config, cli.log_filter.clone())?;

    match cli.command.clone() {
        Some(nudge::cli::CliCommand::Tui) | None => {
            nudge::tui::run(config)?;
        }
        Some(command) => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            nudge::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
