use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "nudge",
    version,
    about = "Schedule reminders and get nudged when they come due.",
    after_help = "Examples:\n  nudge                     Launch the TUI (same as `nudge tui`)\n  nudge add \"Buy milk\" --at +30m\n  nudge add Dentist --at \"2026-11-02 09:15\" --description \"bring card\"\n  nudge list\n  nudge delete \"Buy milk\""
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Tracing filter written to nudge.log (e.g. "info", "debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Store a reminder without launching the UI
    Add(AddArgs),
    /// Print every stored reminder
    List,
    /// Delete one or more reminders by title
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Reminder title (unique; an existing title is replaced)
    #[arg(value_name = "TITLE", required = true)]
    pub title: String,

    /// When it is due: "YYYY-MM-DD HH:MM", "HH:MM" (today), +30m, +2h, +1d
    #[arg(long = "at", value_name = "WHEN")]
    pub at: String,

    /// Optional description shown under the title
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// One or more reminder titles to delete
    #[arg(value_name = "TITLE", required = true)]
    pub titles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_subcommand() {
        let cli = Cli::parse_from(["nudge"]);
        assert!(cli.command.is_none());
        assert!(cli.data_dir.is_none());
    }

    #[test]
    fn parses_add_arguments() {
        let cli = Cli::parse_from([
            "nudge",
            "--data-dir",
            "/tmp/nudge",
            "add",
            "Buy milk",
            "--at",
            "+30m",
            "--description",
            "two litres",
        ]);
        match cli.command {
            Some(CliCommand::Add(args)) => {
                assert_eq!(args.title, "Buy milk");
                assert_eq!(args.at, "+30m");
                assert_eq!(args.description.as_deref(), Some("two litres"));
            }
            other => panic!("expected add, got {:?}", other),
        }
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/nudge")));
    }

    #[test]
    fn delete_requires_a_title() {
        assert!(Cli::try_parse_from(["nudge", "delete"]).is_err());
    }
}
