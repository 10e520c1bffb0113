use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;

use crate::capture::ReminderInput;
use crate::cli::{AddArgs, CliCommand, DeleteArgs};
use crate::config::AppConfig;
use crate::core::commands as core_commands;
use crate::core::scheduler::{Clock, SystemClock};
use crate::model::{DeleteResult, Task};
use crate::parser;

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, writer: W) -> Result<()> {
    execute_at(config, command, writer, SystemClock.now())
}

/// Run a non-interactive command as if the local time were `now`.
pub fn execute_at<W: Write>(
    config: &AppConfig,
    command: CliCommand,
    mut writer: W,
    now: NaiveDateTime,
) -> Result<()> {
    match command {
        CliCommand::Add(args) => handle_add(config, &args, now, &mut writer),
        CliCommand::List => handle_list(config, &mut writer),
        CliCommand::Delete(args) => handle_delete(config, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_add<W: Write>(
    config: &AppConfig,
    args: &AddArgs,
    now: NaiveDateTime,
    mut writer: W,
) -> Result<()> {
    let time = parser::parse_when(&args.at, now)?;
    let input = ReminderInput::new(args.title.clone(), args.description.clone(), time);
    let outcome = core_commands::add_reminder(config, &input, now)?;
    let task = &outcome.task;
    tracing::info!(title = task.title.as_str(), due = %task.time, "stored reminder from cli");
    writeln!(writer, "Saved \"{}\" for {}", task.title, task.time)?;
    if let Some(previous) = &outcome.replaced {
        writeln!(writer, "Replaced the earlier reminder for {}", previous.time)?;
    }
    writeln!(
        writer,
        "The alert fires while `nudge tui` is running; it is not armed by this command."
    )?;
    Ok(())
}

fn handle_list<W: Write>(config: &AppConfig, mut writer: W) -> Result<()> {
    let tasks = core_commands::list_reminders(config)?;
    if tasks.is_empty() {
        writeln!(writer, "No reminders")?;
        return Ok(());
    }
    for task in &tasks {
        write_task(&mut writer, task)?;
    }
    Ok(())
}

fn write_task<W: Write>(mut writer: W, task: &Task) -> Result<()> {
    writeln!(writer, "- {} at {}", task.title, task.time)?;
    if let Some(description) = &task.description {
        writeln!(writer, "    {}", description)?;
    }
    Ok(())
}

fn handle_delete<W: Write>(config: &AppConfig, args: &DeleteArgs, mut writer: W) -> Result<()> {
    let results = core_commands::delete_reminders(config, &args.titles)?;
    let summary = DeleteSummary::from_results(&results);
    summary.write_to(&mut writer)?;
    Ok(())
}

struct DeleteSummary {
    deleted: usize,
    missing: Vec<String>,
}

impl DeleteSummary {
    fn from_results(results: &[DeleteResult]) -> Self {
        let mut deleted = 0usize;
        let mut missing = Vec::new();
        for result in results {
            if result.deleted {
                deleted += 1;
            } else {
                missing.push(result.title.clone());
            }
        }
        Self { deleted, missing }
    }

    fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", SummaryLine::deleted(self.deleted))?;
        if !self.missing.is_empty() {
            writeln!(writer, "Not found: {}", self.missing.join(", "))?;
        }
        Ok(())
    }
}

enum SummaryLine {
    Deleted(usize),
    NoneDeleted,
}

impl SummaryLine {
    fn deleted(count: usize) -> Self {
        if count > 0 {
            SummaryLine::Deleted(count)
        } else {
            SummaryLine::NoneDeleted
        }
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLine::Deleted(count) => {
                write!(
                    f,
                    "Deleted {} task{}",
                    count,
                    if *count == 1 { "" } else { "s" }
                )
            }
            SummaryLine::NoneDeleted => write!(f, "No tasks deleted"),
        }
    }
}
