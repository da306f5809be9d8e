use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use taskdeck_core::{Task, TitleParts, decode_title};

/// Output format for task listings.
#[derive(Debug, Clone, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// A task paired with its derived title view, recomputed from the stored
/// title every time it is rendered.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub clean_title: String,
    pub folder: String,
}

impl TaskView {
    pub fn new(task: Task) -> Self {
        let TitleParts {
            clean_title,
            folder,
        } = decode_title(&task.title);
        Self {
            task,
            clean_title,
            folder: folder.as_str().to_string(),
        }
    }
}

/// Render task views in the requested format.
pub fn render_tasks(
    views: &[TaskView],
    format: &OutputFormat,
    today: NaiveDate,
    writer: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(writer, "{}", serde_json::to_string_pretty(views)?)?;
            Ok(())
        }
        OutputFormat::Table => render_table(views, today, writer),
    }
}

fn render_table(views: &[TaskView], today: NaiveDate, writer: &mut dyn Write) -> Result<()> {
    if views.is_empty() {
        writeln!(writer, "No tasks found.")?;
        return Ok(());
    }

    let title_width = views
        .iter()
        .map(|v| v.clean_title.chars().count())
        .chain(std::iter::once("TITLE".len()))
        .max()
        .unwrap_or(0);
    let id_width = views
        .iter()
        .map(|v| v.task.id.chars().count())
        .chain(std::iter::once("ID".len()))
        .max()
        .unwrap_or(0);

    writeln!(
        writer,
        "     {:<id_width$}  {:<title_width$}  {:<8}  {:<8}  DUE",
        "ID", "TITLE", "FOLDER", "PRIORITY",
    )?;
    for view in views {
        writeln!(
            writer,
            "{}  {:<id_width$}  {:<title_width$}  {:<8}  {:<8}  {}",
            if view.task.completed { "[x]" } else { "[ ]" },
            view.task.id,
            view.clean_title,
            view.folder,
            view.task
                .priority
                .map(|p| p.as_str())
                .unwrap_or("-"),
            format_due(view.task.due_date, view.task.completed, today),
        )?;
    }
    Ok(())
}

/// Format a due date for the table, flagging overdue incomplete tasks.
pub fn format_due(due: Option<NaiveDate>, completed: bool, today: NaiveDate) -> String {
    match due {
        None => "-".to_string(),
        Some(date) if !completed && date < today => format!("{date} (overdue)"),
        Some(date) => date.to_string(),
    }
}

/// Banner line shown above listings when anything is overdue and
/// high-priority; `None` when the count is zero.
pub fn attention_banner(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 task needs attention: overdue and high priority".to_string()),
        n => Some(format!("{n} tasks need attention: overdue and high priority")),
    }
}
