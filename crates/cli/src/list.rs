use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use taskdeck_core::{
    AttentionReport, Folder, Task, attention_required_at, decode_title, sort_tasks_at,
    start_of_today,
};

use crate::config::load_config;
use crate::output::{OutputFormat, TaskView, attention_banner, render_tasks};
use crate::remote::with_reauth;

/// Fetch, normalize, filter, sort and print the task list.
pub async fn run_list(
    folder: Option<Folder>,
    completed_only: bool,
    format: OutputFormat,
) -> Result<()> {
    let mut config = load_config()?;
    let records = with_reauth(&mut config, |client| async move {
        client.list_tasks().await
    })
    .await?;

    let tasks: Vec<Task> = records.into_iter().map(|r| r.into_task()).collect();
    let today = start_of_today();
    let (report, sorted) = prepare_listing(tasks, folder, completed_only, today);
    let views: Vec<TaskView> = sorted.into_iter().map(TaskView::new).collect();

    let mut stdout = std::io::stdout().lock();
    if format == OutputFormat::Table {
        if let Some(banner) = attention_banner(report.count) {
            writeln!(stdout, "{banner}")?;
            writeln!(stdout)?;
        }
    }
    render_tasks(&views, &format, today, &mut stdout)?;
    Ok(())
}

/// Banner count over the full list, then filter, then sort for display.
///
/// The banner is a dashboard-wide signal: narrowing the view to one folder
/// (or to completed tasks) must not hide an overdue high-priority task
/// sitting in another folder.
fn prepare_listing(
    tasks: Vec<Task>,
    folder: Option<Folder>,
    completed_only: bool,
    today: NaiveDate,
) -> (AttentionReport, Vec<Task>) {
    let report = attention_required_at(&tasks, today);

    let mut filtered = tasks;
    if let Some(folder) = folder {
        filtered.retain(|t| decode_title(&t.title).folder == folder);
    }
    if completed_only {
        filtered.retain(|t| t.completed);
    }

    (report, sort_tasks_at(&filtered, today))
}
