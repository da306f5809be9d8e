use anyhow::Result;

use taskdeck_core::{Task, attention_required, start_of_today};

use crate::config::load_config;
use crate::output::{OutputFormat, TaskView, attention_banner, render_tasks};
use crate::remote::with_reauth;

/// Print the attention-required subset: incomplete, high-priority, overdue.
pub async fn run_attention(format: OutputFormat) -> Result<()> {
    let mut config = load_config()?;
    let records = with_reauth(&mut config, |client| async move {
        client.list_tasks().await
    })
    .await?;

    let tasks: Vec<Task> = records.into_iter().map(|r| r.into_task()).collect();
    let report = attention_required(&tasks);

    match format {
        OutputFormat::Json => {
            let views: Vec<TaskView> = report.tasks.into_iter().map(TaskView::new).collect();
            let payload = serde_json::json!({
                "count": report.count,
                "tasks": views,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Table => {
            let Some(banner) = attention_banner(report.count) else {
                println!("Nothing needs attention.");
                return Ok(());
            };
            println!("{banner}");
            println!();
            let views: Vec<TaskView> = report.tasks.into_iter().map(TaskView::new).collect();
            let mut stdout = std::io::stdout().lock();
            render_tasks(&views, &OutputFormat::Table, start_of_today(), &mut stdout)?;
        }
    }
    Ok(())
}
