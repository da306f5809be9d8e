use anyhow::Result;
use chrono::NaiveDate;

use taskdeck_api::UpdateTaskRequest;
use taskdeck_core::{Folder, Priority, decode_title, encode_title};

use crate::config::load_config;
use crate::remote::with_reauth;

/// Read-modify-write edit: fetch the record, decode the title, apply the
/// requested changes and patch the full payload back (re-encoding the
/// folder tag).
pub async fn run_edit(
    id: &str,
    title: Option<String>,
    folder: Option<Folder>,
    due: Option<NaiveDate>,
    clear_due: bool,
    priority: Option<Priority>,
) -> Result<()> {
    let mut config = load_config()?;

    let current = with_reauth(&mut config, |client| {
        let id = id.to_string();
        async move { client.get_task(&id).await }
    })
    .await?;
    let task = current.into_task();
    let parts = decode_title(&task.title);

    let new_title = title.unwrap_or(parts.clean_title);
    let new_folder = folder.unwrap_or(parts.folder);
    let new_due = if clear_due { None } else { due.or(task.due_date) };
    let new_priority = priority.or(task.priority).unwrap_or(Priority::Medium);

    let req = UpdateTaskRequest {
        title: encode_title(&new_title, new_folder),
        due_date: new_due.map(|d| d.format("%Y-%m-%d").to_string()),
        priority: new_priority.as_str().to_string(),
        completed: None,
    };

    let updated = with_reauth(&mut config, |client| {
        let id = id.to_string();
        let req = req.clone();
        async move { client.update_task(&id, &req).await }
    })
    .await?;

    println!("Updated task {}.", updated.id);
    Ok(())
}
