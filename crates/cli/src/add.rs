use anyhow::Result;
use chrono::NaiveDate;

use taskdeck_api::CreateTaskRequest;
use taskdeck_core::{Folder, Priority, encode_title};

use crate::config::load_config;
use crate::remote::with_reauth;

/// Create a task, packing the folder into the stored title.
pub async fn run_add(
    title: String,
    folder: Folder,
    due: Option<NaiveDate>,
    priority: Priority,
) -> Result<()> {
    let req = CreateTaskRequest {
        title: encode_title(&title, folder),
        due_date: due.map(|d| d.format("%Y-%m-%d").to_string()),
        priority: priority.as_str().to_string(),
    };

    let mut config = load_config()?;
    let record = with_reauth(&mut config, |client| {
        let req = req.clone();
        async move { client.create_task(&req).await }
    })
    .await?;

    println!("Created task {} ({folder}, {priority}).", record.id);
    Ok(())
}
