use anyhow::Result;

use taskdeck_api::UpdateTaskRequest;
use taskdeck_core::{decode_title, encode_title};

use crate::config::load_config;
use crate::remote::with_reauth;

/// Toggle completion. The title goes through a decode/encode round trip and
/// the other fields are echoed back untouched, matching the backend's
/// expectation of a full payload.
pub async fn run_set_completed(id: &str, completed: bool) -> Result<()> {
    let mut config = load_config()?;

    let current = with_reauth(&mut config, |client| {
        let id = id.to_string();
        async move { client.get_task(&id).await }
    })
    .await?;

    let parts = decode_title(&current.title);
    let req = UpdateTaskRequest {
        title: encode_title(&parts.clean_title, parts.folder),
        due_date: current.due_date.clone(),
        priority: current.priority.clone().unwrap_or_else(|| "medium".to_string()),
        completed: Some(completed),
    };

    let updated = with_reauth(&mut config, |client| {
        let id = id.to_string();
        let req = req.clone();
        async move { client.update_task(&id, &req).await }
    })
    .await?;

    if completed {
        println!("Task {} marked complete.", updated.id);
    } else {
        println!("Task {} reopened.", updated.id);
    }
    Ok(())
}
