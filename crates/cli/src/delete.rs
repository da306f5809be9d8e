use anyhow::Result;
use dialoguer::Confirm;

use crate::config::load_config;
use crate::remote::with_reauth;

/// Delete a task, asking first unless `--yes` was passed.
pub async fn run_delete(id: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete task {id}?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let mut config = load_config()?;
    with_reauth(&mut config, |client| {
        let id = id.to_string();
        async move { client.delete_task(&id).await }
    })
    .await?;

    println!("Deleted task {id}.");
    Ok(())
}
