use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use beo_client::{EditClient, EntryStatus, FileStore, HistoryEntry, HistoryLog};
use beo_edit::{EncodedImage, Hotspot};

use crate::args::{ClientCommand, EditArgs, HistoryAction, HistoryArgs};

/// Run a client-side command
pub async fn run(command: ClientCommand) -> anyhow::Result<()> {
    match command {
        ClientCommand::Retouch { edit, x, y } => {
            let client = client(&edit)?;
            let image_url = client.retouch(&edit.image, &edit.prompt, Hotspot { x, y }).await?;
            emit(&image_url, edit.output.as_deref()).await
        }
        ClientCommand::Filter { edit } => {
            let client = client(&edit)?;
            let image_url = client.filter(&edit.image, &edit.prompt).await?;
            emit(&image_url, edit.output.as_deref()).await
        }
        ClientCommand::Adjust { edit } => {
            let client = client(&edit)?;
            let image_url = client.adjust(&edit.image, &edit.prompt).await?;
            emit(&image_url, edit.output.as_deref()).await
        }
        ClientCommand::History { store, action } => {
            let log = history_log(&store);
            match action.unwrap_or(HistoryAction::List { json: false }) {
                HistoryAction::List { json } => list(&log, json).await,
                HistoryAction::Clear => {
                    log.clear().await;
                    Ok(())
                }
            }
        }
    }
}

fn history_log(args: &HistoryArgs) -> HistoryLog {
    HistoryLog::new(Arc::new(FileStore::new(&args.history_dir)))
}

fn client(args: &EditArgs) -> anyhow::Result<EditClient> {
    Ok(EditClient::new(&args.endpoint, history_log(&args.store))?)
}

/// Write the edited image to `output`, or print its data URL
async fn emit(image_url: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let Some(output) = output else {
        println!("{image_url}");
        return Ok(());
    };

    let image = EncodedImage::parse(image_url).context("endpoint returned a malformed image")?;
    let bytes = image.decode().context("endpoint returned an undecodable image")?;

    tokio::fs::write(output, bytes)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!(path = %output.display(), mime_type = %image.mime_type, "saved edited image");
    Ok(())
}

async fn list(log: &HistoryLog, json: bool) -> anyhow::Result<()> {
    let entries = log.read_all().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        println!("{}", summary(entry));
    }

    Ok(())
}

fn summary(entry: &HistoryEntry) -> String {
    let outcome = match entry.status {
        EntryStatus::Success => "ok".to_owned(),
        EntryStatus::Error => format!("error: {}", entry.error.as_deref().unwrap_or_default()),
    };

    format!("{} {:<10} \"{}\" {outcome}", entry.timestamp, entry.mode.as_str(), entry.prompt)
}
