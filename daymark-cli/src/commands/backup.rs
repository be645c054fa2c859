use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use daymark_core::backup;
use daymark_core::store::Store;
use owo_colors::OwoColorize;

use crate::commands::now;

#[derive(Subcommand)]
pub enum BackupAction {
    /// Write every event, category and notebook to a JSON file
    Export {
        /// Output file (default daymark_backup_<timestamp>.json)
        path: Option<PathBuf>,
    },
    /// Merge a JSON backup into your events
    Import { path: PathBuf },
}

pub fn run(store: &mut Store, action: BackupAction) -> Result<()> {
    match action {
        BackupAction::Export { path } => {
            let now = now();
            let path = path.unwrap_or_else(|| PathBuf::from(backup::default_file_name(now)));

            let document = backup::export(store, now);
            std::fs::write(&path, document.to_json()?)
                .with_context(|| format!("Could not write {}", path.display()))?;

            println!(
                "{}",
                format!(
                    "  Exported {} events and {} categories to {}",
                    document.events.len(),
                    document.categories.len(),
                    path.display()
                )
                .green()
            );
        }
        BackupAction::Import { path } => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            let summary = backup::import(store, &json)?;

            println!(
                "{}",
                format!(
                    "  Imported {} events and {} categories",
                    summary.events_imported, summary.categories_imported
                )
                .green()
            );
            if summary.notebooks_imported > 0 {
                println!(
                    "  {}",
                    format!("Created {} notebooks", summary.notebooks_imported).dimmed()
                );
            }
            if summary.events_skipped > 0 {
                println!(
                    "  {}",
                    format!("Skipped {} malformed events", summary.events_skipped).yellow()
                );
            }
        }
    }

    Ok(())
}
