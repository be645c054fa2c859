use anyhow::Result;
use clap::Subcommand;
use daymark_core::event::Notebook;
use daymark_core::store::Store;
use owo_colors::OwoColorize;

use crate::render::Render;

#[derive(Subcommand)]
pub enum NotebookAction {
    /// Add a notebook
    Add {
        name: String,

        #[arg(long)]
        icon: Option<String>,

        /// Hex colour, e.g. #4A90E2
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a notebook (its events are kept)
    Delete { id: u64 },
}

pub fn run(store: &mut Store, action: Option<NotebookAction>) -> Result<()> {
    match action {
        None => {
            let counts = store.notebook_counts();
            if counts.is_empty() {
                println!("{}", "No notebooks yet".dimmed());
            }
            for (notebook, count) in counts {
                println!("{} {}", notebook.render(), format!("({})", count).dimmed());
            }
        }
        Some(NotebookAction::Add { name, icon, color }) => {
            if store.notebook_by_name(&name).is_some() {
                anyhow::bail!("Notebook '{}' already exists", name);
            }
            let mut notebook = Notebook::new(name.clone());
            if let Some(icon) = icon {
                notebook.icon = icon;
            }
            if let Some(color) = color {
                notebook.color = color;
            }
            notebook.sort_order = store.notebooks().len() as i32;

            let id = store.insert_notebook(notebook)?;
            println!("{}", format!("  Created notebook: {} (#{})", name, id).green());
        }
        Some(NotebookAction::Delete { id }) => {
            let name = store.notebook(id)?.name.clone();
            store.delete_notebook(id)?;
            println!("{}", format!("  Deleted notebook: {}", name).red());
        }
    }

    Ok(())
}
