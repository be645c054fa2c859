use anyhow::Result;
use clap::Subcommand;
use daymark_core::event::Category;
use daymark_core::store::Store;
use owo_colors::OwoColorize;

use crate::render::Render;

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Add a custom category
    Add {
        name: String,

        /// Hex colour, e.g. #FF6B9D
        #[arg(long, default_value = "#45B7D1")]
        color: String,
    },
    /// Delete a custom category and every event in it
    Delete { id: u64 },
}

pub fn run(store: &mut Store, action: Option<CategoryAction>) -> Result<()> {
    match action {
        None => {
            for category in store.categories() {
                println!("{}", category.render());
            }
        }
        Some(CategoryAction::Add { name, color }) => {
            if store.category_by_name(&name).is_some() {
                anyhow::bail!("Category '{}' already exists", name);
            }
            let id = store.insert_category(Category::custom(name.clone(), color))?;
            println!("{}", format!("  Created category: {} (#{})", name, id).green());
        }
        Some(CategoryAction::Delete { id }) => {
            let name = store.category(id)?.name.clone();
            let removed = store.delete_category(id)?;
            println!("{}", format!("  Deleted category: {}", name).red());
            if removed > 0 {
                println!("  {}", format!("Removed {} events with it", removed).dimmed());
            }
        }
    }

    Ok(())
}
