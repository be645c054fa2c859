use anyhow::Result;
use daymark_core::store::Store;
use owo_colors::OwoColorize;

pub fn run(store: &mut Store, id: u64) -> Result<()> {
    let removed = store.delete_event(id)?;
    println!("{}", format!("  Deleted: {}", removed.title).red());
    Ok(())
}
