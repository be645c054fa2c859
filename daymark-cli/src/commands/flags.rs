use anyhow::Result;
use daymark_core::store::Store;
use owo_colors::OwoColorize;

/// A single-flag change on an event.
#[derive(Debug, Clone, Copy)]
pub enum Flag {
    Archive,
    Unarchive,
    Pin,
    Unpin,
    Lock,
    Unlock,
}

impl Flag {
    fn past_tense(self) -> &'static str {
        match self {
            Flag::Archive => "Archived",
            Flag::Unarchive => "Unarchived",
            Flag::Pin => "Pinned",
            Flag::Unpin => "Unpinned",
            Flag::Lock => "Locked",
            Flag::Unlock => "Unlocked",
        }
    }
}

pub fn run(store: &mut Store, id: u64, flag: Flag) -> Result<()> {
    match flag {
        Flag::Archive => store.archive(id)?,
        Flag::Unarchive => store.unarchive(id)?,
        Flag::Pin => store.set_pinned(id, true)?,
        Flag::Unpin => store.set_pinned(id, false)?,
        Flag::Lock => store.set_locked(id, true)?,
        Flag::Unlock => store.set_locked(id, false)?,
    }

    let title = &store.event(id)?.title;
    println!("{}", format!("  {}: {}", flag.past_tense(), title).green());

    Ok(())
}
