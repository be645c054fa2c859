mod commands;
mod logging;
mod render;
mod utils;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daymark_core::config::DaymarkConfig;
use daymark_core::store::Store;

use commands::flags::Flag;

#[derive(Parser)]
#[command(name = "daymark")]
#[command(about = "Count down to (and up from) the days that matter")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an event
    Add {
        title: String,

        /// Target date (YYYY-MM-DD, today, tomorrow)
        #[arg(short, long)]
        date: Option<String>,

        /// Target date on the lunar calendar (Y-M-D, e.g. 2025-1-1)
        #[arg(long, conflicts_with = "date")]
        lunar: Option<String>,

        /// Repeat rule: daily, weekly, monthly or yearly
        #[arg(short, long)]
        repeat: Option<String>,

        /// Remind this long before the event (e.g. 1d, 2h, 90)
        #[arg(long)]
        remind: Option<String>,

        /// Time of day (HH:MM)
        #[arg(short, long)]
        time: Option<String>,

        /// Category name or id
        #[arg(short, long)]
        category: Option<String>,

        /// Notebook name or id
        #[arg(short, long)]
        notebook: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Last day of a multi-day event (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        /// Mark as counting up from a past date
        #[arg(long)]
        count_up: bool,

        /// Count the start day itself
        #[arg(long)]
        plus_one: bool,

        /// Pin to the top of the list
        #[arg(long)]
        pin: bool,
    },
    /// List events with their day offsets
    List {
        /// Only events in this category (name or id)
        #[arg(short, long)]
        category: Option<String>,

        /// Only events in this notebook (name or id)
        #[arg(short, long)]
        notebook: Option<String>,

        /// Show archived events instead
        #[arg(long)]
        archived: bool,

        /// Only pinned events
        #[arg(long)]
        pinned: bool,

        /// Search titles and descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one event in detail
    Show { id: u64 },
    /// Change an event
    Edit {
        id: u64,

        #[arg(long)]
        title: Option<String>,

        /// New target date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// New target date on the lunar calendar (Y-M-D)
        #[arg(long, conflicts_with = "date")]
        lunar: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Repeat rule: none, daily, weekly, monthly or yearly
        #[arg(short, long)]
        repeat: Option<String>,

        /// Turn the reminder on with this lead time (e.g. 1d)
        #[arg(long, conflicts_with = "no_remind")]
        remind: Option<String>,

        /// Turn the reminder off
        #[arg(long)]
        no_remind: bool,

        /// Time of day (HH:MM)
        #[arg(short, long)]
        time: Option<String>,

        /// Category name or id
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete an event
    Delete { id: u64 },
    /// Move an event to the archive
    Archive { id: u64 },
    /// Bring an event back from the archive
    Unarchive { id: u64 },
    /// Pin an event to the top of the list
    Pin { id: u64 },
    Unpin { id: u64 },
    /// Lock an event
    Lock { id: u64 },
    Unlock { id: u64 },
    /// List or manage categories
    Categories {
        #[command(subcommand)]
        action: Option<commands::categories::CategoryAction>,
    },
    /// List or manage notebooks
    Notebooks {
        #[command(subcommand)]
        action: Option<commands::notebooks::NotebookAction>,
    },
    /// Convert between solar and lunar dates
    Lunar {
        /// Solar date to convert (YYYY-MM-DD, default today)
        date: Option<String>,

        /// Convert a lunar date (Y-M-D) to its solar date instead
        #[arg(long, conflicts_with = "date")]
        to_solar: Option<String>,
    },
    /// Days between two dates, and milestones from the first
    Calc {
        start: String,

        /// End date (default today)
        end: Option<String>,
    },
    /// Show upcoming reminders
    Reminders,
    /// Export or import a JSON backup
    Backup {
        #[command(subcommand)]
        action: commands::backup::BackupAction,
    },
    /// Export events as an iCalendar file ("-" for stdout)
    Ics {
        path: Option<String>,

        /// Export a single event, named after its date and title by default
        #[arg(long)]
        event: Option<u64>,
    },
    /// Show config and data paths, or change defaults
    Config {
        /// Category name for new events
        #[arg(long)]
        default_category: Option<String>,

        /// Reminder lead in minutes for new events
        #[arg(long)]
        reminder_minutes: Option<i64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = DaymarkConfig::load().context("Could not load configuration")?;
    tracing::debug!(store = %config.store_path().display(), "loaded config");
    let store = || open_store(&config);

    match cli.command {
        Commands::Add {
            title,
            date,
            lunar,
            repeat,
            remind,
            time,
            category,
            notebook,
            description,
            end,
            count_up,
            plus_one,
            pin,
        } => commands::add::run(
            &mut store()?,
            &config,
            commands::add::AddArgs {
                title,
                date,
                lunar,
                repeat,
                remind,
                time,
                category,
                notebook,
                description,
                end,
                count_up,
                plus_one,
                pin,
            },
        ),
        Commands::List {
            category,
            notebook,
            archived,
            pinned,
            search,
            json,
        } => commands::list::run(
            &store()?,
            commands::list::ListFilter {
                category,
                notebook,
                archived,
                pinned,
                search,
            },
            json,
        ),
        Commands::Show { id } => commands::show::run(&store()?, id),
        Commands::Edit {
            id,
            title,
            date,
            lunar,
            description,
            repeat,
            remind,
            no_remind,
            time,
            category,
        } => commands::edit::run(
            &mut store()?,
            id,
            commands::edit::EditArgs {
                title,
                date,
                lunar,
                description,
                repeat,
                remind,
                no_remind,
                time,
                category,
            },
        ),
        Commands::Delete { id } => commands::delete::run(&mut store()?, id),
        Commands::Archive { id } => commands::flags::run(&mut store()?, id, Flag::Archive),
        Commands::Unarchive { id } => commands::flags::run(&mut store()?, id, Flag::Unarchive),
        Commands::Pin { id } => commands::flags::run(&mut store()?, id, Flag::Pin),
        Commands::Unpin { id } => commands::flags::run(&mut store()?, id, Flag::Unpin),
        Commands::Lock { id } => commands::flags::run(&mut store()?, id, Flag::Lock),
        Commands::Unlock { id } => commands::flags::run(&mut store()?, id, Flag::Unlock),
        Commands::Categories { action } => commands::categories::run(&mut store()?, action),
        Commands::Notebooks { action } => commands::notebooks::run(&mut store()?, action),
        Commands::Lunar { date, to_solar } => commands::lunar::run(date, to_solar),
        Commands::Calc { start, end } => commands::calc::run(&start, end.as_deref()),
        Commands::Reminders => commands::reminders::run(&store()?),
        Commands::Backup { action } => commands::backup::run(&mut store()?, action),
        Commands::Ics { path, event } => commands::ics::run(&store()?, path.as_deref(), event),
        Commands::Config {
            default_category,
            reminder_minutes,
        } => commands::config::run(&config, default_category, reminder_minutes),
    }
}

fn open_store(config: &DaymarkConfig) -> Result<Store> {
    let path = config.store_path();
    Store::open(&path).with_context(|| format!("Could not open store at {}", path.display()))
}
