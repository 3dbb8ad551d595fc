mod app;
mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mneme", about = "Spaced-repetition review tracker", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<std::path::PathBuf>,

    /// Treat this date as today, YYYY-MM-DD (default: local date)
    #[arg(long, global = true)]
    today: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ListFilter {
    /// Items due for review today
    Due,
    /// Items scheduled for a later day
    Upcoming,
    /// Items past the last ladder rung
    Mastered,
    /// Everything, newest first
    All,
}

#[derive(Subcommand)]
enum Command {
    /// Start tracking a new item
    Add {
        /// Text of the item (words are joined with spaces)
        #[arg(required = true)]
        content: Vec<String>,
    },

    /// List items by review status
    List {
        /// Which slice of the collection to show
        #[arg(long, value_enum, default_value = "due")]
        filter: ListFilter,
    },

    /// Review due items interactively
    Review,

    /// Record a single review outcome (for scripting)
    Mark {
        /// Item id (a unique prefix is enough)
        id: String,
        /// Review outcome
        #[arg(value_enum)]
        outcome: commands::mark::Outcome,
    },

    /// Delete an item
    Delete {
        /// Item id (a unique prefix is enough)
        id: String,
        /// Skip the confirmation prompt and the undo window
        #[arg(long)]
        yes: bool,
    },

    /// Show collection statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let today = app::resolve_today(cli.today.as_deref())?;
    let mut app = app::App::new(cli.data_dir.clone())?;

    match cli.command {
        Command::Add { content } => {
            commands::add::run(&mut app, &content.join(" "), today, &cli.format)?;
        }
        Command::List { filter } => {
            commands::list::run(&app, filter, today, &cli.format)?;
        }
        Command::Review => {
            commands::review::run(&mut app, today, &cli.format)?;
        }
        Command::Mark { id, outcome } => {
            commands::mark::run(&mut app, &id, outcome, today, &cli.format)?;
        }
        Command::Delete { id, yes } => {
            commands::delete::run(&mut app, &id, yes, &cli.format)?;
        }
        Command::Stats => {
            commands::stats::run(&app, today, &cli.format)?;
        }
    }

    Ok(())
}
