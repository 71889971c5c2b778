mod commands;
mod config;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "docket")]
#[command(about = "Case-management dashboard over your hosted backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List cases, newest first
    Cases {
        /// Only show cases with this status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// List manually recorded hearings by hearing date
    Hearings,
    /// List tasks by due date
    Tasks {
        /// Only show tasks with this status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Month calendar: grid, day panel and upcoming events
    Calendar {
        /// Month to display, e.g. 2025-03 (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Day of the month to open in the day panel
        #[arg(short, long)]
        day: Option<u32>,
        /// Event id to open in the detail panel
        #[arg(short, long)]
        event: Option<String>,
    },
    /// Printable agenda for one day
    Agenda {
        /// Date (DD-MM-YYYY or YYYY-MM-DD; defaults to today)
        date: Option<String>,
    },
    /// List expenses or record a new one
    Expenses {
        #[command(subcommand)]
        action: Option<ExpensesAction>,
    },
    /// Fetch, archive and browse causelists
    Causelist {
        #[command(subcommand)]
        action: CauselistAction,
    },
    /// Storage bucket usage
    Storage,
    /// Queue hearing reminders for tomorrow's listings
    Remind,
    /// Delete every row from the managed tables (dangerous)
    Reset {
        /// Actually delete; without this flag only a preview is printed
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ExpensesAction {
    /// Record a new expense
    Add {
        /// What the money went on
        description: String,
        /// Amount spent
        amount: f64,
        /// Case id to book the expense against
        #[arg(long)]
        case: Option<String>,
        /// Expense category (filing, travel, ...)
        #[arg(long)]
        category: Option<String>,
        /// Date incurred (DD-MM-YYYY or YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
enum CauselistAction {
    /// Fetch a day's causelist and save a snapshot
    Save {
        /// Advocate code (defaults to causelist.advocate_code from config)
        #[arg(short, long)]
        code: Option<String>,
        /// List date (DD-MM-YYYY; defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List saved snapshots, newest first
    List,
    /// Show the cases of one saved snapshot
    Show {
        /// Snapshot id (see `causelist list`)
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = config::load_config()?;

    match cli.command {
        Commands::Cases { status } => commands::cases::run(&cfg, status.as_deref()).await,
        Commands::Hearings => commands::hearings::run(&cfg).await,
        Commands::Tasks { status } => commands::tasks::run(&cfg, status.as_deref()).await,
        Commands::Calendar { month, day, event } => {
            commands::calendar::run(&cfg, month.as_deref(), day, event.as_deref()).await
        }
        Commands::Agenda { date } => commands::agenda::run(&cfg, date.as_deref()).await,
        Commands::Expenses { action } => match action {
            None => commands::expenses::list(&cfg).await,
            Some(ExpensesAction::Add {
                description,
                amount,
                case,
                category,
                date,
            }) => {
                commands::expenses::add(&cfg, description, amount, case, category, date.as_deref())
                    .await
            }
        },
        Commands::Causelist { action } => match action {
            CauselistAction::Save { code, date } => {
                commands::causelist::save(&cfg, code.as_deref(), date.as_deref()).await
            }
            CauselistAction::List => commands::causelist::list(&cfg).await,
            CauselistAction::Show { id } => commands::causelist::show(&cfg, &id).await,
        },
        Commands::Storage => commands::storage::run(&cfg).await,
        Commands::Remind => commands::remind::run(&cfg).await,
        Commands::Reset { force } => commands::reset::run(&cfg, force).await,
    }
}
