use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use expense_manager::cli::categories::CategoryCommand;
use expense_manager::cli::expenses::{AddArgs, EditArgs};
use expense_manager::cli::profile::ProfileCommand;
use expense_manager::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for expense_manager::AppCommand {
    fn from(cmd: Commands) -> expense_manager::AppCommand {
        use expense_manager::AppCommand;
        match cmd {
            Commands::Add(args) => AppCommand::Add(args),
            Commands::List { category } => AppCommand::List { category },
            Commands::Edit(args) => AppCommand::Edit(args),
            Commands::Delete { id, yes } => AppCommand::Delete { id, yes },
            Commands::Summary => AppCommand::Summary,
            Commands::Category { command } => AppCommand::Category(command),
            Commands::Profile { command } => AppCommand::Profile(command),
            Commands::Currencies { query } => AppCommand::Currencies { query },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Record a new expense
    Add(AddArgs),
    /// List expenses, optionally for one category
    List {
        /// Category key, e.g. FOOD
        #[arg(short = 'k', long)]
        category: Option<String>,
    },
    /// Change fields of an existing expense
    Edit(EditArgs),
    /// Delete an expense
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show totals per category and recent expenses
    Summary,
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    /// Manage your profile and preferred currency
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// List or search supported currencies
    Currencies {
        /// Part of a currency name or code
        query: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => expense_manager::cli::setup::setup(),
        Some(cmd) => expense_manager::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
