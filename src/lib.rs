pub mod cli;
pub mod core;
pub mod service;
pub mod store;

use crate::cli::categories::{CategoryCommand, CategoryOutcome};
use crate::cli::expenses::{AddArgs, EditArgs};
use crate::cli::profile::ProfileCommand;
use crate::cli::ui;
use crate::core::config::AppConfig;
use crate::core::currency::format_currency;
use crate::core::model::parse_amount;
use crate::service::StorageService;
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Add(AddArgs),
    List { category: Option<String> },
    Edit(EditArgs),
    Delete { id: u64, yes: bool },
    Summary,
    Category(CategoryCommand),
    Profile(ProfileCommand),
    Currencies { query: Option<String> },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Expense manager starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let service = StorageService::new(store::open_store(&config)?);
    execute(&service, command).await
}

async fn execute(service: &StorageService, command: AppCommand) -> Result<()> {
    match command {
        AppCommand::Add(args) => {
            let expense = cli::expenses::add(service, args).await?;
            let currency = service.get_user_currency().await;
            let amount = parse_amount(&expense.amount).unwrap_or_default();
            println!(
                "Added expense #{}: {} ({})",
                expense.id,
                expense.title,
                format_currency(amount, &currency)
            );
        }
        AppCommand::List { category } => {
            println!("{}", cli::expenses::list(service, category.as_deref()).await);
        }
        AppCommand::Edit(args) => {
            let expense = cli::expenses::edit(service, args).await?;
            println!("Updated expense #{}", expense.id);
        }
        AppCommand::Delete { id, yes } => {
            if cli::expenses::delete(service, id, yes).await? {
                println!("Deleted expense #{id}");
            } else {
                println!("{}", ui::style_text("Cancelled", ui::StyleType::Subtle));
            }
        }
        AppCommand::Summary => {
            let dashboard = cli::summary::Dashboard::load(service).await;
            println!("{}", dashboard.display());
        }
        AppCommand::Category(command) => match cli::categories::run(service, command).await? {
            CategoryOutcome::Listed(table) => println!("{table}"),
            CategoryOutcome::Saved { key, replaced } => {
                if replaced {
                    println!(
                        "{}",
                        ui::style_text(
                            &format!("Category {key} already existed and was overwritten"),
                            ui::StyleType::Warning
                        )
                    );
                } else {
                    println!("Saved category {key}");
                }
            }
            CategoryOutcome::Removed(key) => println!("Deleted category {key}"),
            CategoryOutcome::Cancelled => {
                println!("{}", ui::style_text("Cancelled", ui::StyleType::Subtle))
            }
        },
        AppCommand::Profile(ProfileCommand::Show) => {
            let profile = service.get_user_profile().await;
            println!("{}", cli::profile::display_profile(profile.as_ref()));
        }
        AppCommand::Profile(ProfileCommand::Set(args)) => {
            let profile = cli::profile::set(service, args).await?;
            println!("{}", cli::profile::display_profile(Some(&profile)));
        }
        AppCommand::Profile(ProfileCommand::Delete { yes }) => {
            if cli::profile::delete(service, yes).await? {
                println!("Profile deleted");
            } else {
                println!("{}", ui::style_text("Cancelled", ui::StyleType::Subtle));
            }
        }
        AppCommand::Currencies { query } => {
            let selected = service.get_user_currency().await;
            println!("{}", cli::currencies::run(query.as_deref(), &selected));
        }
    }
    Ok(())
}
