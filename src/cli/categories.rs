use super::ui;
use crate::core::category::{self, Category, CustomCategory};
use crate::core::kv::KeyValueStore;
use crate::service::StorageService;
use anyhow::{Result, bail};
use clap::Subcommand;
use comfy_table::Cell;
use once_cell::sync::Lazy;
use regex::Regex;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"));

#[derive(Debug, Clone, Subcommand)]
pub enum CategoryCommand {
    /// List default and custom categories
    List,
    /// Create a custom category
    Add {
        /// Display name; the key is derived from it
        name: String,
        /// Hex color such as #FF6B6B; picked at random when omitted
        #[arg(long)]
        color: Option<String>,
    },
    /// Rename or recolor a custom category
    Edit {
        /// Category key, e.g. PET_FOOD
        key: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a custom category; its expenses keep the raw key
    Remove {
        key: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Outcome of a category command, for display.
#[derive(Debug, PartialEq)]
pub enum CategoryOutcome {
    Listed(String),
    Saved { key: String, replaced: bool },
    Removed(String),
    Cancelled,
}

fn validate_color(color: &str) -> Result<String> {
    if !HEX_COLOR_RE.is_match(color) {
        bail!("Color must look like #RRGGBB, got '{color}'");
    }
    Ok(color.to_uppercase())
}

pub async fn run<S: KeyValueStore + ?Sized>(
    service: &StorageService<S>,
    command: CategoryCommand,
) -> Result<CategoryOutcome> {
    match command {
        CategoryCommand::List => {
            let categories = service.get_all_categories().await;
            Ok(CategoryOutcome::Listed(display_categories(&categories)))
        }
        CategoryCommand::Add { name, color } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                bail!("Category name cannot be empty");
            }
            let color = match color {
                Some(c) => validate_color(&c)?,
                None => category::random_color(&mut rand::thread_rng()).to_string(),
            };
            let key = category::category_key(&name);
            // Keys are derived, so a new name can land on an existing key
            let replaced = service
                .get_all_categories()
                .await
                .iter()
                .any(|(k, _)| *k == key);

            if !service.save_custom_category(&key, CustomCategory { name, color }).await {
                bail!("Failed to save category {key}");
            }
            Ok(CategoryOutcome::Saved { key, replaced })
        }
        CategoryCommand::Edit { key, name, color } => {
            let custom = service.get_custom_categories().await;
            let Some(existing) = custom.get(&key) else {
                bail!("No custom category with key '{key}'");
            };
            let updated = CustomCategory {
                name: match name.map(|n| n.trim().to_string()) {
                    Some(n) if !n.is_empty() => n,
                    _ => existing.name.clone(),
                },
                color: match color {
                    Some(c) => validate_color(&c)?,
                    None => existing.color.clone(),
                },
            };
            if !service.save_custom_category(&key, updated).await {
                bail!("Failed to save category {key}");
            }
            Ok(CategoryOutcome::Saved {
                key,
                replaced: true,
            })
        }
        CategoryCommand::Remove { key, yes } => {
            if !yes && !ui::confirm(&format!("Delete category {key}?"))? {
                return Ok(CategoryOutcome::Cancelled);
            }
            if !service.delete_custom_category(&key).await {
                bail!("Failed to delete category {key}");
            }
            Ok(CategoryOutcome::Removed(key))
        }
    }
}

pub fn display_categories(categories: &[(String, Category)]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Key"),
        ui::header_cell("Name"),
        ui::header_cell("Color"),
        ui::header_cell("Kind"),
    ]);
    for (key, category) in categories {
        let kind = if category.is_custom() { "custom" } else { "default" };
        table.add_row(vec![
            Cell::new(key),
            Cell::new(category.name()),
            Cell::new(category.color()),
            Cell::new(kind),
        ]);
    }
    table.to_string()
}
