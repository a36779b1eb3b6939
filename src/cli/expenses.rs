use super::ui;
use crate::core::category::{self, CustomCategories};
use crate::core::currency::format_currency;
use crate::core::kv::KeyValueStore;
use crate::core::model::{Expense, ExpenseUpdate, NewExpense, format_amount, parse_amount};
use crate::service::StorageService;
use anyhow::{Result, bail};
use clap::Args;
use comfy_table::Cell;
use tracing::info;

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Short description shown in lists
    #[arg(short, long)]
    pub title: String,
    /// Positive amount, e.g. 3.5
    #[arg(short, long)]
    pub amount: String,
    /// Category key, e.g. FOOD
    #[arg(short = 'k', long)]
    pub category: String,
    /// Optional longer note
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    /// Id of the expense to edit
    pub id: u64,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub amount: Option<String>,
    #[arg(short = 'k', long)]
    pub category: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        bail!("Title cannot be empty");
    }
    Ok(title.to_string())
}

/// Parses a user-entered amount and normalizes it to two decimals.
fn validate_amount(amount: &str) -> Result<String> {
    match parse_amount(amount) {
        Some(value) if value > 0.0 => Ok(format_amount(value)),
        _ => bail!("Amount must be a positive number, got '{amount}'"),
    }
}

fn validate_category(key: &str, custom: &CustomCategories) -> Result<String> {
    let known = category::merged_categories(custom);
    if known.iter().any(|(k, _)| k == key) {
        return Ok(key.to_string());
    }
    let keys: Vec<_> = known.iter().map(|(k, _)| k.as_str()).collect();
    bail!("Unknown category '{key}'. Choose one of: {}", keys.join(", "))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn add<S: KeyValueStore + ?Sized>(
    service: &StorageService<S>,
    args: AddArgs,
) -> Result<Expense> {
    let custom = service.get_custom_categories().await;
    let expense = NewExpense {
        title: validate_title(&args.title)?,
        amount: validate_amount(&args.amount)?,
        description: non_empty(args.description),
        category: validate_category(&args.category, &custom)?,
    };

    let Some(stored) = service.add_expense(expense).await else {
        bail!("Failed to save expense");
    };
    info!(id = stored.id, "Expense added");
    Ok(stored)
}

pub async fn edit<S: KeyValueStore + ?Sized>(
    service: &StorageService<S>,
    args: EditArgs,
) -> Result<Expense> {
    let custom = service.get_custom_categories().await;
    let update = ExpenseUpdate {
        title: args.title.as_deref().map(validate_title).transpose()?,
        amount: args.amount.as_deref().map(validate_amount).transpose()?,
        // An explicit empty description clears the stored one
        description: args.description.map(|d| d.trim().to_string()),
        category: args
            .category
            .as_deref()
            .map(|c| validate_category(c, &custom))
            .transpose()?,
    };

    match service.update_expense(args.id, update).await {
        Some(updated) => Ok(updated),
        None => bail!("Expense {} not found or could not be updated", args.id),
    }
}

pub async fn delete<S: KeyValueStore + ?Sized>(
    service: &StorageService<S>,
    id: u64,
    assume_yes: bool,
) -> Result<bool> {
    if !assume_yes && !ui::confirm(&format!("Delete expense {id}?"))? {
        return Ok(false);
    }
    if !service.delete_expense(id).await {
        bail!("Failed to delete expense {id}");
    }
    Ok(true)
}

pub async fn list<S: KeyValueStore + ?Sized>(
    service: &StorageService<S>,
    category: Option<&str>,
) -> String {
    let expenses = match category {
        Some(key) => service.get_expenses_by_category(key).await,
        None => service.get_expenses().await,
    };
    let custom = service.get_custom_categories().await;
    let currency = service.get_user_currency().await;

    if expenses.is_empty() {
        return ui::style_text("No expenses recorded yet.", ui::StyleType::Subtle);
    }
    display_expenses(&expenses, &custom, &currency)
}

pub fn display_expenses(expenses: &[Expense], custom: &CustomCategories, currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Date"),
        ui::header_cell("Title"),
        ui::header_cell("Category"),
        ui::header_cell(&format!("Amount ({currency})")),
        ui::header_cell("Description"),
    ]);

    for expense in expenses {
        let amount = expense
            .amount_value()
            .map_or_else(|| expense.amount.clone(), |v| format_currency(v, currency));
        table.add_row(vec![
            Cell::new(expense.id),
            Cell::new(expense.created_at.format("%Y-%m-%d")),
            Cell::new(&expense.title),
            Cell::new(category::category_name(&expense.category, custom)),
            ui::amount_cell(amount),
            ui::optional_cell(expense.description.as_deref()),
        ]);
    }
    table.to_string()
}
