use super::ui;
use crate::core::category::{self, CustomCategories};
use crate::core::currency::format_currency;
use crate::core::kv::KeyValueStore;
use crate::core::model::Expense;
use crate::service::StorageService;
use comfy_table::{Cell, Color};
use std::collections::BTreeMap;
use tracing::debug;

const RECENT_EXPENSES: usize = 5;

/// Everything the dashboard shows, loaded in one go.
#[derive(Debug)]
pub struct Dashboard {
    pub expense_count: usize,
    pub total: f64,
    pub totals: BTreeMap<String, f64>,
    pub recent: Vec<Expense>,
    pub custom: CustomCategories,
    pub currency: String,
}

impl Dashboard {
    pub async fn load<S: KeyValueStore + ?Sized>(service: &StorageService<S>) -> Self {
        let (expenses, totals, custom, currency) = futures::join!(
            service.get_expenses(),
            service.get_total_by_category(),
            service.get_custom_categories(),
            service.get_user_currency(),
        );
        debug!(expenses = expenses.len(), categories = totals.len(), "Loaded dashboard data");

        let mut recent = expenses.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        recent.truncate(RECENT_EXPENSES);

        Self {
            expense_count: expenses.len(),
            total: totals.values().sum(),
            totals,
            recent,
            custom,
            currency,
        }
    }

    pub fn display(&self) -> String {
        let mut output = format!(
            "{}\n\nTotal spent ({}): {}  {}\n\n",
            ui::style_text("Dashboard", ui::StyleType::Title),
            ui::style_text(&self.currency, ui::StyleType::TotalLabel),
            ui::style_text(
                &format_currency(self.total, &self.currency),
                ui::StyleType::TotalValue
            ),
            ui::style_text(
                &format!("across {} expenses", self.expense_count),
                ui::StyleType::Subtle
            ),
        );

        if self.totals.is_empty() {
            output.push_str(&ui::style_text(
                "No expenses recorded yet.",
                ui::StyleType::Subtle,
            ));
            return output;
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Category"),
            ui::header_cell("Color"),
            ui::header_cell("Total"),
            ui::header_cell("Share (%)"),
        ]);

        let mut by_amount: Vec<_> = self.totals.iter().collect();
        by_amount.sort_by(|a, b| b.1.total_cmp(a.1));
        for (key, amount) in by_amount {
            let share = if self.total > 0.0 {
                amount / self.total * 100.0
            } else {
                0.0
            };
            table.add_row(vec![
                Cell::new(category::category_name(key, &self.custom)),
                Cell::new(category::category_color(key, &self.custom)),
                ui::amount_cell(format_currency(*amount, &self.currency)),
                ui::amount_cell(format!("{share:.1}%")).fg(Color::Green),
            ]);
        }
        output.push_str(&table.to_string());

        output.push_str(&format!(
            "\n\n{}\n",
            ui::style_text("Recent expenses", ui::StyleType::Title)
        ));
        output.push_str(&super::expenses::display_expenses(
            &self.recent,
            &self.custom,
            &self.currency,
        ));
        output
    }
}
