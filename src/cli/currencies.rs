use super::ui;
use crate::core::currency::{POPULAR_CURRENCIES, search_currencies};
use comfy_table::{Cell, Color};

/// Lists supported currencies matching `query`, popular ones first.
pub fn run(query: Option<&str>, selected: &str) -> String {
    let mut matches = search_currencies(query.unwrap_or_default());
    if matches.is_empty() {
        return ui::style_text("No currency matches that search.", ui::StyleType::Warning);
    }
    // Stable sort keeps table order within each group
    matches.sort_by_key(|c| !POPULAR_CURRENCIES.contains(&c.code));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Symbol"),
        ui::header_cell("Name"),
        ui::header_cell(""),
    ]);
    for currency in matches {
        let marker = if currency.code == selected {
            Cell::new("✓").fg(Color::Green)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(currency.code),
            Cell::new(currency.symbol),
            Cell::new(currency.name),
            marker,
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_output() {
        let output = run(Some("dollar"), "SGD");
        assert!(output.contains("US Dollar"));
        assert!(output.contains("Singapore Dollar"));
        assert!(output.contains("✓"));
        assert!(!output.contains("Euro"));

        // Popular dollars come before the rest
        let us = output.find("US Dollar").unwrap();
        let sg = output.find("Singapore Dollar").unwrap();
        let ca = output.find("Canadian Dollar").unwrap();
        assert!(us < ca && ca < sg);
    }

    #[test]
    fn test_no_match() {
        assert!(run(Some("doubloon"), "USD").contains("No currency matches"));
    }
}
