//! Currency reference data and amount formatting

use serde::Serialize;

pub const DEFAULT_CURRENCY: &str = "USD";

const FALLBACK_SYMBOL: &str = "$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

const fn currency(code: &'static str, symbol: &'static str, name: &'static str) -> Currency {
    Currency { code, symbol, name }
}

pub static SUPPORTED_CURRENCIES: [Currency; 32] = [
    currency("USD", "$", "US Dollar"),
    currency("EUR", "€", "Euro"),
    currency("GBP", "£", "British Pound"),
    currency("INR", "₹", "Indian Rupee"),
    currency("JPY", "¥", "Japanese Yen"),
    currency("CAD", "C$", "Canadian Dollar"),
    currency("AUD", "A$", "Australian Dollar"),
    currency("CHF", "₣", "Swiss Franc"),
    currency("CNY", "¥", "Chinese Yuan"),
    currency("KRW", "₩", "South Korean Won"),
    currency("SGD", "S$", "Singapore Dollar"),
    currency("HKD", "HK$", "Hong Kong Dollar"),
    currency("NOK", "kr", "Norwegian Krone"),
    currency("SEK", "kr", "Swedish Krona"),
    currency("DKK", "kr", "Danish Krone"),
    currency("PLN", "zł", "Polish Zloty"),
    currency("CZK", "Kč", "Czech Koruna"),
    currency("HUF", "Ft", "Hungarian Forint"),
    currency("RUB", "₽", "Russian Ruble"),
    currency("BRL", "R$", "Brazilian Real"),
    currency("MXN", "$", "Mexican Peso"),
    currency("ZAR", "R", "South African Rand"),
    currency("TRY", "₺", "Turkish Lira"),
    currency("THB", "฿", "Thai Baht"),
    currency("PHP", "₱", "Philippine Peso"),
    currency("MYR", "RM", "Malaysian Ringgit"),
    currency("IDR", "Rp", "Indonesian Rupiah"),
    currency("VND", "₫", "Vietnamese Dong"),
    currency("EGP", "£", "Egyptian Pound"),
    currency("SAR", "﷼", "Saudi Riyal"),
    currency("AED", "د.إ", "UAE Dirham"),
    currency("ILS", "₪", "Israeli Shekel"),
];

/// Codes offered first when picking a currency.
pub const POPULAR_CURRENCIES: [&str; 8] = ["USD", "EUR", "GBP", "INR", "JPY", "CAD", "AUD", "CHF"];

/// Currencies whose symbol is written after the amount, separated by a space.
const SUFFIX_SYMBOL_CURRENCIES: [&str; 4] = ["EUR", "PLN", "CZK", "HUF"];

pub fn find_currency(code: &str) -> Option<&'static Currency> {
    SUPPORTED_CURRENCIES.iter().find(|c| c.code == code)
}

/// Case-insensitive substring search over currency names and codes.
/// An empty query matches every currency.
pub fn search_currencies(query: &str) -> Vec<&'static Currency> {
    let query = query.trim().to_lowercase();
    SUPPORTED_CURRENCIES
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&query) || c.code.to_lowercase().contains(&query))
        .collect()
}

pub fn currency_symbol(code: &str) -> &'static str {
    find_currency(code).map_or(FALLBACK_SYMBOL, |c| c.symbol)
}

/// Formats an amount with the currency symbol placed the way the currency is
/// usually written. Unknown codes fall back to a `$` prefix without rounding.
pub fn format_currency(amount: f64, code: &str) -> String {
    let Some(currency) = find_currency(code) else {
        return format!("{FALLBACK_SYMBOL}{amount}");
    };

    let formatted = format!("{amount:.2}");
    if SUFFIX_SYMBOL_CURRENCIES.contains(&currency.code) {
        format!("{formatted} {}", currency.symbol)
    } else {
        format!("{}{formatted}", currency.symbol)
    }
}
