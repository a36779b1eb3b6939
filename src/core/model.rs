//! Persisted records: expenses and the user profile

use crate::core::currency::DEFAULT_CURRENCY;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: u64,
    pub title: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Numeric value of the stored amount, if it parses.
    pub fn amount_value(&self) -> Option<f64> {
        parse_amount(&self.amount)
    }

    pub(crate) fn apply(&mut self, update: ExpenseUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(description) = update.description {
            self.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        self.updated_at = now;
    }
}

/// Caller-supplied fields of a new expense. Id and timestamps are assigned
/// when it is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub title: String,
    pub amount: String,
    pub description: Option<String>,
    pub category: String,
}

impl NewExpense {
    pub(crate) fn into_expense(self, id: u64, now: DateTime<Utc>) -> Expense {
        Expense {
            id,
            title: self.title,
            amount: self.amount,
            description: self.description,
            category: self.category,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial expense update; `None` fields keep their stored value. A blank
/// description clears the stored one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseUpdate {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub avatar: Option<String>,
    pub currency: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            contact: String::new(),
            avatar: None,
            currency: DEFAULT_CURRENCY.to_string(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl UserProfile {
    pub(crate) fn merge(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(contact) = update.contact {
            self.contact = contact;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
    }

    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

/// Partial profile update for merge-save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub avatar: Option<String>,
    pub currency: Option<String>,
}

/// Formats an amount the way it is stored: fixed point, two decimals.
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

pub fn parse_amount(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Up to two uppercase initials from a display name, `U` when it is blank.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "U".to_string()
    } else {
        letters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expense_json_shape() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let expense = NewExpense {
            title: "Coffee".to_string(),
            amount: "3.50".to_string(),
            description: None,
            category: "FOOD".to_string(),
        }
        .into_expense(1, ts);

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["amount"], "3.50");
        assert_eq!(json["createdAt"], "2024-03-01T09:30:00Z");
        assert_eq!(json["updatedAt"], json["createdAt"]);
        assert!(json.get("description").is_none());

        let back: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(back, expense);
    }

    #[test]
    fn test_expense_reads_millisecond_timestamps() {
        let raw = r#"{"id":7,"title":"Lunch","amount":"12.00","description":"team",
            "category":"FOOD","createdAt":"2024-03-01T09:30:00.123Z","updatedAt":"2024-03-02T10:00:00.000Z"}"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.id, 7);
        assert_eq!(expense.description.as_deref(), Some("team"));
        assert!(expense.updated_at > expense.created_at);
    }

    #[test]
    fn test_expense_apply_keeps_absent_fields() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let mut expense = NewExpense {
            title: "Bus".to_string(),
            amount: "2.00".to_string(),
            description: Some("commute".to_string()),
            category: "TRANSPORT".to_string(),
        }
        .into_expense(2, created);

        expense.apply(
            ExpenseUpdate {
                amount: Some("2.50".to_string()),
                ..Default::default()
            },
            later,
        );

        assert_eq!(expense.title, "Bus");
        assert_eq!(expense.amount, "2.50");
        assert_eq!(expense.description.as_deref(), Some("commute"));
        assert_eq!(expense.created_at, created);
        assert_eq!(expense.updated_at, later);

        expense.apply(
            ExpenseUpdate {
                description: Some("  ".to_string()),
                ..Default::default()
            },
            later,
        );
        assert!(expense.description.is_none());
        assert_eq!(expense.amount, "2.50");
    }

    #[test]
    fn test_profile_defaults_fill_missing_fields() {
        let profile: UserProfile = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.currency, "USD");
        assert!(profile.created_at.is_none());
    }

    #[test]
    fn test_amount_helpers() {
        assert_eq!(format_amount(3.5), "3.50");
        assert_eq!(format_amount(2.0), "2.00");
        assert_eq!(parse_amount(" 3.50 "), Some(3.5));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("ada lovelace byron"), "AL");
        assert_eq!(initials("Grace"), "G");
        assert_eq!(initials("   "), "U");
    }
}
