//! Expense categories: built-in defaults, user-defined custom entries and colors

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built-in categories as `(key, display name)` in display order.
pub const DEFAULT_CATEGORIES: [(&str, &str); 8] = [
    ("FOOD", "Food"),
    ("TRANSPORT", "Transport"),
    ("SHOPPING", "Shopping"),
    ("BILLS", "Bills"),
    ("ENTERTAINMENT", "Entertainment"),
    ("HEALTH", "Health"),
    ("EDUCATION", "Education"),
    ("OTHER", "Other"),
];

/// Colors of the built-in categories, keyed by display name.
const DEFAULT_CATEGORY_COLORS: [(&str, &str); 8] = [
    ("Food", "#FF6B6B"),
    ("Transport", "#4ECDC4"),
    ("Shopping", "#45B7D1"),
    ("Bills", "#FFA07A"),
    ("Entertainment", "#98D8C8"),
    ("Health", "#F06292"),
    ("Education", "#AED581"),
    ("Other", "#FFB74D"),
];

pub const AVAILABLE_COLORS: [&str; 20] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F06292", "#AED581", "#FFB74D",
    "#9C27B0", "#3F51B5", "#009688", "#FF9800", "#795548", "#607D8B", "#E91E63", "#8BC34A",
    "#FF5722", "#673AB7", "#2196F3", "#4CAF50",
];

/// Neutral gray used for categories nobody assigned a color to.
pub const FALLBACK_COLOR: &str = "#757575";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub name: String,
    pub color: String,
}

pub type CustomCategories = BTreeMap<String, CustomCategory>;

/// A category as shown to the user, after defaults and custom entries have
/// been merged into one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Default { name: &'static str },
    Custom { name: String, color: String },
}

impl Category {
    pub fn name(&self) -> &str {
        match self {
            Category::Default { name } => *name,
            Category::Custom { name, .. } => name.as_str(),
        }
    }

    pub fn color(&self) -> &str {
        match self {
            Category::Default { name } => default_color(name).unwrap_or(FALLBACK_COLOR),
            Category::Custom { color, .. } => color.as_str(),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Category::Custom { .. })
    }
}

pub fn default_category_name(key: &str) -> Option<&'static str> {
    DEFAULT_CATEGORIES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
}

fn default_color(name: &str) -> Option<&'static str> {
    DEFAULT_CATEGORY_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, color)| *color)
}

/// Resolves the color of a category key: custom entries win, then the
/// built-in palette (by key or display name), then [`FALLBACK_COLOR`].
pub fn category_color<'a>(category: &str, custom: &'a CustomCategories) -> &'a str {
    if let Some(entry) = custom.get(category) {
        return &entry.color;
    }
    let name = default_category_name(category).unwrap_or(category);
    default_color(name).unwrap_or(FALLBACK_COLOR)
}

/// Display name of a category key; unknown keys are shown as-is.
pub fn category_name<'a>(category: &'a str, custom: &'a CustomCategories) -> &'a str {
    if let Some(entry) = custom.get(category) {
        return &entry.name;
    }
    default_category_name(category).unwrap_or(category)
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    AVAILABLE_COLORS.choose(rng).copied().unwrap_or(FALLBACK_COLOR)
}

/// Derives a category key from a display name: trimmed, uppercased, with
/// whitespace runs replaced by `_`. Distinct names may map to the same key.
pub fn category_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Merges defaults and custom entries. A custom entry with a default key
/// replaces that default in place; the remaining custom entries follow.
pub fn merged_categories(custom: &CustomCategories) -> Vec<(String, Category)> {
    let mut merged: Vec<(String, Category)> = DEFAULT_CATEGORIES
        .iter()
        .map(|&(key, name)| {
            let category = match custom.get(key) {
                Some(c) => Category::Custom {
                    name: c.name.clone(),
                    color: c.color.clone(),
                },
                None => Category::Default { name },
            };
            (key.to_string(), category)
        })
        .collect();

    merged.extend(
        custom
            .iter()
            .filter(|(key, _)| default_category_name(key).is_none())
            .map(|(key, c)| {
                (
                    key.clone(),
                    Category::Custom {
                        name: c.name.clone(),
                        color: c.color.clone(),
                    },
                )
            }),
    );
    merged
}
