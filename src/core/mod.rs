//! Core domain types and abstractions

pub mod category;
pub mod config;
pub mod currency;
pub mod kv;
pub mod log;
pub mod model;
pub mod validate;

// Re-export main types for cleaner imports
pub use category::{Category, CustomCategories, CustomCategory};
pub use currency::{Currency, DEFAULT_CURRENCY};
pub use kv::KeyValueStore;
pub use model::{Expense, ExpenseUpdate, NewExpense, ProfileUpdate, UserProfile};
