//! Storage service: the only gateway to persisted expenses, categories and
//! the user profile.
//!
//! Every public operation is total. Store failures and malformed data are
//! logged and turned into a safe default (empty collection, `None`, `false`),
//! so callers cannot tell "no data" from "read failed".
//!
//! Mutations read the whole collection, modify it in memory and write it back
//! under one key. Nothing serializes concurrent callers, so two overlapping
//! mutations can lose one update. Adding an expense writes the collection and
//! the id counter separately; a failure between the two leaves the counter
//! behind.

use crate::core::category::{Category, CustomCategories, CustomCategory, merged_categories};
use crate::core::currency::DEFAULT_CURRENCY;
use crate::core::kv::KeyValueStore;
use crate::core::model::{Expense, ExpenseUpdate, NewExpense, ProfileUpdate, UserProfile};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

pub const EXPENSES_KEY: &str = "@expenses";
pub const NEXT_ID_KEY: &str = "@next_expense_id";
pub const CUSTOM_CATEGORIES_KEY: &str = "@custom_categories";
pub const USER_PROFILE_KEY: &str = "@user_profile";

const FIRST_EXPENSE_ID: u64 = 1;

pub struct StorageService<S: ?Sized = dyn KeyValueStore> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for StorageService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore + ?Sized> StorageService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    // === Expenses ===

    pub async fn get_expenses(&self) -> Vec<Expense> {
        self.load_expenses().await.unwrap_or_else(|e| {
            error!(error = %e, "Error loading expenses");
            Vec::new()
        })
    }

    /// Replaces the whole expense collection.
    pub async fn save_expenses(&self, expenses: &[Expense]) -> bool {
        match self.write_json(EXPENSES_KEY, &expenses).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Error saving expenses");
                false
            }
        }
    }

    pub async fn add_expense(&self, expense: NewExpense) -> Option<Expense> {
        match self.try_add_expense(expense).await {
            Ok(stored) => Some(stored),
            Err(e) => {
                error!(error = %e, "Error adding expense");
                None
            }
        }
    }

    async fn try_add_expense(&self, expense: NewExpense) -> Result<Expense> {
        let mut expenses = self.load_expenses().await?;
        let id = self.load_next_id().await?;
        let next_id = id.checked_add(1).context("Expense id counter exhausted")?;

        let stored = expense.into_expense(id, Utc::now());
        expenses.push(stored.clone());
        self.write_json(EXPENSES_KEY, &expenses).await?;
        self.store
            .set_item(NEXT_ID_KEY, &next_id.to_string())
            .await
            .context("Failed to advance expense id counter")?;

        debug!(id, category = %stored.category, "Added expense");
        Ok(stored)
    }

    /// Merges `update` into the expense with `id`. Returns `None` when no
    /// such expense exists; the collection is then left untouched.
    pub async fn update_expense(&self, id: u64, update: ExpenseUpdate) -> Option<Expense> {
        match self.try_update_expense(id, update).await {
            Ok(updated) => updated,
            Err(e) => {
                error!(id, error = %e, "Error updating expense");
                None
            }
        }
    }

    async fn try_update_expense(&self, id: u64, update: ExpenseUpdate) -> Result<Option<Expense>> {
        let mut expenses = self.load_expenses().await?;
        let Some(expense) = expenses.iter_mut().find(|e| e.id == id) else {
            debug!(id, "Expense to update not found");
            return Ok(None);
        };

        expense.apply(update, Utc::now());
        let updated = expense.clone();
        self.write_json(EXPENSES_KEY, &expenses).await?;
        debug!(id, "Updated expense");
        Ok(Some(updated))
    }

    /// Removes the expense with `id`. Deleting an unknown id still succeeds.
    pub async fn delete_expense(&self, id: u64) -> bool {
        match self.try_delete_expense(id).await {
            Ok(()) => true,
            Err(e) => {
                error!(id, error = %e, "Error deleting expense");
                false
            }
        }
    }

    async fn try_delete_expense(&self, id: u64) -> Result<()> {
        let mut expenses = self.load_expenses().await?;
        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        self.write_json(EXPENSES_KEY, &expenses).await?;
        debug!(id, removed = before - expenses.len(), "Deleted expense");
        Ok(())
    }

    /// Id the next added expense will receive.
    pub async fn get_next_id(&self) -> u64 {
        self.load_next_id().await.unwrap_or_else(|e| {
            error!(error = %e, "Error getting next id");
            FIRST_EXPENSE_ID
        })
    }

    pub async fn get_expenses_by_category(&self, category: &str) -> Vec<Expense> {
        match self.load_expenses().await {
            Ok(expenses) => expenses
                .into_iter()
                .filter(|e| e.category == category)
                .collect(),
            Err(e) => {
                error!(category, error = %e, "Error getting expenses by category");
                Vec::new()
            }
        }
    }

    /// Sum of amounts per category key.
    pub async fn get_total_by_category(&self) -> BTreeMap<String, f64> {
        match self.load_expenses().await {
            Ok(expenses) => total_by_category(&expenses),
            Err(e) => {
                error!(error = %e, "Error getting totals by category");
                BTreeMap::new()
            }
        }
    }

    /// Sum of all category totals.
    pub async fn get_grand_total(&self) -> f64 {
        self.get_total_by_category().await.values().sum()
    }

    // === Custom categories ===

    pub async fn get_custom_categories(&self) -> CustomCategories {
        self.load_custom_categories().await.unwrap_or_else(|e| {
            error!(error = %e, "Error loading custom categories");
            CustomCategories::new()
        })
    }

    /// Inserts or replaces the custom category stored under `key`.
    pub async fn save_custom_category(&self, key: &str, category: CustomCategory) -> bool {
        match self.try_save_custom_category(key, category).await {
            Ok(()) => true,
            Err(e) => {
                error!(key, error = %e, "Error saving custom category");
                false
            }
        }
    }

    async fn try_save_custom_category(&self, key: &str, category: CustomCategory) -> Result<()> {
        let mut categories = self.load_custom_categories().await?;
        if let Some(previous) = categories.insert(key.to_string(), category) {
            debug!(key, previous = %previous.name, "Overwriting custom category");
        }
        self.write_json(CUSTOM_CATEGORIES_KEY, &categories).await
    }

    /// Removes a custom category. Expenses referencing it keep the raw key.
    pub async fn delete_custom_category(&self, key: &str) -> bool {
        match self.try_delete_custom_category(key).await {
            Ok(()) => true,
            Err(e) => {
                error!(key, error = %e, "Error deleting custom category");
                false
            }
        }
    }

    async fn try_delete_custom_category(&self, key: &str) -> Result<()> {
        let mut categories = self.load_custom_categories().await?;
        categories.remove(key);
        self.write_json(CUSTOM_CATEGORIES_KEY, &categories).await
    }

    /// Default and custom categories merged into one list.
    pub async fn get_all_categories(&self) -> Vec<(String, Category)> {
        merged_categories(&self.get_custom_categories().await)
    }

    // === User profile ===

    pub async fn get_user_profile(&self) -> Option<UserProfile> {
        self.load_user_profile().await.unwrap_or_else(|e| {
            error!(error = %e, "Error loading user profile");
            None
        })
    }

    /// Shallow-merges `update` over the stored profile, creating it on first
    /// save. Returns the profile as stored.
    pub async fn save_user_profile(&self, update: ProfileUpdate) -> Option<UserProfile> {
        match self.try_save_user_profile(update).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                error!(error = %e, "Error saving user profile");
                None
            }
        }
    }

    async fn try_save_user_profile(&self, update: ProfileUpdate) -> Result<UserProfile> {
        let now = Utc::now();
        let mut profile = match self.load_user_profile().await? {
            Some(current) => current,
            None => UserProfile {
                created_at: Some(now),
                ..UserProfile::default()
            },
        };
        profile.merge(update);
        profile.updated_at = Some(now);

        self.write_json(USER_PROFILE_KEY, &profile).await?;
        debug!("Saved user profile");
        Ok(profile)
    }

    pub async fn delete_user_profile(&self) -> bool {
        match self.store.remove_item(USER_PROFILE_KEY).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Error deleting user profile");
                false
            }
        }
    }

    /// Preferred currency code, `USD` when no profile or currency is set.
    pub async fn get_user_currency(&self) -> String {
        self.get_user_profile()
            .await
            .map(|p| p.currency)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
    }

    // === Raw access ===

    async fn load_expenses(&self) -> Result<Vec<Expense>> {
        Ok(self.read_json(EXPENSES_KEY).await?.unwrap_or_default())
    }

    async fn load_custom_categories(&self) -> Result<CustomCategories> {
        Ok(self.read_json(CUSTOM_CATEGORIES_KEY).await?.unwrap_or_default())
    }

    async fn load_user_profile(&self) -> Result<Option<UserProfile>> {
        self.read_json(USER_PROFILE_KEY).await
    }

    async fn load_next_id(&self) -> Result<u64> {
        match self.store.get_item(NEXT_ID_KEY).await? {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid expense id counter: {raw:?}")),
            None => Ok(FIRST_EXPENSE_ID),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get_item(key).await? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed JSON stored under {key}"))?;
        Ok(Some(value))
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize value for {key}"))?;
        self.store.set_item(key, &raw).await
    }
}

/// Folds expense amounts into per-category sums. Amounts that do not parse
/// are skipped.
pub fn total_by_category(expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        match expense.amount_value() {
            Some(amount) => *totals.entry(expense.category.clone()).or_insert(0.0) += amount,
            None => warn!(
                id = expense.id,
                amount = %expense.amount,
                "Skipping expense with unparseable amount"
            ),
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use anyhow::anyhow;
    use async_trait::async_trait;

    fn service() -> (StorageService<MemoryStore>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (StorageService::new(Arc::clone(&store)), store)
    }

    fn new_expense(title: &str, amount: &str, category: &str) -> NewExpense {
        NewExpense {
            title: title.to_string(),
            amount: amount.to_string(),
            description: None,
            category: category.to_string(),
        }
    }

    /// A store where every call fails.
    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("store unavailable"))
        }

        async fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("store unavailable"))
        }

        async fn remove_item(&self, _key: &str) -> Result<()> {
            Err(anyhow!("store unavailable"))
        }
    }

    /// Reads work, writes to one key fail.
    struct ReadOnlyKeyStore {
        inner: MemoryStore,
        locked_key: &'static str,
    }

    #[async_trait]
    impl KeyValueStore for ReadOnlyKeyStore {
        async fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key).await
        }

        async fn set_item(&self, key: &str, value: &str) -> Result<()> {
            if key == self.locked_key {
                return Err(anyhow!("{key} is read-only"));
            }
            self.inner.set_item(key, value).await
        }

        async fn remove_item(&self, key: &str) -> Result<()> {
            self.inner.remove_item(key).await
        }
    }

    #[tokio::test]
    async fn test_coffee_and_bus_scenario() {
        let (service, _) = service();

        let coffee = service
            .add_expense(new_expense("Coffee", "3.50", "FOOD"))
            .await
            .unwrap();
        assert_eq!(coffee.id, 1);
        assert_eq!(coffee.created_at, coffee.updated_at);

        let totals = service.get_total_by_category().await;
        assert_eq!(totals.get("FOOD"), Some(&3.5));

        let bus = service
            .add_expense(new_expense("Bus", "2.00", "TRANSPORT"))
            .await
            .unwrap();
        assert_eq!(bus.id, 2);

        let totals = service.get_total_by_category().await;
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["FOOD"], 3.5);
        assert_eq!(totals["TRANSPORT"], 2.0);
        assert_eq!(service.get_grand_total().await, 5.5);
    }

    #[tokio::test]
    async fn test_ids_are_increasing_and_never_reused() {
        let (service, _) = service();

        let mut ids = Vec::new();
        for i in 0..5 {
            let e = service
                .add_expense(new_expense(&format!("e{i}"), "1.00", "OTHER"))
                .await
                .unwrap();
            ids.push(e.id);
        }
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        assert!(service.delete_expense(5).await);
        assert_eq!(service.get_next_id().await, 6);
        let next = service
            .add_expense(new_expense("after delete", "1.00", "OTHER"))
            .await
            .unwrap();
        assert_eq!(next.id, 6);
    }

    #[tokio::test]
    async fn test_get_expenses_keeps_insertion_order() {
        let (service, _) = service();
        assert!(service.get_expenses().await.is_empty());

        for title in ["a", "b", "c"] {
            service.add_expense(new_expense(title, "1.00", "FOOD")).await;
        }
        let titles: Vec<_> = service
            .get_expenses()
            .await
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_update_merges_fields_and_refreshes_timestamp() {
        let (service, _) = service();
        let original = service
            .add_expense(NewExpense {
                description: Some("morning".to_string()),
                ..new_expense("Coffee", "3.50", "FOOD")
            })
            .await
            .unwrap();

        let updated = service
            .update_expense(
                original.id,
                ExpenseUpdate {
                    amount: Some("4.00".to_string()),
                    category: Some("OTHER".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, "Coffee");
        assert_eq!(updated.description.as_deref(), Some("morning"));
        assert_eq!(updated.amount, "4.00");
        assert_eq!(updated.category, "OTHER");
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);

        let stored = service.get_expenses().await;
        assert_eq!(stored, vec![updated]);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_noop() {
        let (service, store) = service();
        service.add_expense(new_expense("Coffee", "3.50", "FOOD")).await;
        let before = store.get_item(EXPENSES_KEY).await.unwrap();

        let result = service
            .update_expense(
                42,
                ExpenseUpdate {
                    title: Some("Ghost".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_none());
        assert_eq!(store.get_item(EXPENSES_KEY).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_removes_only_the_match() {
        let (service, _) = service();
        for title in ["a", "b", "c"] {
            service.add_expense(new_expense(title, "1.00", "FOOD")).await;
        }

        assert!(service.delete_expense(2).await);
        let ids: Vec<_> = service.get_expenses().await.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);

        // Unknown id: still success, nothing changes
        assert!(service.delete_expense(99).await);
        let ids: Vec<_> = service.get_expenses().await.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_expenses_by_category() {
        let (service, _) = service();
        service.add_expense(new_expense("Coffee", "3.50", "FOOD")).await;
        service.add_expense(new_expense("Bus", "2.00", "TRANSPORT")).await;
        service.add_expense(new_expense("Bagel", "2.25", "FOOD")).await;

        let food: Vec<_> = service
            .get_expenses_by_category("FOOD")
            .await
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(food, vec!["Coffee", "Bagel"]);
        assert!(service.get_expenses_by_category("HEALTH").await.is_empty());
    }

    #[tokio::test]
    async fn test_totals_of_empty_collection() {
        let (service, _) = service();
        assert!(service.get_total_by_category().await.is_empty());
        assert_eq!(service.get_grand_total().await, 0.0);
    }

    #[test]
    fn test_total_by_category_skips_unparseable_amounts() {
        let now = Utc::now();
        let expenses = vec![
            new_expense("ok", "1.25", "FOOD").into_expense(1, now),
            new_expense("bad", "n/a", "FOOD").into_expense(2, now),
            new_expense("ok2", "0.75", "FOOD").into_expense(3, now),
        ];
        let totals = total_by_category(&expenses);
        assert_eq!(totals["FOOD"], 2.0);
    }

    #[tokio::test]
    async fn test_custom_categories_crud() {
        let (service, _) = service();
        assert!(service.get_custom_categories().await.is_empty());

        let pets = CustomCategory {
            name: "Pets".to_string(),
            color: "#123456".to_string(),
        };
        assert!(service.save_custom_category("PETS", pets.clone()).await);
        assert_eq!(service.get_custom_categories().await.get("PETS"), Some(&pets));

        let renamed = CustomCategory {
            name: "Pet care".to_string(),
            color: "#654321".to_string(),
        };
        assert!(service.save_custom_category("PETS", renamed.clone()).await);
        let categories = service.get_custom_categories().await;
        assert_eq!(categories.len(), 1);
        assert_eq!(categories["PETS"], renamed);

        assert!(service.delete_custom_category("PETS").await);
        assert!(service.get_custom_categories().await.is_empty());
        assert!(service.delete_custom_category("PETS").await);
    }

    #[tokio::test]
    async fn test_deleting_category_leaves_expenses_dangling() {
        let (service, _) = service();
        service
            .save_custom_category(
                "PETS",
                CustomCategory {
                    name: "Pets".to_string(),
                    color: "#123456".to_string(),
                },
            )
            .await;
        service.add_expense(new_expense("Kibble", "20.00", "PETS")).await;

        assert!(service.delete_custom_category("PETS").await);
        let expenses = service.get_expenses_by_category("PETS").await;
        assert_eq!(expenses.len(), 1);
        assert_eq!(service.get_total_by_category().await["PETS"], 20.0);
    }

    #[tokio::test]
    async fn test_all_categories_merges_defaults() {
        let (service, _) = service();
        service
            .save_custom_category(
                "PETS",
                CustomCategory {
                    name: "Pets".to_string(),
                    color: "#123456".to_string(),
                },
            )
            .await;

        let all = service.get_all_categories().await;
        assert_eq!(all.first().map(|(k, _)| k.as_str()), Some("FOOD"));
        let (key, pets) = all.last().unwrap();
        assert_eq!(key, "PETS");
        assert_eq!(pets.color(), "#123456");
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let (service, _) = service();
        assert!(service.get_user_profile().await.is_none());
        assert_eq!(service.get_user_currency().await, "USD");

        let saved = service
            .save_user_profile(ProfileUpdate {
                name: Some("Ada Lovelace".to_string()),
                email: Some("ada@example.com".to_string()),
                currency: Some("GBP".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(saved.created_at.is_some());
        assert_eq!(saved.created_at, saved.updated_at);

        let loaded = service.get_user_profile().await.unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.name, "Ada Lovelace");
        assert_eq!(loaded.contact, "");
        assert_eq!(service.get_user_currency().await, "GBP");

        assert!(service.delete_user_profile().await);
        assert!(service.get_user_profile().await.is_none());
        assert_eq!(service.get_user_currency().await, "USD");
    }

    #[tokio::test]
    async fn test_profile_merge_keeps_created_at() {
        let (service, _) = service();
        let first = service
            .save_user_profile(ProfileUpdate {
                name: Some("Ada".to_string()),
                contact: Some("123-456-7890".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let second = service
            .save_user_profile(ProfileUpdate {
                currency: Some("EUR".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(second.name, "Ada");
        assert_eq!(second.contact, "123-456-7890");
        assert_eq!(second.currency, "EUR");
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_empty_currency_falls_back_to_default() {
        let (service, _) = service();
        service
            .save_user_profile(ProfileUpdate {
                currency: Some(String::new()),
                ..Default::default()
            })
            .await;
        assert_eq!(service.get_user_currency().await, "USD");
    }

    #[tokio::test]
    async fn test_reads_records_written_by_other_clients() {
        let (service, store) = service();
        store
            .set_item(
                EXPENSES_KEY,
                r#"[{"id":4,"title":"Tea","amount":"1.20","category":"FOOD",
                    "createdAt":"2024-05-01T08:00:00.000Z","updatedAt":"2024-05-01T08:00:00.000Z"}]"#,
            )
            .await
            .unwrap();
        store.set_item(NEXT_ID_KEY, "5").await.unwrap();

        let added = service
            .add_expense(new_expense("Scone", "2.80", "FOOD"))
            .await
            .unwrap();
        assert_eq!(added.id, 5);
        assert_eq!(store.get_item(NEXT_ID_KEY).await.unwrap().as_deref(), Some("6"));
        assert_eq!(service.get_total_by_category().await["FOOD"], 4.0);
    }

    #[tokio::test]
    async fn test_malformed_data_yields_defaults() {
        let (service, store) = service();
        store.set_item(EXPENSES_KEY, "{not json").await.unwrap();
        store.set_item(CUSTOM_CATEGORIES_KEY, "[]").await.unwrap();
        store.set_item(USER_PROFILE_KEY, "42").await.unwrap();
        store.set_item(NEXT_ID_KEY, "abc").await.unwrap();

        assert!(service.get_expenses().await.is_empty());
        assert!(service.get_total_by_category().await.is_empty());
        assert!(service.get_custom_categories().await.is_empty());
        assert!(service.get_user_profile().await.is_none());
        assert_eq!(service.get_next_id().await, 1);
        assert!(service.add_expense(new_expense("x", "1.00", "FOOD")).await.is_none());
        // Nothing was overwritten by the failed add
        assert_eq!(
            store.get_item(EXPENSES_KEY).await.unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[tokio::test]
    async fn test_exhausted_id_counter_fails_add() {
        let (service, store) = service();
        store
            .set_item(NEXT_ID_KEY, &u64::MAX.to_string())
            .await
            .unwrap();

        assert!(service.add_expense(new_expense("x", "1.00", "FOOD")).await.is_none());
        assert!(service.get_expenses().await.is_empty());
        assert_eq!(service.get_next_id().await, u64::MAX);
    }

    #[tokio::test]
    async fn test_failing_store_returns_safe_defaults() {
        let service = StorageService::new(Arc::new(FailingStore));

        assert!(service.get_expenses().await.is_empty());
        assert!(!service.save_expenses(&[]).await);
        assert!(service.add_expense(new_expense("x", "1.00", "FOOD")).await.is_none());
        assert!(service.update_expense(1, ExpenseUpdate::default()).await.is_none());
        assert!(!service.delete_expense(1).await);
        assert_eq!(service.get_next_id().await, 1);
        assert!(service.get_expenses_by_category("FOOD").await.is_empty());
        assert!(service.get_total_by_category().await.is_empty());
        assert!(service.get_custom_categories().await.is_empty());
        assert!(
            !service
                .save_custom_category(
                    "PETS",
                    CustomCategory {
                        name: "Pets".to_string(),
                        color: "#123456".to_string(),
                    },
                )
                .await
        );
        assert!(!service.delete_custom_category("PETS").await);
        assert_eq!(service.get_all_categories().await.len(), 8);
        assert!(service.get_user_profile().await.is_none());
        assert!(service.save_user_profile(ProfileUpdate::default()).await.is_none());
        assert!(!service.delete_user_profile().await);
        assert_eq!(service.get_user_currency().await, "USD");
    }

    #[tokio::test]
    async fn test_counter_write_failure_fails_add_but_keeps_expense() {
        let store = Arc::new(ReadOnlyKeyStore {
            inner: MemoryStore::new(),
            locked_key: NEXT_ID_KEY,
        });
        let service = StorageService::new(Arc::clone(&store));

        assert!(service.add_expense(new_expense("x", "1.00", "FOOD")).await.is_none());
        // The collection write went through before the counter write failed
        assert_eq!(service.get_expenses().await.len(), 1);
        assert_eq!(service.get_next_id().await, 1);
    }

    #[tokio::test]
    async fn test_save_expenses_replaces_collection() {
        let (service, _) = service();
        service.add_expense(new_expense("a", "1.00", "FOOD")).await;
        let b = service.add_expense(new_expense("b", "2.00", "FOOD")).await.unwrap();

        assert!(service.save_expenses(std::slice::from_ref(&b)).await);
        assert_eq!(service.get_expenses().await, vec![b]);
        // The counter is independent of the collection
        assert_eq!(service.get_next_id().await, 3);
    }

    #[tokio::test]
    async fn test_service_over_trait_object() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let service: StorageService = StorageService::new(store);
        let cloned = service.clone();

        service.add_expense(new_expense("a", "1.00", "FOOD")).await;
        assert_eq!(cloned.get_expenses().await.len(), 1);
    }
}
