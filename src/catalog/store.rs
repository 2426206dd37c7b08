//! Ingredient catalog storage
//!
//! `IngredientCatalog` is an immutable id -> ingredient mapping built once
//! from a bulk fetch. `SharedCatalog` hands out snapshots of the current
//! catalog and replaces it wholesale on refresh, so readers never observe a
//! partially populated mapping.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::models::{CatalogIngredient, Ingredient};
use crate::nutrition::IngredientResolver;

#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    by_id: HashMap<String, Ingredient>,
    /// Records dropped because they carried neither `id` nor `_id`
    skipped: usize,
    loaded_at: Option<DateTime<Utc>>,
}

impl IngredientCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from fetched records. Later duplicates win.
    pub fn from_records(records: Vec<CatalogIngredient>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut skipped = 0;

        for record in records {
            match record.into_ingredient() {
                Some(ingredient) => {
                    by_id.insert(ingredient.id.clone(), ingredient);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} catalog records without an id", skipped);
        }

        Self {
            by_id,
            skipped,
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn from_ingredients(ingredients: impl IntoIterator<Item = Ingredient>) -> Self {
        Self {
            by_id: ingredients.into_iter().map(|i| (i.id.clone(), i)).collect(),
            skipped: 0,
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}

impl IngredientResolver for IngredientCatalog {
    fn resolve(&self, ingredient_id: &str) -> Option<&Ingredient> {
        self.by_id.get(ingredient_id)
    }
}

/// The session's current catalog, swapped in whole on refresh
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    current: Arc<RwLock<Arc<IngredientCatalog>>>,
}

impl SharedCatalog {
    pub fn new(catalog: IngredientCatalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// The catalog as of now; later refreshes do not affect it
    pub fn snapshot(&self) -> Arc<IngredientCatalog> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Install a fully built catalog, returning the one it replaced
    pub fn replace(&self, catalog: IngredientCatalog) -> Arc<IngredientCatalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MacroProfile, MacroTotals, RecipeIngredientEntry};
    use crate::nutrition::{aggregate_recipe, Unit};

    fn record(id: Option<&str>, doc_id: Option<&str>, name: &str, kcal: f64) -> CatalogIngredient {
        CatalogIngredient {
            id: id.map(String::from),
            document_id: doc_id.map(String::from),
            name: name.to_string(),
            macro_per_hundred: Some(MacroProfile::new(kcal, 0.0, 0.0, 0.0)),
        }
    }

    #[test]
    fn test_from_records_tries_both_id_forms() {
        let catalog = IngredientCatalog::from_records(vec![
            record(Some("a"), None, "Apple", 52.0),
            record(None, Some("b"), "Banana", 89.0),
            record(None, None, "Nameless", 1.0),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.skipped(), 1);
        assert_eq!(catalog.resolve("b").map(|i| i.name.as_str()), Some("Banana"));
        assert!(catalog.loaded_at().is_some());
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let shared = SharedCatalog::new(IngredientCatalog::from_records(vec![record(Some("a"), None, "Apple", 52.0)]));
        let before = shared.snapshot();

        let old = shared.replace(IngredientCatalog::from_records(vec![record(Some("b"), None, "Banana", 89.0)]));
        assert!(old.resolve("a").is_some());

        assert!(before.resolve("a").is_some());
        assert!(before.resolve("b").is_none());

        let after = shared.snapshot();
        assert!(after.resolve("a").is_none());
        assert!(after.resolve("b").is_some());
    }

    #[test]
    fn test_snapshot_drives_aggregation() {
        let shared = SharedCatalog::new(IngredientCatalog::from_records(vec![record(Some("a"), None, "Apple", 52.0)]));
        let entries = vec![RecipeIngredientEntry::new("a", 200.0, Unit::G)];

        let catalog = shared.snapshot();
        assert_eq!(aggregate_recipe(&entries, &*catalog), MacroTotals::new(52, 0, 0, 0));
    }

    #[test]
    fn test_default_shared_catalog_is_empty() {
        assert!(SharedCatalog::default().snapshot().is_empty());
    }
}
