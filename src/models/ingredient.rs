//! Ingredient and recipe models
//!
//! Reference data owned by the recipe catalog, plus the wire records the
//! catalog serves them in.

use serde::{Deserialize, Serialize};

use crate::nutrition::units::Capacity;
use super::MacroProfile;

/// An ingredient with its per-100g nutrient profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub macro_per_hundred: MacroProfile,
}

/// An ingredient as served by `GET /ingredients`
///
/// The catalog emits either `id` or the document key `_id`; both are kept
/// so the resolver can try each.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogIngredient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub macro_per_hundred: Option<MacroProfile>,
}

impl CatalogIngredient {
    /// The lookup key: `id` when present and non-empty, otherwise `_id`
    pub fn key(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.document_id.as_deref().filter(|s| !s.is_empty()))
    }

    /// Convert into an `Ingredient`; records without any id yield `None`.
    /// A missing profile becomes all zeros.
    pub fn into_ingredient(self) -> Option<Ingredient> {
        let id = self.key()?.to_string();
        Some(Ingredient {
            id,
            name: self.name,
            macro_per_hundred: self.macro_per_hundred.unwrap_or_default(),
        })
    }
}

/// One line item of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredientEntry {
    pub ingredient_id: String,
    pub quantity: f64,
    #[serde(default)]
    pub capacity: Capacity,
}

impl RecipeIngredientEntry {
    pub fn new(ingredient_id: impl Into<String>, quantity: f64, capacity: impl Into<Capacity>) -> Self {
        Self {
            ingredient_id: ingredient_id.into(),
            quantity,
            capacity: capacity.into(),
        }
    }
}

/// A recipe as served by `GET /recipes/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientEntry>,
    /// Preparation time in seconds
    #[serde(default)]
    pub time_to_prepare: Option<u64>,
    #[serde(default)]
    pub prepare_instruction: Vec<String>,
}
