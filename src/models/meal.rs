//! Meal ingredient models
//!
//! Ingredients of a single logged meal, carrying absolute macros for the
//! amount eaten rather than a per-100g profile.

use serde::{Deserialize, Serialize};

use super::Macros;

/// A resolved ingredient of a logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealIngredient {
    pub ingredient_id: String,
    pub name: String,
    /// Amount eaten, in grams
    pub quantity: f64,
    pub macros: Macros,
}

/// A client-supplied meal ingredient, quantity already in grams.
/// When both `name` and `macros` are given they are taken as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualIngredient {
    pub ingredient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<Macros>,
}

impl ManualIngredient {
    pub fn new(ingredient_id: impl Into<String>, quantity: f64) -> Self {
        Self {
            ingredient_id: ingredient_id.into(),
            quantity,
            ..Self::default()
        }
    }

    /// Attach client-computed name and macros
    pub fn with_known(mut self, name: impl Into<String>, macros: Macros) -> Self {
        self.name = Some(name.into());
        self.macros = Some(macros);
        self
    }
}
