//! Recipe MCP Tools
//!
//! Unit conversion and per-100g recipe aggregation against the current
//! ingredient catalog.

use std::sync::Mutex;

use serde::Serialize;

use crate::catalog::{CatalogClient, IngredientCatalog, SharedCatalog};
use crate::models::{DisplayNameCache, MacroTotals, RecipeIngredientEntry};
use crate::nutrition::{recipe_breakdown, str_to_grams, Unit};

/// Response for convert_to_grams
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub quantity: f64,
    pub unit: String,
    /// false when the unit fell back to the 1:1 identity factor
    pub recognized: bool,
    pub grams: f64,
}

/// Response for recipe_macros and recipe_macros_by_id
#[derive(Debug, Serialize)]
pub struct RecipeMacrosResponse {
    pub recipe_id: Option<String>,
    pub name: Option<String>,
    pub per_hundred: MacroTotals,
    pub total_weight_g: f64,
    pub total: MacroTotals,
    pub ingredient_count: usize,
    pub unresolved: Vec<String>,
    pub catalog_size: usize,
}

/// Convert a quantity in some unit to grams
pub fn convert_to_grams(quantity: f64, unit: &str) -> Result<ConvertResponse, String> {
    if !quantity.is_finite() {
        return Err(format!("Quantity must be a finite number, got {}", quantity));
    }

    Ok(ConvertResponse {
        quantity,
        unit: unit.to_string(),
        recognized: Unit::parse(unit).is_some(),
        grams: str_to_grams(quantity, unit),
    })
}

/// Aggregate recipe entries against a catalog
pub fn recipe_macros(catalog: &IngredientCatalog, entries: &[RecipeIngredientEntry]) -> RecipeMacrosResponse {
    let breakdown = recipe_breakdown(entries, catalog);

    if !breakdown.unresolved.is_empty() {
        tracing::debug!(
            "{} of {} recipe entries unresolved against {} catalog ingredients",
            breakdown.unresolved.len(),
            entries.len(),
            catalog.len()
        );
    }

    RecipeMacrosResponse {
        recipe_id: None,
        name: None,
        per_hundred: breakdown.per_hundred,
        total_weight_g: breakdown.total_weight_g,
        total: breakdown.absolute.rounded(),
        ingredient_count: entries.len(),
        unresolved: breakdown.unresolved,
        catalog_size: catalog.len(),
    }
}

/// Fetch a recipe from the catalog service and aggregate it.
/// The recipe's name is remembered in `names` for later day conversions.
pub async fn recipe_macros_by_id(
    client: &CatalogClient,
    catalog: &SharedCatalog,
    names: &Mutex<DisplayNameCache>,
    recipe_id: &str,
) -> Result<RecipeMacrosResponse, String> {
    let recipe_id = recipe_id.trim();
    if recipe_id.is_empty() {
        return Err("recipe_id must not be empty".to_string());
    }

    let recipe = client
        .fetch_recipe(recipe_id)
        .await
        .map_err(|e| format!("Failed to fetch recipe {}: {}", recipe_id, e))?;

    if let Some(name) = recipe.name.as_deref() {
        let mut names = names.lock().unwrap_or_else(|e| e.into_inner());
        names.insert(recipe_id, name);
    }

    let mut response = recipe_macros(&catalog.snapshot(), &recipe.ingredients);
    response.recipe_id = Some(recipe.id.unwrap_or_else(|| recipe_id.to_string()));
    response.name = recipe.name;
    Ok(response)
}
