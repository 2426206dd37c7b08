//! Meal MCP Tools
//!
//! Resolve a logged meal, either a whole recipe or a list of ingredients,
//! into absolute macros and a consumed item ready for a day record.

use std::sync::Mutex;

use serde::Serialize;

use crate::catalog::{CatalogClient, IngredientCatalog, SharedCatalog};
use crate::models::{ConsumedItem, DisplayNameCache, MacroTotals, Macros, ManualIngredient, MealIngredient, RecipeRecord};
use crate::nutrition::{consumed_item_from_recipe, resolve_manual_ingredients, resolve_recipe_ingredients};

/// Item id used for meals logged from loose ingredients
pub const MANUAL_MEAL_ID: &str = "manual";

/// Response for meal_macros
#[derive(Debug, Serialize)]
pub struct MealMacrosResponse {
    pub recipe_id: Option<String>,
    pub ingredients: Vec<MealIngredient>,
    pub skipped: Vec<String>,
    pub total: Macros,
    pub total_rounded: MacroTotals,
    /// Drop-in item for a daily_macros section
    pub item: ConsumedItem,
}

/// Resolve a fetched recipe, eaten whole, against a catalog
pub fn meal_from_recipe_record(
    catalog: &IngredientCatalog,
    recipe_id: &str,
    recipe: &RecipeRecord,
) -> Result<MealMacrosResponse, String> {
    if recipe.ingredients.is_empty() {
        return Err(format!("Recipe {} has no ingredients", recipe_id));
    }

    let meal = resolve_recipe_ingredients(&recipe.ingredients, catalog);
    let item = consumed_item_from_recipe(recipe_id, recipe, catalog);

    Ok(MealMacrosResponse {
        recipe_id: Some(recipe_id.to_string()),
        total_rounded: meal.total.rounded(),
        total: meal.total,
        ingredients: meal.ingredients,
        skipped: meal.skipped,
        item,
    })
}

/// Fetch a recipe and resolve it as one meal
pub async fn meal_from_recipe(
    client: &CatalogClient,
    catalog: &SharedCatalog,
    names: &Mutex<DisplayNameCache>,
    recipe_id: &str,
) -> Result<MealMacrosResponse, String> {
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

    meal_from_recipe_record(&catalog.snapshot(), recipe_id, &recipe)
}

/// Resolve loose ingredients (quantities in grams) as one meal
pub fn meal_from_ingredients(
    catalog: &IngredientCatalog,
    items: &[ManualIngredient],
    name: Option<&str>,
) -> Result<MealMacrosResponse, String> {
    if items.is_empty() {
        return Err("Provide either recipe_id or at least one ingredient".to_string());
    }

    let meal = resolve_manual_ingredients(items, catalog);
    let item = ConsumedItem::new(MANUAL_MEAL_ID, name.unwrap_or("Manual meal"), meal.total);

    Ok(MealMacrosResponse {
        recipe_id: None,
        total_rounded: meal.total.rounded(),
        total: meal.total,
        ingredients: meal.ingredients,
        skipped: meal.skipped,
        item,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, MacroProfile, RecipeIngredientEntry};
    use crate::nutrition::Unit;

    fn catalog() -> IngredientCatalog {
        IngredientCatalog::from_ingredients(vec![Ingredient {
            id: "rice".into(),
            name: "Rice".into(),
            macro_per_hundred: MacroProfile::new(130.0, 2.7, 28.0, 0.3),
        }])
    }

    #[test]
    fn test_meal_from_recipe_record() {
        let recipe = RecipeRecord {
            name: Some("Rice Bowl".into()),
            ingredients: vec![
                RecipeIngredientEntry::new("rice", 1.0, Unit::Cup),
                RecipeIngredientEntry::new("sauce", 2.0, Unit::Tbsp),
            ],
            ..RecipeRecord::default()
        };

        let response = meal_from_recipe_record(&catalog(), "r9", &recipe).unwrap();
        assert_eq!(response.recipe_id.as_deref(), Some("r9"));
        assert_eq!(response.skipped, vec!["sauce".to_string()]);
        // 240 g rice
        assert_eq!(response.total_rounded, MacroTotals::new(312, 6, 67, 1));
        assert_eq!(response.item.name, "Rice Bowl");
        assert_eq!(response.item.macros().rounded(), response.total_rounded);
    }

    #[test]
    fn test_recipe_without_ingredients_is_error() {
        let err = meal_from_recipe_record(&catalog(), "r0", &RecipeRecord::default()).unwrap_err();
        assert!(err.contains("no ingredients"));
    }

    #[test]
    fn test_meal_from_ingredients() {
        let items = vec![ManualIngredient::new("rice", 100.0), ManualIngredient::new("nope", 100.0)];
        let response = meal_from_ingredients(&catalog(), &items, Some("Lunch rice")).unwrap();

        assert_eq!(response.ingredients.len(), 1);
        assert_eq!(response.total_rounded, MacroTotals::new(130, 3, 28, 0));
        assert_eq!(response.item.id, MANUAL_MEAL_ID);
        assert_eq!(response.item.name, "Lunch rice");

        assert!(meal_from_ingredients(&catalog(), &[], None).is_err());
    }
}
