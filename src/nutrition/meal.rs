//! Meal ingredient resolution
//!
//! Turns ingredient quantities into absolute macros for one logged meal,
//! which is where a `ConsumedItem`'s values come from. Unlike recipe
//! aggregation, an ingredient the resolver does not know is skipped
//! entirely: it adds neither mass nor nutrients.

use serde::Serialize;

use crate::models::{
    ConsumedItem, MacroProfile, Macros, ManualIngredient, MealIngredient, RecipeIngredientEntry, RecipeRecord,
};
use super::recipe::entry_grams;
use super::resolver::IngredientResolver;

/// Ingredients resolved for one meal
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedMeal {
    pub ingredients: Vec<MealIngredient>,
    /// Ingredient ids the resolver did not know
    pub skipped: Vec<String>,
    /// Unrounded sum over `ingredients`
    pub total: Macros,
}

impl ResolvedMeal {
    fn from_parts(ingredients: Vec<MealIngredient>, skipped: Vec<String>) -> Self {
        let total = meal_total(&ingredients);
        Self { ingredients, skipped, total }
    }
}

/// Absolute macros of `grams` of an ingredient with the given profile
pub fn macros_for_quantity(profile: &MacroProfile, grams: f64) -> Macros {
    (profile.as_macros().finite_or_zero() * (grams / 100.0))
        .finite_or_zero()
        .non_negative()
}

/// Sum of a meal's ingredient macros
pub fn meal_total(ingredients: &[MealIngredient]) -> Macros {
    ingredients.iter().map(|i| i.macros.finite_or_zero()).sum()
}

/// Resolve a recipe's entries into meal ingredients, converting units
pub fn resolve_recipe_ingredients<R>(entries: &[RecipeIngredientEntry], resolver: &R) -> ResolvedMeal
where
    R: IngredientResolver + ?Sized,
{
    let mut ingredients = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for entry in entries {
        let Some(ingredient) = resolver.resolve(&entry.ingredient_id) else {
            tracing::warn!("Ingredient '{}' not in catalog, skipping", entry.ingredient_id);
            skipped.push(entry.ingredient_id.clone());
            continue;
        };

        let grams = entry_grams(entry);
        ingredients.push(MealIngredient {
            ingredient_id: entry.ingredient_id.clone(),
            name: ingredient.name.clone(),
            quantity: grams,
            macros: macros_for_quantity(&ingredient.macro_per_hundred, grams),
        });
    }

    ResolvedMeal::from_parts(ingredients, skipped)
}

/// Resolve client-supplied ingredients. An ingredient carrying both a name
/// and macros is kept as sent; otherwise its macros come from the resolver.
pub fn resolve_manual_ingredients<R>(items: &[ManualIngredient], resolver: &R) -> ResolvedMeal
where
    R: IngredientResolver + ?Sized,
{
    let mut ingredients = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();

    for item in items {
        let grams = manual_grams(item);

        if let (Some(name), Some(macros)) = (&item.name, &item.macros) {
            ingredients.push(MealIngredient {
                ingredient_id: item.ingredient_id.clone(),
                name: name.clone(),
                quantity: grams,
                macros: macros.finite_or_zero(),
            });
            continue;
        }

        let Some(ingredient) = resolver.resolve(&item.ingredient_id) else {
            tracing::warn!("Ingredient '{}' not in catalog, skipping", item.ingredient_id);
            skipped.push(item.ingredient_id.clone());
            continue;
        };

        ingredients.push(MealIngredient {
            ingredient_id: item.ingredient_id.clone(),
            name: item.name.clone().unwrap_or_else(|| ingredient.name.clone()),
            quantity: grams,
            macros: macros_for_quantity(&ingredient.macro_per_hundred, grams),
        });
    }

    ResolvedMeal::from_parts(ingredients, skipped)
}

/// A consumed item for eating the whole of `recipe`, labelled with its name
/// or, failing that, its id
pub fn consumed_item_from_recipe<R>(recipe_id: &str, recipe: &RecipeRecord, resolver: &R) -> ConsumedItem
where
    R: IngredientResolver + ?Sized,
{
    let meal = resolve_recipe_ingredients(&recipe.ingredients, resolver);
    let name = recipe.name.as_deref().unwrap_or(recipe_id);
    ConsumedItem::new(recipe_id, name, meal.total)
}

fn manual_grams(item: &ManualIngredient) -> f64 {
    if item.quantity.is_finite() && item.quantity >= 0.0 {
        item.quantity
    } else {
        tracing::warn!(
            "Ignoring unusable quantity {} for ingredient '{}'",
            item.quantity,
            item.ingredient_id
        );
        0.0
    }
}
