//! Recipe macro aggregation
//!
//! Converts a recipe's ingredient entries into a per-100g profile of the
//! finished recipe. Unresolved ingredients still count toward total mass but
//! add nothing to the nutrient sums, which understates nutrient density.
//! That behaviour is intentional and covered by tests.

use serde::Serialize;

use crate::models::{MacroTotals, Macros, RecipeIngredientEntry};
use super::converter::capacity_to_grams;
use super::resolver::IngredientResolver;

/// Full result of aggregating a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeBreakdown {
    /// Sum of every entry's mass in grams, resolved or not
    pub total_weight_g: f64,
    /// Unrounded absolute nutrient sums for the whole recipe
    pub absolute: Macros,
    /// Rounded nutrient values per 100 g of finished recipe
    pub per_hundred: MacroTotals,
    /// Ingredient ids the resolver did not know
    pub unresolved: Vec<String>,
}

/// Aggregate a recipe into per-100g totals
pub fn aggregate_recipe<R>(entries: &[RecipeIngredientEntry], resolver: &R) -> MacroTotals
where
    R: IngredientResolver + ?Sized,
{
    recipe_breakdown(entries, resolver).per_hundred
}

/// Aggregate a recipe, keeping the intermediate figures
pub fn recipe_breakdown<R>(entries: &[RecipeIngredientEntry], resolver: &R) -> RecipeBreakdown
where
    R: IngredientResolver + ?Sized,
{
    let mut total_weight = 0.0;
    let mut sums = Macros::zero();
    let mut unresolved = Vec::new();

    for entry in entries {
        let grams = entry_grams(entry);
        total_weight += grams;

        match resolver.resolve(&entry.ingredient_id) {
            Some(ingredient) => {
                let factor = grams / 100.0;
                sums += ingredient.macro_per_hundred.as_macros().finite_or_zero() * factor;
            }
            None => {
                tracing::warn!(
                    "Ingredient '{}' not in catalog; {}g counted toward weight only",
                    entry.ingredient_id,
                    grams
                );
                unresolved.push(entry.ingredient_id.clone());
            }
        }
    }

    let per_hundred = if total_weight > 0.0 {
        let norm = 100.0 / total_weight;
        (sums * norm).finite_or_zero().non_negative().rounded()
    } else {
        MacroTotals::zero()
    };

    tracing::debug!(
        "Aggregated {} entries: {}g total, {} unresolved",
        entries.len(),
        total_weight,
        unresolved.len()
    );

    RecipeBreakdown {
        total_weight_g: total_weight,
        absolute: sums,
        per_hundred,
        unresolved,
    }
}

/// An entry's mass in grams; non-finite or negative masses count as zero
pub(crate) fn entry_grams(entry: &RecipeIngredientEntry) -> f64 {
    let grams = capacity_to_grams(entry.quantity, &entry.capacity);
    if grams.is_finite() && grams >= 0.0 {
        grams
    } else {
        tracing::warn!(
            "Ignoring unusable quantity {} {} for ingredient '{}'",
            entry.quantity,
            entry.capacity.as_str(),
            entry.ingredient_id
        );
        0.0
    }
}
