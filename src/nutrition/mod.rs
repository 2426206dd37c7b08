//! Nutrient aggregation engine
//!
//! Pure, synchronous functions: unit conversion, ingredient resolution,
//! recipe per-100g aggregation, meal ingredient resolution, daily totals
//! and target progress.

pub mod converter;
pub mod daily;
pub mod meal;
pub mod progress;
pub mod recipe;
pub mod resolver;
pub mod units;

pub use converter::{capacity_to_grams, str_to_grams, to_grams};
pub use daily::{aggregate_day, resolve_source, section_totals};
pub use meal::{
    consumed_item_from_recipe, macros_for_quantity, meal_total, resolve_manual_ingredients,
    resolve_recipe_ingredients, ResolvedMeal,
};
pub use progress::{progress_report, ratio, MacroProgress, Nutrient};
pub use recipe::{aggregate_recipe, recipe_breakdown, RecipeBreakdown};
pub use resolver::IngredientResolver;
pub use units::{Capacity, Unit};
