//! Data models
//!
//! Value types for macros, catalog ingredients, recipes and day logs.

mod day;
mod ingredient;
mod macros;
mod meal;
mod names;

pub use day::{
    ConsumedItem, DayMealRecord, DayRecord, MacroSource, MealRecordEntry, MealSection, RecordError,
};
pub use ingredient::{CatalogIngredient, Ingredient, RecipeIngredientEntry, RecipeRecord};
pub use macros::{
    round_display, DailyGoals, MacroProfile, MacroTarget, MacroTotals, Macros,
    DEFAULT_CALORIE_TARGET, DEFAULT_CARBS_TARGET, DEFAULT_FAT_TARGET, DEFAULT_PROTEIN_TARGET,
};
pub use meal::{ManualIngredient, MealIngredient};
pub use names::DisplayNameCache;
