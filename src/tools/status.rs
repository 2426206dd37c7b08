//! Engine Status Tool
//!
//! Provides runtime status information about the nutrient engine service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::catalog::IngredientCatalog;

/// Usage notes for assistants calling the engine tools
pub const ENGINE_INSTRUCTIONS: &str = r#"
# Nutrient Engine Usage

## Units

Ingredient quantities may be given in any of these units:

| Unit | Grams per unit |
|------|----------------|
| g    | 1              |
| kg   | 1000           |
| ml   | 1              |
| l    | 1000           |
| tsp  | 5              |
| tbsp | 15             |
| cup  | 240            |
| oz   | 28.35          |
| lb   | 453.6          |
| pcs  | 100            |

Any other unit is treated as grams. Liquids assume a density of 1 g/ml.

## Recipes

- `recipe_macros` takes ingredient entries and returns nutrients per 100 g of the finished recipe.
- `recipe_macros_by_id` fetches the recipe from the catalog first.
- Ingredients missing from the catalog still add to total weight, so the result reads low.
  Check `unresolved` and call `refresh_catalog` if it is not empty.

## Meals

- `meal_macros` turns one logged meal into absolute macros: pass `recipe_id` for a whole
  recipe, or `ingredients` with gram quantities. Unknown ingredients are skipped here,
  not counted. An ingredient sent with both `name` and `macros` is used as-is.
- The returned `item` can go straight into a `daily_macros` section.

## Days

- `daily_macros` sums consumed items unless the day carries `total_macro_snapshot`,
  in which case the snapshot is used as-is.
- `persisted_day_macros` accepts a stored daily record. Its items carry no nutrients,
  so totals come only from `total_macro`.
- Progress percentages are capped at 100 and are for display only.
"#;

/// Runtime status of the engine service
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub build: BuildInfo,
    pub build_label: String,

    /// Catalog information
    pub catalog_url: String,
    pub catalog_ingredients: usize,
    pub catalog_skipped_records: usize,
    pub catalog_loaded_at: Option<String>,
    pub cached_display_names: usize,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    catalog_url: String,
}

impl StatusTracker {
    pub fn new(catalog_url: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            catalog_url: catalog_url.into(),
        }
    }

    /// Get the current status
    pub fn get_status(&self, catalog: &IngredientCatalog, cached_display_names: usize) -> EngineStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        EngineStatus {
            build_label: build_info.label(),
            build: build_info,
            catalog_url: self.catalog_url.clone(),
            catalog_ingredients: catalog.len(),
            catalog_skipped_records: catalog.skipped(),
            catalog_loaded_at: catalog.loaded_at().map(|t| t.to_rfc3339()),
            cached_display_names,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
