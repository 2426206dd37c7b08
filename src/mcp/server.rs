//! Nutrient Engine MCP Server Implementation
//!
//! Implements the MCP server exposing the aggregation engine as tools.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogClient, SharedCatalog};
use crate::config::EngineConfig;
use crate::models::{
    ConsumedItem, DailyGoals, DayMealRecord, DayRecord, DisplayNameCache, MacroTarget, MacroTotals,
    Macros, ManualIngredient, MealRecordEntry, MealSection, RecipeIngredientEntry,
};
use crate::tools::catalog;
use crate::tools::days;
use crate::tools::meals;
use crate::tools::recipes;
use crate::tools::status::StatusTracker;

/// Nutrient Engine MCP Service
#[derive(Clone)]
pub struct NutrientService {
    status_tracker: Arc<StatusTracker>,
    catalog: SharedCatalog,
    client: CatalogClient,
    config: Arc<EngineConfig>,
    /// Recipe display names learned from fetched recipes
    names: Arc<Mutex<DisplayNameCache>>,
    tool_router: ToolRouter<NutrientService>,
}

impl NutrientService {
    pub fn new(config: EngineConfig, client: CatalogClient, catalog: SharedCatalog) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(client.base_url())),
            catalog,
            client,
            config: Arc::new(config),
            names: Arc::new(Mutex::new(DisplayNameCache::new())),
            tool_router: Self::tool_router(),
        }
    }

    fn cached_name_count(&self) -> usize {
        self.names.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Shared Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MacrosParam {
    #[serde(default)]
    pub calories: f64,
    #[serde(default, alias = "proteins")]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default, alias = "fats")]
    pub fat: f64,
}

impl From<MacrosParam> for Macros {
    fn from(p: MacrosParam) -> Self {
        Macros::new(p.calories, p.protein, p.carbs, p.fat)
    }
}

/// Per-call target overrides; omitted fields keep the configured target
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct TargetParam {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

impl From<TargetParam> for DailyGoals {
    fn from(p: TargetParam) -> Self {
        DailyGoals {
            calorie_goal: p.calories,
            protein_goal: p.protein,
            carbs_goal: p.carbs,
            fats_goal: p.fat,
        }
    }
}

// ============================================================================
// Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertToGramsParams {
    pub quantity: f64,
    /// One of g, kg, ml, l, tsp, tbsp, cup, oz, lb, pcs; anything else counts as grams
    pub unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipeEntryParam {
    pub ingredient_id: String,
    pub quantity: f64,
    #[serde(default = "default_capacity")]
    pub capacity: String,
}

fn default_capacity() -> String { "g".to_string() }

impl From<RecipeEntryParam> for RecipeIngredientEntry {
    fn from(p: RecipeEntryParam) -> Self {
        RecipeIngredientEntry::new(p.ingredient_id, p.quantity, p.capacity)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipeMacrosParams {
    pub ingredients: Vec<RecipeEntryParam>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipeMacrosByIdParams {
    pub recipe_id: String,
}

// ============================================================================
// Meal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ManualIngredientParam {
    pub ingredient_id: String,
    pub name: Option<String>,
    /// Grams eaten
    pub quantity: f64,
    /// Pre-computed macros; used as-is only together with `name`
    pub macros: Option<MacrosParam>,
}

impl From<ManualIngredientParam> for ManualIngredient {
    fn from(p: ManualIngredientParam) -> Self {
        ManualIngredient {
            ingredient_id: p.ingredient_id,
            name: p.name,
            quantity: p.quantity,
            macros: p.macros.map(Macros::from),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MealMacrosParams {
    /// When set, the recipe is fetched and `ingredients` is ignored
    pub recipe_id: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<ManualIngredientParam>,
    /// Label for a meal built from ingredients
    pub name: Option<String>,
}

// ============================================================================
// Day Parameter Structs
// ============================================================================

/// Item ids arrive as strings from the catalog and as numbers from the dashboard
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum ItemIdParam {
    Number(i64),
    Text(String),
}

impl From<ItemIdParam> for String {
    fn from(id: ItemIdParam) -> Self {
        match id {
            ItemIdParam::Number(n) => n.to_string(),
            ItemIdParam::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConsumedItemParam {
    pub id: ItemIdParam,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kcal: f64,
    #[serde(default, alias = "p")]
    pub protein: f64,
    #[serde(default, alias = "c")]
    pub carbs: f64,
    #[serde(default, alias = "f")]
    pub fat: f64,
    pub quantity: Option<f64>,
}

impl From<ConsumedItemParam> for ConsumedItem {
    fn from(p: ConsumedItemParam) -> Self {
        ConsumedItem {
            quantity: p.quantity,
            ..ConsumedItem::new(p.id, p.name, Macros::new(p.kcal, p.protein, p.carbs, p.fat))
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DailyMacrosParams {
    /// YYYY-MM-DD
    pub date: String,
    /// Items keyed by section: breakfast, lunch, dinner, snack, workout
    #[serde(default)]
    pub sections: BTreeMap<String, Vec<ConsumedItemParam>>,
    /// Server-computed totals; when present they replace the item sum
    pub total_macro_snapshot: Option<MacrosParam>,
    pub target: Option<TargetParam>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MealRecordParam {
    pub recipe_id: String,
    #[serde(default)]
    pub time_of_day: String,
    pub capacity: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PersistedDayMacrosParams {
    /// RFC 3339 timestamp or YYYY-MM-DD
    pub created_at: String,
    #[serde(default)]
    pub records: Vec<MealRecordParam>,
    pub total_macro: Option<MacrosParam>,
    pub calorie_goal: Option<f64>,
    pub protein_goal: Option<f64>,
    pub carbs_goal: Option<f64>,
    pub fats_goal: Option<f64>,
}

impl From<PersistedDayMacrosParams> for DayMealRecord {
    fn from(p: PersistedDayMacrosParams) -> Self {
        DayMealRecord {
            created_at: p.created_at,
            records: p
                .records
                .into_iter()
                .map(|r| MealRecordEntry {
                    recipe_id: r.recipe_id,
                    time_of_day: r.time_of_day,
                    capacity: r.capacity.map(serde_json::Value::from),
                })
                .collect(),
            total_macro: p.total_macro.map(Macros::from),
            goals: DailyGoals {
                calorie_goal: p.calorie_goal,
                protein_goal: p.protein_goal,
                carbs_goal: p.carbs_goal,
                fats_goal: p.fats_goal,
            },
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MacroProgressParams {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
    pub target: Option<TargetParam>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RefreshCatalogParams {
    /// Maximum number of ingredients to fetch; defaults to the configured limit
    pub limit: Option<u32>,
}

fn build_day(p: DailyMacrosParams) -> Result<(DayRecord, Option<DailyGoals>), McpError> {
    let date = NaiveDate::parse_from_str(p.date.trim(), "%Y-%m-%d")
        .map_err(|_| McpError::invalid_params(format!("Invalid date '{}': expected YYYY-MM-DD", p.date), None))?;

    let mut day = DayRecord::new(date);
    for (key, items) in p.sections {
        let section = MealSection::from_key(&key);
        for item in items {
            day.add_item(section, item.into());
        }
    }
    day.total_macro_snapshot = p.total_macro_snapshot.map(Macros::from);

    Ok((day, p.target.map(DailyGoals::from)))
}

fn resolve_target(base: &MacroTarget, overrides: Option<TargetParam>) -> MacroTarget {
    match overrides {
        Some(o) => base.with_goals(&o.into()),
        None => *base,
    }
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl NutrientService {
    // ------------------------------------------------------------------------
    // Status Tools
    // ------------------------------------------------------------------------

    #[tool(description = "Get the current status of the nutrient engine including build info, catalog state, and process information")]
    async fn engine_status(&self) -> Result<CallToolResult, McpError> {
        let catalog = self.catalog.snapshot();
        let status = self.status_tracker.get_status(&catalog, self.cached_name_count());
        json_result(&status)
    }

    #[tool(description = "Get usage notes for the engine tools: supported units, recipe aggregation, and day totals. Call this before the first aggregation in a session.")]
    fn engine_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::ENGINE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(ENGINE_INSTRUCTIONS)]))
    }

    // ------------------------------------------------------------------------
    // Catalog Tools
    // ------------------------------------------------------------------------

    #[tool(description = "Fetch the ingredient catalog and replace the current one. On failure the previous catalog is kept.")]
    async fn refresh_catalog(&self, Parameters(p): Parameters<RefreshCatalogParams>) -> Result<CallToolResult, McpError> {
        let limit = p.limit.unwrap_or(self.config.catalog.limit);
        let result = catalog::refresh_catalog(&self.client, &self.catalog, limit)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // ------------------------------------------------------------------------
    // Recipe Tools
    // ------------------------------------------------------------------------

    #[tool(description = "Convert a quantity in a capacity unit to grams")]
    fn convert_to_grams(&self, Parameters(p): Parameters<ConvertToGramsParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::convert_to_grams(p.quantity, &p.unit).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Compute nutrients per 100 g of a recipe from its ingredient entries, using the current catalog. Lists ingredient ids the catalog does not know.")]
    fn recipe_macros(&self, Parameters(p): Parameters<RecipeMacrosParams>) -> Result<CallToolResult, McpError> {
        let entries: Vec<RecipeIngredientEntry> = p.ingredients.into_iter().map(Into::into).collect();
        let result = recipes::recipe_macros(&self.catalog.snapshot(), &entries);
        json_result(&result)
    }

    #[tool(description = "Fetch a recipe by id from the catalog service and compute its nutrients per 100 g")]
    async fn recipe_macros_by_id(&self, Parameters(p): Parameters<RecipeMacrosByIdParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::recipe_macros_by_id(&self.client, &self.catalog, &self.names, &p.recipe_id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // ------------------------------------------------------------------------
    // Meal Tools
    // ------------------------------------------------------------------------

    #[tool(description = "Resolve one logged meal into absolute macros, from a recipe_id (whole recipe eaten) or from ingredients with gram quantities. Ingredients missing from the catalog are skipped. Returns a consumed item usable in daily_macros.")]
    async fn meal_macros(&self, Parameters(p): Parameters<MealMacrosParams>) -> Result<CallToolResult, McpError> {
        let result = match p.recipe_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(recipe_id) => meals::meal_from_recipe(&self.client, &self.catalog, &self.names, recipe_id)
                .await
                .map_err(|e| McpError::internal_error(e, None))?,
            None => {
                let items: Vec<ManualIngredient> = p.ingredients.into_iter().map(Into::into).collect();
                meals::meal_from_ingredients(&self.catalog.snapshot(), &items, p.name.as_deref())
                    .map_err(|e| McpError::invalid_params(e, None))?
            }
        };
        json_result(&result)
    }

    // ------------------------------------------------------------------------
    // Day Tools
    // ------------------------------------------------------------------------

    #[tool(description = "Compute a day's macro totals, per-section totals, and progress against targets. A total_macro_snapshot, when given, replaces the item sum.")]
    fn daily_macros(&self, Parameters(p): Parameters<DailyMacrosParams>) -> Result<CallToolResult, McpError> {
        let (day, goals) = build_day(p)?;
        let result = days::daily_macros(&day, &self.config.targets, goals.as_ref());
        json_result(&result)
    }

    #[tool(description = "Compute totals and progress for a persisted daily meal record. Items carry no nutrients, so totals come from total_macro.")]
    fn persisted_day_macros(&self, Parameters(p): Parameters<PersistedDayMacrosParams>) -> Result<CallToolResult, McpError> {
        let record = DayMealRecord::from(p);
        let result = {
            let names = self.names.lock().unwrap_or_else(|e| e.into_inner());
            days::persisted_day_macros(&record, &names, &self.config.targets)
        }
        .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Compute capped 0-100 progress percentages of rounded totals against targets")]
    fn macro_progress(&self, Parameters(p): Parameters<MacroProgressParams>) -> Result<CallToolResult, McpError> {
        let totals = MacroTotals::new(p.calories, p.protein, p.carbs, p.fat);
        let target = resolve_target(&self.config.targets, p.target);
        json_result(&days::macro_progress(&totals, &target))
    }
}

#[tool_handler]
impl ServerHandler for NutrientService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrient-engine".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrient Aggregation Engine".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutrient Aggregation Engine - recipe and daily macro totals. \
                 Call engine_instructions first. \
                 Units: convert_to_grams. \
                 Recipes: recipe_macros, recipe_macros_by_id (per 100 g). \
                 Meals: meal_macros (absolute macros for one logged meal). \
                 Days: daily_macros, persisted_day_macros, macro_progress. \
                 Catalog: refresh_catalog, engine_status."
                    .into(),
            ),
        }
    }
}
