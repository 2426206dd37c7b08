//! Recipe catalog HTTP client
//!
//! Fetches the bulk ingredient list used to build the resolver mapping, and
//! single recipes whose ingredient entries feed recipe aggregation.

use std::time::Duration;

use thiserror::Error;

use crate::config::{CatalogConfig, CONNECT_TIMEOUT_SECS};
use crate::models::{CatalogIngredient, RecipeRecord};
use super::store::IngredientCatalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Could not decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid catalog base URL '{0}': must start with http:// or https://")]
    InvalidBaseUrl(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("nutrient-engine/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn ingredients_url(&self, limit: u32) -> String {
        format!("{}/ingredients?limit={}", self.base_url, limit)
    }

    pub fn recipe_url(&self, recipe_id: &str) -> String {
        format!("{}/{}", self.base_url, recipe_id.trim_matches('/'))
    }

    /// `GET /ingredients?limit=N`
    pub async fn fetch_ingredients(&self, limit: u32) -> CatalogResult<Vec<CatalogIngredient>> {
        let url = self.ingredients_url(limit);
        tracing::debug!("Fetching ingredient catalog: {}", url);

        let body = self.get_text(&url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the ingredient list and build a complete catalog from it
    pub async fn fetch_catalog(&self, limit: u32) -> CatalogResult<IngredientCatalog> {
        let records = self.fetch_ingredients(limit).await?;
        let fetched = records.len();
        let catalog = IngredientCatalog::from_records(records);

        tracing::info!("Loaded {} of {} catalog ingredients", catalog.len(), fetched);
        Ok(catalog)
    }

    /// `GET /{recipe_id}`
    pub async fn fetch_recipe(&self, recipe_id: &str) -> CatalogResult<RecipeRecord> {
        let url = self.recipe_url(recipe_id);
        tracing::debug!("Fetching recipe: {}", url);

        let body = self.get_text(&url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_text(&self, url: &str) -> CatalogResult<String> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Catalog returned {} for {}", status, url);
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

fn normalize_base_url(raw: &str) -> CatalogResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(CatalogError::InvalidBaseUrl(raw.to_string()))
    }
}
