//! Catalog MCP Tools

use serde::Serialize;

use crate::catalog::{CatalogClient, SharedCatalog};

/// Response for refresh_catalog
#[derive(Debug, Serialize)]
pub struct RefreshCatalogResponse {
    pub ingredient_count: usize,
    pub skipped_records: usize,
    pub previous_count: usize,
    pub loaded_at: Option<String>,
}

/// Fetch the ingredient list and swap it in as the current catalog.
/// On failure the previous catalog stays in place.
pub async fn refresh_catalog(
    client: &CatalogClient,
    shared: &SharedCatalog,
    limit: u32,
) -> Result<RefreshCatalogResponse, String> {
    let catalog = client.fetch_catalog(limit).await.map_err(|e| {
        tracing::warn!("Catalog refresh failed, keeping previous catalog: {}", e);
        format!("Failed to fetch ingredient catalog: {}", e)
    })?;

    let ingredient_count = catalog.len();
    let skipped_records = catalog.skipped();
    let loaded_at = catalog.loaded_at().map(|t| t.to_rfc3339());

    let previous = shared.replace(catalog);

    Ok(RefreshCatalogResponse {
        ingredient_count,
        skipped_records,
        previous_count: previous.len(),
        loaded_at,
    })
}
