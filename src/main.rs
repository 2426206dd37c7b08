//! Nutrient Aggregation Engine
//!
//! An MCP server for recipe and daily macro aggregation.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use nutrient_engine::build_info;
use nutrient_engine::catalog::{CatalogClient, SharedCatalog};
use nutrient_engine::config::EngineConfig;
use nutrient_engine::mcp::NutrientService;
use nutrient_engine::tools::catalog::refresh_catalog;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrient_engine=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::from_env()?;

    // Print startup banner to stderr
    build_info::print_startup_banner(&config);
    eprintln!("Starting MCP server on stdio...");

    let client = CatalogClient::new(&config.catalog)?;
    let catalog = SharedCatalog::default();

    // An unreachable catalog is not fatal; refresh_catalog can retry later
    if let Err(e) = refresh_catalog(&client, &catalog, config.catalog.limit).await {
        tracing::warn!("Starting with an empty ingredient catalog: {}", e);
    }

    let service = NutrientService::new(config, client, catalog);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
