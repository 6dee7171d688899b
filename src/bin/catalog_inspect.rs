use std::path::PathBuf;

use anyhow::{Context, Result};
use catalog_browser::api::{CatalogApi, HttpCatalogApi};
use catalog_browser::config;
use catalog_browser::model::ItemId;
use clap::Parser;

/// Fetch one product by id and print the full record as JSON.
#[derive(Parser, Debug)]
struct Args {
    /// Path to YAML config
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Product id to inspect
    #[arg(long)]
    id: i64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let cfg = config::load_or_example(&args.config)?;
    let api = HttpCatalogApi::from_config(&cfg)?;

    let item = api
        .fetch_item(ItemId(args.id))
        .await
        .with_context(|| format!("failed to fetch product {}", args.id))?;
    println!("{}", serde_json::to_string_pretty(&item)?);
    Ok(())
}
