use anyhow::{Context, Result};
use catalog_browser::api::HttpCatalogApi;
use catalog_browser::navigator::Navigator;
use catalog_browser::{app, config};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

#[derive(Debug, Parser)]
#[command(author, version, about = "Browse the product catalog from the terminal")]
struct Args {
    /// Path to YAML config file (falls back to built-in defaults if missing)
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override `api.base_url`
    #[arg(long)]
    base_url: Option<String>,

    /// Print the catalog once it has loaded and exit
    #[arg(long)]
    once: bool,

    /// Print an example config and exit
    #[arg(long)]
    print_example_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    if args.print_example_config {
        print!("{}", config::example());
        return Ok(());
    }

    let mut cfg = config::load_or_example(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    if let Some(base_url) = args.base_url {
        cfg.api.base_url = base_url;
        config::validate(&cfg).context("invalid --base-url")?;
    }

    let api = HttpCatalogApi::from_config(&cfg)?;
    info!(base_url = %api.base_url(), "starting catalog browser");
    let mut nav = Navigator::start(Arc::new(api));

    let mut stdout = tokio::io::stdout();
    if args.once {
        return app::run_once(&mut nav, &mut stdout).await;
    }
    app::run(&mut nav, BufReader::new(tokio::io::stdin()), &mut stdout).await
}
