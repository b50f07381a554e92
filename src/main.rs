use clap::Parser;
use tracing::{info, Level};

use catalog_client::client::CatalogClient;
use catalog_client::config::ClientConfig;

/// Fetch records from the catalog service, respecting its rate limits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: String,

    /// Item ids to fetch
    #[arg(required = true)]
    ids: Vec<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = ClientConfig::from_file(&args.config)?;
    info!(
        base_url = %config.api.base_url,
        windows = config.rate_limiting.windows.len(),
        "Configuration loaded"
    );

    let client = CatalogClient::new(config)?;

    let items = client.items(&args.ids).await?;
    info!(count = items.len(), "Fetched items");

    for item in &items {
        println!("{}", serde_json::to_string_pretty(item)?);
    }

    Ok(())
}
