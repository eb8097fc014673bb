use anyhow::Result;
use clap::Parser;
use infrastructure::StoreConfig;
use infrastructure::database::connect;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use news_admin::{Cli, Services};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let config = StoreConfig::load(&cli.config_dir)?;

    // Initialize tracing; RUST_LOG wins over the configured filter.
    // Logs go to stderr so stdout stays pure JSON.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("🗞️  news-admin starting");
    let db = connect(&config.database).await?;
    let services = Services::new(db);

    let output = services.run(cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
