use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tradeserver::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run the trading server
    Serve {
        /// Address to listen on, overriding the configuration
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(Commands::Serve { bind }) => {
            tradeserver::run_server(cli.config_path.as_deref(), bind.as_deref()).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = tradeserver::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
server:
  bind: "127.0.0.1:8080"

# Currency unit prices are quoted in
currency: "inr"

# Upper bound on coin ids issued by a single buy
max_coin_ids: 10000

providers:
  coingecko:
    base_url: "https://api.coingecko.com"
  alpha_vantage:
    base_url: "https://www.alphavantage.co"
    # Overridden by the ALPHAVANTAGE_API_KEY environment variable
    api_key: "demo"
  currency_api:
    base_url: "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
