//! HTTP surface: one route group per desk, every body wrapped in an
//! [`ApiResponse`](crate::core::trade::ApiResponse) envelope.

pub mod binance;
pub mod blackrock;
pub mod envelope;

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::core::config::AppConfig;
use crate::core::currency::CurrencyRateProvider;
use crate::desk::{CoinDesk, ShareDesk};
use crate::providers::{AlphaVantageProvider, CoinGeckoProvider, CurrencyApiProvider};

#[derive(Clone)]
pub struct AppState {
    pub coins: Arc<CoinDesk>,
    pub shares: Arc<ShareDesk>,
}

impl AppState {
    pub fn new(coins: CoinDesk, shares: ShareDesk) -> Self {
        AppState {
            coins: Arc::new(coins),
            shares: Arc::new(shares),
        }
    }

    /// Wires both desks to the live market data providers named in `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let providers = &config.providers;

        let fx: Arc<dyn CurrencyRateProvider> =
            Arc::new(CurrencyApiProvider::new(providers.currency_api_url())?);
        let crypto = Arc::new(CoinGeckoProvider::new(providers.coingecko_url())?);
        let equities = Arc::new(AlphaVantageProvider::new(
            providers.alpha_vantage_url(),
            &providers.alpha_vantage_key(),
        )?);

        Ok(AppState::new(
            CoinDesk::new(crypto, Arc::clone(&fx), &config.currency, config.max_coin_ids),
            ShareDesk::new(equities, fx, &config.currency),
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(binance::routes())
        .merge(blackrock::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: &AppConfig) -> Result<()> {
    let app = router(AppState::from_config(config)?);

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    info!(
        "Trade server listening on http://{} (prices in {})",
        listener.local_addr()?,
        config.currency
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Trade server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
