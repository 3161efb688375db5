//! Crypto coin endpoints.
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};

use super::AppState;
use super::envelope::respond;
use crate::core::error::TradeError;
use crate::core::trade::{ApiResponse, Coin};

type Reply<T> = Result<(StatusCode, Json<ApiResponse<T>>), TradeError>;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/binance", get(home))
        .route("/binance/", get(home))
        .route("/binance/buy", post(buy))
        .route("/binance/sell", post(sell))
        .route("/binance/price/:coin", get(price))
}

async fn home() -> (StatusCode, Json<ApiResponse<&'static str>>) {
    respond(StatusCode::OK, "ok", "Welcome to Binance Server!")
}

async fn buy(
    State(state): State<AppState>,
    payload: Result<Json<Coin>, JsonRejection>,
) -> Reply<Coin> {
    let Json(order) = payload?;
    let coin = state.coins.buy(&order).await?;
    Ok(respond(StatusCode::CREATED, "Coin bought successfully", coin))
}

async fn sell(
    State(state): State<AppState>,
    payload: Result<Json<Coin>, JsonRejection>,
) -> Reply<Coin> {
    let Json(order) = payload?;
    let coin = state.coins.sell(&order).await?;
    Ok(respond(StatusCode::CREATED, "coin sold successfully", coin))
}

async fn price(State(state): State<AppState>, Path(coin): Path<String>) -> Reply<f64> {
    let unit = state.coins.quote(&coin).await?;
    let message = format!("Price of {coin} in {}", state.coins.currency());
    Ok(respond(StatusCode::OK, &message, unit))
}
