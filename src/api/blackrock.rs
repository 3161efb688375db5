//! Share endpoints.
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};

use super::AppState;
use super::envelope::respond;
use crate::core::error::TradeError;
use crate::core::trade::{ApiResponse, Share};

type Reply<T> = Result<(StatusCode, Json<ApiResponse<T>>), TradeError>;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/blackrock", get(home))
        .route("/blackrock/", get(home))
        .route("/blackrock/buy", post(buy))
        .route("/blackrock/sell", post(sell))
        .route("/blackrock/price/:company", get(price))
}

async fn home() -> (StatusCode, Json<ApiResponse<&'static str>>) {
    respond(StatusCode::OK, "ok", "Welcome to Vanguard trading")
}

async fn buy(
    State(state): State<AppState>,
    payload: Result<Json<Share>, JsonRejection>,
) -> Reply<Share> {
    let Json(order) = payload?;
    let share = state.shares.buy(&order).await?;
    Ok(respond(StatusCode::CREATED, "shares successfully bought", share))
}

async fn sell(
    State(state): State<AppState>,
    payload: Result<Json<Share>, JsonRejection>,
) -> Reply<Share> {
    let Json(order) = payload?;
    let share = state.shares.sell(&order).await?;
    Ok(respond(StatusCode::CREATED, "shares successfully sold", share))
}

async fn price(State(state): State<AppState>, Path(company): Path<String>) -> Reply<f64> {
    let unit = state.shares.quote(&company).await?;
    let message = format!("Price of {company} in {}", state.shares.currency());
    Ok(respond(StatusCode::OK, &message, unit))
}
