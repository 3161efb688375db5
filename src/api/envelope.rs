use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::core::error::TradeError;
use crate::core::trade::ApiResponse;

/// Wraps `data` in an envelope carrying the same status as the response.
pub fn respond<T: Serialize>(
    status: StatusCode,
    message: &str,
    data: T,
) -> (StatusCode, Json<ApiResponse<T>>) {
    (status, Json(ApiResponse::new(message, data, status.as_u16())))
}

impl TradeError {
    pub fn status(&self) -> StatusCode {
        match self {
            TradeError::InvalidOrder(_) => StatusCode::BAD_REQUEST,
            TradeError::PriceUnavailable { .. } | TradeError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Unreadable order bodies are answered like any other invalid order.
impl From<JsonRejection> for TradeError {
    fn from(rejection: JsonRejection) -> Self {
        TradeError::InvalidOrder(rejection.body_text())
    }
}

impl IntoResponse for TradeError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(error = %self, status = status.as_u16(), "Order failed");
        respond(status, &self.to_string(), ()).into_response()
    }
}
