//! Order and result types exchanged with clients.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A crypto coin order or its result.
///
/// On a buy request `price` carries the amount to spend; on a sell request
/// `quantity` carries the number of coins to sell. `coin_id` is only filled
/// in on buy results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub coin_name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub coin_id: Vec<String>,
}

/// A share order or its result. Same conventions as [`Coin`], with a single
/// identifier that is empty on sell results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    pub company_name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub id: String,
}

/// Uniform envelope around every response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
    pub status_code: u16,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T, status_code: u16) -> Self {
        Self {
            message: message.into(),
            data,
            status_code,
        }
    }
}

/// Opaque token standing for one purchased unit.
pub fn new_unit_id() -> String {
    Uuid::new_v4().simple().to_string()
}
