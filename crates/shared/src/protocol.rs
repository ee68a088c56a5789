//! Wire contract for the crawler endpoint: `POST /get_data`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Deal;

/// Request body for `POST /get_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchDealsRequest {
    pub website: String,
    pub username: String,
    pub password: String,
}

/// Success response body.
///
/// `deals` may be absent or `null` on the wire; both decode to an empty
/// vector here so downstream code never re-checks for a missing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchDealsResponse {
    pub website: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "nullable_deals")]
    pub deals: Vec<Deal>,
}

fn nullable_deals<'de, D>(deserializer: D) -> Result<Vec<Deal>, D::Error>
where
    D: Deserializer<'de>,
{
    let deals = Option::<Vec<Deal>>::deserialize(deserializer)?;
    Ok(deals.unwrap_or_default())
}

/// Optional human-readable reason attached to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}
