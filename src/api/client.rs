//! HTTP API Client
//!
//! Functions for communicating with the price-analysis REST API.

use chrono::NaiveDate;
use gloo_net::http::Request;

use crate::state::global::{Changepoint, MarketEvent, PricePoint};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

/// Local-storage key holding a user-supplied API base URL
const API_BASE_STORAGE_KEY: &str = "brent_dashboard_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item(API_BASE_STORAGE_KEY) {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_BASE_STORAGE_KEY, url);
        }
    }
}

/// Failure classes of a fetch cycle. Transport failures fail the cycle
/// whole; a shape failure is specific to the price payload and leaves
/// the rest of the cycle committable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// Network error, non-2xx status, or an unreadable body
    #[error("transport failure: {0}")]
    Transport(String),
    /// The price payload arrived but is not a sequence of price points
    #[error("price payload is not a sequence")]
    Shape,
}

/// Fetch the daily price series for an inclusive date range
pub async fn fetch_price_data(
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<PricePoint>, FetchError> {
    let api_base = get_api_base();

    let url = format!(
        "{}/api/price-data?start={}&end={}",
        api_base,
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d"),
    );

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Transport(format!("HTTP {}", response.status())));
    }

    // The backend has been observed to route error objects through a 200
    // status, so the payload is checked before it is trusted as a series.
    let payload: serde_json::Value = response
        .json()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    decode_price_payload(payload)
}

/// Fetch the full event catalog (not range-parameterized)
pub async fn fetch_events() -> Result<Vec<MarketEvent>, FetchError> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/api/events", api_base))
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Transport(format!("HTTP {}", response.status())));
    }

    response
        .json()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))
}

/// Fetch the singleton changepoint record (not range-parameterized)
pub async fn fetch_changepoint() -> Result<Changepoint, FetchError> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/api/changepoint", api_base))
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Transport(format!("HTTP {}", response.status())));
    }

    response
        .json()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))
}

/// Decode a price payload that already parsed as JSON. Anything other
/// than an array of price points is a shape failure.
fn decode_price_payload(payload: serde_json::Value) -> Result<Vec<PricePoint>, FetchError> {
    if !payload.is_array() {
        return Err(FetchError::Shape);
    }

    serde_json::from_value(payload).map_err(|_| FetchError::Shape)
}
