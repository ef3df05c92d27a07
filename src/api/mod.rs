//! API Client
//!
//! HTTP access to the price-analysis backend.

pub mod client;

pub use client::{
    fetch_changepoint, fetch_events, fetch_price_data, get_api_base, set_api_base, FetchError,
    DEFAULT_API_BASE,
};
