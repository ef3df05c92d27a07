//! State Management
//!
//! Global dashboard state and fetch-cycle bookkeeping.

pub mod cycle;
pub mod global;

pub use cycle::{CycleGuard, CONNECTIVITY_ERROR_MSG, SHAPE_ERROR_MSG};
pub use global::{
    provide_dashboard_state, relevant_events, Changepoint, DashboardState, Impact, MarketEvent,
    PricePoint,
};
