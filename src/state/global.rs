//! Global Application State
//!
//! Reactive state management using Leptos signals.

use chrono::NaiveDate;
use leptos::*;

use crate::state::cycle::CycleGuard;

/// Global dashboard state provided to all components
#[derive(Clone)]
pub struct DashboardState {
    /// Daily price series for the active range
    pub price_data: RwSignal<Vec<PricePoint>>,
    /// Full event catalog from the API
    pub events: RwSignal<Vec<MarketEvent>>,
    /// The precomputed changepoint, once loaded
    pub changepoint: RwSignal<Option<Changepoint>>,
    /// Filter start bound; `None` leaves the interval open
    pub start_date: RwSignal<Option<NaiveDate>>,
    /// Filter end bound; `None` leaves the interval open
    pub end_date: RwSignal<Option<NaiveDate>>,
    /// Whether a fetch cycle is in flight
    pub loading: RwSignal<bool>,
    /// User-visible error message for the last cycle
    pub error: RwSignal<Option<String>>,
    /// Monotonic fetch-cycle counter; superseded cycles commit nothing
    pub cycle: CycleGuard,
}

/// A single point in the daily price series
///
/// `price` and `log_return` are null for non-trading days; the series
/// arrives chronologically sorted and is never re-sorted here.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PricePoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Price")]
    pub price: Option<f64>,
    #[serde(rename = "Log_Return")]
    pub log_return: Option<f64>,
}

/// An annotated market event from the backend catalog
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MarketEvent {
    #[serde(rename = "EventDate")]
    pub event_date: NaiveDate,
    #[serde(rename = "Description")]
    pub description: String,
}

/// The precomputed changepoint record (at most one exists system-wide)
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Changepoint {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub impact: Impact,
}

/// Formatted impact figures attached to the changepoint
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Impact {
    pub metric: String,
    pub value: String,
}

/// Default filter range shown on first load
pub fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2005, 1, 1).unwrap()
}

pub fn default_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 12, 31).unwrap()
}

/// Sentinel standing in for an absent start bound
fn range_floor() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()
}

/// Sentinel standing in for an absent end bound
fn range_ceiling() -> NaiveDate {
    NaiveDate::from_ymd_opt(2100, 12, 31).unwrap()
}

/// Events whose date falls inside the filter bounds, inclusive on both
/// sides. An absent bound leaves that side of the interval open.
pub fn relevant_events(
    events: &[MarketEvent],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<MarketEvent> {
    let start = start.unwrap_or_else(range_floor);
    let end = end.unwrap_or_else(range_ceiling);

    events
        .iter()
        .filter(|event| event.event_date >= start && event.event_date <= end)
        .cloned()
        .collect()
}

/// Provide dashboard state to the component tree
pub fn provide_dashboard_state() {
    let state = DashboardState {
        price_data: create_rw_signal(Vec::new()),
        events: create_rw_signal(Vec::new()),
        changepoint: create_rw_signal(None),
        start_date: create_rw_signal(Some(default_start())),
        end_date: create_rw_signal(Some(default_end())),
        loading: create_rw_signal(true),
        error: create_rw_signal(None),
        cycle: CycleGuard::default(),
    };

    provide_context(state);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> Vec<MarketEvent> {
        vec![
            MarketEvent { event_date: date(2004, 1, 1), description: "pre".into() },
            MarketEvent { event_date: date(2007, 5, 1), description: "mid".into() },
            MarketEvent { event_date: date(2011, 1, 1), description: "post".into() },
        ]
    }

    #[test]
    fn relevance_is_inclusive_on_both_bounds() {
        let events = vec![
            MarketEvent { event_date: date(2005, 1, 1), description: "on start".into() },
            MarketEvent { event_date: date(2010, 12, 31), description: "on end".into() },
            MarketEvent { event_date: date(2004, 12, 31), description: "before".into() },
            MarketEvent { event_date: date(2011, 1, 1), description: "after".into() },
        ];

        let relevant = relevant_events(&events, Some(date(2005, 1, 1)), Some(date(2010, 12, 31)));
        let names: Vec<_> = relevant.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["on start", "on end"]);
    }

    #[test]
    fn relevance_filters_out_of_range_catalog_entries() {
        let relevant = relevant_events(&catalog(), Some(date(2005, 1, 1)), Some(date(2010, 12, 31)));
        assert_eq!(relevant.len(), 1);
        assert_eq!(relevant[0].description, "mid");
    }

    #[test]
    fn absent_bounds_fall_back_to_sentinels() {
        let events = vec![
            MarketEvent { event_date: date(1899, 6, 1), description: "ancient".into() },
            MarketEvent { event_date: date(2050, 6, 1), description: "future".into() },
            MarketEvent { event_date: date(2101, 6, 1), description: "beyond".into() },
        ];

        let relevant = relevant_events(&events, None, None);
        let names: Vec<_> = relevant.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["future"]);
    }

    #[test]
    fn price_point_decodes_backend_field_names() {
        let point: PricePoint = serde_json::from_str(
            r#"{"Date": "2005-01-01", "Price": 50.0, "Log_Return": 0.01}"#,
        )
        .unwrap();

        assert_eq!(point.date, date(2005, 1, 1));
        assert_eq!(point.price, Some(50.0));
        assert_eq!(point.log_return, Some(0.01));
    }

    #[test]
    fn price_point_tolerates_null_trading_values() {
        let point: PricePoint = serde_json::from_str(
            r#"{"Date": "2005-01-02", "Price": null, "Log_Return": null}"#,
        )
        .unwrap();

        assert!(point.price.is_none());
        assert!(point.log_return.is_none());
    }

    #[test]
    fn changepoint_decodes_camel_case_payload() {
        let cp: Changepoint = serde_json::from_str(
            r#"{
                "startDate": "2007-01-01",
                "endDate": "2009-01-01",
                "description": "Crisis buildup",
                "impact": {"metric": "Volatility spike", "value": "+45%"}
            }"#,
        )
        .unwrap();

        assert_eq!(cp.start_date, date(2007, 1, 1));
        assert_eq!(cp.end_date, date(2009, 1, 1));
        assert_eq!(cp.impact.metric, "Volatility spike");
        assert_eq!(cp.impact.value, "+45%");
    }

    #[test]
    fn default_range_matches_first_load() {
        assert_eq!(default_start(), date(2005, 1, 1));
        assert_eq!(default_end(), date(2010, 12, 31));
    }
}
