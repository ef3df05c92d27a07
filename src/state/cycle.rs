//! Fetch-Cycle Resolution
//!
//! One cycle is one coordinated three-way fetch. The commit decision is
//! kept pure so it can be tested off-browser; applying it to signals
//! happens in the dashboard page.

use std::cell::Cell;
use std::rc::Rc;

use crate::api::FetchError;
use crate::state::global::{Changepoint, MarketEvent, PricePoint};

/// Message shown when the price payload is not a sequence
pub const SHAPE_ERROR_MSG: &str = "Failed to load price data in the correct format.";

/// Message shown when any request in the cycle fails in transit
pub const CONNECTIVITY_ERROR_MSG: &str = "Could not connect to the data server.";

/// Monotonic cycle counter shared between the effect that starts cycles
/// and the futures that finish them. A cycle may commit only while it is
/// still the most recently started one; results from superseded cycles
/// are dropped wholesale, `loading` and `error` included.
#[derive(Clone, Default)]
pub struct CycleGuard {
    started: Rc<Cell<u64>>,
}

impl CycleGuard {
    /// Start a new cycle and return its number.
    pub fn begin(&self) -> u64 {
        let next = self.started.get() + 1;
        self.started.set(next);
        next
    }

    /// Whether `cycle` is still the latest started cycle.
    pub fn is_current(&self, cycle: u64) -> bool {
        self.started.get() == cycle
    }
}

/// What a settled cycle writes back to the view state. `None` fields are
/// left untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Commit {
    pub price_data: Option<Vec<PricePoint>>,
    pub events: Option<Vec<MarketEvent>>,
    pub changepoint: Option<Changepoint>,
    pub error: Option<&'static str>,
}

/// Decide what a settled cycle commits.
///
/// Any transport failure fails the cycle whole and retains prior data. A
/// shape failure on the price payload alone refuses only the price
/// series: events and changepoint from the same cycle are committed
/// anyway.
pub fn resolve(
    price: Result<Vec<PricePoint>, FetchError>,
    events: Result<Vec<MarketEvent>, FetchError>,
    changepoint: Result<Changepoint, FetchError>,
) -> Commit {
    match (price, events, changepoint) {
        (Ok(price), Ok(events), Ok(changepoint)) => Commit {
            price_data: Some(price),
            events: Some(events),
            changepoint: Some(changepoint),
            error: None,
        },
        (Err(FetchError::Shape), Ok(events), Ok(changepoint)) => Commit {
            price_data: None,
            events: Some(events),
            changepoint: Some(changepoint),
            error: Some(SHAPE_ERROR_MSG),
        },
        _ => Commit {
            price_data: None,
            events: None,
            changepoint: None,
            error: Some(CONNECTIVITY_ERROR_MSG),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::Impact;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn price_series() -> Vec<PricePoint> {
        vec![
            PricePoint { date: date(2005, 1, 1), price: Some(50.0), log_return: Some(0.01) },
            PricePoint { date: date(2006, 1, 1), price: Some(55.0), log_return: Some(0.02) },
            PricePoint { date: date(2010, 12, 31), price: Some(90.0), log_return: Some(-0.01) },
        ]
    }

    fn event_catalog() -> Vec<MarketEvent> {
        vec![MarketEvent { event_date: date(2007, 5, 1), description: "mid".into() }]
    }

    fn changepoint() -> Changepoint {
        Changepoint {
            start_date: date(2007, 1, 1),
            end_date: date(2009, 1, 1),
            description: "Crisis buildup".into(),
            impact: Impact { metric: "Volatility spike".into(), value: "+45%".into() },
        }
    }

    fn transport() -> FetchError {
        FetchError::Transport("connection refused".into())
    }

    #[test]
    fn success_commits_everything() {
        let commit = resolve(Ok(price_series()), Ok(event_catalog()), Ok(changepoint()));

        assert_eq!(commit.price_data, Some(price_series()));
        assert_eq!(commit.events, Some(event_catalog()));
        assert_eq!(commit.changepoint, Some(changepoint()));
        assert_eq!(commit.error, None);
    }

    #[test]
    fn transport_failure_commits_nothing() {
        for commit in [
            resolve(Err(transport()), Ok(event_catalog()), Ok(changepoint())),
            resolve(Ok(price_series()), Err(transport()), Ok(changepoint())),
            resolve(Ok(price_series()), Ok(event_catalog()), Err(transport())),
        ] {
            assert_eq!(commit.price_data, None);
            assert_eq!(commit.events, None);
            assert_eq!(commit.changepoint, None);
            assert_eq!(commit.error, Some(CONNECTIVITY_ERROR_MSG));
        }
    }

    #[test]
    fn shape_failure_still_commits_events_and_changepoint() {
        let commit = resolve(Err(FetchError::Shape), Ok(event_catalog()), Ok(changepoint()));

        assert_eq!(commit.price_data, None);
        assert_eq!(commit.events, Some(event_catalog()));
        assert_eq!(commit.changepoint, Some(changepoint()));
        assert_eq!(commit.error, Some(SHAPE_ERROR_MSG));
    }

    #[test]
    fn shape_failure_with_transport_failure_fails_whole_cycle() {
        let commit = resolve(Err(FetchError::Shape), Err(transport()), Ok(changepoint()));

        assert_eq!(commit.events, None);
        assert_eq!(commit.changepoint, None);
        assert_eq!(commit.error, Some(CONNECTIVITY_ERROR_MSG));
    }

    #[test]
    fn resolution_is_idempotent_for_a_stable_backend() {
        let first = resolve(Ok(price_series()), Ok(event_catalog()), Ok(changepoint()));
        let second = resolve(Ok(price_series()), Ok(event_catalog()), Ok(changepoint()));
        assert_eq!(first, second);
    }

    #[test]
    fn superseded_cycles_are_not_current() {
        let guard = CycleGuard::default();

        let first = guard.begin();
        assert!(guard.is_current(first));

        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }
}
