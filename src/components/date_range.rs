//! Date Range Filter Component
//!
//! Two native date inputs bound to the filter signals. Clearing an input
//! leaves that bound absent, which suspends fetching until the range is
//! complete again.

use chrono::NaiveDate;
use leptos::*;

use crate::state::global::DashboardState;

/// Date range filter row
#[component]
pub fn DateRangeFilter() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    let start_date = state.start_date;
    let end_date = state.end_date;

    view! {
        <div class="flex flex-wrap items-end gap-6 bg-gray-800 rounded-xl p-6">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Start Date"</label>
                <input
                    type="date"
                    prop:value=move || format_input(start_date.get())
                    on:change=move |ev| start_date.set(parse_input(&event_target_value(&ev)))
                    class="bg-gray-700 rounded-lg px-4 py-2 border border-gray-600
                           focus:border-blue-500 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"End Date"</label>
                <input
                    type="date"
                    prop:value=move || format_input(end_date.get())
                    on:change=move |ev| end_date.set(parse_input(&event_target_value(&ev)))
                    class="bg-gray-700 rounded-lg px-4 py-2 border border-gray-600
                           focus:border-blue-500 focus:outline-none"
                />
            </div>

            {move || {
                if start_date.get().is_none() || end_date.get().is_none() {
                    view! {
                        <span class="text-sm text-gray-400 pb-2">
                            "Select both dates to refresh the chart"
                        </span>
                    }
                    .into_view()
                } else {
                    view! {}.into_view()
                }
            }}
        </div>
    }
}

/// Calendar-day formatting for the input's value attribute
fn format_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// An empty or unparseable input clears the bound
fn parse_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_calendar_days() {
        let date = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
        assert_eq!(format_input(Some(date)), "2005-01-01");
        assert_eq!(parse_input("2005-01-01"), Some(date));
    }

    #[test]
    fn cleared_input_unsets_the_bound() {
        assert_eq!(parse_input(""), None);
        assert_eq!(format_input(None), "");
    }
}
