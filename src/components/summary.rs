//! Summary Component
//!
//! "Key Finding" card interpolating the changepoint's impact figures.

use leptos::*;

use crate::state::global::{Changepoint, DashboardState};

/// Key Finding card
#[component]
pub fn SummaryCard() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let changepoint = state.changepoint;

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h3 class="text-xl font-semibold mb-4">"Key Finding"</h3>

            {move || match changepoint.get() {
                Some(cp) => view! {
                    <p class="text-gray-300">{summary_sentence(&cp)}</p>
                }
                .into_view(),
                None => view! {
                    <p class="text-gray-400 text-sm">"No changepoint has been loaded yet."</p>
                }
                .into_view(),
            }}
        </section>
    }
}

/// Sentence shown in the Key Finding card
pub fn summary_sentence(cp: &Changepoint) -> String {
    format!(
        "A {} of {} was detected during the transition period from {} to {}, \
         coinciding with the build-up to the 2008 Global Financial Crisis.",
        cp.impact.metric, cp.impact.value, cp.start_date, cp.end_date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::Impact;
    use chrono::NaiveDate;

    #[test]
    fn sentence_interpolates_impact_and_interval() {
        let cp = Changepoint {
            start_date: NaiveDate::from_ymd_opt(2007, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2009, 1, 1).unwrap(),
            description: "Crisis buildup".into(),
            impact: Impact { metric: "Volatility spike".into(), value: "+45%".into() },
        };

        let sentence = summary_sentence(&cp);
        assert!(sentence.contains("Volatility spike"));
        assert!(sentence.contains("+45%"));
        assert!(sentence.contains("from 2007-01-01 to 2009-01-01"));
    }
}
