//! Dashboard Page
//!
//! The single dashboard view: owns the fetch cycle and resolves the
//! loading / error / chart render branches.

use leptos::*;

use crate::api;
use crate::components::{Chart, Loading};
use crate::state::cycle;
use crate::state::global::DashboardState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    // One fetch cycle on mount and on every change to either bound
    let fetch_state = state.clone();
    create_effect(move |_| {
        let (Some(start), Some(end)) = (fetch_state.start_date.get(), fetch_state.end_date.get())
        else {
            // Incomplete filter: keep whatever is on screen, fetch nothing
            return;
        };

        let cycle_id = fetch_state.cycle.begin();
        let state = fetch_state.clone();
        spawn_local(async move {
            state.loading.set(true);
            state.error.set(None);

            let (price, events, changepoint) = futures::join!(
                api::fetch_price_data(start, end),
                api::fetch_events(),
                api::fetch_changepoint(),
            );

            // A newer cycle has started; drop these results wholesale
            if !state.cycle.is_current(cycle_id) {
                return;
            }

            for failure in [
                price.as_ref().err(),
                events.as_ref().err(),
                changepoint.as_ref().err(),
            ]
            .into_iter()
            .flatten()
            {
                web_sys::console::error_1(
                    &format!("fetch cycle {} failed: {}", cycle_id, failure).into(),
                );
            }

            let commit = cycle::resolve(price, events, changepoint);
            if let Some(series) = commit.price_data {
                state.price_data.set(series);
            }
            if let Some(catalog) = commit.events {
                state.events.set(catalog);
            }
            if let Some(cp) = commit.changepoint {
                state.changepoint.set(Some(cp));
            }
            state.error.set(commit.error.map(str::to_string));
            state.loading.set(false);
        });
    });

    let loading = state.loading;
    let error = state.error;

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Price Volatility and Key Events"</h2>

            // Exactly one of the three branches renders
            {move || {
                if loading.get() {
                    view! { <Loading /> }.into_view()
                } else if let Some(message) = error.get() {
                    view! { <ErrorMessage message=message /> }.into_view()
                } else {
                    view! { <Chart /> }.into_view()
                }
            }}
        </section>
    }
}

/// Fixed error banner shown in place of the chart
#[component]
fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <span class="text-red-400 font-medium">{message}</span>
        </div>
    }
}
