//! App Root Component
//!
//! Page chrome and global state providers.

use leptos::*;

use crate::api;
use crate::components::{DateRangeFilter, SummaryCard};
use crate::pages::Dashboard;
use crate::state::global::{provide_dashboard_state, DashboardState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide dashboard state to all components
    provide_dashboard_state();

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <header class="bg-gray-800 border-b border-gray-700 py-6 px-4">
                <div class="container mx-auto">
                    <h1 class="text-3xl font-bold">"Brent Oil Price Analysis Dashboard"</h1>
                    <p class="text-gray-400 mt-1">
                        "Daily prices, key events, and the detected regime change"
                    </p>
                </div>
            </header>

            <main class="flex-1 container mx-auto px-4 py-8 pb-24 space-y-8">
                <DateRangeFilter />
                <Dashboard />
                <SummaryCard />
                <ApiSettings />
            </main>

            <Footer />
        </div>
    }
}

/// Backend address setting, persisted to local storage
#[component]
fn ApiSettings() -> impl IntoView {
    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (saved, set_saved) = create_signal(false);

    let save_url = move |_| {
        api::set_api_base(&api_url.get());
        set_saved.set(true);
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h3 class="text-xl font-semibold mb-4">"Data Server"</h3>

            <div class="flex space-x-2">
                <input
                    type="text"
                    prop:value=move || api_url.get()
                    on:input=move |ev| {
                        set_api_url.set(event_target_value(&ev));
                        set_saved.set(false);
                    }
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-2 border border-gray-600
                           focus:border-blue-500 focus:outline-none"
                />
                <button
                    on:click=save_url
                    class="px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded-lg
                           font-medium transition-colors"
                >
                    "Save"
                </button>
            </div>

            {move || {
                if saved.get() {
                    view! {
                        <p class="text-sm text-gray-400 mt-2">
                            "Saved. The next refresh uses this address."
                        </p>
                    }
                    .into_view()
                } else {
                    view! {}.into_view()
                }
            }}
        </section>
    }
}

/// Footer showing the backend address and fetch activity
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let loading = state.loading;

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <span class="text-gray-400">
                    {format!("Data server: {}", api::get_api_base())}
                </span>

                {move || {
                    if loading.get() {
                        view! {
                            <div class="flex items-center space-x-2 text-blue-400">
                                <div class="loading-spinner w-4 h-4" />
                                <span>"Loading..."</span>
                            </div>
                        }
                        .into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>
        </footer>
    }
}
