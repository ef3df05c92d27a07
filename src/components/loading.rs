//! Loading Component
//!
//! Placeholder shown while a fetch cycle is in flight.

use leptos::*;

/// Chart-area loading placeholder
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 space-y-3">
            <div class="loading-spinner w-8 h-8" />
            <span class="text-gray-400 text-sm">"Loading chart data..."</span>
        </div>
    }
}
