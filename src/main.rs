//! Brent Dashboard
//!
//! Single-page dashboard for Brent crude price analysis, built with
//! Leptos (WASM). It binds three REST endpoints - the daily price
//! series, the annotated event catalog, and one precomputed
//! changepoint - to an interactive chart with date-range filtering.
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles
//! to WebAssembly. All computation lives behind the API; the app only
//! fetches, filters by date, and renders.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
