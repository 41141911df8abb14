//! Activity Sign-up Page
//!
//! Browser front-end for the Mergington High School activities API, built
//! with Leptos (WASM).
//!
//! # Features
//!
//! - Activity list with live availability
//! - Teacher login, token kept in local storage
//! - Student signup and removal for logged-in teachers
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! All state lives in [`state::global::GlobalState`]; every mutation is
//! followed by a full re-fetch of the activity list.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
