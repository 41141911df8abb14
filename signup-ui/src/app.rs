//! App Root Component
//!
//! Provides global state and runs the page-load sequence: validate any
//! stored token first, then fetch the list so delete controls match the
//! session.

use leptos::*;

use crate::components::{ActivityList, Header, LoginModal, SignupForm};
use crate::state::global::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();

    spawn_local(async move {
        state.init_auth().await;
        state.load_activities().await;
    });

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <Header />

            <main class="flex-1 container mx-auto px-4 py-8 grid gap-8 md:grid-cols-2">
                <section id="activities-container">
                    <h3 class="text-lg font-semibold mb-4">"Available Activities"</h3>
                    <ActivityList />
                </section>

                <SignupForm />
            </main>

            <LoginModal />
        </div>
    }
}
