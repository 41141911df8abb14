//! Header Component
//!
//! Page title plus the login/logout controls.

use leptos::*;

use crate::state::global::GlobalState;

#[component]
pub fn Header() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let on_login = move |_: web_sys::MouseEvent| {
        state.login_message.set(None);
        state.login_open.set(true);
    };

    let on_logout = move |_: web_sys::MouseEvent| {
        spawn_local(state.logout());
    };

    view! {
        <header class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4 flex items-center justify-between h-16">
                <div>
                    <h1 class="text-xl font-bold">"Mergington High School"</h1>
                    <h2 class="text-sm text-gray-400">"Extracurricular Activities"</h2>
                </div>

                {move || {
                    let username = state.session.with(|s| s.username.clone());
                    match username.filter(|_| state.is_logged_in()) {
                        Some(username) => view! {
                            <div id="user-info" class="flex items-center space-x-3">
                                <span>"Welcome, "<span id="username-display">{username}</span></span>
                                <button
                                    id="logout-btn"
                                    on:click=on_logout
                                    class="px-4 py-2 rounded-lg bg-gray-700 hover:bg-gray-600 transition-colors"
                                >
                                    "Logout"
                                </button>
                            </div>
                        }.into_view(),
                        None => view! {
                            <div id="login-section">
                                <button
                                    id="login-btn"
                                    on:click=on_login
                                    class="px-4 py-2 rounded-lg bg-primary-600 hover:bg-primary-700 transition-colors"
                                >
                                    "Teacher Login"
                                </button>
                            </div>
                        }.into_view(),
                    }
                }}
            </div>
        </header>
    }
}
