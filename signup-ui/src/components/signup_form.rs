//! Signup Form Component
//!
//! Email plus activity selector. Only teachers may register students, so
//! the form is replaced by a notice while nobody is logged in.

use leptos::*;

use crate::components::MessageBanner;
use crate::state::global::GlobalState;

#[component]
pub fn SignupForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (email, set_email) = create_signal(String::new());
    let (activity, set_activity) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);

        let (e, a) = (email.get_untracked(), activity.get_untracked());
        spawn_local(async move {
            if state.signup(e, a).await {
                set_email.set(String::new());
                set_activity.set(String::new());
            }
            set_submitting.set(false);
        });
    };

    let options = move || {
        state.activities.with(|list| {
            list.names()
                .into_iter()
                .map(|name| view! { <option value=name.clone()>{name}</option> })
                .collect_view()
        })
    };

    view! {
        <section id="signup-container" class="bg-gray-800 rounded-lg p-6 space-y-4">
            <h3 class="text-lg font-semibold">"Sign Up for an Activity"</h3>

            <Show
                when=move || state.is_logged_in()
                fallback=|| view! {
                    <p id="auth-required-message" class="text-gray-400">
                        "Teachers must log in to register or unregister students."
                    </p>
                }
            >
                <form id="signup-form" on:submit=on_submit class="space-y-4">
                    <input
                        id="email"
                        type="email"
                        placeholder="your-email@mergington.edu"
                        required
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-3 py-2"
                    />
                    <select
                        id="activity"
                        required
                        prop:value=activity
                        on:change=move |ev| set_activity.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-3 py-2"
                    >
                        <option value="">"-- Select an activity --"</option>
                        {options}
                    </select>
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg py-3 font-semibold"
                    >
                        "Sign Up"
                    </button>
                </form>
            </Show>

            <MessageBanner />
        </section>
    }
}
