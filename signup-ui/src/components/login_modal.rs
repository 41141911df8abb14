//! Login Modal Component

use leptos::*;

use crate::components::toast::BannerLine;
use crate::state::global::GlobalState;

/// Contents of the login form
#[derive(Clone, Debug, Default, PartialEq)]
struct LoginFields {
    username: String,
    password: String,
}

impl LoginFields {
    /// A successful login resets the whole form; a failed one keeps the
    /// username for another try
    fn after_attempt(self, succeeded: bool) -> Self {
        if succeeded {
            Self::default()
        } else {
            Self {
                username: self.username,
                password: String::new(),
            }
        }
    }
}

/// Modal teacher login form
///
/// Closes itself one second after a successful login; failures keep it
/// open with the error shown inline.
#[component]
pub fn LoginModal() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);

        let fields = LoginFields {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        spawn_local(async move {
            let succeeded = state.login(fields.username.clone(), fields.password.clone()).await;
            let fields = fields.after_attempt(succeeded);
            set_username.set(fields.username);
            set_password.set(fields.password);
            set_submitting.set(false);
        });
    };

    let on_close = move |_: web_sys::MouseEvent| {
        state.login_open.set(false);
        state.login_message.set(None);
    };

    view! {
        <Show when=move || state.login_open.get()>
            <div id="login-modal" class="fixed inset-0 z-40 bg-gray-900/70 flex items-center justify-center">
                <div class="bg-gray-800 rounded-lg p-6 w-full max-w-sm space-y-4">
                    <div class="flex items-center justify-between">
                        <h3 class="text-lg font-semibold">"Teacher Login"</h3>
                        <button type="button" class="close text-gray-400 hover:text-white" on:click=on_close>
                            "×"
                        </button>
                    </div>

                    <form id="login-form" on:submit=on_submit class="space-y-4">
                        <input
                            id="login-username"
                            type="text"
                            placeholder="Username"
                            required
                            prop:value=username
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-3 py-2"
                        />
                        <input
                            id="login-password"
                            type="password"
                            placeholder="Password"
                            required
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-3 py-2"
                        />
                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg py-2 font-semibold"
                        >
                            "Login"
                        </button>
                    </form>

                    <div id="login-message">
                        {move || state.login_message.get().map(|banner| view! { <BannerLine banner=banner /> })}
                    </div>
                </div>
            </div>
        </Show>
    }
}
