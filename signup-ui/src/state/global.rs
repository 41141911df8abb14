//! Global Application State
//!
//! Reactive state management using Leptos signals, plus the actions that
//! talk to the backend. Every action handles its own failure and never
//! leaves the page unusable; the next user action can simply try again.

use indexmap::IndexMap;
use leptos::*;

use crate::api;
use crate::state::session::{self, Session};

/// How long the signup/unregister banner stays visible (ms)
pub const BANNER_TTL_MS: u32 = 5000;
/// Delay before the login modal closes after a successful login (ms)
pub const LOGIN_CLOSE_MS: u32 = 1000;

pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Current session
    pub session: RwSignal<Session>,
    /// Last fetch of the activity list
    pub activities: RwSignal<ActivityList>,
    /// Banner below the signup form
    pub message: RwSignal<Option<Banner>>,
    /// Message line inside the login modal
    pub login_message: RwSignal<Option<Banner>>,
    /// Whether the login modal is open
    pub login_open: RwSignal<bool>,
    /// Bumped per banner so a stale timer never hides a newer one
    banner_seq: RwSignal<u64>,
}

/// One activity as returned by the API
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct ActivityDetails {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl ActivityDetails {
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// Activities keyed by name, in server order
pub type ActivityMap = IndexMap<String, ActivityDetails>;

/// What the activity list currently shows
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ActivityList {
    #[default]
    Loading,
    Loaded(ActivityMap),
    Failed,
}

impl ActivityList {
    /// Names for the signup form's selector
    pub fn names(&self) -> Vec<String> {
        match self {
            ActivityList::Loaded(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BannerKind {
    Success,
    Error,
}

/// A user-visible message
#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState {
        session: create_rw_signal(Session::from_storage()),
        activities: create_rw_signal(ActivityList::default()),
        message: create_rw_signal(None),
        login_message: create_rw_signal(None),
        login_open: create_rw_signal(false),
        banner_seq: create_rw_signal(0),
    };

    provide_context(state);
    state
}

impl GlobalState {
    pub fn is_logged_in(&self) -> bool {
        self.session.with(Session::is_logged_in)
    }

    fn token(&self) -> Option<String> {
        self.session.with_untracked(|s| s.token.clone())
    }

    /// Show a banner, auto-hidden after [`BANNER_TTL_MS`]
    pub fn show_banner(&self, banner: Banner) {
        let seq = self.banner_seq.get_untracked() + 1;
        self.banner_seq.set(seq);
        self.message.set(Some(banner));

        let message = self.message;
        let banner_seq = self.banner_seq;
        gloo_timers::callback::Timeout::new(BANNER_TTL_MS, move || {
            if banner_seq.get_untracked() == seq {
                message.set(None);
            }
        })
        .forget();
    }

    /// Validate the persisted token; any failure means logged out
    pub async fn init_auth(self) {
        let Some(token) = self.token() else {
            return;
        };

        let username = match api::fetch_me(Some(&token)).await {
            Ok(me) if me.authenticated => me.username,
            Ok(_) => None,
            Err(e) => {
                web_sys::console::error_1(&format!("Error getting user info: {}", e).into());
                None
            }
        };

        match username {
            Some(username) => self.session.update(|s| s.username = Some(username)),
            None => {
                session::clear_token();
                self.session.set(Session::default());
            }
        }
    }

    /// Returns whether the login went through, so the modal can reset
    pub async fn login(self, username: String, password: String) -> bool {
        match api::login(&username, &password).await {
            Ok(resp) => {
                session::save_token(&resp.access_token);
                self.session.set(Session {
                    token: Some(resp.access_token),
                    username: Some(resp.username),
                });
                self.login_message.set(Some(Banner::success("Login successful!")));

                let login_open = self.login_open;
                let login_message = self.login_message;
                gloo_timers::callback::Timeout::new(LOGIN_CLOSE_MS, move || {
                    login_open.set(false);
                    login_message.set(None);
                })
                .forget();
                true
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Login error: {}", e).into());
                self.login_message.set(Some(Banner::error(
                    e.message("Login failed", "Login failed. Please try again."),
                )));
                false
            }
        }
    }

    /// Forget the session and re-fetch so delete controls disappear
    pub async fn logout(self) {
        session::clear_token();
        self.session.set(Session::default());
        self.load_activities().await;
    }

    /// Replace the list with a fresh fetch
    pub async fn load_activities(self) {
        match api::fetch_activities().await {
            Ok(map) => self.activities.set(ActivityList::Loaded(map)),
            Err(e) => {
                web_sys::console::error_1(&format!("Error fetching activities: {}", e).into());
                self.activities.set(ActivityList::Failed);
            }
        }
    }

    /// Returns whether the signup went through, so the form can reset
    pub async fn signup(self, email: String, activity: String) -> bool {
        match api::signup(&activity, &email, self.token().as_deref()).await {
            Ok(resp) => {
                self.show_banner(Banner::success(resp.message));
                self.load_activities().await;
                true
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Error signing up: {}", e).into());
                self.show_banner(Banner::error(
                    e.message("An error occurred", "Failed to sign up. Please try again."),
                ));
                false
            }
        }
    }

    pub async fn unregister(self, activity: String, email: String) {
        match api::unregister(&activity, &email, self.token().as_deref()).await {
            Ok(resp) => {
                self.show_banner(Banner::success(resp.message));
                self.load_activities().await;
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Error unregistering: {}", e).into());
                self.show_banner(Banner::error(
                    e.message("An error occurred", "Failed to unregister. Please try again."),
                ));
            }
        }
    }
}
