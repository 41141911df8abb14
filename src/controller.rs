//! Client Controller
//!
//! Owns the session, renders the activity list and turns user actions into
//! backend calls. Every operation handles its own failures: nothing returns
//! an error, each failure becomes a message on the view instead.
//!
//! After any successful mutation the full list is fetched again rather than
//! patched locally, so the rendered list always matches the server.
//!
//! # Example
//!
//! ```rust,no_run
//! use activity_signup::{ClientController, Config, FileTokenStore, HttpBackend, TerminalView};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default()?;
//!     let backend = HttpBackend::new(&config.client)?;
//!     let store = FileTokenStore::new(&config.session.token_file);
//!
//!     let mut controller =
//!         ClientController::new(backend, store, TerminalView::stdout(), config.client.banner_ttl());
//!     controller.start().await;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use crate::api::ActivityBackend;
use crate::session::{Session, SessionState, TokenStore};
use crate::view::{render_activities, Banner, View};

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Login failed";
pub const LOGIN_UNREACHABLE: &str = "Login failed. Please try again.";
pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";
pub const REQUEST_FAILED: &str = "An error occurred";
pub const SIGNUP_UNREACHABLE: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_UNREACHABLE: &str = "Failed to unregister. Please try again.";

/// How long the login success message stays before the form closes
pub const LOGIN_SUCCESS_TTL: Duration = Duration::from_millis(1000);

/// One user interaction, as wired to a front-end element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Login { username: String, password: String },
    Logout,
    Signup { email: String, activity: String },
    Unregister { activity: String, email: String },
    Refresh,
}

/// The single controller of a client front-end
pub struct ClientController<B, S, V> {
    backend: B,
    store: S,
    view: V,
    session: Session,
    banner_ttl: Duration,
}

impl<B, S, V> ClientController<B, S, V>
where
    B: ActivityBackend,
    S: TokenStore,
    V: View,
{
    /// Create a controller; the session is seeded from `store` by [`init_auth`](Self::init_auth)
    pub fn new(backend: B, store: S, view: V, banner_ttl: Duration) -> Self {
        Self {
            backend,
            store,
            view,
            session: Session::default(),
            banner_ttl,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Page-load sequence: validate any persisted token, then render the list
    pub async fn start(&mut self) {
        self.init_auth().await;
        self.load_activities().await;
    }

    /// Dispatch a user action to its handler
    pub async fn handle(&mut self, action: UserAction) {
        match action {
            UserAction::Login { username, password } => self.login(&username, &password).await,
            UserAction::Logout => self.logout().await,
            UserAction::Signup { email, activity } => self.signup(&email, &activity).await,
            UserAction::Unregister { activity, email } => self.unregister(&activity, &email).await,
            UserAction::Refresh => self.load_activities().await,
        }
    }

    /// Restore the session from the persisted token.
    ///
    /// A single `GET /me`; any failure or an unauthenticated answer discards
    /// the token. No retry.
    pub async fn init_auth(&mut self) -> SessionState {
        let token = match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Could not read persisted token: {}", e);
                None
            }
        };

        let Some(token) = token else {
            self.session.clear();
            self.view.show_logged_out();
            return SessionState::LoggedOut;
        };

        self.session = Session::with_token(token);

        let username = match self.backend.current_user(self.session.token()).await {
            Ok(me) => me.authenticated_user(),
            Err(e) => {
                if e.is_transport() {
                    tracing::warn!("Token validation could not reach the server: {}", e);
                } else {
                    tracing::warn!("Token validation failed: {}", e);
                }
                None
            }
        };

        match username {
            Some(username) => {
                tracing::info!(username = %username, "Restored session");
                self.session.confirm(username);
                self.show_session();
                SessionState::LoggedIn
            }
            None => {
                tracing::info!("Persisted token rejected, logging out");
                self.discard_session();
                self.view.show_logged_out();
                SessionState::LoggedOut
            }
        }
    }

    /// Exchange credentials for a token; failure leaves the session untouched
    pub async fn login(&mut self, username: &str, password: &str) {
        match self.backend.login(username, password).await {
            Ok(resp) => {
                self.session.log_in(resp.access_token, resp.username);
                if let Some(token) = self.session.token() {
                    if let Err(e) = self.store.save(token) {
                        tracing::warn!("Could not persist token: {}", e);
                    }
                }

                tracing::info!(username = ?self.session.username(), "Logged in");
                self.view
                    .show_login_message(&Banner::success(LOGIN_SUCCESS).hide_after(LOGIN_SUCCESS_TTL));
                self.show_session();
            }
            Err(e) => {
                tracing::warn!(username = %username, "Login failed: {}", e);
                self.view
                    .show_login_message(&Banner::error(e.user_message(LOGIN_FAILED, LOGIN_UNREACHABLE)));
            }
        }
    }

    /// Forget the session and re-render so unregister controls disappear
    pub async fn logout(&mut self) {
        self.discard_session();
        tracing::info!("Logged out");
        self.view.show_logged_out();
        self.load_activities().await;
    }

    /// Fetch all activities and replace the rendered list
    pub async fn load_activities(&mut self) {
        match self.backend.activities().await {
            Ok(activities) => {
                let listing = render_activities(&activities, self.session.is_active());
                tracing::debug!(count = listing.cards.len(), "Rendered activities");
                self.view.render_activities(&listing);
            }
            Err(e) => {
                tracing::error!("Failed to load activities: {}", e);
                self.view.show_activities_error(LOAD_FAILED);
            }
        }
    }

    /// Sign `email` up for `activity`, then refresh the list
    pub async fn signup(&mut self, email: &str, activity: &str) {
        let result = self
            .backend
            .signup(activity, email, self.session.token())
            .await;

        match result {
            Ok(resp) => {
                tracing::info!(activity = %activity, email = %email, "Signed up");
                self.show_banner(Banner::success(resp.message));
                self.view.reset_signup_form();
                self.load_activities().await;
            }
            Err(e) => {
                tracing::warn!(activity = %activity, email = %email, "Signup failed: {}", e);
                self.show_banner(Banner::error(e.user_message(REQUEST_FAILED, SIGNUP_UNREACHABLE)));
            }
        }
    }

    /// Remove `email` from `activity`, then refresh the list
    pub async fn unregister(&mut self, activity: &str, email: &str) {
        let result = self
            .backend
            .unregister(activity, email, self.session.token())
            .await;

        match result {
            Ok(resp) => {
                tracing::info!(activity = %activity, email = %email, "Unregistered");
                self.show_banner(Banner::success(resp.message));
                self.load_activities().await;
            }
            Err(e) => {
                tracing::warn!(activity = %activity, email = %email, "Unregister failed: {}", e);
                self.show_banner(Banner::error(
                    e.user_message(REQUEST_FAILED, UNREGISTER_UNREACHABLE),
                ));
            }
        }
    }

    fn show_session(&mut self) {
        match self.session.username() {
            Some(username) => {
                let username = username.to_string();
                self.view.show_logged_in(&username);
            }
            None => self.view.show_logged_out(),
        }
    }

    fn show_banner(&mut self, banner: Banner) {
        self.view.show_banner(&banner.hide_after(self.banner_ttl));
    }

    fn discard_session(&mut self) {
        self.session.clear();
        if let Err(e) = self.store.clear() {
            tracing::warn!("Could not remove persisted token: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        ActivityDetails, ActivityMap, ApiError, ApiResult, LoginResponse, MeResponse,
        MessageResponse,
    };
    use crate::session::MemoryTokenStore;
    use crate::view::{
        ActivityListPanel, ActivityListing, BannerKind, LoginPanel, MessageBanner, SessionPanel,
        SignupPanel,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    const TOKEN: &str = "token-mrodriguez";
    const TTL: Duration = Duration::from_millis(5000);

    /// In-memory backend mirroring the server's rules
    #[derive(Clone, Default)]
    struct FakeBackend {
        activities: Arc<Mutex<ActivityMap>>,
        offline: bool,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeBackend {
        fn school() -> Self {
            let mut map = ActivityMap::new();
            map.insert(
                "Chess Club".to_string(),
                ActivityDetails {
                    description: "Learn strategies".to_string(),
                    schedule: "Fridays".to_string(),
                    max_participants: 10,
                    participants: vec!["a@x.com".to_string()],
                },
            );
            map.insert(
                "Art Club".to_string(),
                ActivityDetails {
                    description: "Explore your creativity".to_string(),
                    schedule: "Thursdays".to_string(),
                    max_participants: 15,
                    participants: vec![],
                },
            );
            Self {
                activities: Arc::new(Mutex::new(map)),
                ..Self::default()
            }
        }

        fn offline() -> Self {
            Self {
                offline: true,
                ..Self::school()
            }
        }

        fn record(&self, call: &str) -> ApiResult<()> {
            self.calls.lock().unwrap().push(call.to_string());
            if self.offline {
                Err(ApiError::Transport("connection refused".to_string()))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn require_auth(token: Option<&str>) -> ApiResult<()> {
            if token == Some(TOKEN) {
                Ok(())
            } else {
                Err(ApiError::Status {
                    status: 401,
                    detail: Some("Authentication required".to_string()),
                })
            }
        }

        fn bad_request(detail: &str, status: u16) -> ApiError {
            ApiError::Status {
                status,
                detail: Some(detail.to_string()),
            }
        }
    }

    #[async_trait]
    impl ActivityBackend for FakeBackend {
        async fn current_user(&self, token: Option<&str>) -> ApiResult<MeResponse> {
            self.record("me")?;
            let authenticated = token == Some(TOKEN);
            Ok(MeResponse {
                authenticated,
                username: authenticated.then(|| "mrodriguez".to_string()),
            })
        }

        async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
            self.record("login")?;
            if username == "mrodriguez" && password == "art123" {
                Ok(LoginResponse {
                    access_token: TOKEN.to_string(),
                    token_type: "bearer".to_string(),
                    username: username.to_string(),
                })
            } else {
                Err(Self::bad_request("Incorrect username or password", 401))
            }
        }

        async fn activities(&self) -> ApiResult<ActivityMap> {
            self.record("activities")?;
            Ok(self.activities.lock().unwrap().clone())
        }

        async fn signup(
            &self,
            activity: &str,
            email: &str,
            token: Option<&str>,
        ) -> ApiResult<MessageResponse> {
            self.record("signup")?;
            Self::require_auth(token)?;
            let mut activities = self.activities.lock().unwrap();
            let details = activities
                .get_mut(activity)
                .ok_or_else(|| Self::bad_request("Activity not found", 404))?;
            if details.participants.iter().any(|p| p == email) {
                return Err(Self::bad_request("Student is already signed up", 400));
            }
            details.participants.push(email.to_string());
            Ok(MessageResponse {
                message: format!("Signed up {} for {}", email, activity),
            })
        }

        async fn unregister(
            &self,
            activity: &str,
            email: &str,
            token: Option<&str>,
        ) -> ApiResult<MessageResponse> {
            self.record("unregister")?;
            Self::require_auth(token)?;
            let mut activities = self.activities.lock().unwrap();
            let details = activities
                .get_mut(activity)
                .ok_or_else(|| Self::bad_request("Activity not found", 404))?;
            let before = details.participants.len();
            details.participants.retain(|p| p != email);
            if details.participants.len() == before {
                return Err(Self::bad_request(
                    "Student is not signed up for this activity",
                    400,
                ));
            }
            Ok(MessageResponse {
                message: format!("Unregistered {} from {}", email, activity),
            })
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Shown {
        LoggedIn(String),
        LoggedOut,
        LoginMessage(Banner),
        FormReset,
        List(ActivityListing),
        ListError(String),
        Banner(Banner),
    }

    /// View that records everything it is asked to show
    #[derive(Default)]
    struct RecordingView {
        shown: Vec<Shown>,
    }

    impl RecordingView {
        fn last_list(&self) -> Option<&ActivityListing> {
            self.shown.iter().rev().find_map(|s| match s {
                Shown::List(listing) => Some(listing),
                _ => None,
            })
        }

        fn last_banner(&self) -> Option<&Banner> {
            self.shown.iter().rev().find_map(|s| match s {
                Shown::Banner(banner) => Some(banner),
                _ => None,
            })
        }

        fn last_login_message(&self) -> Option<&Banner> {
            self.shown.iter().rev().find_map(|s| match s {
                Shown::LoginMessage(banner) => Some(banner),
                _ => None,
            })
        }

        fn last_session(&self) -> Option<&Shown> {
            self.shown
                .iter()
                .rev()
                .find(|s| matches!(s, Shown::LoggedIn(_) | Shown::LoggedOut))
        }
    }

    impl SessionPanel for RecordingView {
        fn show_logged_in(&mut self, username: &str) {
            self.shown.push(Shown::LoggedIn(username.to_string()));
        }

        fn show_logged_out(&mut self) {
            self.shown.push(Shown::LoggedOut);
        }
    }

    impl LoginPanel for RecordingView {
        fn show_login_message(&mut self, banner: &Banner) {
            self.shown.push(Shown::LoginMessage(banner.clone()));
        }
    }

    impl SignupPanel for RecordingView {
        fn reset_signup_form(&mut self) {
            self.shown.push(Shown::FormReset);
        }
    }

    impl ActivityListPanel for RecordingView {
        fn render_activities(&mut self, listing: &ActivityListing) {
            self.shown.push(Shown::List(listing.clone()));
        }

        fn show_activities_error(&mut self, message: &str) {
            self.shown.push(Shown::ListError(message.to_string()));
        }
    }

    impl MessageBanner for RecordingView {
        fn show_banner(&mut self, banner: &Banner) {
            self.shown.push(Shown::Banner(banner.clone()));
        }
    }

    type TestController = ClientController<FakeBackend, MemoryTokenStore, RecordingView>;

    fn controller(backend: FakeBackend, store: MemoryTokenStore) -> TestController {
        ClientController::new(backend, store, RecordingView::default(), TTL)
    }

    async fn logged_in(backend: FakeBackend) -> TestController {
        let mut c = controller(backend, MemoryTokenStore::new());
        c.login("mrodriguez", "art123").await;
        assert!(c.session().is_active());
        c
    }

    #[tokio::test]
    async fn test_start_without_token_skips_me() {
        let backend = FakeBackend::school();
        let mut c = controller(backend.clone(), MemoryTokenStore::new());

        c.start().await;

        assert_eq!(backend.calls(), vec!["activities"]);
        assert_eq!(c.view().last_session(), Some(&Shown::LoggedOut));
        let listing = c.view().last_list().unwrap();
        assert_eq!(listing.cards.len(), 2);
        assert_eq!(listing.removable_count(), 0);
    }

    #[tokio::test]
    async fn test_start_with_valid_token_restores_session() {
        let backend = FakeBackend::school();
        let store = MemoryTokenStore::with_token(TOKEN);
        let mut c = controller(backend.clone(), store.clone());

        c.start().await;

        assert_eq!(backend.calls(), vec!["me", "activities"]);
        assert_eq!(c.session().username(), Some("mrodriguez"));
        assert_eq!(
            c.view().last_session(),
            Some(&Shown::LoggedIn("mrodriguez".to_string()))
        );
        assert_eq!(c.view().last_list().unwrap().removable_count(), 1);
        assert_eq!(store.get().as_deref(), Some(TOKEN));
    }

    #[tokio::test]
    async fn test_start_with_invalid_token_clears_store() {
        let store = MemoryTokenStore::with_token("stale");
        let mut c = controller(FakeBackend::school(), store.clone());

        let state = c.init_auth().await;

        assert_eq!(state, SessionState::LoggedOut);
        assert_eq!(store.get(), None);
        assert_eq!(c.session().token(), None);
        assert_eq!(c.view().last_session(), Some(&Shown::LoggedOut));
    }

    #[tokio::test]
    async fn test_start_offline_treated_as_logged_out() {
        let store = MemoryTokenStore::with_token(TOKEN);
        let mut c = controller(FakeBackend::offline(), store.clone());

        c.start().await;

        assert_eq!(store.get(), None);
        assert!(!c.session().is_active());
        assert_eq!(
            c.view().shown.last(),
            Some(&Shown::ListError(LOAD_FAILED.to_string()))
        );
    }

    #[tokio::test]
    async fn test_login_persists_token_and_shows_username() {
        let store = MemoryTokenStore::new();
        let mut c = controller(FakeBackend::school(), store.clone());

        c.handle(UserAction::Login {
            username: "mrodriguez".to_string(),
            password: "art123".to_string(),
        })
        .await;

        assert_eq!(store.get().as_deref(), Some(TOKEN));
        assert_eq!(c.session().token(), Some(TOKEN));
        assert_eq!(
            c.view().last_session(),
            Some(&Shown::LoggedIn("mrodriguez".to_string()))
        );
        let message = c.view().last_login_message().unwrap();
        assert_eq!(message.kind, BannerKind::Success);
        assert_eq!(message.text, LOGIN_SUCCESS);
        assert_eq!(message.ttl, Some(LOGIN_SUCCESS_TTL));
    }

    #[tokio::test]
    async fn test_login_wrong_password_shows_detail() {
        let store = MemoryTokenStore::new();
        let mut c = controller(FakeBackend::school(), store.clone());

        c.login("mrodriguez", "wrong").await;

        let message = c.view().last_login_message().unwrap();
        assert_eq!(message.kind, BannerKind::Error);
        assert_eq!(message.text, "Incorrect username or password");
        assert_eq!(c.session().state(), SessionState::LoggedOut);
        assert_eq!(store.get(), None);
        assert_eq!(c.view().last_session(), None);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_session() {
        let mut c = logged_in(FakeBackend::school()).await;

        c.login("mrodriguez", "wrong").await;

        assert!(c.session().is_active());
        assert_eq!(c.store().get().as_deref(), Some(TOKEN));
    }

    #[tokio::test]
    async fn test_login_offline_uses_fallback() {
        let mut c = controller(FakeBackend::offline(), MemoryTokenStore::new());

        c.login("mrodriguez", "art123").await;

        assert_eq!(c.view().last_login_message().unwrap().text, LOGIN_UNREACHABLE);
        assert!(!c.session().is_active());
    }

    #[tokio::test]
    async fn test_logout_clears_token_and_hides_controls() {
        let backend = FakeBackend::school();
        let mut c = logged_in(backend.clone()).await;
        c.load_activities().await;
        assert_eq!(c.view().last_list().unwrap().removable_count(), 1);

        c.handle(UserAction::Logout).await;

        assert_eq!(c.store().get(), None);
        assert_eq!(c.session().state(), SessionState::LoggedOut);
        assert_eq!(c.view().last_session(), Some(&Shown::LoggedOut));
        assert_eq!(c.view().last_list().unwrap().removable_count(), 0);
        assert_eq!(backend.calls().last().map(String::as_str), Some("activities"));
    }

    #[tokio::test]
    async fn test_signup_success_refetches_list() {
        let backend = FakeBackend::school();
        let mut c = logged_in(backend.clone()).await;

        c.handle(UserAction::Signup {
            email: "new@mergington.edu".to_string(),
            activity: "Art Club".to_string(),
        })
        .await;

        let banner = c.view().last_banner().unwrap();
        assert_eq!(banner.kind, BannerKind::Success);
        assert_eq!(banner.text, "Signed up new@mergington.edu for Art Club");
        assert_eq!(banner.ttl, Some(TTL));
        assert!(c.view().shown.contains(&Shown::FormReset));

        let card = c.view().last_list().unwrap().card("Art Club").unwrap().clone();
        assert_eq!(card.participants[0].email, "new@mergington.edu");
        assert_eq!(card.spots_left, 14);
        assert_eq!(backend.calls(), vec!["login", "signup", "activities"]);
    }

    #[tokio::test]
    async fn test_signup_duplicate_shows_detail_without_refresh() {
        let backend = FakeBackend::school();
        let mut c = logged_in(backend.clone()).await;

        c.signup("a@x.com", "Chess Club").await;

        let banner = c.view().last_banner().unwrap();
        assert!(banner.is_error());
        assert_eq!(banner.text, "Student is already signed up");
        assert_eq!(banner.ttl, Some(TTL));
        assert!(!c.view().shown.contains(&Shown::FormReset));
        assert_eq!(backend.calls(), vec!["login", "signup"]);
    }

    #[tokio::test]
    async fn test_signup_logged_out_is_rejected_by_server() {
        let mut c = controller(FakeBackend::school(), MemoryTokenStore::new());

        c.signup("b@x.com", "Chess Club").await;

        assert_eq!(c.view().last_banner().unwrap().text, "Authentication required");
    }

    #[tokio::test]
    async fn test_signup_offline_uses_fallback() {
        let mut c = controller(FakeBackend::offline(), MemoryTokenStore::new());

        c.signup("b@x.com", "Chess Club").await;

        assert_eq!(c.view().last_banner().unwrap().text, SIGNUP_UNREACHABLE);
    }

    #[tokio::test]
    async fn test_unregister_success_refetches_list() {
        let mut c = logged_in(FakeBackend::school()).await;

        c.handle(UserAction::Unregister {
            activity: "Chess Club".to_string(),
            email: "a@x.com".to_string(),
        })
        .await;

        assert_eq!(
            c.view().last_banner().unwrap().text,
            "Unregistered a@x.com from Chess Club"
        );
        let card = c.view().last_list().unwrap().card("Chess Club").unwrap().clone();
        assert!(!card.has_participants());
        assert_eq!(card.spots_left, 10);
    }

    #[tokio::test]
    async fn test_unregister_unknown_participant() {
        let mut c = logged_in(FakeBackend::school()).await;

        c.unregister("Chess Club", "ghost@x.com").await;

        assert_eq!(
            c.view().last_banner().unwrap().text,
            "Student is not signed up for this activity"
        );
    }

    #[tokio::test]
    async fn test_unregister_offline_uses_fallback() {
        let mut c = controller(FakeBackend::offline(), MemoryTokenStore::new());

        c.unregister("Chess Club", "a@x.com").await;

        assert_eq!(c.view().last_banner().unwrap().text, UNREGISTER_UNREACHABLE);
    }

    #[tokio::test]
    async fn test_refresh_action_renders_list() {
        let mut c = controller(FakeBackend::school(), MemoryTokenStore::new());

        c.handle(UserAction::Refresh).await;

        let names: Vec<String> = c
            .view()
            .last_list()
            .unwrap()
            .activity_names()
            .map(str::to_string)
            .collect();
        assert_eq!(names, vec!["Chess Club", "Art Club"]);
    }
}
