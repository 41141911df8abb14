//! # Activity Sign-up
//!
//! Client for the Mergington High School activities API: list
//! extracurricular activities and, once logged in as a teacher, sign students
//! up or unregister them.
//!
//! ## Modules
//!
//! - [`api`]: Backend trait, HTTP client and wire types
//! - [`session`]: Session state and token persistence
//! - [`view`]: View capabilities, list rendering and the terminal front-end
//! - [`controller`]: The controller tying the three together
//! - [`config`]: File and environment configuration
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use activity_signup::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default()?;
//!     let backend = HttpBackend::new(&config.client)?;
//!     let store = FileTokenStore::new(&config.session.token_file);
//!
//!     let mut controller =
//!         ClientController::new(backend, store, TerminalView::stdout(), config.client.banner_ttl());
//!
//!     // Restore the session, then render the list
//!     controller.start().await;
//!
//!     controller
//!         .handle(UserAction::Signup {
//!             email: "emma@mergington.edu".to_string(),
//!             activity: "Chess Club".to_string(),
//!         })
//!         .await;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod logging;
pub mod session;
pub mod view;

pub use api::{
    ActivityBackend, ActivityDetails, ActivityMap, ApiError, ApiResult, HttpBackend,
    LoginResponse, MeResponse, MessageResponse,
};

pub use session::{
    FileTokenStore, MemoryTokenStore, Session, SessionState, TokenStore, TokenStoreError,
};

pub use view::{
    render_activities, ActivityCard, ActivityListing, Banner, BannerKind, ParticipantRow,
    TerminalView, View,
};

pub use controller::{ClientController, UserAction};

pub use config::{ClientConfig, Config, ConfigError, LoggingConfig, SessionConfig};
