//! View Layer
//!
//! Typed surfaces the controller drives. Each interactive element of the page
//! is its own capability trait so a front-end can implement (and a test can
//! record) exactly what the controller shows.

pub mod render;
pub mod terminal;

pub use render::{render_activities, ActivityCard, ActivityListing, ParticipantRow};
pub use terminal::TerminalView;

use std::time::Duration;

/// Tone of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// A user-visible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
    /// Hide after this delay; `None` keeps it until replaced
    pub ttl: Option<Duration>,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
            ttl: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
            ttl: None,
        }
    }

    pub fn hide_after(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == BannerKind::Error
    }
}

/// Header area: login button or "logged in as" with logout
pub trait SessionPanel {
    fn show_logged_in(&mut self, username: &str);

    fn show_logged_out(&mut self);
}

/// Login form and its message line
pub trait LoginPanel {
    fn show_login_message(&mut self, banner: &Banner);
}

/// Signup form (email + activity selector)
pub trait SignupPanel {
    fn reset_signup_form(&mut self);
}

/// The activity cards, including the unregister controls
pub trait ActivityListPanel {
    fn render_activities(&mut self, listing: &ActivityListing);

    /// Replace the whole list with a static error
    fn show_activities_error(&mut self, message: &str);
}

/// Transient success/error banner below the signup form
pub trait MessageBanner {
    fn show_banner(&mut self, banner: &Banner);
}

/// Everything the controller needs from a front-end
pub trait View: SessionPanel + LoginPanel + SignupPanel + ActivityListPanel + MessageBanner {}

impl<T> View for T where T: SessionPanel + LoginPanel + SignupPanel + ActivityListPanel + MessageBanner {}
