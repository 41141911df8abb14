//! UI Components
//!
//! Leptos components making up the sign-up page.

pub mod activity_card;
pub mod header;
pub mod loading;
pub mod login_modal;
pub mod signup_form;
pub mod toast;

pub use activity_card::ActivityList;
pub use header::Header;
pub use loading::Loading;
pub use login_modal::LoginModal;
pub use signup_form::SignupForm;
pub use toast::MessageBanner;
