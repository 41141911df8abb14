//! Activities API
//!
//! HTTP calls against the activities backend, served from the same origin
//! as the page unless overridden in local storage.

pub mod client;

pub use client::*;
