//! State Management
//!
//! Global application state and the persisted session token.

pub mod global;
pub mod session;
