//! Activities API
//!
//! The backend seam of the client. The server is an external collaborator;
//! this module only describes the calls the client makes.
//!
//! # Endpoints
//!
//! - `GET /me` - Who does the bearer token belong to
//! - `POST /login` - Exchange form-encoded credentials for a token
//! - `GET /activities` - All activities keyed by name
//! - `POST /activities/{name}/signup?email=` - Add a participant
//! - `DELETE /activities/{name}/unregister?email=` - Remove a participant

pub mod client;
pub mod dto;
pub mod error;

pub use client::HttpBackend;
pub use dto::{ActivityDetails, ActivityMap, LoginResponse, MeResponse, MessageResponse};
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

/// Calls the client makes against the activities backend.
///
/// `token` is sent as `Authorization: Bearer <token>` when present.
#[async_trait]
pub trait ActivityBackend: Send + Sync {
    /// `GET /me`
    async fn current_user(&self, token: Option<&str>) -> ApiResult<MeResponse>;

    /// `POST /login`
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse>;

    /// `GET /activities`
    async fn activities(&self) -> ApiResult<ActivityMap>;

    /// `POST /activities/{activity}/signup?email=`
    async fn signup(
        &self,
        activity: &str,
        email: &str,
        token: Option<&str>,
    ) -> ApiResult<MessageResponse>;

    /// `DELETE /activities/{activity}/unregister?email=`
    async fn unregister(
        &self,
        activity: &str,
        email: &str,
        token: Option<&str>,
    ) -> ApiResult<MessageResponse>;
}
