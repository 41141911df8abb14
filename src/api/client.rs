//! Activities REST API Client
//!
//! HTTP client for the activities backend, built on reqwest.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::dto::{ActivityMap, EmailQuery, LoginForm, LoginResponse, MeResponse, MessageResponse};
use super::error::{ApiError, ApiResult};
use super::ActivityBackend;
use crate::config::ClientConfig;

/// reqwest-backed [`ActivityBackend`]
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for the backend described by `config`
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/activities/{name}/{action}` with the name percent-encoded
    fn activity_url(&self, activity: &str, action: &str) -> String {
        self.url(&format!(
            "/activities/{}/{}",
            urlencoding::encode(activity),
            action
        ))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
    ) -> ApiResult<T> {
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;

        parse_response(response).await
    }
}

/// Decode a 2xx body as `T`, or turn a non-2xx into [`ApiError::Status`]
async fn parse_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let detail = extract_detail(&text);

    tracing::debug!(status = status.as_u16(), detail = ?detail, "Backend returned an error");

    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

/// Pull a textual `detail` out of an error body.
///
/// Validation errors carry a list instead of a string; those yield `None`
/// so the caller falls back to its generic message.
fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl ActivityBackend for HttpBackend {
    async fn current_user(&self, token: Option<&str>) -> ApiResult<MeResponse> {
        let request = self.client.get(self.url("/me"));
        self.send(request, token).await
    }

    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = self.client.post(self.url("/login")).form(&form);
        self.send(request, None).await
    }

    async fn activities(&self) -> ApiResult<ActivityMap> {
        let request = self.client.get(self.url("/activities"));
        self.send(request, None).await
    }

    async fn signup(
        &self,
        activity: &str,
        email: &str,
        token: Option<&str>,
    ) -> ApiResult<MessageResponse> {
        let request = self
            .client
            .post(self.activity_url(activity, "signup"))
            .query(&EmailQuery {
                email: email.to_string(),
            });
        self.send(request, token).await
    }

    async fn unregister(
        &self,
        activity: &str,
        email: &str,
        token: Option<&str>,
    ) -> ApiResult<MessageResponse> {
        let request = self
            .client
            .delete(self.activity_url(activity, "unregister"))
            .query(&EmailQuery {
                email: email.to_string(),
            });
        self.send(request, token).await
    }
}
