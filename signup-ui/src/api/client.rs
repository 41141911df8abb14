//! HTTP API Client
//!
//! Functions for communicating with the activities REST API.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::state::global::ActivityMap;

/// Local storage key for an API base override
const API_BASE_KEY: &str = "signup_api_url";

/// Get the API base URL from local storage; empty means same origin
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_default();
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub username: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorDetail {
    detail: serde_json::Value,
}

/// Why a call failed
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFailure {
    /// fetch itself failed, or the body was not what we expected
    Network(String),
    /// Non-2xx, with the server's `detail` when it was a string
    Status { status: u16, detail: Option<String> },
}

impl ApiFailure {
    /// The server's detail, or the matching fallback
    pub fn message(&self, status_fallback: &str, network_fallback: &str) -> String {
        match self {
            ApiFailure::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiFailure::Status { detail: None, .. } => status_fallback.to_string(),
            ApiFailure::Network(_) => network_fallback.to_string(),
        }
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiFailure::Network(e) => write!(f, "Network error: {}", e),
            ApiFailure::Status { status, detail } => write!(
                f,
                "HTTP {}: {}",
                status,
                detail.as_deref().unwrap_or("no detail")
            ),
        }
    }
}

// ============ Helpers ============

fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
        None => request,
    }
}

fn encode(value: &str) -> String {
    js_sys::encode_uri_component(value).into()
}

fn activity_url(activity: &str, action: &str, email: &str) -> String {
    format!(
        "{}/activities/{}/{}?email={}",
        get_api_base(),
        encode(activity),
        action,
        encode(email)
    )
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiFailure> {
    if !response.ok() {
        let status = response.status();
        let detail = response
            .json::<ErrorDetail>()
            .await
            .ok()
            .and_then(|e| e.detail.as_str().map(str::to_string));
        return Err(ApiFailure::Status {
            status,
            detail,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ApiFailure::Network(format!("Parse error: {}", e)))
}

// ============ API Functions ============

/// Who the token belongs to
pub async fn fetch_me(token: Option<&str>) -> Result<MeResponse, ApiFailure> {
    let request = with_token(Request::get(&format!("{}/me", get_api_base())), token);

    let response = request
        .send()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;

    parse(response).await
}

/// Exchange credentials for a token (form-encoded body)
pub async fn login(username: &str, password: &str) -> Result<LoginResponse, ApiFailure> {
    let body = format!("username={}&password={}", encode(username), encode(password));

    let response = Request::post(&format!("{}/login", get_api_base()))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .map_err(|e| ApiFailure::Network(format!("Request build error: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;

    parse(response).await
}

/// Fetch all activities
pub async fn fetch_activities() -> Result<ActivityMap, ApiFailure> {
    let response = Request::get(&format!("{}/activities", get_api_base()))
        .send()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;

    parse(response).await
}

/// Sign a student up
pub async fn signup(
    activity: &str,
    email: &str,
    token: Option<&str>,
) -> Result<MessageResponse, ApiFailure> {
    let request = with_token(Request::post(&activity_url(activity, "signup", email)), token);

    let response = request
        .send()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;

    parse(response).await
}

/// Remove a student
pub async fn unregister(
    activity: &str,
    email: &str,
    token: Option<&str>,
) -> Result<MessageResponse, ApiFailure> {
    let request = with_token(
        Request::delete(&activity_url(activity, "unregister", email)),
        token,
    );

    let response = request
        .send()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;

    parse(response).await
}
