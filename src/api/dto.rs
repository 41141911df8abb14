//! Data Transfer Objects
//!
//! Request and response bodies of the activities API.
//! These types are serialized/deserialized to/from JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================
// AUTH DTOs
// ============================================

/// `GET /me` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl MeResponse {
    /// Username of a validated session, if any
    pub fn authenticated_user(self) -> Option<String> {
        if self.authenticated {
            self.username
        } else {
            None
        }
    }
}

/// `POST /login` form body
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// `POST /login` success response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub username: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

// ============================================
// ACTIVITY DTOs
// ============================================

/// One activity as returned by `GET /activities`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDetails {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl ActivityDetails {
    /// Remaining capacity; negative when the server over-fills an activity
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// Activities keyed by name, in the order the server sent them
pub type ActivityMap = IndexMap<String, ActivityDetails>;

/// `?email=` query of the signup/unregister endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

// ============================================
// GENERIC DTOs
// ============================================

/// Success body of signup/unregister
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body, `{ "detail": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spots_left() {
        let details = ActivityDetails {
            description: "Learn strategies".to_string(),
            schedule: "Fridays".to_string(),
            max_participants: 10,
            participants: vec!["a@x.com".to_string()],
        };
        assert_eq!(details.spots_left(), 9);
    }

    #[test]
    fn test_spots_left_overfilled() {
        let details = ActivityDetails {
            description: String::new(),
            schedule: String::new(),
            max_participants: 1,
            participants: vec!["a@x.com".to_string(), "b@x.com".to_string()],
        };
        assert_eq!(details.spots_left(), -1);
    }

    #[test]
    fn test_activity_map_keeps_server_order() {
        let json = r#"{
            "Programming Class": {"description": "p", "schedule": "Tue", "max_participants": 20, "participants": []},
            "Art Club": {"description": "a", "schedule": "Thu", "max_participants": 15, "participants": ["amelia@mergington.edu"]},
            "Chess Club": {"description": "c", "schedule": "Fri", "max_participants": 12, "participants": []}
        }"#;
        let map: ActivityMap = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Programming Class", "Art Club", "Chess Club"]);
    }

    #[test]
    fn test_me_response_unauthenticated() {
        let me: MeResponse = serde_json::from_str(r#"{"authenticated": false}"#).unwrap();
        assert_eq!(me.authenticated_user(), None);

        let me: MeResponse =
            serde_json::from_str(r#"{"authenticated": true, "username": "mrodriguez"}"#).unwrap();
        assert_eq!(me.authenticated_user().as_deref(), Some("mrodriguez"));
    }

    #[test]
    fn test_login_response_without_token_type() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"access_token": "abc", "username": "mchen"}"#).unwrap();
        assert_eq!(resp.token_type, "bearer");
    }
}
