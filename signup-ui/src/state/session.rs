//! Session
//!
//! Who is logged in, and the token kept in `localStorage` across reloads.

/// Local storage key of the bearer token
pub const TOKEN_KEY: &str = "authToken";

/// Client-held authentication state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
}

impl Session {
    /// Session seeded from local storage; not yet validated
    pub fn from_storage() -> Self {
        Self {
            token: load_token(),
            username: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some() && self.username.is_some()
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_token() -> Option<String> {
    storage()?
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

pub fn save_token(token: &str) {
    if let Some(storage) = storage() {
        if storage.set_item(TOKEN_KEY, token).is_err() {
            web_sys::console::warn_1(&"Could not persist auth token".into());
        }
    }
}

pub fn clear_token() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_in_needs_token_and_username() {
        let mut session = Session {
            token: Some("abc".to_string()),
            username: None,
        };
        assert!(!session.is_logged_in());

        session.username = Some("mrodriguez".to_string());
        assert!(session.is_logged_in());

        assert!(!Session::default().is_logged_in());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_token_survives_in_local_storage() {
        clear_token();
        assert_eq!(load_token(), None);

        save_token("abc");
        assert_eq!(load_token().as_deref(), Some("abc"));
        assert_eq!(Session::from_storage().token.as_deref(), Some("abc"));

        clear_token();
        assert_eq!(load_token(), None);
    }

    #[wasm_bindgen_test]
    fn test_empty_token_reads_as_none() {
        save_token("");
        assert_eq!(load_token(), None);
        clear_token();
    }
}
