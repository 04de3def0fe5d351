//! Authentication handling for the JIRA API.
//!
//! Self-hosted JIRA instances accept Basic Auth with a username and
//! password; the credentials come from process configuration and the raw
//! password is not kept around once the header is built.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Authentication credentials for JIRA.
#[derive(Clone)]
pub struct Auth {
    /// The JIRA account username.
    username: String,
    /// The complete `Basic ...` authorization header value.
    auth_header: String,
}

impl Auth {
    /// Create new authentication credentials from username and password.
    ///
    /// The password is immediately encoded into the header and not stored.
    pub fn new(username: &str, password: &str) -> Self {
        let auth_header = build_auth_header(username, password);
        Self {
            username: username.to_string(),
            auth_header,
        }
    }

    /// The authorization header value for HTTP requests.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// The account username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

// The header embeds the credentials, so Debug must not print it.
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("username", &self.username)
            .field("auth_header", &"Basic <redacted>")
            .finish()
    }
}

/// Build the Basic Auth header value.
///
/// Encodes `username:password` in Base64 and prepends `Basic `.
fn build_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}
