//! Shared server state.

use std::sync::Arc;

use uuid::Uuid;

use crate::api::JiraClient;
use crate::config::AppConfig;

/// State shared by every request handler.
///
/// Everything here is constructed once at startup and read-only afterwards;
/// cloning is an `Arc` bump. The session token is a random per-process value
/// handed out by login and checked by the [`super::session::Session`]
/// extractor, so no session store is needed.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    config: AppConfig,
    jira: JiraClient,
    session_token: String,
}

impl AppState {
    /// Create the shared state with a fresh session token.
    pub fn new(config: AppConfig, jira: JiraClient) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                jira,
                session_token: Uuid::new_v4().to_string(),
            }),
        }
    }

    /// The application configuration.
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// The shared JIRA client.
    pub fn jira(&self) -> &JiraClient {
        &self.inner.jira
    }

    /// The value a valid session cookie must carry.
    pub fn session_token(&self) -> &str {
        &self.inner.session_token
    }
}
