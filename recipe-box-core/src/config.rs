//! Client configuration from environment variables.

use std::env;

/// Default backend origin (the development proxy target).
pub const DEFAULT_SERVER: &str = "http://localhost:3000";

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("recipe-box/", env!("CARGO_PKG_VERSION"));

/// API client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL. Paths like `/recipes` are resolved against it.
    pub server: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `RECIPE_BOX_SERVER`: backend base URL (default: "http://localhost:3000")
    /// - `RECIPE_BOX_USER_AGENT`: user agent string
    pub fn from_env() -> Self {
        let server = env::var("RECIPE_BOX_SERVER")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());

        let user_agent =
            env::var("RECIPE_BOX_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Self { server, user_agent }
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }
}
