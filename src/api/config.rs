//! Application configuration loaded from the environment.

use std::env;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_SESSION_COOKIE: &str = "auth_session";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Runtime configuration for the server.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    /// PostgreSQL connection string; in-memory storage when unset
    pub database_url: Option<String>,
    /// Base URL for internal API fetches; in-process dispatch when unset
    pub api_base_url: Option<String>,
    pub session_cookie_name: String,
    pub login_path: String,
    /// Allowed CORS origins; permissive when empty
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            api_base_url: None,
            session_cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid PORT value {:?}", raw);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            port,
            database_url: non_empty("DATABASE_URL"),
            api_base_url: non_empty("API_BASE_URL").map(|u| u.trim_end_matches('/').to_string()),
            session_cookie_name: non_empty("SESSION_COOKIE_NAME")
                .unwrap_or(defaults.session_cookie_name),
            login_path: non_empty("LOGIN_PATH").unwrap_or(defaults.login_path),
            cors_origins: non_empty("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
