// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured REST endpoint.
pub const API_URL_ENV: &str = "PANDI_API_URL";

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the REST backend (all endpoint paths are joined onto it).
    pub api_url: String,
    /// Base URL that relative image paths returned by the API are joined onto.
    pub asset_base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// A token expiring within this many seconds is refreshed on a 401.
    pub refresh_buffer_secs: i64,
    /// Seal the stored session token with the device key before writing it.
    pub encrypt_session: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "https://urban-pandi-backend.onrender.com/api".into(),
            asset_base_url: "https://urban-pandi-backend.onrender.com".into(),
            request_timeout_secs: 15,
            refresh_buffer_secs: 300,
            encrypt_session: true,
        }
    }
}

impl AppConfig {
    /// Apply environment overrides on top of the loaded settings.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            tracing::debug!(%url, "api url overridden from environment");
            self.api_url = url.trim().to_owned();
        }
        self
    }

    /// Join an endpoint path onto `api_url` without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = AppConfig {
            api_url: "http://localhost:5000/api/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint("/offers/my"),
            "http://localhost:5000/api/offers/my"
        );
        assert_eq!(config.endpoint("reviews"), "http://localhost:5000/api/reviews");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "api_url": "http://example.test/api" }"#).expect("parse");
        assert_eq!(config.api_url, "http://example.test/api");
        assert_eq!(config.refresh_buffer_secs, 300);
        assert!(config.encrypt_session);
    }
}
