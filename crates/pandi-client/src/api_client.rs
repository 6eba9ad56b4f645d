// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// REST transport for the marketplace backend.
//
// Every request carries the session's bearer token when there is one.  A 401
// gets exactly one chance at recovery: if the token is expired or inside the
// refresh window it is exchanged at `/auth/refresh-token` and the original
// request is sent again.  If the exchange fails the session is logged out
// (which broadcasts to every listener) and the caller sees `SessionExpired`.
//
// The endpoint groups live in sibling modules as further `impl ApiClient`
// blocks.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pandi_core::config::AppConfig;
use pandi_core::error::{PandiError, Result};
use pandi_core::types::{AuthGrant, User};
use pandi_session::{AuthSession, TokenClaims, fingerprint};
use reqwest::multipart::Form;
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

/// Body of a request, kept in a form that can be re-sent after a refresh.
#[derive(Debug, Clone)]
pub(crate) enum Payload {
    Empty,
    Json(serde_json::Value),
    /// Multipart text fields.
    Form(Vec<(String, String)>),
}

/// A request that has not been sent yet.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    payload: Payload,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            payload: Payload::Empty,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub(crate) fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append the non-empty fields of `params` to the query string.
    pub(crate) fn query<T: Serialize>(mut self, params: &T) -> Result<Self> {
        self.query.extend(text_fields(params)?);
        Ok(self)
    }

    pub(crate) fn query_pair(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_owned(), value.to_owned()));
        self
    }

    pub(crate) fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.payload = Payload::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Send the non-empty fields of `body` as multipart text parts.
    pub(crate) fn form<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.payload = Payload::Form(text_fields(body)?);
        Ok(self)
    }
}

/// Flatten a serializable struct into `(name, text)` pairs, skipping nulls.
pub(crate) fn text_fields<T: Serialize>(value: &T) -> Result<Vec<(String, String)>> {
    let serde_json::Value::Object(map) = serde_json::to_value(value)? else {
        return Err(PandiError::Validation("expected a set of named fields".into()));
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some((key, text)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Turn a non-success response into a `PandiError`, keeping the server's
/// `message` when it sent one. A 401 without a message stays `Unauthorized`.
async fn error_from(response: Response) -> PandiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED && message.trim().is_empty() {
        return PandiError::Unauthorized;
    }

    warn!(status = status.as_u16(), %message, "request failed");
    PandiError::Api {
        status: status.as_u16(),
        message,
    }
}

fn network_err(e: reqwest::Error) -> PandiError {
    PandiError::Network(e.to_string())
}

/// Async client for the marketplace REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<AppConfig>,
    session: AuthSession,
}

impl ApiClient {
    pub fn new(config: AppConfig, session: AuthSession) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(network_err)?;

        Ok(Self {
            http,
            config: Arc::new(config),
            session,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// The signed-in user, or `Unauthorized`.
    pub(crate) fn current_user(&self) -> Result<User> {
        self.session.user().ok_or(PandiError::Unauthorized)
    }

    /// Send `request` and decode a JSON response body.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.execute(&request).await?;
        let bytes = response.bytes().await.map_err(network_err)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send `request` and discard whatever the server answers with.
    pub(crate) async fn send(&self, request: ApiRequest) -> Result<()> {
        self.execute(&request).await?;
        Ok(())
    }

    /// Send `request`, refreshing the token once on a 401. Returns only
    /// successful responses.
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: &ApiRequest) -> Result<Response> {
        let token = self.session.token();
        let response = self.dispatch(request, token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return check(response).await;
        }
        let Some(token) = token else {
            // Signed out: nothing to refresh, so the server's reason stands
            // (e.g. a wrong password on login).
            return Err(error_from(response).await);
        };

        match self.refresh_if_expiring(&token).await {
            Ok(Some(fresh)) => {
                debug!("retrying with refreshed token");
                let retried = self.dispatch(request, Some(&fresh)).await?;
                check(retried).await
            }
            Ok(None) => {
                debug!("401 with a token outside the refresh window");
                Err(PandiError::Unauthorized)
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed, signing out");
                self.session.logout();
                Err(PandiError::SessionExpired)
            }
        }
    }

    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> Result<Response> {
        let url = self.config.endpoint(&request.path);
        let mut builder = self.http.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder = match &request.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(body),
            Payload::Form(fields) => builder.multipart(
                fields
                    .iter()
                    .fold(Form::new(), |form, (name, text)| {
                        form.text(name.clone(), text.clone())
                    }),
            ),
        };

        builder.send().await.map_err(network_err)
    }

    /// Exchange `token` for a new one if it is expired or about to be.
    ///
    /// `Ok(None)` means the token is still comfortably valid, so the 401 was
    /// not about expiry. A token that cannot be decoded counts as a failed
    /// refresh.
    async fn refresh_if_expiring(&self, token: &str) -> Result<Option<String>> {
        let claims = TokenClaims::decode(token)?;
        let buffer = chrono::Duration::seconds(self.config.refresh_buffer_secs);
        if !claims.needs_refresh_at(Utc::now(), buffer) {
            return Ok(None);
        }

        info!(token = %fingerprint(token), "refreshing session token");
        let request = ApiRequest::post("auth/refresh-token").json(&serde_json::json!({}))?;
        let response = check(self.dispatch(&request, Some(token)).await?).await?;
        let bytes = response.bytes().await.map_err(network_err)?;
        let grant: AuthGrant = serde_json::from_slice(&bytes)?;

        self.session
            .replace_token(grant.token.clone(), grant.user)?;
        Ok(Some(grant.token))
    }
}

async fn check(response: Response) -> Result<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(error_from(response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pandi_core::types::{BusinessFilter, ServiceRequestFilter, RequestStatus};

    #[test]
    fn text_fields_skip_unset_filters() {
        let filter = BusinessFilter {
            category: Some("Plumbing".into()),
            location: None,
        };
        assert_eq!(
            text_fields(&filter).expect("fields"),
            vec![("category".to_owned(), "Plumbing".to_owned())]
        );
    }

    #[test]
    fn text_fields_render_enums_as_wire_strings() {
        let filter = ServiceRequestFilter {
            status: Some(RequestStatus::InProgress),
            ..Default::default()
        };
        assert_eq!(
            text_fields(&filter).expect("fields"),
            vec![("status".to_owned(), "in-progress".to_owned())]
        );
    }

    #[test]
    fn numbers_become_plain_text() {
        let fields = text_fields(&serde_json::json!({ "budget": 1500.5, "note": null }))
            .expect("fields");
        assert_eq!(fields, vec![("budget".to_owned(), "1500.5".to_owned())]);
    }

    #[test]
    fn non_object_cannot_be_flattened() {
        assert!(matches!(
            text_fields(&"just text"),
            Err(PandiError::Validation(_))
        ));
    }
}
