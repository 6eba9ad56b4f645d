// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process fake backend for client tests.

#![allow(dead_code)]

use axum::Router;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use pandi_client::ApiClient;
use pandi_core::config::AppConfig;
use pandi_core::types::{User, UserType};
use pandi_session::{AuthSession, LocalStore, SharedStore};

/// Serve `app` on an ephemeral port and return the `/api` base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}/api")
}

/// Unsigned JWT whose `exp` is `expires_in` seconds from now.
pub fn jwt_expiring_in(expires_in: i64) -> String {
    let exp = chrono::Utc::now().timestamp() + expires_in;
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::json!({ "id": "u1", "exp": exp }).to_string());
    format!("{header}.{payload}.sig")
}

pub fn user(id: &str) -> User {
    User {
        id: id.into(),
        first_name: "Asha".into(),
        last_name: "K".into(),
        email: format!("{id}@example.com"),
        user_type: UserType::Customer,
    }
}

/// A client against `api_url` with `token` (if any) already signed in as
/// `u1`.
pub fn client(api_url: &str, token: Option<&str>) -> ApiClient {
    let store = SharedStore::new(LocalStore::open_in_memory().expect("store"));
    let session = AuthSession::new(store, None);
    if let Some(token) = token {
        session.login(token.to_owned(), user("u1")).expect("login");
    }
    let config = AppConfig {
        api_url: api_url.to_owned(),
        request_timeout_secs: 5,
        ..Default::default()
    };
    ApiClient::new(config, session).expect("client")
}

/// The bearer token on a request, if any.
pub fn bearer(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}
