// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 401 handling: one refresh, one retry, logout when the refresh fails.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use pandi_core::error::PandiError;
use pandi_core::human_errors::humanize_error;
use pandi_core::types::UserType;
use pandi_session::SessionEvent;
use serde_json::{Value, json};

use common::{bearer, client, jwt_expiring_in, spawn, user};

const FRESH: &str = "fresh-token";

#[derive(Default)]
struct Counters {
    refreshes: AtomicUsize,
    protected: AtomicUsize,
}

/// `/service-requests/my-requests` only accepts `FRESH` and answers a missing
/// token with a bare 401; the refresh endpoint hands `FRESH` out when
/// `refresh_ok`, and fails otherwise.
fn backend(counters: Arc<Counters>, refresh_ok: bool) -> Router {
    Router::new()
        .route(
            "/api/service-requests/my-requests",
            get(|State(c): State<Arc<Counters>>, headers: HeaderMap| async move {
                c.protected.fetch_add(1, Ordering::SeqCst);
                match bearer(&headers).as_deref() {
                    Some(FRESH) => (StatusCode::OK, Json(json!([]))),
                    Some(_) => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "jwt expired" }))),
                    None => (StatusCode::UNAUTHORIZED, Json(json!({}))),
                }
            }),
        )
        .route(
            "/api/auth/refresh-token",
            post(move |State(c): State<Arc<Counters>>| async move {
                c.refreshes.fetch_add(1, Ordering::SeqCst);
                if refresh_ok {
                    let grant = json!({ "token": FRESH, "user": user("u1") });
                    (StatusCode::OK, Json(grant))
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "invalid token" })))
                }
            }),
        )
        .with_state(counters)
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried() {
    let counters = Arc::new(Counters::default());
    let api = spawn(backend(counters.clone(), true)).await;
    let client = client(&api, Some(&jwt_expiring_in(-60)));
    let mut events = client.session().subscribe();

    let requests = client.my_service_requests().await.expect("retried request");

    assert!(requests.is_empty());
    assert_eq!(counters.refreshes.load(Ordering::SeqCst), 1);
    assert_eq!(counters.protected.load(Ordering::SeqCst), 2);
    assert_eq!(client.session().token().as_deref(), Some(FRESH));
    assert_eq!(events.recv().await.expect("event"), SessionEvent::TokenRefreshed);
}

#[tokio::test]
async fn token_inside_refresh_window_is_refreshed() {
    let counters = Arc::new(Counters::default());
    let api = spawn(backend(counters.clone(), true)).await;
    let client = client(&api, Some(&jwt_expiring_in(120)));

    client.my_service_requests().await.expect("retried request");
    assert_eq!(counters.refreshes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_refresh_logs_out_and_broadcasts() {
    let counters = Arc::new(Counters::default());
    let api = spawn(backend(counters.clone(), false)).await;
    let client = client(&api, Some(&jwt_expiring_in(-60)));
    let mut events = client.session().subscribe();

    let err = client.my_service_requests().await.expect_err("should fail");

    assert!(matches!(err, PandiError::SessionExpired));
    assert_eq!(counters.refreshes.load(Ordering::SeqCst), 1);
    assert!(!client.session().is_authenticated());
    assert_eq!(events.recv().await.expect("event"), SessionEvent::LoggedOut);
}

#[tokio::test]
async fn valid_token_rejected_is_not_refreshed() {
    let counters = Arc::new(Counters::default());
    let api = spawn(backend(counters.clone(), true)).await;
    let client = client(&api, Some(&jwt_expiring_in(3_600)));

    let err = client.my_service_requests().await.expect_err("should fail");

    assert!(matches!(err, PandiError::Unauthorized));
    assert_eq!(counters.refreshes.load(Ordering::SeqCst), 0);
    assert_eq!(counters.protected.load(Ordering::SeqCst), 1);
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn retry_is_attempted_only_once() {
    let counters = Arc::new(Counters::default());
    let refreshes = counters.clone();
    let always_401 = Router::new()
        .route(
            "/api/offers/my",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(Value::Null)) }),
        )
        .route(
            "/api/auth/refresh-token",
            post(move || async move {
                refreshes.refreshes.fetch_add(1, Ordering::SeqCst);
                Json(json!({ "token": jwt_expiring_in(-1), "user": user("u1") }))
            }),
        );
    let api = spawn(always_401).await;
    let client = client(&api, Some(&jwt_expiring_in(-60)));

    let err = client.my_offers().await.expect_err("should fail");

    assert!(matches!(err, PandiError::Unauthorized));
    assert_eq!(counters.refreshes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn anonymous_401_is_unauthorized() {
    let counters = Arc::new(Counters::default());
    let api = spawn(backend(counters.clone(), true)).await;
    let client = client(&api, None);

    let err = client.my_service_requests().await.expect_err("should fail");
    assert!(matches!(err, PandiError::Unauthorized));
    assert_eq!(counters.protected.load(Ordering::SeqCst), 1);
    assert_eq!(counters.refreshes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wrong_password_keeps_the_server_message() {
    let login = Router::new().route(
        "/api/auth/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid email or password" })),
            )
        }),
    );
    let api = spawn(login).await;
    let client = client(&api, None);

    let err = client
        .login("asha@example.com", "wrong", UserType::Customer)
        .await
        .expect_err("should fail");

    match &err {
        PandiError::Api { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("expected an api error, got {other:?}"),
    }
    let human = humanize_error(&err);
    assert_eq!(human.description, "Invalid email or password");
    assert!(!human.sign_in);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn retried_401_keeps_the_server_message() {
    let still_refused = Router::new()
        .route(
            "/api/offers/my",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "message": "Account suspended" })),
                )
            }),
        )
        .route(
            "/api/auth/refresh-token",
            post(|| async { Json(json!({ "token": FRESH, "user": user("u1") })) }),
        );
    let api = spawn(still_refused).await;
    let client = client(&api, Some(&jwt_expiring_in(-60)));

    let err = client.my_offers().await.expect_err("should fail");

    assert!(matches!(
        err,
        PandiError::Api { status: 401, ref message } if message == "Account suspended"
    ));
    assert_eq!(client.session().token().as_deref(), Some(FRESH));
}
