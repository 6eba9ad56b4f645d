// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Offers end to end against the fake backend.

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use pandi_core::error::PandiError;
use pandi_core::human_errors::humanize_error;
use pandi_core::offer::{OfferAction, OfferDraft, can_send_offer};
use pandi_core::types::{BusinessFilter, Offer, OfferStatus, PartyRef, RecordId};
use serde_json::{Value, json};

use common::{client, jwt_expiring_in, spawn};

const DUPLICATE: &str = "You have already made an offer on this request";

/// Status updates the backend received, as `(offer id, status)`.
type Updates = Arc<Mutex<Vec<(String, String)>>>;

fn offer(id: &str, provider: &str, status: OfferStatus) -> Offer {
    Offer {
        id: id.into(),
        request: None,
        provider: PartyRef {
            id: Some(provider.into()),
            ..Default::default()
        },
        message: None,
        proposed_price: Some(500.0),
        status,
        created_at: None,
        updated_at: None,
    }
}

fn backend(updates: Updates) -> Router {
    Router::new()
        .route(
            "/api/offers/{request}",
            post(|Path(request): Path<String>, Json(body): Json<Value>| async move {
                if request == "taken" {
                    return (StatusCode::BAD_REQUEST, Json(json!({ "message": DUPLICATE })));
                }
                let offer = json!({
                    "_id": "o-new",
                    "request": request,
                    "provider": { "_id": "u1", "firstName": "Asha" },
                    "message": body.get("message"),
                    "proposedPrice": body.get("proposedPrice"),
                    "status": "sent",
                    "createdAt": "2026-03-01T10:00:00Z"
                });
                (StatusCode::CREATED, Json(offer))
            }),
        )
        .route(
            "/api/offers/{offer}/status",
            put(
                |State(updates): State<Updates>,
                 Path(offer): Path<String>,
                 Json(body): Json<Value>| async move {
                    let status = body["status"].as_str().unwrap_or_default().to_owned();
                    updates.lock().expect("lock").push((offer, status));
                    Json(json!({ "ok": true }))
                },
            ),
        )
        .route(
            "/api/offers/request/{request}",
            get(|State(updates): State<Updates>| async move {
                let updates = updates.lock().expect("lock");
                let status_of = |id: &str| {
                    updates
                        .iter()
                        .rev()
                        .find(|(offer, _)| offer == id)
                        .map_or("sent".to_owned(), |(_, status)| status.clone())
                };
                Json(json!([
                    { "_id": "o1", "request": "r1", "provider": { "_id": "p1" }, "status": status_of("o1") },
                    { "_id": "o2", "request": "r1", "provider": { "_id": "p2" }, "status": status_of("o2") }
                ]))
            }),
        )
        .route(
            "/api/offers/my",
            get(|| async {
                Json(json!([
                    { "_id": "o1", "request": { "_id": "r1", "title": "Fix sink" }, "status": "withdrawn",
                      "createdAt": "2026-03-01T10:00:00Z" },
                    { "_id": "o2", "request": { "_id": "r1", "title": "Fix sink" }, "status": "sent",
                      "createdAt": "2026-03-02T10:00:00Z" }
                ]))
            }),
        )
        .route(
            "/api/businesses",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let category = params.get("category").cloned().unwrap_or_default();
                let location = params.get("location").cloned();
                Json(json!([{
                    "_id": "b1",
                    "name": format!("{category} Co"),
                    "category": category,
                    "location": location.unwrap_or_else(|| "unset".into()),
                    "rating": 4.5
                }]))
            }),
        )
        .with_state(updates)
}

#[tokio::test]
async fn create_offer_returns_the_sent_offer() {
    let api = spawn(backend(Updates::default())).await;
    let client = client(&api, Some(&jwt_expiring_in(3_600)));

    let draft = OfferDraft::parse("Can come tomorrow", "750").expect("draft");
    let offer = client.create_offer(&"r1".into(), &draft).await.expect("offer");

    assert_eq!(offer.status, OfferStatus::Sent);
    assert_eq!(offer.proposed_price, Some(750.0));
    assert!(offer.targets(&"r1".into()));
}

#[tokio::test]
async fn server_message_surfaces_verbatim() {
    let api = spawn(backend(Updates::default())).await;
    let client = client(&api, Some(&jwt_expiring_in(3_600)));

    let err = client
        .create_offer(&"taken".into(), &OfferDraft::default())
        .await
        .expect_err("duplicate offer");

    assert!(matches!(&err, PandiError::Api { status: 400, message } if message == DUPLICATE));
    let notice = humanize_error(&err).titled("Offer Failed");
    assert_eq!(notice.description, DUPLICATE);
}

#[tokio::test]
async fn owner_accepts_one_offer_and_the_other_stays_sent() {
    let updates = Updates::default();
    let api = spawn(backend(updates.clone())).await;
    let client = client(&api, Some(&jwt_expiring_in(3_600)));
    let owner: RecordId = "u1".into();

    let first = offer("o1", "p1", OfferStatus::Sent);

    client
        .update_offer_status(&first, OfferAction::Accept, &owner)
        .await
        .expect("accept");

    let sent = updates.lock().expect("lock").clone();
    assert_eq!(sent, vec![("o1".to_owned(), "accepted".to_owned())]);

    let received = client
        .offers_for_request(&"r1".into())
        .await
        .expect("received offers");
    let status_of = |id: &str| {
        received
            .iter()
            .find(|o| o.id.as_str() == id)
            .map(|o| o.status)
    };
    assert_eq!(status_of("o1"), Some(OfferStatus::Accepted));
    assert_eq!(status_of("o2"), Some(OfferStatus::Sent));
}

#[tokio::test]
async fn forbidden_transitions_never_reach_the_server() {
    let updates = Updates::default();
    let api = spawn(backend(updates.clone())).await;
    let client = client(&api, Some(&jwt_expiring_in(3_600)));
    let owner: RecordId = "u1".into();

    let decided = offer("o1", "p1", OfferStatus::Accepted);
    let err = client
        .update_offer_status(&decided, OfferAction::Decline, &owner)
        .await
        .expect_err("terminal");
    assert!(matches!(err, PandiError::InvalidTransition { .. }));

    // u1 is not the provider of this offer.
    let theirs = offer("o2", "p2", OfferStatus::Sent);
    let err = client
        .update_offer_status(&theirs, OfferAction::Withdraw, &owner)
        .await
        .expect_err("not the provider");
    assert!(matches!(err, PandiError::NotPermitted(_)));

    assert!(updates.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn my_offers_are_attributed_to_the_current_user() {
    let api = spawn(backend(Updates::default())).await;
    let client = client(&api, Some(&jwt_expiring_in(3_600)));
    let me: RecordId = "u1".into();

    let offers = client.my_offers().await.expect("offers");
    assert!(offers.iter().all(|o| o.is_from(&me)));

    // o2 is still sent, so no new offer on r1 may be made.
    assert!(!can_send_offer(&offers, &me, &"r1".into(), &"owner".into()));
    assert!(can_send_offer(&offers, &me, &"r2".into(), &"owner".into()));
}

#[tokio::test]
async fn unset_filters_are_not_sent() {
    let api = spawn(backend(Updates::default())).await;
    let client = client(&api, None);

    let filter = BusinessFilter {
        category: Some("Plumbing".into()),
        location: None,
    };
    let businesses = client.businesses(&filter).await.expect("businesses");

    assert_eq!(businesses.len(), 1);
    assert_eq!(businesses[0].category, "Plumbing");
    assert_eq!(businesses[0].location, "unset");
}
