// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Pandi marketplace.
//
// Field names follow the backend's JSON (camelCase, `_id` identifiers) so the
// same structs are used for display and on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier for any stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Kind of account. Customers act as seeker or provider through the role
/// toggle; business accounts manage directory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Customer,
    Business,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Business => "business",
        }
    }
}

/// The signed-in account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_type: UserType,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A person embedded in another record (requester, provider, comment author).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRef {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl PartyRef {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Display name, or `fallback` when the referenced account is gone.
    pub fn name_or(&self, fallback: &str) -> String {
        let name = self.display_name();
        if name.is_empty() { fallback.to_owned() } else { name }
    }

    /// Whether this reference points at `user_id`.
    pub fn is(&self, user_id: &RecordId) -> bool {
        self.id.as_ref() == Some(user_id)
    }
}

/// Reads a missing or `null` embedded reference as the default value. The
/// backend sends `null` when the referenced account has been deleted.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Business directory
// ---------------------------------------------------------------------------

/// A directory entry for a local business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<RecordId>,
}

/// Editable business fields, sent as a multipart form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInput {
    pub name: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub address: String,
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
}

/// Server-side filters for the business list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BusinessFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A star review of a business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: PartyRef,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for creating or updating a review.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<RecordId>,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A contact-form message, either to the site or to one business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Service requests
// ---------------------------------------------------------------------------

/// Lifecycle of a service request, driven by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    Open,
    InProgress,
    Completed,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [Self::Open, Self::InProgress, Self::Completed];

    /// Wire value (`open`, `in-progress`, `completed`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Badge text, e.g. `IN PROGRESS`.
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ").to_uppercase()
    }
}

/// A comment left on a service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: PartyRef,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A seeker's request for a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub image: Option<String>,
    pub status: RequestStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requester: PartyRef,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ServiceRequest {
    /// Whether `user_id` created this request.
    pub fn is_owned_by(&self, user_id: &RecordId) -> bool {
        self.requester.is(user_id)
    }
}

/// Editable service-request fields, sent as a multipart form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub budget: Option<f64>,
    pub contact_phone: String,
    pub contact_email: String,
}

/// Server-side filters for the service-request list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceRequestFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestStatus>,
}

// ---------------------------------------------------------------------------
// Provider offerings
// ---------------------------------------------------------------------------

/// Whether a provider offering is currently advertised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferingStatus {
    Active,
    Paused,
}

impl OfferingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
        }
    }
}

/// A provider's advertised service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOffering {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub service_area: String,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub status: OfferingStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: PartyRef,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Editable offering fields, sent as a multipart form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOfferingInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub service_area: String,
    pub base_price: Option<f64>,
    pub contact_phone: String,
    pub contact_email: String,
    pub whatsapp_number: Option<String>,
}

/// Server-side filters for the offering list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OfferingStatus>,
}

// ---------------------------------------------------------------------------
// Offers
// ---------------------------------------------------------------------------

/// Lifecycle states of an offer. `Sent` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Sent,
    Accepted,
    Declined,
    Withdrawn,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an offer refers to its service request: a bare id, or the populated
/// summary returned by `/offers/my` and the notification feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestRef {
    Id(RecordId),
    Summary {
        #[serde(rename = "_id", default)]
        id: Option<RecordId>,
        #[serde(default)]
        title: String,
    },
}

impl RequestRef {
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Self::Id(id) => Some(id),
            Self::Summary { id, .. } => id.as_ref(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Summary { title, .. } => Some(title),
        }
    }
}

/// A provider's bid against a service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: PartyRef,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub proposed_price: Option<f64>,
    pub status: OfferStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Offer {
    /// Whether this offer targets `request_id`.
    pub fn targets(&self, request_id: &RecordId) -> bool {
        self.request.as_ref().and_then(RequestRef::id) == Some(request_id)
    }

    /// Whether `user_id` made this offer.
    pub fn is_from(&self, user_id: &RecordId) -> bool {
        self.provider.is(user_id)
    }
}

/// Body of `PUT /offers/{id}/status` and the other status endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate<S: Serialize> {
    pub status: S,
}

/// An offer event shown in the notification centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferNotification {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub status: OfferStatus,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub request: RequestRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: PartyRef,
}

impl OfferNotification {
    /// One-line description of the event.
    pub fn headline(&self) -> String {
        let title = self.request.title().unwrap_or("your request");
        match self.status {
            OfferStatus::Sent => format!(
                "You have a new offer for \"{title}\" from {}.",
                self.provider.name_or("a provider")
            ),
            other => format!("Your offer for \"{title}\" was {other}."),
        }
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

/// Token + account returned by login, signup and refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthGrant {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_status_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&RequestStatus::InProgress).expect("serialize");
        assert_eq!(json, "\"in-progress\"");
        assert_eq!(RequestStatus::parse("completed"), Some(RequestStatus::Completed));
        assert_eq!(RequestStatus::InProgress.label(), "IN PROGRESS");
    }

    #[test]
    fn unknown_offer_status_is_rejected() {
        let result: Result<OfferStatus, _> = serde_json::from_str("\"countered\"");
        assert!(result.is_err());
    }

    #[test]
    fn offer_accepts_bare_and_populated_request_refs() {
        let bare: Offer = serde_json::from_str(
            r#"{ "_id": "o1", "request": "r1", "status": "sent" }"#,
        )
        .expect("bare ref");
        assert!(bare.targets(&RecordId::from("r1")));

        let populated: Offer = serde_json::from_str(
            r#"{ "_id": "o2", "request": { "_id": "r2", "title": "Fix tap" },
                 "provider": { "_id": "u9", "firstName": "Kavi", "lastName": "R" },
                 "proposedPrice": 450, "status": "accepted" }"#,
        )
        .expect("populated ref");
        assert!(populated.targets(&RecordId::from("r2")));
        assert!(populated.is_from(&RecordId::from("u9")));
        assert_eq!(populated.proposed_price, Some(450.0));
    }

    #[test]
    fn deleted_accounts_decode_as_unknown_parties() {
        let request: ServiceRequest = serde_json::from_str(
            r#"{ "_id": "r1", "title": "Fix tap", "category": "Plumbing",
                 "status": "open", "requester": null,
                 "comments": [{ "_id": "c1", "user": null, "text": "hi" }] }"#,
        )
        .expect("request with null author");
        assert_eq!(request.comments.len(), 1);
        assert_eq!(request.comments[0].user, PartyRef::default());
        assert_eq!(request.comments[0].user.name_or("Unknown User"), "Unknown User");

        let offer: Offer = serde_json::from_str(
            r#"{ "_id": "o1", "provider": null, "status": "sent" }"#,
        )
        .expect("offer with null provider");
        assert!(offer.provider.id.is_none());
        assert_eq!(offer.provider.name_or("Provider"), "Provider");

        let review: Review =
            serde_json::from_str(r#"{ "_id": "v1", "user": null, "rating": 4 }"#)
                .expect("review with null author");
        assert_eq!(review.rating, 4);

        let event: OfferNotification = serde_json::from_str(
            r#"{ "_id": "n1", "status": "sent", "request": "r1", "provider": null }"#,
        )
        .expect("notification with null provider");
        assert!(event.headline().ends_with("from a provider."));
    }

    #[test]
    fn user_accepts_either_id_spelling() {
        let user: User = serde_json::from_str(
            r#"{ "_id": "u1", "firstName": "Meena", "lastName": "S",
                 "email": "m@example.com", "userType": "customer" }"#,
        )
        .expect("parse user");
        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.user_type, UserType::Customer);
    }

    #[test]
    fn notification_headline_depends_on_status() {
        let mut n = OfferNotification {
            id: "n1".into(),
            status: OfferStatus::Sent,
            updated_at: None,
            request: RequestRef::Summary {
                id: None,
                title: "Paint house".into(),
            },
            provider: PartyRef {
                first_name: "Arun".into(),
                last_name: "K".into(),
                ..Default::default()
            },
        };
        assert_eq!(
            n.headline(),
            "You have a new offer for \"Paint house\" from Arun K."
        );
        n.status = OfferStatus::Declined;
        assert_eq!(n.headline(), "Your offer for \"Paint house\" was declined.");
    }
}
