// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Offer lifecycle — who may move an offer, and where to.
//
//   sent ──accept──▶ accepted     (request owner)
//   sent ──decline─▶ declined     (request owner)
//   sent ──withdraw▶ withdrawn    (offering provider)
//
// accepted, declined and withdrawn are terminal.  Every update touches one
// offer only; accepting an offer does not decline its siblings.

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::error::{PandiError, Result};
use crate::types::{Offer, OfferStatus, RecordId};

impl OfferStatus {
    /// No transition leaves a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Sent)
    }

    /// Whether `next` is reachable from `self` in one step.
    pub fn can_transition_to(&self, next: OfferStatus) -> bool {
        matches!(
            (self, next),
            (
                Self::Sent,
                OfferStatus::Accepted | OfferStatus::Declined | OfferStatus::Withdrawn
            )
        )
    }
}

/// The side of an offer a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    /// Owner of the service request the offer targets.
    Owner,
    /// Provider who made the offer.
    Provider,
}

/// A status change a user can request on an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferAction {
    Accept,
    Decline,
    Withdraw,
}

impl OfferAction {
    /// Status the offer ends up in.
    pub fn target_status(self) -> OfferStatus {
        match self {
            Self::Accept => OfferStatus::Accepted,
            Self::Decline => OfferStatus::Declined,
            Self::Withdraw => OfferStatus::Withdrawn,
        }
    }

    /// The only party allowed to perform this action.
    pub fn performed_by(self) -> Party {
        match self {
            Self::Accept | Self::Decline => Party::Owner,
            Self::Withdraw => Party::Provider,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Accept => "Accept",
            Self::Decline => "Decline",
            Self::Withdraw => "Withdraw",
        }
    }
}

/// Check that `actor` may perform `action` on `offer`.
///
/// `request_owner` is the requester of the service request the offer targets.
/// Returns the status the offer should move to.
pub fn authorize(
    action: OfferAction,
    offer: &Offer,
    actor: &RecordId,
    request_owner: &RecordId,
) -> Result<OfferStatus> {
    let next = action.target_status();
    if !offer.status.can_transition_to(next) {
        return Err(PandiError::InvalidTransition {
            from: offer.status,
            to: next,
        });
    }

    let permitted = match action.performed_by() {
        Party::Owner => actor == request_owner,
        Party::Provider => offer.is_from(actor),
    };
    if !permitted {
        return Err(PandiError::NotPermitted(match action.performed_by() {
            Party::Owner => "only the request owner can accept or decline offers".into(),
            Party::Provider => "only the provider who sent an offer can withdraw it".into(),
        }));
    }

    Ok(next)
}

/// Authorize and apply `action` to `offer` in place.
pub fn apply(
    action: OfferAction,
    offer: &mut Offer,
    actor: &RecordId,
    request_owner: &RecordId,
) -> Result<()> {
    let next = authorize(action, offer, actor, request_owner)?;
    debug!(offer_id = %offer.id, from = %offer.status, to = %next, "offer transition");
    offer.status = next;
    offer.updated_at = Some(Utc::now());
    Ok(())
}

/// The provider's current offer on a request: the newest one that has not
/// been withdrawn.
///
/// `offers` may be the provider's whole `/offers/my` list; offers on other
/// requests or by other providers are ignored.
pub fn active_offer_for<'a>(
    offers: &'a [Offer],
    provider: &RecordId,
    request: &RecordId,
) -> Option<&'a Offer> {
    offers
        .iter()
        .filter(|o| o.targets(request) && o.is_from(provider))
        .filter(|o| o.status != OfferStatus::Withdrawn)
        .max_by_key(|o| o.created_at)
}

/// Whether `provider` may open a new offer on a request owned by `owner`.
pub fn can_send_offer(
    offers: &[Offer],
    provider: &RecordId,
    request: &RecordId,
    owner: &RecordId,
) -> bool {
    provider != owner && active_offer_for(offers, provider, request).is_none()
}

/// Validated body of `POST /offers/{requestId}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_price: Option<f64>,
}

impl OfferDraft {
    /// Build a draft from raw form input.
    ///
    /// Blank fields are omitted. The price must be a non-negative number.
    pub fn parse(message: &str, price: &str) -> Result<Self> {
        let message = message.trim();
        let price = price.trim();

        let proposed_price = if price.is_empty() {
            None
        } else {
            let not_a_price = || PandiError::Validation(format!("'{price}' is not a price"));
            let value: f64 = price.parse().map_err(|_| not_a_price())?;
            if !value.is_finite() {
                return Err(not_a_price());
            }
            if value < 0.0 {
                return Err(PandiError::Validation(
                    "proposed price cannot be negative".into(),
                ));
            }
            Some(value)
        };

        Ok(Self {
            message: (!message.is_empty()).then(|| message.to_owned()),
            proposed_price,
        })
    }
}
