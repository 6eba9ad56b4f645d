// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Offer endpoints.
//
// Status changes are checked against the offer lifecycle before they are
// sent, so a decided offer is never asked to move again and a provider's
// button can never accept their own bid.

use pandi_core::error::Result;
use pandi_core::offer::{OfferAction, OfferDraft, authorize};
use pandi_core::types::{Offer, OfferNotification, RecordId, StatusUpdate};
use tracing::{info, instrument};

use crate::api_client::{ApiClient, ApiRequest};

impl ApiClient {
    /// Send a new offer on `request`.
    #[instrument(skip(self, draft))]
    pub async fn create_offer(&self, request: &RecordId, draft: &OfferDraft) -> Result<Offer> {
        let offer: Offer = self
            .fetch(ApiRequest::post(format!("offers/{request}")).json(draft)?)
            .await?;
        info!(offer_id = %offer.id, "offer sent");
        Ok(offer)
    }

    /// Offers received on a request the signed-in user owns.
    pub async fn offers_for_request(&self, request: &RecordId) -> Result<Vec<Offer>> {
        self.fetch(ApiRequest::get(format!("offers/request/{request}")))
            .await
    }

    /// Offers the signed-in user has sent.
    ///
    /// The list endpoint omits the provider on its own rows; it is filled in
    /// with the current user so ownership checks work on the result.
    pub async fn my_offers(&self) -> Result<Vec<Offer>> {
        let me = self.current_user()?;
        let mut offers: Vec<Offer> = self.fetch(ApiRequest::get("offers/my")).await?;
        for offer in &mut offers {
            if offer.provider.id.is_none() {
                offer.provider.id = Some(me.id.clone());
            }
        }
        Ok(offers)
    }

    /// Accept, decline or withdraw `offer`.
    ///
    /// `request_owner` is the requester of the service request the offer is
    /// on. The action is authorized locally first and rejected without a
    /// network call when it is not allowed.
    #[instrument(skip_all, fields(offer_id = %offer.id, action = ?action))]
    pub async fn update_offer_status(
        &self,
        offer: &Offer,
        action: OfferAction,
        request_owner: &RecordId,
    ) -> Result<()> {
        let me = self.current_user()?;
        let status = authorize(action, offer, &me.id, request_owner)?;

        self.send(
            ApiRequest::put(format!("offers/{}/status", offer.id))
                .json(&StatusUpdate { status })?,
        )
        .await?;
        info!(%status, "offer updated");
        Ok(())
    }

    /// Offer events for the signed-in user, newest first as the server sends
    /// them.
    pub async fn notifications(&self) -> Result<Vec<OfferNotification>> {
        self.fetch(ApiRequest::get("offers/notifications")).await
    }
}
