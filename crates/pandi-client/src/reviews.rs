// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Business reviews.

use pandi_core::error::Result;
use pandi_core::listing::validate_rating;
use pandi_core::types::{RecordId, Review, ReviewInput};
use tracing::instrument;

use crate::api_client::{ApiClient, ApiRequest};

impl ApiClient {
    pub async fn reviews(&self, business: &RecordId) -> Result<Vec<Review>> {
        self.fetch(ApiRequest::get(format!("reviews/business/{business}")))
            .await
    }

    /// Post a new review. A rating of zero is rejected before anything is sent.
    #[instrument(skip(self, comment))]
    pub async fn create_review(
        &self,
        business: &RecordId,
        rating: u8,
        comment: Option<String>,
    ) -> Result<()> {
        let body = ReviewInput {
            business_id: Some(business.clone()),
            rating: validate_rating(rating)?,
            comment,
        };
        self.send(ApiRequest::post("reviews").json(&body)?).await
    }

    #[instrument(skip(self, comment))]
    pub async fn update_review(
        &self,
        review: &RecordId,
        rating: u8,
        comment: Option<String>,
    ) -> Result<()> {
        let body = ReviewInput {
            business_id: None,
            rating: validate_rating(rating)?,
            comment,
        };
        self.send(ApiRequest::put(format!("reviews/{review}")).json(&body)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, review: &RecordId) -> Result<()> {
        self.send(ApiRequest::delete(format!("reviews/{review}"))).await
    }
}
