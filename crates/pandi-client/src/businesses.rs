// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Business directory endpoints.

use pandi_core::error::Result;
use pandi_core::types::{Business, BusinessFilter, BusinessInput, RecordId};
use tracing::instrument;

use crate::api_client::{ApiClient, ApiRequest};

impl ApiClient {
    pub async fn businesses(&self, filter: &BusinessFilter) -> Result<Vec<Business>> {
        self.fetch(ApiRequest::get("businesses").query(filter)?)
            .await
    }

    /// Server-side text search, narrowed by the same filters as the list.
    pub async fn search_businesses(
        &self,
        query: &str,
        filter: &BusinessFilter,
    ) -> Result<Vec<Business>> {
        self.fetch(
            ApiRequest::get("businesses/search")
                .query_pair("query", query.trim())
                .query(filter)?,
        )
        .await
    }

    pub async fn business(&self, id: &RecordId) -> Result<Business> {
        self.fetch(ApiRequest::get(format!("businesses/{id}"))).await
    }

    /// Businesses owned by the signed-in business account.
    pub async fn my_businesses(&self) -> Result<Vec<Business>> {
        self.fetch(ApiRequest::get("businesses/my-businesses")).await
    }

    #[instrument(skip_all, fields(name = %input.name))]
    pub async fn create_business(&self, input: &BusinessInput) -> Result<()> {
        self.send(ApiRequest::post("businesses").form(input)?).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_business(&self, id: &RecordId, input: &BusinessInput) -> Result<()> {
        self.send(ApiRequest::put(format!("businesses/{id}")).form(input)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_business(&self, id: &RecordId) -> Result<()> {
        self.send(ApiRequest::delete(format!("businesses/{id}"))).await
    }
}
