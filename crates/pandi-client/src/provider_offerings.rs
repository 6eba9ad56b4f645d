// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Provider-offering endpoints.

use pandi_core::error::Result;
use pandi_core::types::{
    OfferingFilter, OfferingStatus, ProviderOffering, ProviderOfferingInput, RecordId,
    StatusUpdate,
};
use tracing::instrument;

use crate::api_client::{ApiClient, ApiRequest};

impl ApiClient {
    pub async fn provider_offerings(&self, filter: &OfferingFilter) -> Result<Vec<ProviderOffering>> {
        self.fetch(ApiRequest::get("provider-offerings").query(filter)?)
            .await
    }

    pub async fn provider_offering(&self, id: &RecordId) -> Result<ProviderOffering> {
        self.fetch(ApiRequest::get(format!("provider-offerings/{id}")))
            .await
    }

    pub async fn my_provider_offerings(&self) -> Result<Vec<ProviderOffering>> {
        self.fetch(ApiRequest::get("provider-offerings/my-offerings"))
            .await
    }

    #[instrument(skip_all, fields(title = %input.title))]
    pub async fn create_provider_offering(&self, input: &ProviderOfferingInput) -> Result<()> {
        self.send(ApiRequest::post("provider-offerings").form(input)?)
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_provider_offering(
        &self,
        id: &RecordId,
        input: &ProviderOfferingInput,
    ) -> Result<()> {
        self.send(ApiRequest::put(format!("provider-offerings/{id}")).form(input)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_provider_offering(&self, id: &RecordId) -> Result<()> {
        self.send(ApiRequest::delete(format!("provider-offerings/{id}")))
            .await
    }

    /// Pause or re-activate an offering.
    #[instrument(skip(self))]
    pub async fn update_offering_status(&self, id: &RecordId, status: OfferingStatus) -> Result<()> {
        self.send(
            ApiRequest::put(format!("provider-offerings/{id}/status"))
                .json(&StatusUpdate { status })?,
        )
        .await
    }
}
