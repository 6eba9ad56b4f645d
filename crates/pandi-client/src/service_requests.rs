// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service-request endpoints.  Create and update go out as multipart forms.

use pandi_core::error::{PandiError, Result};
use pandi_core::types::{
    RecordId, RequestStatus, ServiceRequest, ServiceRequestFilter, ServiceRequestInput,
    StatusUpdate,
};
use serde::Serialize;
use tracing::instrument;

use crate::api_client::{ApiClient, ApiRequest};

#[derive(Serialize)]
struct NewComment<'a> {
    text: &'a str,
}

impl ApiClient {
    pub async fn service_requests(
        &self,
        filter: &ServiceRequestFilter,
    ) -> Result<Vec<ServiceRequest>> {
        self.fetch(ApiRequest::get("service-requests").query(filter)?)
            .await
    }

    pub async fn service_request(&self, id: &RecordId) -> Result<ServiceRequest> {
        self.fetch(ApiRequest::get(format!("service-requests/{id}")))
            .await
    }

    pub async fn my_service_requests(&self) -> Result<Vec<ServiceRequest>> {
        self.fetch(ApiRequest::get("service-requests/my-requests"))
            .await
    }

    #[instrument(skip_all, fields(title = %input.title))]
    pub async fn create_service_request(&self, input: &ServiceRequestInput) -> Result<()> {
        self.send(ApiRequest::post("service-requests").form(input)?)
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_service_request(
        &self,
        id: &RecordId,
        input: &ServiceRequestInput,
    ) -> Result<()> {
        self.send(ApiRequest::put(format!("service-requests/{id}")).form(input)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_service_request(&self, id: &RecordId) -> Result<()> {
        self.send(ApiRequest::delete(format!("service-requests/{id}")))
            .await
    }

    /// Post a comment. Blank comments are not sent.
    #[instrument(skip(self, text))]
    pub async fn add_comment(&self, id: &RecordId, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PandiError::Validation("comment cannot be empty".into()));
        }
        self.send(
            ApiRequest::post(format!("service-requests/{id}/comments"))
                .json(&NewComment { text })?,
        )
        .await
    }

    /// Owner-only: move a request between open, in progress and completed.
    #[instrument(skip(self))]
    pub async fn update_request_status(&self, id: &RecordId, status: RequestStatus) -> Result<()> {
        self.send(
            ApiRequest::put(format!("service-requests/{id}/status"))
                .json(&StatusUpdate { status })?,
        )
        .await
    }
}
