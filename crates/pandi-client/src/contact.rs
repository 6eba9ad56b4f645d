// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contact messages, to the site or to a single business.

use pandi_core::error::{PandiError, Result};
use pandi_core::types::{ContactMessage, RecordId};
use tracing::instrument;

use crate::api_client::{ApiClient, ApiRequest};

fn validate(message: &ContactMessage) -> Result<()> {
    let missing = [
        ("name", &message.name),
        ("email", &message.email),
        ("subject", &message.subject),
        ("message", &message.message),
    ]
    .into_iter()
    .find(|(_, value)| value.trim().is_empty());

    match missing {
        Some((field, _)) => Err(PandiError::Validation(format!("{field} is required"))),
        None => Ok(()),
    }
}

impl ApiClient {
    #[instrument(skip_all, fields(subject = %message.subject))]
    pub async fn send_contact(&self, message: &ContactMessage) -> Result<()> {
        validate(message)?;
        self.send(ApiRequest::post("contact").json(message)?).await
    }

    #[instrument(skip(self, message))]
    pub async fn contact_business(
        &self,
        business: &RecordId,
        message: &ContactMessage,
    ) -> Result<()> {
        validate(message)?;
        self.send(ApiRequest::post(format!("contact/business/{business}")).json(message)?)
            .await
    }

    /// Messages addressed to the signed-in account.
    pub async fn contact_messages(&self) -> Result<Vec<ContactMessage>> {
        self.fetch(ApiRequest::get("contact")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_blank_field_is_reported() {
        let message = ContactMessage {
            name: "Ravi".into(),
            email: " ".into(),
            ..Default::default()
        };
        assert!(matches!(
            validate(&message),
            Err(PandiError::Validation(detail)) if detail == "email is required"
        ));
    }

    #[test]
    fn phone_is_optional() {
        let message = ContactMessage {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            phone: None,
            subject: "Hours".into(),
            message: "Are you open on Sunday?".into(),
        };
        assert!(validate(&message).is_ok());
    }
}
