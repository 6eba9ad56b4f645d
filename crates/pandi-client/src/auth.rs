// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sign-in and sign-up.  A successful call starts the session.

use pandi_core::error::Result;
use pandi_core::types::{AuthGrant, LoginRequest, SignupRequest, User, UserType};
use tracing::instrument;

use crate::api_client::{ApiClient, ApiRequest};

impl ApiClient {
    #[instrument(skip_all, fields(user_type = user_type.as_str()))]
    pub async fn login(&self, email: &str, password: &str, user_type: UserType) -> Result<User> {
        let body = LoginRequest {
            email: email.trim().to_owned(),
            password: password.to_owned(),
            user_type,
        };
        let grant: AuthGrant = self
            .fetch(ApiRequest::post("auth/login").json(&body)?)
            .await?;
        self.session().login(grant.token, grant.user.clone())?;
        Ok(grant.user)
    }

    #[instrument(skip_all, fields(user_type = signup.user_type.as_str()))]
    pub async fn signup(&self, signup: &SignupRequest) -> Result<User> {
        let grant: AuthGrant = self
            .fetch(ApiRequest::post("auth/signup").json(signup)?)
            .await?;
        self.session().login(grant.token, grant.user.clone())?;
        Ok(grant.user)
    }

    pub fn logout(&self) {
        self.session().logout();
    }
}
