// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Viewer capabilities — what the current user sees and may press.
//
// These gates decide rendering only.  Contact details hidden from a provider
// are still in the API payload; real authorisation lives on the backend.

use crate::offer::{self, OfferAction};
use crate::role::ServiceRole;
use crate::types::{Offer, RecordId, ServiceRequest, User, UserType};

/// The current user (if signed in) and their selected view mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewer {
    pub user: Option<User>,
    pub role: ServiceRole,
}

/// Which offer surface the request detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum OfferPanel {
    /// The request owner sees every offer received.
    Received(Vec<Offer>),
    /// A seeker who is not the owner gets the call/WhatsApp actions.
    ContactActions,
    /// A provider sees the state of their own offer.
    Mine(Offer),
    /// A provider without an active offer gets the send-offer form.
    SendForm,
    /// A provider who is not signed in.
    SignInRequired,
}

impl Viewer {
    pub fn new(user: Option<User>, role: ServiceRole) -> Self {
        Self { user, role }
    }

    pub fn user_id(&self) -> Option<&RecordId> {
        self.user.as_ref().map(|u| &u.id)
    }

    /// Phone numbers and e-mail addresses are rendered for seekers only.
    pub fn shows_contact(&self) -> bool {
        self.role == ServiceRole::Seeker
    }

    /// The comment box is offered in seeker mode.
    pub fn comment_box_visible(&self) -> bool {
        self.role == ServiceRole::Seeker
    }

    pub fn is_owner_of(&self, request: &ServiceRequest) -> bool {
        self.user_id().is_some_and(|id| request.is_owned_by(id))
    }

    /// Whether the page should fetch the offers received on `request`.
    pub fn loads_received_offers(&self, request: &ServiceRequest) -> bool {
        self.role == ServiceRole::Seeker || self.is_owner_of(request)
    }

    /// Whether the page should fetch the viewer's own offers.
    pub fn loads_own_offers(&self) -> bool {
        self.role == ServiceRole::Provider && self.user.is_some()
    }

    /// Buttons rendered next to `offer` on `request`.
    pub fn offer_actions(&self, offer: &Offer, request: &ServiceRequest) -> Vec<OfferAction> {
        let Some(me) = self.user_id() else {
            return Vec::new();
        };
        if offer.status.is_terminal() {
            return Vec::new();
        }
        [OfferAction::Accept, OfferAction::Decline, OfferAction::Withdraw]
            .into_iter()
            .filter(|action| {
                request
                    .requester
                    .id
                    .as_ref()
                    .is_some_and(|owner| offer::authorize(*action, offer, me, owner).is_ok())
            })
            .collect()
    }

    /// Decide the offer surface for `request`.
    ///
    /// `received` are the offers fetched for the request (owner view);
    /// `mine` are the viewer's own offers from `/offers/my`.
    pub fn offer_panel(
        &self,
        request: &ServiceRequest,
        received: &[Offer],
        mine: &[Offer],
    ) -> OfferPanel {
        if self.is_owner_of(request) {
            return OfferPanel::Received(received.to_vec());
        }
        if self.role == ServiceRole::Seeker {
            return OfferPanel::ContactActions;
        }
        let Some(me) = self.user_id() else {
            return OfferPanel::SignInRequired;
        };
        match offer::active_offer_for(mine, me, &request.id) {
            Some(existing) => OfferPanel::Mine(existing.clone()),
            None => OfferPanel::SendForm,
        }
    }
}

/// Outcome of a route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Allowed,
    /// Not signed in: send to the login page.
    LoginRequired,
    /// Signed in with the wrong account type: send home.
    WrongUserType,
}

impl RouteAccess {
    /// Guard a page that may require a particular account type.
    pub fn check(user: Option<&User>, required: Option<UserType>) -> Self {
        match (user, required) {
            (None, _) => Self::LoginRequired,
            (Some(u), Some(kind)) if u.user_type != kind => Self::WrongUserType,
            (Some(_), _) => Self::Allowed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OfferStatus, PartyRef, RequestRef, RequestStatus};

    fn user(id: &str, kind: UserType) -> User {
        User {
            id: id.into(),
            first_name: "F".into(),
            last_name: id.into(),
            email: format!("{id}@example.com"),
            user_type: kind,
        }
    }

    fn request(owner: &str) -> ServiceRequest {
        ServiceRequest {
            id: "req".into(),
            title: "Leaking tap".into(),
            description: String::new(),
            category: "Home Services".into(),
            location: "Anna Nagar".into(),
            budget: Some(500.0),
            contact_phone: "+91 98765 43210".into(),
            contact_email: "owner@example.com".into(),
            image: None,
            status: RequestStatus::Open,
            requester: PartyRef {
                id: Some(owner.into()),
                ..Default::default()
            },
            comments: Vec::new(),
            created_at: None,
        }
    }

    fn offer(id: &str, provider: &str, status: OfferStatus) -> Offer {
        Offer {
            id: id.into(),
            request: Some(RequestRef::Id("req".into())),
            provider: PartyRef {
                id: Some(provider.into()),
                ..Default::default()
            },
            message: None,
            proposed_price: None,
            status,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn contact_only_in_seeker_role() {
        let seeker = Viewer::new(None, ServiceRole::Seeker);
        let provider = Viewer::new(None, ServiceRole::Provider);
        assert!(seeker.shows_contact());
        assert!(!provider.shows_contact());
        assert!(seeker.comment_box_visible());
        assert!(!provider.comment_box_visible());
    }

    #[test]
    fn owner_gets_accept_and_decline_on_sent_offers_only() {
        let owner = Viewer::new(Some(user("owner", UserType::Customer)), ServiceRole::Provider);
        let req = request("owner");

        assert_eq!(
            owner.offer_actions(&offer("o1", "p1", OfferStatus::Sent), &req),
            vec![OfferAction::Accept, OfferAction::Decline]
        );
        assert!(owner
            .offer_actions(&offer("o2", "p1", OfferStatus::Accepted), &req)
            .is_empty());
    }

    #[test]
    fn provider_gets_withdraw_on_own_sent_offer_only() {
        let prov = Viewer::new(Some(user("p1", UserType::Customer)), ServiceRole::Provider);
        let req = request("owner");

        assert_eq!(
            prov.offer_actions(&offer("o1", "p1", OfferStatus::Sent), &req),
            vec![OfferAction::Withdraw]
        );
        assert!(prov
            .offer_actions(&offer("o2", "p2", OfferStatus::Sent), &req)
            .is_empty());
        assert!(prov
            .offer_actions(&offer("o3", "p1", OfferStatus::Withdrawn), &req)
            .is_empty());
    }

    #[test]
    fn anonymous_viewer_gets_no_actions() {
        let anon = Viewer::default();
        assert!(anon
            .offer_actions(&offer("o1", "p1", OfferStatus::Sent), &request("owner"))
            .is_empty());
    }

    #[test]
    fn owner_sees_received_offers_in_either_role() {
        let req = request("owner");
        let received = vec![
            offer("o1", "p1", OfferStatus::Sent),
            offer("o2", "p2", OfferStatus::Sent),
        ];
        for role in [ServiceRole::Seeker, ServiceRole::Provider] {
            let owner = Viewer::new(Some(user("owner", UserType::Customer)), role);
            assert!(owner.loads_received_offers(&req));
            assert_eq!(
                owner.offer_panel(&req, &received, &[]),
                OfferPanel::Received(received.clone())
            );
        }
    }

    #[test]
    fn seeker_non_owner_sees_contact_actions() {
        let viewer = Viewer::new(Some(user("x", UserType::Customer)), ServiceRole::Seeker);
        assert_eq!(
            viewer.offer_panel(&request("owner"), &[], &[]),
            OfferPanel::ContactActions
        );
    }

    #[test]
    fn provider_panel_follows_own_offer() {
        let req = request("owner");
        let prov = Viewer::new(Some(user("p1", UserType::Customer)), ServiceRole::Provider);
        assert!(!prov.loads_received_offers(&req));
        assert!(prov.loads_own_offers());

        let sent = offer("o1", "p1", OfferStatus::Sent);
        assert_eq!(
            prov.offer_panel(&req, &[], std::slice::from_ref(&sent)),
            OfferPanel::Mine(sent.clone())
        );

        let withdrawn = offer("o1", "p1", OfferStatus::Withdrawn);
        assert_eq!(prov.offer_panel(&req, &[], &[withdrawn]), OfferPanel::SendForm);
    }

    #[test]
    fn anonymous_provider_must_sign_in() {
        let anon = Viewer::new(None, ServiceRole::Provider);
        assert_eq!(
            anon.offer_panel(&request("owner"), &[], &[]),
            OfferPanel::SignInRequired
        );
    }

    #[test]
    fn route_guard() {
        let customer = user("c", UserType::Customer);
        let business = user("b", UserType::Business);

        assert_eq!(RouteAccess::check(None, None), RouteAccess::LoginRequired);
        assert_eq!(
            RouteAccess::check(None, Some(UserType::Business)),
            RouteAccess::LoginRequired
        );
        assert_eq!(RouteAccess::check(Some(&customer), None), RouteAccess::Allowed);
        assert_eq!(
            RouteAccess::check(Some(&customer), Some(UserType::Business)),
            RouteAccess::WrongUserType
        );
        assert_eq!(
            RouteAccess::check(Some(&business), Some(UserType::Business)),
            RouteAccess::Allowed
        );
    }
}
