// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service request detail page.
//
// What is rendered depends on the viewer: contact details and the comment box
// appear in seeker mode, the owner sees every offer received, and a provider
// sees either their own offer or the send-offer form.

use dioxus::prelude::*;
use tracing::warn;

use pandi_core::access::{OfferPanel, Viewer};
use pandi_core::error::{PandiError, Result};
use pandi_core::offer::{OfferAction, OfferDraft};
use pandi_core::types::{Offer, RecordId, ServiceRequest};

use crate::Route;
use crate::pages::common::{
    BUTTON, BUTTON_OUTLINE, CARD, ContactLinks, Empty, INPUT, Loading, MUTED, price, report,
    short_date,
};
use crate::services::app_services::AppServices;
use crate::state::{AppState, Notice};

/// Everything the page needs, fetched together.
#[derive(Debug, Clone, PartialEq)]
struct RequestView {
    request: ServiceRequest,
    received: Vec<Offer>,
    mine: Vec<Offer>,
}

async fn load(svc: AppServices, id: RecordId, viewer: Viewer) -> Result<RequestView> {
    let client = svc.client();
    let request = client.service_request(&id).await?;

    let received = if viewer.loads_received_offers(&request) {
        match client.offers_for_request(&id).await {
            Ok(offers) => offers,
            // Only the owner is entitled to the list; anyone else just sees none.
            Err(e) if !viewer.is_owner_of(&request) => {
                warn!(error = %e, "received offers unavailable");
                Vec::new()
            }
            Err(e) => return Err(e),
        }
    } else {
        Vec::new()
    };

    let mine = if viewer.loads_own_offers() {
        client.my_offers().await?
    } else {
        Vec::new()
    };

    Ok(RequestView {
        request,
        received,
        mine,
    })
}

#[component]
pub fn RequestDetails(id: String) -> Element {
    let svc = use_context::<AppServices>();
    let state = use_context::<Signal<AppState>>();
    let viewer = use_memo(move || state.read().viewer());
    let request_id = RecordId::new(id);

    let mut view = use_resource({
        let request_id = request_id.clone();
        move || load(svc.clone(), request_id.clone(), viewer())
    });

    let body = match &*view.read() {
        None => rsx! { Loading {} },
        Some(Err(PandiError::Api { status: 404, .. })) => rsx! {
            Empty { message: "This request doesn't exist or has been removed." }
        },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load request: {e}" } },
        Some(Ok(loaded)) => {
            let viewer = viewer();
            let request = &loaded.request;
            let panel = viewer.offer_panel(request, &loaded.received, &loaded.mine);
            rsx! {
                div { style: "display: flex; justify-content: space-between; align-items: center;",
                    h1 { "{request.title}" }
                    span { style: MUTED, {request.status.label()} }
                }
                p { style: MUTED,
                    "{request.category} · {request.location} · Budget {price(request.budget)}"
                }
                p { style: MUTED,
                    "Posted by {request.requester.display_name()} {short_date(request.created_at)}"
                }
                p { "{request.description}" }

                if viewer.shows_contact() {
                    ContactLinks {
                        phone: request.contact_phone.clone(),
                        email: request.contact_email.clone(),
                    }
                }

                OfferSection {
                    request: request.clone(),
                    panel,
                    on_change: move |_| view.restart(),
                }

                Comments {
                    request: request.clone(),
                    can_comment: viewer.comment_box_visible() && viewer.user.is_some(),
                    on_change: move |_| view.restart(),
                }
            }
        }
    };

    rsx! {
        div {
            Link { to: Route::ServiceRequests {}, "← Back to requests" }
            {body}
        }
    }
}

#[component]
fn OfferSection(request: ServiceRequest, panel: OfferPanel, on_change: EventHandler) -> Element {
    let owner = request.requester.id.clone();

    let inner = match panel {
        OfferPanel::Received(offers) if offers.is_empty() => rsx! {
            p { style: MUTED, "No offers yet." }
        },
        OfferPanel::Received(offers) => rsx! {
            for offer in offers {
                OfferRow {
                    key: "{offer.id}",
                    offer: offer.clone(),
                    request: request.clone(),
                    owner: owner.clone(),
                    on_change,
                }
            }
        },
        OfferPanel::ContactActions => rsx! {
            p { style: MUTED, "Interested in this job? Get in touch with the requester directly." }
        },
        OfferPanel::Mine(offer) => rsx! {
            p { style: MUTED, "You have already made an offer on this request." }
            OfferRow { offer, request: request.clone(), owner, on_change }
        },
        OfferPanel::SendForm => rsx! {
            SendOffer { request_id: request.id.clone(), on_change }
        },
        OfferPanel::SignInRequired => rsx! {
            p { style: MUTED,
                Link { to: Route::Login {}, "Sign in" }
                " to send an offer."
            }
        },
    };

    rsx! {
        section { style: "margin: 24px 0;",
            h3 { "Offers" }
            {inner}
        }
    }
}

#[component]
fn OfferRow(
    offer: Offer,
    request: ServiceRequest,
    owner: Option<RecordId>,
    on_change: EventHandler,
) -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<AppState>>();
    let nav = use_navigator();
    let actions = state.read().viewer().offer_actions(&offer, &request);

    let act = {
        let target = offer.clone();
        move |action: OfferAction| {
            let svc = svc.clone();
            let offer = target.clone();
            let Some(owner) = owner.clone() else {
                return;
            };
            spawn(async move {
                match svc.client().update_offer_status(&offer, action, &owner).await {
                    Ok(()) => {
                        state.write().notice = Some(Notice::info(
                            "Offer updated",
                            format!("The offer is now {}.", action.target_status()),
                        ));
                        on_change.call(());
                    }
                    Err(e) => report(state, nav, &e, "Offer Failed"),
                }
            });
        }
    };

    rsx! {
        div { style: CARD,
            div { style: "display: flex; justify-content: space-between;",
                strong { {offer.provider.name_or("Provider")} }
                span { style: MUTED, "{offer.status}" }
            }
            p { style: MUTED, "Proposed {price(offer.proposed_price)} · {short_date(offer.created_at)}" }
            if let Some(ref message) = offer.message {
                p { "{message}" }
            }
            if let Some(ref email) = offer.provider.email {
                p { style: MUTED, "{email}" }
            }
            div { style: "display: flex; gap: 8px;",
                for action in actions {
                    button {
                        key: "{action.label()}",
                        style: action_style(action),
                        onclick: {
                            let act = act.clone();
                            move |_| act(action)
                        },
                        {action.label()}
                    }
                }
            }
        }
    }
}

fn action_style(action: OfferAction) -> &'static str {
    match action {
        OfferAction::Accept => BUTTON,
        OfferAction::Decline | OfferAction::Withdraw => BUTTON_OUTLINE,
    }
}

#[component]
fn SendOffer(request_id: RecordId, on_change: EventHandler) -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<AppState>>();
    let nav = use_navigator();
    let mut message = use_signal(String::new);
    let mut amount = use_signal(String::new);
    let mut sending = use_signal(|| false);

    rsx! {
        div { style: CARD,
            h4 { "Make an offer" }
            textarea {
                style: INPUT,
                placeholder: "Introduce yourself and explain how you would do the job",
                value: "{message}",
                oninput: move |evt| message.set(evt.value()),
            }
            input {
                style: INPUT,
                placeholder: "Your price (optional)",
                value: "{amount}",
                oninput: move |evt| amount.set(evt.value()),
            }
            button {
                style: BUTTON,
                disabled: sending(),
                onclick: move |_| {
                    let draft = match OfferDraft::parse(&message(), &amount()) {
                        Ok(draft) => draft,
                        Err(e) => {
                            report(state, nav, &e, "Offer Failed");
                            return;
                        }
                    };
                    let svc = svc.clone();
                    let request_id = request_id.clone();
                    sending.set(true);
                    spawn(async move {
                        match svc.client().create_offer(&request_id, &draft).await {
                            Ok(_) => {
                                message.set(String::new());
                                amount.set(String::new());
                                state.write().notice = Some(Notice::info("Offer Sent", "The requester will be notified."));
                                on_change.call(());
                            }
                            Err(e) => report(state, nav, &e, "Offer Failed"),
                        }
                        sending.set(false);
                    });
                },
                if sending() { "Sending..." } else { "Send offer" }
            }
        }
    }
}

#[component]
fn Comments(request: ServiceRequest, can_comment: bool, on_change: EventHandler) -> Element {
    let svc = use_context::<AppServices>();
    let state = use_context::<Signal<AppState>>();
    let nav = use_navigator();
    let mut text = use_signal(String::new);
    let request_id = request.id.clone();

    rsx! {
        section { style: "margin: 24px 0;",
            h3 { "Comments ({request.comments.len()})" }
            for c in request.comments.iter() {
                div { key: "{c.id}", style: CARD,
                    strong { {c.user.name_or("Unknown User")} }
                    span { style: "margin-left: 8px; {MUTED}", {short_date(c.created_at)} }
                    p { "{c.text}" }
                }
            }
            if can_comment {
                textarea {
                    style: INPUT,
                    placeholder: "Ask a question or add details",
                    value: "{text}",
                    oninput: move |evt| text.set(evt.value()),
                }
                button {
                    style: BUTTON,
                    onclick: move |_| {
                        let svc = svc.clone();
                        let request_id = request_id.clone();
                        let body = text();
                        spawn(async move {
                            match svc.client().add_comment(&request_id, &body).await {
                                Ok(()) => {
                                    text.set(String::new());
                                    on_change.call(());
                                }
                                Err(e) => report(state, nav, &e, "Comment Failed"),
                            }
                        });
                    },
                    "Post comment"
                }
            }
        }
    }
}
