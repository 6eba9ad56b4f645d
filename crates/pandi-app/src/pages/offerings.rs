// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Provider offerings — browse, view, manage your own, and create new ones.

use dioxus::prelude::*;

use pandi_core::error::PandiError;
use pandi_core::listing::{CATEGORIES, ListingQuery, showing_caption};
use pandi_core::types::{
    OfferingFilter, OfferingStatus, ProviderOffering, ProviderOfferingInput, RecordId,
};

use crate::Route;
use crate::pages::common::{
    BUTTON, BUTTON_OUTLINE, CARD, ContactLinks, Empty, Guarded, INPUT, Loading, MUTED, SearchBar,
    distinct, price, report, short_date,
};
use crate::services::app_services::AppServices;
use crate::state::{AppState, Notice};

#[component]
pub fn ProviderOfferings() -> Element {
    let svc = use_context::<AppServices>();
    let text = use_signal(String::new);
    let category = use_signal(String::new);
    let area = use_signal(String::new);

    // Paused offerings are not advertised.
    let offerings = use_resource(move || {
        let svc = svc.clone();
        let filter = OfferingFilter {
            status: Some(OfferingStatus::Active),
            ..Default::default()
        };
        async move { svc.client().provider_offerings(&filter).await }
    });

    let query = ListingQuery {
        text: text(),
        category: Some(category()),
        area: Some(area()),
    };

    let body = match &*offerings.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load services: {e}" } },
        Some(Ok(all)) => {
            let shown = query.apply(all);
            let categories = distinct(all.iter().map(|o| o.category.as_str()));
            let areas = distinct(all.iter().map(|o| o.service_area.as_str()));
            rsx! {
                SearchBar { text, category, area, categories, areas }
                p { style: MUTED, {showing_caption(shown.len(), all.len(), "services")} }
                if shown.is_empty() {
                    Empty { message: "No services match your search." }
                }
                for o in shown {
                    OfferingCard { key: "{o.id}", offering: o.clone() }
                }
            }
        }
    };

    rsx! {
        div {
            h1 { "Services offered" }
            {body}
        }
    }
}

#[component]
fn OfferingCard(offering: ProviderOffering) -> Element {
    let svc = use_context::<AppServices>();
    let image = svc.image_url(offering.image.as_deref());
    rsx! {
        Link { to: Route::OfferingDetails { id: offering.id.to_string() },
            style: "text-decoration: none; color: inherit;",
            div { style: "{CARD} display: flex; gap: 12px;",
                img { src: "{image}", alt: "", style: "width: 72px; height: 72px; object-fit: cover; border-radius: 6px;" }
                div {
                    strong { "{offering.title}" }
                    p { style: MUTED, "{offering.category} · {offering.service_area} · From {price(offering.base_price)}" }
                    p { style: MUTED, "by {offering.provider.display_name()}" }
                }
            }
        }
    }
}

#[component]
pub fn OfferingDetails(id: String) -> Element {
    let svc = use_context::<AppServices>();
    let state = use_context::<Signal<AppState>>();
    let offering_id = RecordId::new(id);

    let offering = use_resource({
        let svc = svc.clone();
        move || {
            let svc = svc.clone();
            let offering_id = offering_id.clone();
            async move { svc.client().provider_offering(&offering_id).await }
        }
    });

    let viewer = state.read().viewer();
    let body = match &*offering.read() {
        None => rsx! { Loading {} },
        Some(Err(PandiError::Api { status: 404, .. })) => rsx! {
            Empty { message: "This service doesn't exist or has been removed." }
        },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load service: {e}" } },
        Some(Ok(o)) => {
            let image = svc.image_url(o.image.as_deref());
            let by = o.provider.name_or("Provider");
            rsx! {
                img { src: "{image}", alt: "{o.title}", style: "width: 100%; max-height: 240px; object-fit: cover; border-radius: 8px;" }
                h1 { "{o.title}" }
                p { style: MUTED, "{o.category} · {o.service_area} · From {price(o.base_price)}" }
                p { style: MUTED, "Offered by {by} {short_date(o.created_at)}" }
                p { "{o.description}" }
                if viewer.shows_contact() {
                    ContactLinks {
                        phone: o.contact_phone.clone(),
                        email: o.contact_email.clone(),
                        whatsapp: o.whatsapp_number.clone(),
                    }
                } else {
                    p { style: MUTED, "Switch to seeker mode to see contact details." }
                }
            }
        }
    };

    rsx! {
        div {
            Link { to: Route::ProviderOfferings {}, "← Back to services" }
            {body}
        }
    }
}

#[component]
pub fn MyOfferings() -> Element {
    rsx! {
        Guarded { required: None,
            MyOfferingsInner {}
        }
    }
}

#[component]
fn MyOfferingsInner() -> Element {
    let svc = use_context::<AppServices>();
    let state = use_context::<Signal<AppState>>();
    let nav = use_navigator();

    let mut offerings = use_resource({
        let svc = svc.clone();
        move || {
            let svc = svc.clone();
            async move { svc.client().my_provider_offerings().await }
        }
    });

    let set_status = {
        let svc = svc.clone();
        move |id: RecordId, status: OfferingStatus| {
            let svc = svc.clone();
            spawn(async move {
                match svc.client().update_offering_status(&id, status).await {
                    Ok(()) => offerings.restart(),
                    Err(e) => report(state, nav, &e, "Update Failed"),
                }
            });
        }
    };

    let remove = {
        let svc = svc.clone();
        move |id: RecordId| {
            let svc = svc.clone();
            spawn(async move {
                match svc.client().delete_provider_offering(&id).await {
                    Ok(()) => offerings.restart(),
                    Err(e) => report(state, nav, &e, "Delete Failed"),
                }
            });
        }
    };

    let body = match &*offerings.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load your services: {e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            Empty { message: "You are not offering any services yet." }
        },
        Some(Ok(list)) => rsx! {
            for o in list.iter() {
                div { key: "{o.id}", style: CARD,
                    Link { to: Route::OfferingDetails { id: o.id.to_string() }, strong { "{o.title}" } }
                    p { style: MUTED, "{o.category} · {o.service_area} · {o.status.as_str()}" }
                    div { style: "display: flex; gap: 8px;",
                        button {
                            style: BUTTON_OUTLINE,
                            onclick: {
                                let set_status = set_status.clone();
                                let id = o.id.clone();
                                let next = match o.status {
                                    OfferingStatus::Active => OfferingStatus::Paused,
                                    OfferingStatus::Paused => OfferingStatus::Active,
                                };
                                move |_| set_status(id.clone(), next)
                            },
                            if o.status == OfferingStatus::Active { "Pause" } else { "Activate" }
                        }
                        button {
                            style: BUTTON_OUTLINE,
                            onclick: {
                                let remove = remove.clone();
                                let id = o.id.clone();
                                move |_| remove(id.clone())
                            },
                            "Delete"
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { "My services" }
                Link { to: Route::NewOffering {}, "Offer a service" }
            }
            {body}
        }
    }
}

#[component]
pub fn NewOffering() -> Element {
    rsx! {
        Guarded { required: None,
            NewOfferingForm {}
        }
    }
}

#[component]
fn NewOfferingForm() -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<AppState>>();
    let nav = use_navigator();
    let mut form = use_signal(|| {
        let email = state.read().user.as_ref().map(|u| u.email.clone());
        ProviderOfferingInput {
            category: CATEGORIES[0].into(),
            contact_email: email.unwrap_or_default(),
            ..Default::default()
        }
    });
    let mut base_price = use_signal(String::new);
    let mut whatsapp = use_signal(String::new);
    let mut saving = use_signal(|| false);

    rsx! {
        div {
            h1 { "Offer a service" }
            input { style: INPUT, placeholder: "Title", value: "{form.read().title}",
                oninput: move |evt| form.write().title = evt.value() }
            textarea { style: INPUT, placeholder: "What do you offer?", value: "{form.read().description}",
                oninput: move |evt| form.write().description = evt.value() }
            select { style: INPUT, value: "{form.read().category}",
                onchange: move |evt| form.write().category = evt.value(),
                for c in CATEGORIES {
                    option { key: "{c}", value: c, "{c}" }
                }
            }
            input { style: INPUT, placeholder: "Service area", value: "{form.read().service_area}",
                oninput: move |evt| form.write().service_area = evt.value() }
            input { style: INPUT, placeholder: "Base price (optional)", value: "{base_price}",
                oninput: move |evt| base_price.set(evt.value()) }
            input { style: INPUT, placeholder: "Contact phone", value: "{form.read().contact_phone}",
                oninput: move |evt| form.write().contact_phone = evt.value() }
            input { style: INPUT, placeholder: "WhatsApp number (optional)", value: "{whatsapp}",
                oninput: move |evt| whatsapp.set(evt.value()) }
            input { style: INPUT, placeholder: "Contact email", value: "{form.read().contact_email}",
                oninput: move |evt| form.write().contact_email = evt.value() }
            button {
                style: BUTTON,
                disabled: saving(),
                onclick: move |_| {
                    let svc = svc.clone();
                    let mut input = form.read().clone();
                    input.base_price = base_price().trim().parse().ok();
                    let number = whatsapp().trim().to_owned();
                    input.whatsapp_number = (!number.is_empty()).then_some(number);
                    saving.set(true);
                    spawn(async move {
                        match svc.client().create_provider_offering(&input).await {
                            Ok(()) => {
                                state.write().notice = Some(Notice::info("Service listed", "Seekers can now find your service."));
                                nav.push(Route::MyOfferings {});
                            }
                            Err(e) => report(state, nav, &e, "Submission Failed"),
                        }
                        saving.set(false);
                    });
                },
                if saving() { "Saving..." } else { "Publish" }
            }
        }
    }
}
