// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Business directory — list with search, detail page with reviews and a
// contact form, and the owner's own listings.

use dioxus::prelude::*;

use pandi_core::error::PandiError;
use pandi_core::listing::{ListingQuery, average_rating, own_review, showing_caption};
use pandi_core::types::{BusinessFilter, ContactMessage, RecordId, Review, UserType};

use crate::Route;
use crate::pages::common::{
    BUTTON, BUTTON_OUTLINE, CARD, ContactLinks, Empty, Guarded, INPUT, Loading, MUTED, SearchBar,
    distinct, report, short_date,
};
use crate::services::app_services::AppServices;
use crate::state::{AppState, Notice};

#[component]
pub fn Businesses() -> Element {
    let svc = use_context::<AppServices>();
    let text = use_signal(String::new);
    let category = use_signal(String::new);
    let area = use_signal(String::new);

    let businesses = use_resource(move || {
        let svc = svc.clone();
        async move { svc.client().businesses(&BusinessFilter::default()).await }
    });

    let query = ListingQuery {
        text: text(),
        category: Some(category()),
        area: Some(area()),
    };

    let body = match &*businesses.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load businesses: {e}" } },
        Some(Ok(all)) => {
            let shown = query.apply(all);
            let categories = distinct(all.iter().map(|b| b.category.as_str()));
            let areas = distinct(all.iter().map(|b| b.location.as_str()));
            rsx! {
                SearchBar { text, category, area, categories, areas }
                p { style: MUTED, {showing_caption(shown.len(), all.len(), "businesses")} }
                if shown.is_empty() {
                    Empty { message: "No businesses match your search." }
                }
                for b in shown {
                    Link { key: "{b.id}", to: Route::BusinessDetails { id: b.id.to_string() },
                        style: "text-decoration: none; color: inherit;",
                        div { style: CARD,
                            strong { "{b.name}" }
                            p { style: MUTED, "{b.category} · {b.location} · ★ {b.rating:.1}" }
                            p { "{b.description}" }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            h1 { "Local businesses" }
            {body}
        }
    }
}

#[component]
pub fn BusinessDetails(id: String) -> Element {
    let svc = use_context::<AppServices>();
    let business_id = RecordId::new(id);

    let business = use_resource({
        let svc = svc.clone();
        let business_id = business_id.clone();
        move || {
            let svc = svc.clone();
            let business_id = business_id.clone();
            async move { svc.client().business(&business_id).await }
        }
    });

    let body = match &*business.read() {
        None => rsx! { Loading {} },
        Some(Err(PandiError::Api { status: 404, .. })) => rsx! {
            Empty { message: "This business doesn't exist or has been removed." }
        },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load business: {e}" } },
        Some(Ok(b)) => {
            let image = svc.image_url(b.image.as_deref());
            rsx! {
                img { src: "{image}", alt: "{b.name}", style: "width: 100%; max-height: 240px; object-fit: cover; border-radius: 8px;" }
                h1 { "{b.name}" }
                p { style: MUTED, "{b.category} · {b.location}" }
                p { "{b.description}" }
                if !b.address.is_empty() {
                    p { style: MUTED, "{b.address}" }
                }
                ContactLinks {
                    phone: b.phone.clone(),
                    email: b.email.clone(),
                    whatsapp: Some(b.whatsapp.clone()),
                }
                ReviewSection { business_id: b.id.clone() }
                ContactBusiness { business_id: b.id.clone() }
            }
        }
    };

    rsx! {
        div {
            Link { to: Route::Businesses {}, "← Back to businesses" }
            {body}
        }
    }
}

#[component]
fn ReviewSection(business_id: RecordId) -> Element {
    let svc = use_context::<AppServices>();
    let state = use_context::<Signal<AppState>>();
    let nav = use_navigator();
    let mut rating = use_signal(|| 0u8);
    let mut comment = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let mut reviews = use_resource({
        let svc = svc.clone();
        let business_id = business_id.clone();
        move || {
            let svc = svc.clone();
            let business_id = business_id.clone();
            async move { svc.client().reviews(&business_id).await }
        }
    });

    let user = state.read().user.clone();
    let loaded: Vec<Review> = match &*reviews.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };
    let mine = user
        .as_ref()
        .and_then(|u| own_review(&loaded, &u.id))
        .cloned();
    let average = average_rating(&loaded)
        .map(|a| format!("{a:.1} average from {} reviews", loaded.len()))
        .unwrap_or_else(|| "No reviews yet".into());

    rsx! {
        section { style: "margin: 24px 0;",
            h3 { "Reviews" }
            p { style: MUTED, "{average}" }

            for r in loaded.iter() {
                div { key: "{r.id}", style: CARD,
                    strong { {r.user.name_or("Unknown User")} }
                    span { style: "margin-left: 8px;", {"★".repeat(usize::from(r.rating))} }
                    span { style: "margin-left: 8px; {MUTED}", {short_date(r.created_at)} }
                    if let Some(ref text) = r.comment {
                        p { "{text}" }
                    }
                }
            }

            if user.is_some() {
                div { style: CARD,
                    h4 { if mine.is_some() { "Update your review" } else { "Write a review" } }
                    div { style: "display: flex; gap: 4px; font-size: 22px;",
                        for star in 1..=5u8 {
                            span {
                                key: "{star}",
                                style: "cursor: pointer;",
                                onclick: move |_| rating.set(star),
                                if star <= rating() { "★" } else { "☆" }
                            }
                        }
                    }
                    textarea {
                        style: INPUT,
                        placeholder: "Share your experience (optional)",
                        value: "{comment}",
                        oninput: move |evt| comment.set(evt.value()),
                    }
                    div { style: "display: flex; gap: 8px;",
                        button {
                            style: BUTTON,
                            disabled: submitting(),
                            onclick: {
                                let svc = svc.clone();
                                let business_id = business_id.clone();
                                let mine = mine.clone();
                                move |_| {
                                    let svc = svc.clone();
                                    let business_id = business_id.clone();
                                    let existing = mine.as_ref().map(|r| r.id.clone());
                                    let text = comment().trim().to_owned();
                                    let text = (!text.is_empty()).then_some(text);
                                    submitting.set(true);
                                    spawn(async move {
                                        let result = match existing {
                                            Some(review) => svc.client().update_review(&review, rating(), text).await,
                                            None => svc.client().create_review(&business_id, rating(), text).await,
                                        };
                                        match result {
                                            Ok(()) => {
                                                let mut state = state;
                                                state.write().notice = Some(Notice::info("Review saved", "Thanks for your feedback."));
                                                reviews.restart();
                                            }
                                            Err(e @ PandiError::Validation(_)) => report(state, nav, &e, "Rating Required"),
                                            Err(e) => report(state, nav, &e, "Submission Failed"),
                                        }
                                        submitting.set(false);
                                    });
                                }
                            },
                            if submitting() { "Saving..." } else { "Submit review" }
                        }
                        if let Some(ref existing) = mine {
                            button {
                                style: BUTTON_OUTLINE,
                                onclick: {
                                    let svc = svc.clone();
                                    let review = existing.id.clone();
                                    move |_| {
                                        let svc = svc.clone();
                                        let review = review.clone();
                                        spawn(async move {
                                            match svc.client().delete_review(&review).await {
                                                Ok(()) => {
                                                    rating.set(0);
                                                    comment.set(String::new());
                                                    reviews.restart();
                                                }
                                                Err(e) => report(state, nav, &e, "Delete Failed"),
                                            }
                                        });
                                    }
                                },
                                "Delete my review"
                            }
                        }
                    }
                }
            } else {
                p { style: MUTED,
                    Link { to: Route::Login {}, "Sign in" }
                    " to leave a review."
                }
            }
        }
    }
}

#[component]
fn ContactBusiness(business_id: RecordId) -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<AppState>>();
    let nav = use_navigator();
    let mut form = use_signal(|| {
        let user = state.read().user.clone();
        ContactMessage {
            name: user.as_ref().map(|u| u.display_name()).unwrap_or_default(),
            email: user.map(|u| u.email).unwrap_or_default(),
            ..Default::default()
        }
    });

    rsx! {
        section { style: "margin: 24px 0;",
            h3 { "Send a message" }
            input { style: INPUT, placeholder: "Your name", value: "{form.read().name}",
                oninput: move |evt| form.write().name = evt.value() }
            input { style: INPUT, placeholder: "Email", value: "{form.read().email}",
                oninput: move |evt| form.write().email = evt.value() }
            input { style: INPUT, placeholder: "Subject", value: "{form.read().subject}",
                oninput: move |evt| form.write().subject = evt.value() }
            textarea { style: INPUT, placeholder: "Message", value: "{form.read().message}",
                oninput: move |evt| form.write().message = evt.value() }
            button {
                style: BUTTON,
                onclick: move |_| {
                    let svc = svc.clone();
                    let business_id = business_id.clone();
                    let message = form.read().clone();
                    spawn(async move {
                        match svc.client().contact_business(&business_id, &message).await {
                            Ok(()) => {
                                form.write().subject.clear();
                                form.write().message.clear();
                                state.write().notice = Some(Notice::info("Message sent", "The business will get back to you."));
                            }
                            Err(e) => report(state, nav, &e, "Message Failed"),
                        }
                    });
                },
                "Send"
            }
        }
    }
}

/// Listings owned by the signed-in business account.
#[component]
pub fn MyListings() -> Element {
    rsx! {
        Guarded { required: Some(UserType::Business),
            MyListingsInner {}
        }
    }
}

#[component]
fn MyListingsInner() -> Element {
    let svc = use_context::<AppServices>();
    let state = use_context::<Signal<AppState>>();
    let nav = use_navigator();

    let mut listings = use_resource({
        let svc = svc.clone();
        move || {
            let svc = svc.clone();
            async move { svc.client().my_businesses().await }
        }
    });

    let body = match &*listings.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load your listings: {e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! { Empty { message: "You have not listed a business yet." } },
        Some(Ok(list)) => rsx! {
            for b in list.iter() {
                div { key: "{b.id}", style: CARD,
                    Link { to: Route::BusinessDetails { id: b.id.to_string() }, strong { "{b.name}" } }
                    p { style: MUTED, "{b.category} · {b.location}" }
                    button {
                        style: BUTTON_OUTLINE,
                        onclick: {
                            let svc = svc.clone();
                            let id = b.id.clone();
                            move |_| {
                                let svc = svc.clone();
                                let id = id.clone();
                                spawn(async move {
                                    match svc.client().delete_business(&id).await {
                                        Ok(()) => listings.restart(),
                                        Err(e) => report(state, nav, &e, "Delete Failed"),
                                    }
                                });
                            }
                        },
                        "Delete"
                    }
                }
            }
        },
    };

    rsx! {
        div {
            h1 { "My listings" }
            {body}
        }
    }
}
