// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service requests — the public list, the owner's own requests with status
// control, and the post-a-request form.

use dioxus::prelude::*;

use pandi_core::listing::{CATEGORIES, ListingQuery, showing_caption};
use pandi_core::types::{RecordId, RequestStatus, ServiceRequestFilter, ServiceRequestInput};

use crate::Route;
use crate::pages::common::{
    BUTTON, BUTTON_OUTLINE, CARD, Empty, Guarded, INPUT, Loading, MUTED, SearchBar, distinct,
    price, report, short_date,
};
use crate::services::app_services::AppServices;
use crate::state::{AppState, Notice};

#[component]
pub fn ServiceRequests() -> Element {
    let svc = use_context::<AppServices>();
    let text = use_signal(String::new);
    let category = use_signal(String::new);
    let area = use_signal(String::new);

    // Category narrows on the server; text and location narrow locally.
    let requests = use_resource(move || {
        let svc = svc.clone();
        let filter = ServiceRequestFilter {
            category: ListingQuery {
                category: Some(category()),
                ..Default::default()
            }
            .category_filter(),
            ..Default::default()
        };
        async move { svc.client().service_requests(&filter).await }
    });

    let query = ListingQuery {
        text: text(),
        category: None,
        area: Some(area()),
    };
    let categories: Vec<String> = CATEGORIES.iter().map(|c| c.to_string()).collect();

    let body = match &*requests.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load requests: {e}" } },
        Some(Ok(all)) => {
            let shown = query.apply(all);
            let areas = distinct(all.iter().map(|r| r.location.as_str()));
            rsx! {
                SearchBar { text, category, area, categories, areas }
                p { style: MUTED, {showing_caption(shown.len(), all.len(), "requests")} }
                if shown.is_empty() {
                    Empty { message: "No service requests match your search." }
                }
                for r in shown {
                    Link { key: "{r.id}", to: Route::RequestDetails { id: r.id.to_string() },
                        style: "text-decoration: none; color: inherit;",
                        div { style: CARD,
                            div { style: "display: flex; justify-content: space-between;",
                                strong { "{r.title}" }
                                span { style: MUTED, {r.status.label()} }
                            }
                            p { style: MUTED, "{r.category} · {r.location} · Budget {price(r.budget)}" }
                            p { style: MUTED, "Posted by {r.requester.display_name()} {short_date(r.created_at)}" }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { "Service requests" }
                Link { to: Route::PostRequest {}, "Post a request" }
            }
            {body}
        }
    }
}

#[component]
pub fn MyRequests() -> Element {
    rsx! {
        Guarded { required: None,
            MyRequestsInner {}
        }
    }
}

#[component]
fn MyRequestsInner() -> Element {
    let svc = use_context::<AppServices>();
    let state = use_context::<Signal<AppState>>();
    let nav = use_navigator();

    let mut requests = use_resource({
        let svc = svc.clone();
        move || {
            let svc = svc.clone();
            async move { svc.client().my_service_requests().await }
        }
    });

    let change_status = {
        let svc = svc.clone();
        move |id: RecordId, value: String| {
            let Some(status) = RequestStatus::parse(&value) else {
                return;
            };
            let svc = svc.clone();
            spawn(async move {
                match svc.client().update_request_status(&id, status).await {
                    Ok(()) => requests.restart(),
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
                match svc.client().delete_service_request(&id).await {
                    Ok(()) => requests.restart(),
                    Err(e) => report(state, nav, &e, "Delete Failed"),
                }
            });
        }
    };

    let body = match &*requests.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load your requests: {e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            Empty { message: "You have not posted any requests yet." }
        },
        Some(Ok(list)) => rsx! {
            for r in list.iter() {
                div { key: "{r.id}", style: CARD,
                    Link { to: Route::RequestDetails { id: r.id.to_string() }, strong { "{r.title}" } }
                    p { style: MUTED, "{r.category} · {r.location} · {r.comments.len()} comments" }
                    div { style: "display: flex; gap: 8px; align-items: center;",
                        select {
                            style: "padding: 6px; border: 1px solid #ccc; border-radius: 6px;",
                            value: r.status.as_str(),
                            onchange: {
                                let change_status = change_status.clone();
                                let id = r.id.clone();
                                move |evt: Event<FormData>| change_status(id.clone(), evt.value())
                            },
                            for s in RequestStatus::ALL {
                                option { key: "{s.as_str()}", value: s.as_str(), {s.label()} }
                            }
                        }
                        button {
                            style: BUTTON_OUTLINE,
                            onclick: {
                                let remove = remove.clone();
                                let id = r.id.clone();
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
            h1 { "My requests" }
            {body}
        }
    }
}

#[component]
pub fn PostRequest() -> Element {
    rsx! {
        Guarded { required: None,
            PostRequestForm {}
        }
    }
}

#[component]
fn PostRequestForm() -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<AppState>>();
    let nav = use_navigator();
    let mut form = use_signal(|| {
        let email = state.read().user.as_ref().map(|u| u.email.clone());
        ServiceRequestInput {
            category: CATEGORIES[0].into(),
            contact_email: email.unwrap_or_default(),
            ..Default::default()
        }
    });
    let mut budget = use_signal(String::new);
    let mut saving = use_signal(|| false);

    rsx! {
        div {
            h1 { "Post a service request" }
            input { style: INPUT, placeholder: "Title", value: "{form.read().title}",
                oninput: move |evt| form.write().title = evt.value() }
            textarea { style: INPUT, placeholder: "Describe what you need", value: "{form.read().description}",
                oninput: move |evt| form.write().description = evt.value() }
            select { style: INPUT, value: "{form.read().category}",
                onchange: move |evt| form.write().category = evt.value(),
                for c in CATEGORIES {
                    option { key: "{c}", value: c, "{c}" }
                }
            }
            input { style: INPUT, placeholder: "Location", value: "{form.read().location}",
                oninput: move |evt| form.write().location = evt.value() }
            input { style: INPUT, placeholder: "Budget (optional)", value: "{budget}",
                oninput: move |evt| budget.set(evt.value()) }
            input { style: INPUT, placeholder: "Contact phone", value: "{form.read().contact_phone}",
                oninput: move |evt| form.write().contact_phone = evt.value() }
            input { style: INPUT, placeholder: "Contact email", value: "{form.read().contact_email}",
                oninput: move |evt| form.write().contact_email = evt.value() }
            button {
                style: BUTTON,
                disabled: saving(),
                onclick: move |_| {
                    let svc = svc.clone();
                    let mut input = form.read().clone();
                    input.budget = budget().trim().parse().ok();
                    saving.set(true);
                    spawn(async move {
                        match svc.client().create_service_request(&input).await {
                            Ok(()) => {
                                state.write().notice = Some(Notice::info("Request posted", "Providers can now send you offers."));
                                nav.push(Route::MyRequests {});
                            }
                            Err(e) => report(state, nav, &e, "Submission Failed"),
                        }
                        saving.set(false);
                    });
                },
                if saving() { "Posting..." } else { "Post request" }
            }
        }
    }
}
