// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page — top-rated businesses and a role-dependent preview: providers see
// the newest open requests, seekers the newest active offerings.

use dioxus::prelude::*;

use pandi_core::role::ServiceRole;
use pandi_core::types::{
    BusinessFilter, OfferingFilter, OfferingStatus, RequestStatus, ServiceRequestFilter,
};

use crate::Route;
use crate::pages::common::{CARD, Empty, Loading, MUTED, price};
use crate::services::app_services::AppServices;
use crate::state::AppState;

const PREVIEW_LIMIT: usize = 4;

#[component]
pub fn Home() -> Element {
    let state = use_context::<Signal<AppState>>();
    let role = state.read().role;

    rsx! {
        div {
            h1 { "Find trusted local services" }
            p { style: MUTED,
                "Browse businesses, post what you need, or offer your skills nearby."
            }
            TopBusinesses {}
            if role == ServiceRole::Provider {
                LatestRequests {}
            } else {
                LatestOfferings {}
            }
        }
    }
}

#[component]
fn TopBusinesses() -> Element {
    let svc = use_context::<AppServices>();
    let businesses = use_resource(move || {
        let svc = svc.clone();
        async move {
            let mut list = svc.client().businesses(&BusinessFilter::default()).await?;
            list.sort_by(|a, b| b.rating.total_cmp(&a.rating));
            list.truncate(PREVIEW_LIMIT);
            Ok::<_, pandi_core::PandiError>(list)
        }
    });

    let body = match &*businesses.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load businesses: {e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! { Empty { message: "No businesses listed yet." } },
        Some(Ok(list)) => rsx! {
            for b in list.iter() {
                Link { key: "{b.id}", to: Route::BusinessDetails { id: b.id.to_string() },
                    style: "text-decoration: none; color: inherit;",
                    div { style: CARD,
                        strong { "{b.name}" }
                        p { style: MUTED, "{b.category} · {b.location} · ★ {b.rating:.1}" }
                    }
                }
            }
        },
    };

    rsx! {
        section { style: "margin: 16px 0;",
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h3 { "Top rated businesses" }
                Link { to: Route::Businesses {}, "View all" }
            }
            {body}
        }
    }
}

#[component]
fn LatestRequests() -> Element {
    let svc = use_context::<AppServices>();
    let requests = use_resource(move || {
        let svc = svc.clone();
        async move {
            let filter = ServiceRequestFilter {
                status: Some(RequestStatus::Open),
                ..Default::default()
            };
            let mut list = svc.client().service_requests(&filter).await?;
            list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            list.truncate(PREVIEW_LIMIT);
            Ok::<_, pandi_core::PandiError>(list)
        }
    });

    let body = match &*requests.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load requests: {e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! { Empty { message: "No open requests right now." } },
        Some(Ok(list)) => rsx! {
            for r in list.iter() {
                Link { key: "{r.id}", to: Route::RequestDetails { id: r.id.to_string() },
                    style: "text-decoration: none; color: inherit;",
                    div { style: CARD,
                        strong { "{r.title}" }
                        p { style: MUTED, "{r.category} · {r.location} · Budget {price(r.budget)}" }
                    }
                }
            }
        },
    };

    rsx! {
        section { style: "margin: 16px 0;",
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h3 { "Requests you can respond to" }
                Link { to: Route::ServiceRequests {}, "View all" }
            }
            {body}
        }
    }
}

#[component]
fn LatestOfferings() -> Element {
    let svc = use_context::<AppServices>();
    let offerings = use_resource(move || {
        let svc = svc.clone();
        async move {
            let filter = OfferingFilter {
                status: Some(OfferingStatus::Active),
                ..Default::default()
            };
            let mut list = svc.client().provider_offerings(&filter).await?;
            list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            list.truncate(PREVIEW_LIMIT);
            Ok::<_, pandi_core::PandiError>(list)
        }
    });

    let body = match &*offerings.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load services: {e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! { Empty { message: "No services offered yet." } },
        Some(Ok(list)) => rsx! {
            for o in list.iter() {
                Link { key: "{o.id}", to: Route::OfferingDetails { id: o.id.to_string() },
                    style: "text-decoration: none; color: inherit;",
                    div { style: CARD,
                        strong { "{o.title}" }
                        p { style: MUTED, "{o.category} · {o.service_area} · From {price(o.base_price)}" }
                    }
                }
            }
        },
    };

    rsx! {
        section { style: "margin: 16px 0;",
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h3 { "Services available near you" }
                Link { to: Route::ProviderOfferings {}, "View all" }
            }
            {body}
        }
    }
}
