// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Offer notifications for the signed-in user.

use dioxus::prelude::*;

use crate::Route;
use crate::pages::common::{CARD, Empty, Guarded, Loading, MUTED, short_date};
use crate::services::app_services::AppServices;

#[component]
pub fn Notifications() -> Element {
    rsx! {
        Guarded { required: None,
            NotificationList {}
        }
    }
}

#[component]
fn NotificationList() -> Element {
    let svc = use_context::<AppServices>();
    let events = use_resource(move || {
        let svc = svc.clone();
        async move { svc.client().notifications().await }
    });

    let (count, body) = match &*events.read() {
        None => (0, rsx! { Loading {} }),
        Some(Err(e)) => (0, rsx! { p { style: MUTED, "Could not load notifications: {e}" } }),
        Some(Ok(list)) if list.is_empty() => (0, rsx! { Empty { message: "Nothing new." } }),
        Some(Ok(list)) => (
            list.len(),
            rsx! {
                for n in list.iter() {
                    div { key: "{n.id}", style: CARD,
                        p { {n.headline()} }
                        div { style: "display: flex; justify-content: space-between;",
                            span { style: MUTED, {short_date(n.updated_at)} }
                            if let Some(id) = n.request.id() {
                                Link { to: Route::RequestDetails { id: id.to_string() }, "View request" }
                            }
                        }
                    }
                }
            },
        ),
    };

    rsx! {
        div {
            div { style: "display: flex; align-items: center; gap: 8px;",
                h1 { "Notifications" }
                if count > 0 {
                    span { style: "background: #dc2626; color: white; border-radius: 10px; padding: 2px 8px; font-size: 12px;",
                        "{count}"
                    }
                }
            }
            {body}
        }
    }
}
