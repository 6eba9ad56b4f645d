// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contact page — the site-wide contact form, plus the inbox for business
// accounts.

use dioxus::prelude::*;

use pandi_core::types::{ContactMessage, UserType};

use crate::pages::common::{BUTTON, CARD, Empty, INPUT, Loading, MUTED, report};
use crate::services::app_services::AppServices;
use crate::state::{AppState, Notice};

#[component]
pub fn Contact() -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<AppState>>();
    let nav = use_navigator();
    let is_business = state
        .read()
        .user
        .as_ref()
        .is_some_and(|u| u.user_type == UserType::Business);
    let mut form = use_signal(|| {
        let user = state.read().user.clone();
        ContactMessage {
            name: user.as_ref().map(|u| u.display_name()).unwrap_or_default(),
            email: user.map(|u| u.email).unwrap_or_default(),
            ..Default::default()
        }
    });
    let mut phone = use_signal(String::new);

    rsx! {
        div {
            h1 { "Contact us" }
            p { style: MUTED, "Questions, feedback or a problem with a listing? Let us know." }
            input { style: INPUT, placeholder: "Your name", value: "{form.read().name}",
                oninput: move |evt| form.write().name = evt.value() }
            input { style: INPUT, r#type: "email", placeholder: "Email", value: "{form.read().email}",
                oninput: move |evt| form.write().email = evt.value() }
            input { style: INPUT, placeholder: "Phone (optional)", value: "{phone}",
                oninput: move |evt| phone.set(evt.value()) }
            input { style: INPUT, placeholder: "Subject", value: "{form.read().subject}",
                oninput: move |evt| form.write().subject = evt.value() }
            textarea { style: INPUT, placeholder: "Message", value: "{form.read().message}",
                oninput: move |evt| form.write().message = evt.value() }
            button {
                style: BUTTON,
                onclick: move |_| {
                    let svc = svc.clone();
                    let mut message = form.read().clone();
                    let number = phone().trim().to_owned();
                    message.phone = (!number.is_empty()).then_some(number);
                    spawn(async move {
                        match svc.client().send_contact(&message).await {
                            Ok(()) => {
                                form.write().subject.clear();
                                form.write().message.clear();
                                state.write().notice = Some(Notice::info("Message sent", "We will get back to you soon."));
                            }
                            Err(e) => report(state, nav, &e, "Message Failed"),
                        }
                    });
                },
                "Send message"
            }
            if is_business {
                Inbox {}
            }
        }
    }
}

#[component]
fn Inbox() -> Element {
    let svc = use_context::<AppServices>();
    let messages = use_resource(move || {
        let svc = svc.clone();
        async move { svc.client().contact_messages().await }
    });

    let body = match &*messages.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { p { style: MUTED, "Could not load messages: {e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! { Empty { message: "No messages yet." } },
        Some(Ok(list)) => rsx! {
            for (i, m) in list.iter().enumerate() {
                div { key: "{i}", style: CARD,
                    strong { "{m.subject}" }
                    p { style: MUTED, "{m.name} · {m.email}" }
                    p { "{m.message}" }
                }
            }
        },
    };

    rsx! {
        section { style: "margin: 24px 0;",
            h3 { "Messages received" }
            {body}
        }
    }
}
