// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Widgets and helpers shared by several pages.

use dioxus::prelude::*;

use pandi_core::access::RouteAccess;
use pandi_core::assets::{mailto_link, tel_link, whatsapp_link};
use pandi_core::error::PandiError;
use pandi_core::human_errors::humanize_error;
use pandi_core::listing::{ALL_CATEGORIES, ALL_LOCATIONS};
use pandi_core::types::UserType;

use crate::Route;
use crate::state::{AppState, Notice};

pub const CARD: &str = "padding: 12px; margin: 8px 0; border: 1px solid #e0e0e0; border-radius: 8px;";
pub const BUTTON: &str = "padding: 8px 14px; border-radius: 6px; border: none; background: #2563eb; color: white; font-size: 14px;";
pub const BUTTON_OUTLINE: &str = "padding: 6px 12px; border-radius: 6px; border: 1px solid #ccc; background: white; font-size: 13px;";
pub const INPUT: &str = "width: 100%; padding: 8px; border: 1px solid #ccc; border-radius: 6px; margin: 4px 0 10px; box-sizing: border-box;";
pub const MUTED: &str = "color: #666; font-size: 14px;";

/// Show `err` as a banner titled after the failed operation. Errors that
/// need a fresh sign-in also move to the login page.
pub fn report(mut state: Signal<AppState>, nav: Navigator, err: &PandiError, title: &str) {
    let human = humanize_error(err);
    tracing::warn!(error = %err, title, "operation failed");
    let sign_in = human.sign_in;
    let human = if sign_in { human } else { human.titled(title) };
    state.write().notice = Some(Notice::error(human));
    if sign_in {
        nav.push(Route::Login {});
    }
}

/// Format an optional timestamp as a short date.
pub fn short_date(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map(|t| t.format("%d %b %Y").to_string())
        .unwrap_or_default()
}

/// Render a price, or "Negotiable".
pub fn price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("₹{v:.0}"),
        None => "Negotiable".into(),
    }
}

/// Renders `children` only when the route guard allows it.
#[component]
pub fn Guarded(required: Option<UserType>, children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let access = RouteAccess::check(state.read().user.as_ref(), required);

    match access {
        RouteAccess::Allowed => children,
        RouteAccess::LoginRequired => rsx! {
            div { style: "text-align: center; margin: 48px 0;",
                p { style: MUTED, "Please sign in to continue." }
                Link { to: Route::Login {}, "Sign in" }
            }
        },
        RouteAccess::WrongUserType => rsx! {
            div { style: "text-align: center; margin: 48px 0;",
                p { style: MUTED, "This page is not available for your account type." }
                Link { to: Route::Home {}, "Go home" }
            }
        },
    }
}

/// Call, WhatsApp and e-mail links.
#[component]
pub fn ContactLinks(phone: String, email: String, whatsapp: Option<String>) -> Element {
    let whatsapp = whatsapp.filter(|w| !w.trim().is_empty()).unwrap_or_else(|| phone.clone());
    rsx! {
        div { style: "display: flex; gap: 8px; flex-wrap: wrap; margin: 8px 0;",
            if !phone.trim().is_empty() {
                a { href: tel_link(&phone), style: BUTTON, "Call {phone}" }
                a { href: whatsapp_link(&whatsapp), style: BUTTON, "WhatsApp" }
            }
            if !email.trim().is_empty() {
                a { href: mailto_link(&email), style: BUTTON_OUTLINE, "{email}" }
            }
        }
    }
}

/// Free-text search with category and location selects.
#[component]
pub fn SearchBar(
    mut text: Signal<String>,
    mut category: Signal<String>,
    mut area: Signal<String>,
    categories: Vec<String>,
    areas: Vec<String>,
) -> Element {
    rsx! {
        div { style: "display: flex; gap: 8px; flex-wrap: wrap; margin: 8px 0;",
            input {
                style: "flex: 2; min-width: 180px; padding: 8px; border: 1px solid #ccc; border-radius: 6px;",
                placeholder: "Search...",
                value: "{text}",
                oninput: move |evt| text.set(evt.value()),
            }
            select {
                style: "flex: 1; padding: 8px; border: 1px solid #ccc; border-radius: 6px;",
                value: "{category}",
                onchange: move |evt| category.set(evt.value()),
                option { value: ALL_CATEGORIES, "{ALL_CATEGORIES}" }
                for c in categories.iter() {
                    option { key: "{c}", value: "{c}", "{c}" }
                }
            }
            select {
                style: "flex: 1; padding: 8px; border: 1px solid #ccc; border-radius: 6px;",
                value: "{area}",
                onchange: move |evt| area.set(evt.value()),
                option { value: ALL_LOCATIONS, "{ALL_LOCATIONS}" }
                for a in areas.iter() {
                    option { key: "{a}", value: "{a}", "{a}" }
                }
            }
        }
    }
}

/// Distinct non-empty values, sorted, for a filter select.
pub fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect();
    out.sort();
    out.dedup();
    out
}

#[component]
pub fn Loading() -> Element {
    rsx! {
        p { style: "text-align: center; color: #aaa; margin: 48px 0;", "Loading..." }
    }
}

#[component]
pub fn Empty(message: String) -> Element {
    rsx! {
        p { style: "text-align: center; color: #aaa; margin: 48px 0;", "{message}" }
    }
}
