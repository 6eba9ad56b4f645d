// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pandi — local services marketplace
//
// Entry point. Initialises logging, backend services, app state, and launches
// the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;
use tokio::sync::broadcast::error::RecvError;

use pandi_core::human_errors::Severity;
use pandi_core::role::ServiceRole;
use pandi_core::types::UserType;
use pandi_session::SessionEvent;

use pages::auth::{Login, Signup};
use pages::businesses::{BusinessDetails, Businesses, MyListings};
use pages::common::{BUTTON_OUTLINE, report};
use pages::contact::Contact;
use pages::home::Home;
use pages::notifications::Notifications;
use pages::offerings::{MyOfferings, NewOffering, OfferingDetails, ProviderOfferings};
use pages::request_details::RequestDetails;
use pages::requests::{MyRequests, PostRequest, ServiceRequests};
use pages::settings::Settings;

use services::app_services::AppServices;
use state::AppState;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Pandi starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Home {},
    #[route("/businesses")]
    Businesses {},
    #[route("/businesses/:id")]
    BusinessDetails { id: String },
    #[route("/my-listings")]
    MyListings {},
    #[route("/service-requests")]
    ServiceRequests {},
    #[route("/service-requests/:id")]
    RequestDetails { id: String },
    #[route("/post-request")]
    PostRequest {},
    #[route("/my-requests")]
    MyRequests {},
    #[route("/provider-offerings")]
    ProviderOfferings {},
    #[route("/provider-offerings/:id")]
    OfferingDetails { id: String },
    #[route("/new-offering")]
    NewOffering {},
    #[route("/my-offerings")]
    MyOfferings {},
    #[route("/notifications")]
    Notifications {},
    #[route("/contact")]
    Contact {},
    #[route("/login")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[route("/settings")]
    Settings {},
}

/// Root component.
fn app() -> Element {
    let services = use_hook(|| {
        AppServices::init()
            .inspect(|_| tracing::info!("backend services initialised"))
            .or_else(|e| {
                tracing::error!(error = %e, "persistent storage failed, using in-memory fallback");
                AppServices::fallback()
            })
            .map_err(|e| e.to_string())
    });

    // Fixed after the first render, so the hook order below never changes.
    let svc = match services {
        Ok(svc) => svc,
        Err(message) => return rsx! { StartupFailed { message } },
    };

    use_context_provider(|| svc.clone());
    let mut state = use_context_provider(|| Signal::new(AppState::new(&svc)));

    // Mirror session changes (including a logout forced by a failed token
    // refresh) into the UI state.
    use_hook(move || {
        let mut events = svc.session().subscribe();
        let session = svc.session().clone();
        spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SessionEvent::LoggedIn(user) | SessionEvent::UserUpdated(user)) => {
                        state.write().user = Some(user);
                    }
                    Ok(SessionEvent::TokenRefreshed) => {
                        state.write().user = session.user();
                    }
                    Ok(SessionEvent::LoggedOut) => {
                        state.write().user = None;
                    }
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "session events dropped, resyncing");
                        state.write().user = session.user();
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    });

    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn StartupFailed(message: String) -> Element {
    rsx! {
        div { style: "padding: 32px; font-family: system-ui, -apple-system, sans-serif;",
            h1 { "Pandi could not start" }
            p { style: "color: #666;", "{message}" }
        }
    }
}

/// Persistent layout wrapping all pages: navigation, role toggle and the
/// notice banner.
#[component]
fn Shell() -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<AppState>>();
    let nav = use_navigator();

    let user = state.read().user.clone();
    let role = state.read().role;
    let notice = state.read().notice.clone();
    let is_business = user.as_ref().is_some_and(|u| u.user_type == UserType::Business);

    let toggle_role = {
        let svc = svc.clone();
        move |_: MouseEvent| match svc.toggle_role() {
            Ok(next) => state.write().role = next,
            Err(e) => report(state, nav, &e, "Role Change Failed"),
        }
    };

    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",

            header {
                style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: center; padding: 10px 16px; border-bottom: 1px solid #e0e0e0; background: #fafafa;",
                Link { to: Route::Home {}, style: "font-weight: bold; text-decoration: none; color: #2563eb;", "Pandi" }
                NavLink { to: Route::Businesses {}, label: "Businesses" }
                NavLink { to: Route::ServiceRequests {}, label: "Requests" }
                NavLink { to: Route::ProviderOfferings {}, label: "Services" }
                if is_business {
                    NavLink { to: Route::MyListings {}, label: "My listings" }
                } else if user.is_some() {
                    if role == ServiceRole::Seeker {
                        NavLink { to: Route::MyRequests {}, label: "My requests" }
                    } else {
                        NavLink { to: Route::MyOfferings {}, label: "My services" }
                    }
                    NavLink { to: Route::Notifications {}, label: "Notifications" }
                }
                NavLink { to: Route::Contact {}, label: "Contact" }
                NavLink { to: Route::Settings {}, label: "Settings" }

                div { style: "flex: 1;" }

                if !is_business {
                    button {
                        style: "display: flex; gap: 2px; padding: 2px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                        title: "Switch to {role.toggle().label()}",
                        onclick: toggle_role,
                        for choice in [ServiceRole::Seeker, ServiceRole::Provider] {
                            span { key: "{choice.as_str()}", style: toggle_style(choice == role),
                                {choice.label()}
                            }
                        }
                    }
                }

                if let Some(ref u) = user {
                    span { style: "font-size: 13px; color: #444;", "{u.display_name()}" }
                    button {
                        style: BUTTON_OUTLINE,
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                svc.client().logout();
                                state.write().user = None;
                                nav.push(Route::Home {});
                            }
                        },
                        "Sign out"
                    }
                } else {
                    NavLink { to: Route::Login {}, label: "Sign in" }
                    NavLink { to: Route::Signup {}, label: "Sign up" }
                }
            }

            if let Some(n) = notice {
                div {
                    style: notice_style(n.severity),
                    span {
                        strong { "{n.title}" }
                        if !n.body.is_empty() {
                            ": {n.body}"
                        }
                        if n.retriable {
                            em { style: "margin-left: 8px;", "You can try again." }
                        }
                    }
                    button {
                        style: "border: none; background: transparent; cursor: pointer;",
                        onclick: move |_| state.write().notice = None,
                        "✕"
                    }
                }
            }

            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 16px; max-width: 960px; width: 100%; margin: 0 auto; box-sizing: border-box;",
                Outlet::<Route> {}
            }
        }
    }
}

fn toggle_style(active: bool) -> &'static str {
    if active {
        "padding: 4px 10px; border-radius: 6px; background: #2563eb; color: white; font-size: 13px;"
    } else {
        "padding: 4px 10px; border-radius: 6px; color: #444; font-size: 13px;"
    }
}

fn notice_style(severity: Option<Severity>) -> &'static str {
    match severity {
        None => "display: flex; justify-content: space-between; padding: 10px 16px; background: #dcfce7; color: #166534;",
        Some(Severity::Transient) => "display: flex; justify-content: space-between; padding: 10px 16px; background: #fef3c7; color: #92400e;",
        Some(Severity::ActionRequired) => "display: flex; justify-content: space-between; padding: 10px 16px; background: #dbeafe; color: #1e40af;",
        Some(Severity::Permanent) => "display: flex; justify-content: space-between; padding: 10px 16px; background: #fee2e2; color: #991b1b;",
    }
}

#[component]
fn NavLink(to: Route, label: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "text-decoration: none; color: #333; font-size: 14px;",
            "{label}"
        }
    }
}
