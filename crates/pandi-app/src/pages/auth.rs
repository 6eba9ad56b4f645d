// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sign-in and sign-up forms.

use dioxus::prelude::*;

use pandi_core::types::{SignupRequest, UserType};

use crate::Route;
use crate::pages::common::{BUTTON, CARD, INPUT, MUTED, report};
use crate::services::app_services::AppServices;
use crate::state::{AppState, Notice};

fn user_type_from(value: &str) -> UserType {
    match value {
        "business" => UserType::Business,
        _ => UserType::Customer,
    }
}

#[component]
fn AccountTypeSelect(mut user_type: Signal<UserType>) -> Element {
    rsx! {
        select {
            style: INPUT,
            value: user_type.read().as_str(),
            onchange: move |evt| user_type.set(user_type_from(&evt.value())),
            option { value: "customer", "Customer" }
            option { value: "business", "Business" }
        }
    }
}

#[component]
pub fn Login() -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<AppState>>();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let user_type = use_signal(|| UserType::Customer);
    let mut busy = use_signal(|| false);

    rsx! {
        div { style: "max-width: 380px; margin: 32px auto; {CARD}",
            h1 { "Sign in" }
            input { style: INPUT, r#type: "email", placeholder: "Email", value: "{email}",
                oninput: move |evt| email.set(evt.value()) }
            input { style: INPUT, r#type: "password", placeholder: "Password", value: "{password}",
                oninput: move |evt| password.set(evt.value()) }
            AccountTypeSelect { user_type }
            button {
                style: BUTTON,
                disabled: busy(),
                onclick: move |_| {
                    let svc = svc.clone();
                    busy.set(true);
                    spawn(async move {
                        match svc.client().login(&email(), &password(), user_type()).await {
                            Ok(user) => {
                                let greeting = format!("Signed in as {}.", user.display_name());
                                state.write().user = Some(user);
                                state.write().notice = Some(Notice::info("Welcome back", greeting));
                                nav.push(Route::Home {});
                            }
                            Err(e) => report(state, nav, &e, "Login Failed"),
                        }
                        busy.set(false);
                    });
                },
                if busy() { "Signing in..." } else { "Sign in" }
            }
            p { style: MUTED,
                "New here? "
                Link { to: Route::Signup {}, "Create an account" }
            }
        }
    }
}

#[component]
pub fn Signup() -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<AppState>>();
    let nav = use_navigator();
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let user_type = use_signal(|| UserType::Customer);
    let mut busy = use_signal(|| false);

    rsx! {
        div { style: "max-width: 380px; margin: 32px auto; {CARD}",
            h1 { "Create an account" }
            input { style: INPUT, placeholder: "First name", value: "{first_name}",
                oninput: move |evt| first_name.set(evt.value()) }
            input { style: INPUT, placeholder: "Last name", value: "{last_name}",
                oninput: move |evt| last_name.set(evt.value()) }
            input { style: INPUT, r#type: "email", placeholder: "Email", value: "{email}",
                oninput: move |evt| email.set(evt.value()) }
            input { style: INPUT, r#type: "password", placeholder: "Password", value: "{password}",
                oninput: move |evt| password.set(evt.value()) }
            AccountTypeSelect { user_type }
            button {
                style: BUTTON,
                disabled: busy(),
                onclick: move |_| {
                    let svc = svc.clone();
                    let request = SignupRequest {
                        first_name: first_name().trim().to_owned(),
                        last_name: last_name().trim().to_owned(),
                        email: email().trim().to_owned(),
                        password: password(),
                        user_type: user_type(),
                    };
                    busy.set(true);
                    spawn(async move {
                        match svc.client().signup(&request).await {
                            Ok(user) => {
                                state.write().user = Some(user);
                                state.write().notice = Some(Notice::info("Account created", "You are now signed in."));
                                nav.push(Route::Home {});
                            }
                            Err(e) => report(state, nav, &e, "Signup Failed"),
                        }
                        busy.set(false);
                    });
                },
                if busy() { "Creating account..." } else { "Sign up" }
            }
            p { style: MUTED,
                "Already registered? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
