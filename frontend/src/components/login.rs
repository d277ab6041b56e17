use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::{sign_in, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use reserva_shared::LoginForm;

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Rellena email y contraseña".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        let session = session.clone();
        spawn_local(async move {
            let credentials = LoginForm::new(email.get_untracked(), password.get_untracked());
            match sign_in(&api, &session, credentials).await {
                Ok(_) => router.navigate_to(AppRoute::Facilities),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto">
            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_submit>
                    <h1 class="card-title text-2xl">"Entrar"</h1>

                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">"Email"</span>
                        </label>
                        <input
                            id="email"
                            type="email"
                            placeholder="email"
                            class="input input-bordered w-full"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">"Contraseña"</span>
                        </label>
                        <input
                            id="password"
                            type="password"
                            placeholder="password"
                            class="input input-bordered w-full"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-control mt-4">
                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                            {move || {
                                if is_submitting.get() {
                                    view! {
                                        <span class="loading loading-spinner"></span>
                                        "Accediendo…"
                                    }
                                        .into_any()
                                } else {
                                    "Acceder".into_any()
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
