//! Reserva Sport front end.
//!
//! Context-driven layering:
//! - `web::route` / `web::router`: route domain model and history engine
//! - `auth`: token and session state
//! - `gateway` / `api`: the shared request envelope and the typed client
//! - `notify` / `inflight`: toasts and in-flight call bookkeeping
//! - `components`: UI layer

mod api;
mod auth;
mod components {
    pub mod admin_reservations;
    pub mod facilities;
    pub mod home;
    pub mod layout;
    pub mod login;
    pub mod my_reservations;
    pub mod slots;
    pub mod toaster;
}
mod config;
mod dates;
mod gateway;
mod inflight;
mod log;
mod notify;

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::ReservaApi;
use crate::auth::{SessionContext, TokenStore};
use crate::components::admin_reservations::AdminReservationsPage;
use crate::components::facilities::FacilitiesPage;
use crate::components::home::HomePage;
use crate::components::layout::Navbar;
use crate::components::login::LoginPage;
use crate::components::my_reservations::MyReservationsPage;
use crate::components::slots::SlotsPage;
use crate::components::toaster::Toaster;
use crate::config::ApiConfig;
use crate::gateway::Gateway;
use crate::notify::Notifier;

// Browser API wrappers: everything that touches web_sys lives under here.
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::{
        FetchTransport, HttpBody, HttpMethod, HttpRequest, HttpResponse, HttpTransport,
        TransportError,
    };
    pub use storage::{BrowserStorage, KeyValueStore};
    #[cfg(test)]
    pub(crate) use storage::tests::MemoryStore;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// Maps the current route to its view.
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Facilities => view! { <FacilitiesPage /> }.into_any(),
        AppRoute::Slots => view! { <SlotsPage /> }.into_any(),
        AppRoute::MyReservations => view! { <MyReservationsPage /> }.into_any(),
        AppRoute::AdminReservations => view! { <AdminReservationsPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. Platform services
    let storage: Arc<dyn web::KeyValueStore> = Arc::new(web::BrowserStorage);
    let tokens = TokenStore::new(storage.clone());

    // 2. Session, rehydrated synchronously so the first guard pass is right
    let session = SessionContext::new(storage, tokens.clone());
    provide_context(session.clone());

    // 3. Notifications
    let notifier = Notifier::new();
    provide_context(notifier);

    // 4. Gateway with the global 401 side effect wired in
    let gateway = {
        let session = session.clone();
        Gateway::new(
            &ApiConfig::from_env(),
            tokens,
            Arc::new(web::FetchTransport),
        )
        .with_unauthorized_hook(move || {
            session.expire();
            notifier.error("Sesión caducada. Vuelve a iniciar sesión.");
        })
    };
    provide_context(ReservaApi::new(gateway));

    // 5. Router gets the session signal injected for its guards
    let user = session.user_signal();

    view! {
        <Router session=user>
            <div class="min-h-screen bg-base-200">
                <Navbar />
                <Toaster />
                <main class="p-6">
                    <RouterOutlet matcher=route_matcher />
                </main>
            </div>
        </Router>
    }
}
