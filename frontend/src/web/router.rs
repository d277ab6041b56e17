//! Router service, the history engine.
//!
//! Every touch of `window.history` is concentrated here. The session signal
//! is injected so the router stays decoupled from the auth module; access is
//! re-checked on every navigation, on popstate and whenever the session
//! signal changes.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, RouteAccess};
use crate::log::log_info;
use reserva_shared::SessionUser;

/// Current browser path.
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Used for redirects, so denied targets never enter the history stack.
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Router service.
///
/// Wraps all route transitions and drives the UI through a signal. The
/// session is an injected signal, so the guard always sees current state.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    session: Signal<Option<SessionUser>>,
}

impl RouterService {
    fn new(session: Signal<Option<SessionUser>>) -> Self {
        // Initial route comes from the URL; unknown paths land on home.
        let initial = AppRoute::parse(&current_path());
        if initial.is_none() {
            replace_history_state(AppRoute::Home.to_path());
        }
        let (current_route, set_route) = signal(initial.unwrap_or_default());

        Self {
            current_route,
            set_route,
            session,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Navigation entry point: parse, guard, then load.
    pub fn navigate(&self, path: &str) {
        match AppRoute::parse(path) {
            Some(route) => self.navigate_to_route(route, true),
            // Same treatment as an unknown initial URL.
            None => self.navigate_to_route(AppRoute::Home, false),
        }
    }

    /// Typed navigation for programmatic jumps.
    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// `use_push` selects pushState over replaceState. Redirected targets
    /// always replace, whatever the caller asked for.
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let session = self.session.get_untracked();

        let destination = match target_route.evaluate_guard(session.as_ref()) {
            RouteAccess::RedirectLogin => {
                log_info!("[Router] Access denied, redirecting to login.");
                AppRoute::auth_failure_redirect()
            }
            RouteAccess::RedirectHome => {
                log_info!("[Router] Admin area requires the admin role, redirecting home.");
                AppRoute::Home
            }
            RouteAccess::Allow
                if target_route.should_redirect_when_authenticated() && session.is_some() =>
            {
                AppRoute::auth_success_redirect()
            }
            RouteAccess::Allow => target_route,
        };

        if use_push && destination == target_route {
            push_history_state(destination.to_path());
        } else {
            replace_history_state(destination.to_path());
        }
        self.set_route.set(destination);
    }

    /// Back/forward buttons re-run the guard like any other navigation.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session = self.session;

        let closure = Closure::<dyn Fn()>::new(move || {
            let Some(target_route) = AppRoute::parse(&current_path()) else {
                replace_history_state(AppRoute::Home.to_path());
                set_route.set(AppRoute::Home);
                return;
            };

            match target_route.evaluate_guard(session.get_untracked().as_ref()) {
                RouteAccess::Allow => set_route.set(target_route),
                RouteAccess::RedirectLogin => {
                    let redirect = AppRoute::auth_failure_redirect();
                    replace_history_state(redirect.to_path());
                    set_route.set(redirect);
                }
                RouteAccess::RedirectHome => {
                    replace_history_state(AppRoute::Home.to_path());
                    set_route.set(AppRoute::Home);
                }
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Leak the closure to keep the listener alive.
        closure.forget();
    }

    /// Re-evaluates the current route whenever the session changes. This is
    /// the path that lands forced logouts (401 expiry) on the login page,
    /// and it also guards the very first render.
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        Effect::new(move |_| {
            let user = session.get();
            let route = current_route.get_untracked();

            match route.evaluate_guard(user.as_ref()) {
                RouteAccess::Allow => {
                    // Fresh sign-in while on the login page moves forward.
                    if route.should_redirect_when_authenticated() && user.is_some() {
                        let redirect = AppRoute::auth_success_redirect();
                        push_history_state(redirect.to_path());
                        set_route.set(redirect);
                        log_info!("[Router] Signed in, leaving the login page.");
                    }
                }
                RouteAccess::RedirectLogin => {
                    let redirect = AppRoute::auth_failure_redirect();
                    replace_history_state(redirect.to_path());
                    set_route.set(redirect);
                    log_info!("[Router] Session ended, redirecting to login.");
                }
                RouteAccess::RedirectHome => {
                    replace_history_state(AppRoute::Home.to_path());
                    set_route.set(AppRoute::Home);
                    log_info!("[Router] Admin area denied, redirecting home.");
                }
            }
        });
    }
}

/// Builds the router, wires its listeners and provides it into context.
fn provide_router(session: Signal<Option<SessionUser>>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI components
// ============================================================================

/// Router root, provides the routing context. Mount once at the app root.
#[component]
pub fn Router(
    /// Session signal consumed by the access guard.
    session: Signal<Option<SessionUser>>,
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// Renders whatever view the matcher returns for the current route.
#[component]
pub fn RouterOutlet(
    /// Route matching function: current route in, view out.
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// In-app anchor; intercepts the click and runs it through the guard.
#[component]
pub fn Link(
    /// Target path.
    #[prop(into)]
    to: String,
    #[prop(into, optional)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let to_clone = to.clone();
    let on_click = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&to_clone);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
