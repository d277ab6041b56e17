use leptos::prelude::*;

use crate::auth::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

/// Top navigation bar. Links always render; the guard decides what a click
/// actually reaches. The admin entry only shows for the admin role.
#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let user = session.user_signal();
    let is_admin = session.is_admin_signal();

    let on_logout = {
        let session = session.clone();
        move |_| {
            session.logout();
            router.navigate_to(AppRoute::Login);
        }
    };

    view! {
        <div class="navbar bg-base-100 shadow-sm px-4">
            <div class="navbar-start">
                <Link to="/" class="btn btn-ghost text-lg font-bold">
                    "Reserva Sport"
                </Link>
            </div>
            <div class="navbar-center gap-1">
                <Link to="/facilities" class="btn btn-ghost btn-sm">
                    "Instalaciones"
                </Link>
                <Link to="/slots" class="btn btn-ghost btn-sm">
                    "Reservar"
                </Link>
                <Link to="/my" class="btn btn-ghost btn-sm">
                    "Mis reservas"
                </Link>
                <Show when=move || is_admin.get()>
                    <Link to="/admin/reservations" class="btn btn-ghost btn-sm">
                        "Administración"
                    </Link>
                </Show>
            </div>
            <div class="navbar-end gap-2">
                <Show
                    when=move || user.get().is_some()
                    fallback=|| {
                        view! {
                            <Link to="/login" class="btn btn-primary btn-sm">
                                "Entrar"
                            </Link>
                        }
                    }
                >
                    <span class="text-sm opacity-80">
                        {move || {
                            user.get()
                                .map(|u| format!("Hola, {} ({})", u.nombre, u.rol))
                                .unwrap_or_default()
                        }}
                    </span>
                    <button class="btn btn-outline btn-sm" on:click=on_logout.clone()>
                        "Salir"
                    </button>
                </Show>
            </div>
        </div>
    }
}
