use chrono::{Local, NaiveDate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::dates::{format_date, format_time};
use crate::inflight::{BusyTracker, FetchEpoch};
use crate::notify::use_notifier;
use reserva_shared::protocol::AdminReservationQuery;
use reserva_shared::{AdminReservation, ReservationStatus};


// ============================================================================
// Pure view helpers
// ============================================================================

/// One user's block in the grouped listing.
#[derive(Debug, Clone, PartialEq)]
pub struct UserGroup {
    pub usuario_id: i64,
    pub usuario_nombre: String,
    pub usuario_email: String,
    pub reservas: Vec<AdminReservation>,
}

/// Groups rows per user. Users sort by name, each user's bookings sort
/// newest first.
fn group_by_user(items: &[AdminReservation]) -> Vec<UserGroup> {
    let mut groups: Vec<UserGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.usuario_id == item.usuario_id) {
            Some(group) => group.reservas.push(item.clone()),
            None => groups.push(UserGroup {
                usuario_id: item.usuario_id,
                usuario_nombre: item.usuario_nombre.clone(),
                usuario_email: item.usuario_email.clone(),
                reservas: vec![item.clone()],
            }),
        }
    }
    for group in &mut groups {
        group
            .reservas
            .sort_by(|a, b| (b.fecha, b.hora_inicio).cmp(&(a.fecha, a.hora_inicio)));
    }
    groups.sort_by(|a, b| a.usuario_nombre.cmp(&b.usuario_nombre));
    groups
}

/// Case-insensitive match over the owner's name or email.
fn matches_user_filter(group: &UserGroup, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    group.usuario_nombre.to_lowercase().contains(&needle)
        || group.usuario_email.to_lowercase().contains(&needle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingBadge {
    Cancelada,
    Hoy,
    Pasada,
    Futura,
}

impl BookingBadge {
    fn label(&self) -> &'static str {
        match self {
            BookingBadge::Cancelada => "Cancelada",
            BookingBadge::Hoy => "Hoy",
            BookingBadge::Pasada => "Pasada",
            BookingBadge::Futura => "Futura",
        }
    }

    fn class(&self) -> &'static str {
        match self {
            BookingBadge::Cancelada => "badge badge-error",
            BookingBadge::Hoy => "badge badge-info",
            BookingBadge::Pasada => "badge badge-ghost",
            BookingBadge::Futura => "badge badge-success",
        }
    }
}

/// Cancelled wins over any temporal state.
fn badge_for(reserva: &AdminReservation, today: NaiveDate) -> BookingBadge {
    if reserva.is_cancelled() {
        BookingBadge::Cancelada
    } else if reserva.fecha == today {
        BookingBadge::Hoy
    } else if reserva.fecha < today {
        BookingBadge::Pasada
    } else {
        BookingBadge::Futura
    }
}

fn mark_cancelled(groups: &mut [UserGroup], id: i64) {
    for group in groups {
        if let Some(item) = group.reservas.iter_mut().find(|r| r.id == id) {
            item.estado = ReservationStatus::Cancelada;
        }
    }
}

fn total_reservas(groups: &[UserGroup]) -> usize {
    groups.iter().map(|g| g.reservas.len()).sum()
}

// ============================================================================
// Page
// ============================================================================

#[component]
pub fn AdminReservationsPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();

    let (groups, set_groups) = signal(Vec::<UserGroup>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (filtro_estado, set_filtro_estado) = signal(Option::<ReservationStatus>::None);
    let (filtro_usuario, set_filtro_usuario) = signal(String::new());
    let busy = BusyTracker::new();
    let epoch = FetchEpoch::new();

    // The estado filter is server-side and re-fetches; the user search
    // below filters the loaded page client-side.
    {
        let api = api.clone();
        Effect::new(move |_| {
            let estado = filtro_estado.get();
            let api = api.clone();
            let ticket = epoch.begin();
            set_loading.set(true);
            set_error_msg.set(None);
            spawn_local(async move {
                let query = AdminReservationQuery::with_estado(estado);
                let result = api.admin_reservations(&query).await;
                if !ticket.is_live() {
                    return;
                }
                match result {
                    Ok(page) => set_groups.set(group_by_user(&page.items)),
                    Err(e) => set_error_msg.set(Some(e.to_string())),
                }
                set_loading.set(false);
            });
        });
    }

    let visible_groups = Signal::derive(move || {
        let needle = filtro_usuario.get();
        groups
            .get()
            .into_iter()
            .filter(|g| matches_user_filter(g, &needle))
            .collect::<Vec<_>>()
    });

    let cancel = {
        let api = api.clone();
        move |id: i64| {
            let Some(guard) = busy.try_begin(id) else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                let _guard = guard;
                match api.admin_cancel_reservation(id).await {
                    Ok(()) => {
                        notifier.success("Reserva cancelada");
                        set_groups.try_update(|groups| mark_cancelled(groups, id));
                    }
                    Err(_) => notifier.error("No se pudo cancelar"),
                }
            });
        }
    };

    let on_estado_change = move |ev| {
        set_filtro_estado.set(match event_target_value(&ev).as_str() {
            "activa" => Some(ReservationStatus::Activa),
            "cancelada" => Some(ReservationStatus::Cancelada),
            _ => None,
        });
    };

    view! {
        <div class="max-w-4xl mx-auto space-y-4">
            <div>
                <h1 class="text-2xl font-bold">"Administración de Reservas"</h1>
                <p class="opacity-70">
                    "Gestiona todas las reservas del sistema agrupadas por usuario"
                </p>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body p-4 flex-row flex-wrap items-end gap-3">
                    <div class="form-control">
                        <label class="label" for="filtro-estado">
                            <span class="label-text">"Filtrar por estado"</span>
                        </label>
                        <select
                            id="filtro-estado"
                            class="select select-bordered select-sm"
                            on:change=on_estado_change
                        >
                            <option value="">"Todas"</option>
                            <option value="activa">"Activas"</option>
                            <option value="cancelada">"Canceladas"</option>
                        </select>
                    </div>
                    <div class="form-control grow">
                        <label class="label" for="filtro-usuario">
                            <span class="label-text">"Buscar usuario"</span>
                        </label>
                        <input
                            id="filtro-usuario"
                            type="text"
                            placeholder="Nombre o email..."
                            class="input input-bordered input-sm w-full"
                            prop:value=filtro_usuario
                            on:input=move |ev| set_filtro_usuario.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="text-sm opacity-70">
                        {move || {
                            let groups = visible_groups.get();
                            format!(
                                "Total: {} reservas en {} usuarios",
                                total_reservas(&groups),
                                groups.len(),
                            )
                        }}
                    </div>
                </div>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error text-sm">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || loading.get()>
                <div class="flex items-center gap-2 opacity-70">
                    <span class="loading loading-spinner"></span>
                    <span>"Cargando reservas..."</span>
                </div>
            </Show>

            <Show when=move || {
                !loading.get() && error_msg.get().is_none()
                    && visible_groups.with(|g| g.is_empty())
            }>
                <div class="opacity-70">
                    <p>"No se encontraron reservas."</p>
                    <p class="text-sm">
                        {move || {
                            if groups.with(|g| g.is_empty()) {
                                "Aún no hay reservas en el sistema."
                            } else {
                                "Intenta ajustar los filtros."
                            }
                        }}
                    </p>
                </div>
            </Show>

            {move || {
                let today = Local::now().date_naive();
                visible_groups
                    .get()
                    .into_iter()
                    .map(|group| {
                        let count = group.reservas.len();
                        let cancel = cancel.clone();
                        let rows = group
                            .reservas
                            .into_iter()
                            .map(|reserva| {
                                let id = reserva.id;
                                let badge = badge_for(&reserva, today);
                                let cancelada = reserva.is_cancelled();
                                let cancel = cancel.clone();
                                let cancel_button = (!cancelada)
                                    .then(|| {
                                        view! {
                                            <button
                                                class="btn btn-error btn-sm"
                                                disabled=move || busy.is_busy(id)
                                                on:click=move |_| cancel(id)
                                            >
                                                "Cancelar"
                                            </button>
                                        }
                                    });
                                view! {
                                    <li class="p-4 flex items-center justify-between gap-4">
                                        <div>
                                            <div class="flex items-center gap-2 font-semibold">
                                                <span>{reserva.instalacion_nombre}</span>
                                                <span class=badge.class()>{badge.label()}</span>
                                            </div>
                                            <div class="text-sm opacity-70">
                                                {format_date(reserva.fecha)} " · "
                                                {format_time(reserva.hora_inicio)} "–"
                                                {format_time(reserva.hora_fin)} " · ID: "
                                                {id}
                                            </div>
                                        </div>
                                        {cancel_button}
                                    </li>
                                }
                            })
                            .collect_view();
                        view! {
                            <div class="card bg-base-100 shadow overflow-hidden">
                                <div class="flex items-center justify-between p-4 bg-neutral text-neutral-content">
                                    <div>
                                        <h2 class="text-lg font-bold">{group.usuario_nombre}</h2>
                                        <p class="text-sm opacity-70">{group.usuario_email}</p>
                                    </div>
                                    <div class="text-right">
                                        <div class="text-2xl font-bold">{count}</div>
                                        <div class="text-sm opacity-70">
                                            {if count == 1 { "reserva" } else { "reservas" }}
                                        </div>
                                    </div>
                                </div>
                                <ul class="divide-y divide-base-200">{rows}</ul>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
