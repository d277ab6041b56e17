use std::collections::HashMap;

use futures::join;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::dates::{format_date, format_time};
use crate::inflight::{BusyTracker, FetchEpoch};
use crate::notify::use_notifier;
use reserva_shared::{Facility, Reservation, ReservationStatus};

#[cfg(test)]
mod tests;

/// Local relabel after a cancel; the server keeps the authoritative row.
fn mark_cancelled(items: &mut [Reservation], id: i64) {
    if let Some(item) = items.iter_mut().find(|r| r.id == id) {
        item.estado = Some(ReservationStatus::Cancelada);
    }
}

fn facility_names(facilities: &[Facility]) -> HashMap<i64, String> {
    facilities.iter().map(|f| (f.id, f.nombre.clone())).collect()
}

#[component]
pub fn MyReservationsPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();

    let (items, set_items) = signal(Vec::<Reservation>::new());
    let (names, set_names) = signal(HashMap::<i64, String>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let busy = BusyTracker::new();
    let epoch = FetchEpoch::new();

    {
        let api = api.clone();
        Effect::new(move |_| {
            let api = api.clone();
            let ticket = epoch.begin();
            spawn_local(async move {
                // Bookings and the facility catalog load concurrently; the
                // catalog only feeds the name lookup.
                let (reservations, facilities) = join!(api.my_reservations(), api.facilities());
                if !ticket.is_live() {
                    return;
                }
                match (reservations, facilities) {
                    (Ok(reservations), Ok(facilities)) => {
                        set_names.set(facility_names(&facilities));
                        set_items.set(reservations);
                    }
                    (Err(e), _) | (_, Err(e)) => set_error_msg.set(Some(e.to_string())),
                }
                set_loading.set(false);
            });
        });
    }

    let cancel = {
        let api = api.clone();
        move |id: i64| {
            let Some(guard) = busy.try_begin(id) else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                let _guard = guard;
                match api.cancel_reservation(id).await {
                    Ok(()) => {
                        notifier.success("Reserva cancelada");
                        set_items.try_update(|list| mark_cancelled(list, id));
                    }
                    Err(e) => notifier.error(e.to_string()),
                }
            });
        }
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-4">
            <h1 class="text-2xl font-bold">"Mis reservas"</h1>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error text-sm">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || loading.get()>
                <div class="flex items-center gap-2 opacity-70">
                    <span class="loading loading-spinner"></span>
                    <span>"Cargando mis reservas…"</span>
                </div>
            </Show>

            <Show when=move || {
                !loading.get() && error_msg.get().is_none() && items.with(|i| i.is_empty())
            }>
                <p class="opacity-70">"No tienes reservas."</p>
            </Show>

            <div class="grid gap-3">
                <For
                    each=move || items.get()
                    // estado participates in the key so the local relabel
                    // re-renders the row.
                    key=|r| (r.id, r.estado())
                    children=move |reservation| {
                        let id = reservation.id;
                        let instalacion_id = reservation.instalacion_id;
                        let estado = reservation.estado();
                        let cancelada = estado == ReservationStatus::Cancelada;
                        let estado_badge = if cancelada {
                            "badge badge-error badge-outline"
                        } else {
                            "badge badge-success badge-outline"
                        };
                        let nombre = move || {
                            names
                                .with(|map| map.get(&instalacion_id).cloned())
                                .unwrap_or_else(|| "—".to_string())
                        };
                        let cancel_button = (!cancelada)
                            .then(|| {
                                let cancel = cancel.clone();
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
                            <div class="card bg-base-100 shadow">
                                <div class="card-body p-4 flex-row items-center justify-between">
                                    <div>
                                        <div class="flex items-center gap-2 font-semibold">
                                            <span>{nombre}</span>
                                            <span class=estado_badge>{estado.as_str()}</span>
                                        </div>
                                        <div class="text-sm opacity-70">
                                            {format_date(reservation.fecha)} " · "
                                            {format_time(reservation.hora_inicio)} "–"
                                            {format_time(reservation.hora_fin)}
                                        </div>
                                    </div>
                                    {cancel_button}
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
