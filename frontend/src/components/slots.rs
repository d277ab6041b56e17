use chrono::{Local, NaiveDate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::dates::{format_date, format_time};
use crate::inflight::{BusyTracker, FetchEpoch};
use crate::notify::use_notifier;
use reserva_shared::{Facility, ReservationCreate, Slot};

#[cfg(test)]
mod tests;

/// A sold-out slot renders but takes no request.
fn can_reserve(slot: &Slot) -> bool {
    !slot.is_full()
}

/// Optimistic view of a confirmed booking: one seat less, never below zero.
/// A stale id is a no-op.
fn apply_local_decrement(slots: &mut [Slot], franja_id: i64) {
    if let Some(slot) = slots.iter_mut().find(|s| s.id == franja_id) {
        slot.plazas_disponibles = slot.plazas_disponibles.saturating_sub(1);
    }
}

#[component]
pub fn SlotsPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();

    let (facilities, set_facilities) = signal(Vec::<Facility>::new());
    let (facility_id, set_facility_id) = signal(Option::<i64>::None);
    let (fecha, set_fecha) = signal(Local::now().date_naive());
    let (slots, set_slots) = signal(Vec::<Slot>::new());
    let (loading, set_loading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (refresh_tick, set_refresh_tick) = signal(0u32);
    let busy = BusyTracker::new();
    let slots_epoch = FetchEpoch::new();
    let facilities_epoch = FetchEpoch::new();

    // Facility catalog loads once; the first entry becomes the selection.
    {
        let api = api.clone();
        Effect::new(move |_| {
            let api = api.clone();
            let ticket = facilities_epoch.begin();
            spawn_local(async move {
                let result = api.facilities().await;
                if !ticket.is_live() {
                    return;
                }
                match result {
                    Ok(data) => {
                        if facility_id.get_untracked().is_none() {
                            if let Some(first) = data.first() {
                                set_facility_id.set(Some(first.id));
                            }
                        }
                        set_facilities.set(data);
                    }
                    Err(e) => set_error_msg.set(Some(e.to_string())),
                }
            });
        });
    }

    // Slots re-fetch on every facility/date change and on manual refresh.
    // The ticket discards responses that arrive late.
    {
        let api = api.clone();
        Effect::new(move |_| {
            refresh_tick.get();
            let Some(instalacion_id) = facility_id.get() else {
                return;
            };
            let fecha = fecha.get();
            let api = api.clone();
            let ticket = slots_epoch.begin();
            set_loading.set(true);
            set_error_msg.set(None);
            spawn_local(async move {
                // available_only stays false so full slots render as sold out.
                let result = api.slots_by_facility(instalacion_id, fecha, false).await;
                if !ticket.is_live() {
                    return;
                }
                match result {
                    Ok(data) => set_slots.set(data),
                    Err(e) => set_error_msg.set(Some(e.to_string())),
                }
                set_loading.set(false);
            });
        });
    }

    let reservar = {
        let api = api.clone();
        move |slot: Slot| {
            if !can_reserve(&slot) {
                return;
            }
            // One in-flight booking per slot; repeat clicks are no-ops.
            let Some(guard) = busy.try_begin(slot.id) else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                let _guard = guard;
                let body = ReservationCreate {
                    instalacion_id: slot.instalacion_id,
                    franja_id: slot.id,
                };
                match api.create_reservation(&body).await {
                    Ok(_) => {
                        notifier.success("Reserva creada");
                        set_slots.try_update(|list| apply_local_decrement(list, slot.id));
                    }
                    Err(e) => notifier.error(e.to_string()),
                }
            });
        }
    };

    let on_facility_change = move |ev| {
        if let Ok(id) = event_target_value(&ev).parse::<i64>() {
            set_facility_id.set(Some(id));
        }
    };

    let on_fecha_change = move |ev| {
        if let Ok(parsed) = event_target_value(&ev).parse::<NaiveDate>() {
            set_fecha.set(parsed);
        }
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-4">
            <h1 class="text-2xl font-bold">"Reservar"</h1>

            <div class="flex flex-wrap items-end gap-3">
                <div class="form-control">
                    <label class="label" for="facility">
                        <span class="label-text">"Instalación"</span>
                    </label>
                    <select
                        id="facility"
                        class="select select-bordered"
                        prop:value=move || {
                            facility_id.get().map(|id| id.to_string()).unwrap_or_default()
                        }
                        on:change=on_facility_change
                    >
                        <For
                            each=move || facilities.get()
                            key=|facility| facility.id
                            children=move |facility| {
                                view! {
                                    <option value=facility.id.to_string()>{facility.nombre}</option>
                                }
                            }
                        />
                    </select>
                </div>
                <div class="form-control">
                    <label class="label" for="fecha">
                        <span class="label-text">"Fecha"</span>
                    </label>
                    <input
                        id="fecha"
                        type="date"
                        class="input input-bordered"
                        prop:value=move || fecha.get().format("%Y-%m-%d").to_string()
                        on:change=on_fecha_change
                    />
                </div>
                <button
                    class="btn btn-outline"
                    on:click=move |_| set_refresh_tick.update(|n| *n += 1)
                >
                    "Actualizar"
                </button>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error text-sm">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || loading.get()>
                <div class="flex items-center gap-2 opacity-70">
                    <span class="loading loading-spinner"></span>
                    <span>"Cargando franjas…"</span>
                </div>
            </Show>

            <Show when=move || {
                !loading.get() && error_msg.get().is_none() && slots.with(|s| s.is_empty())
            }>
                <p class="opacity-70">"No hay franjas para ese día."</p>
            </Show>

            <div class="grid gap-3">
                <For
                    each=move || slots.get()
                    // plazas participates in the key so optimistic updates
                    // re-render the row.
                    key=|slot| (slot.id, slot.plazas_disponibles)
                    children=move |slot| {
                        let franja_id = slot.id;
                        let agotado = !can_reserve(&slot);
                        let reservar = reservar.clone();
                        let row = slot.clone();
                        view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body p-4 flex-row items-center justify-between">
                                    <div>
                                        <div class="font-semibold">
                                            {format_date(slot.fecha)} " · "
                                            {format_time(slot.hora_inicio)} "–"
                                            {format_time(slot.hora_fin)}
                                        </div>
                                        <div class="text-sm opacity-70">
                                            "Plazas: " {slot.plazas_disponibles} "/" {slot.capacidad}
                                        </div>
                                    </div>
                                    <button
                                        class="btn btn-primary btn-sm"
                                        disabled=move || agotado || busy.is_busy(franja_id)
                                        on:click=move |_| reservar(row.clone())
                                    >
                                        {if agotado { "Agotado" } else { "Reservar" }}
                                    </button>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
