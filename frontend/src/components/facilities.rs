use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::inflight::FetchEpoch;
use reserva_shared::Facility;

#[component]
pub fn FacilitiesPage() -> impl IntoView {
    let api = use_api();

    let (items, set_items) = signal(Vec::<Facility>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let epoch = FetchEpoch::new();

    Effect::new(move |_| {
        let api = api.clone();
        let ticket = epoch.begin();
        spawn_local(async move {
            let result = api.facilities().await;
            if !ticket.is_live() {
                return;
            }
            match result {
                Ok(data) => set_items.set(data),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="max-w-3xl mx-auto space-y-4">
            <h1 class="text-2xl font-bold">"Servicios ofrecidos"</h1>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error text-sm">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| {
                    view! {
                        <div class="flex items-center gap-2 opacity-70">
                            <span class="loading loading-spinner"></span>
                            <span>"Cargando instalaciones…"</span>
                        </div>
                    }
                }
            >
                <div class="grid gap-4 sm:grid-cols-2">
                    <For
                        each=move || items.get()
                        key=|facility| facility.id
                        children=move |facility| {
                            let tipo = facility.tipo.unwrap_or_else(|| "—".to_string());
                            let aforo = facility
                                .aforo
                                .map(|a| a.to_string())
                                .unwrap_or_else(|| "—".to_string());
                            view! {
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body p-4">
                                        <h2 class="card-title text-lg">{facility.nombre}</h2>
                                        <p class="text-sm opacity-70">"Tipo: " {tipo}</p>
                                        <p class="text-sm opacity-70">"Aforo: " {aforo}</p>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
