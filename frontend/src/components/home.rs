use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="max-w-2xl mx-auto space-y-2">
            <h1 class="text-2xl font-bold">"Inicio"</h1>
            <p class="opacity-70">
                "Bienvenido. Usa \u{201c}Entrar\u{201d} para autenticarte y ver instalaciones."
            </p>
        </div>
    }
}
