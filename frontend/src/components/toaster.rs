use leptos::prelude::*;

use crate::notify::{Severity, use_notifier};

/// Renders whatever the notifier has queued, newest at the bottom. Each
/// toast leaves on its own timer; there is no interaction here.
#[component]
pub fn Toaster() -> impl IntoView {
    let notifier = use_notifier();
    let toasts = notifier.toasts();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.severity {
                        Severity::Success => "alert alert-success text-sm shadow",
                        Severity::Error => "alert alert-error text-sm shadow",
                        Severity::Info => "alert text-sm shadow",
                    };
                    view! {
                        <div class=class>
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
