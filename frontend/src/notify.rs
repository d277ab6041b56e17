//! Transient status messages.
//!
//! Fire-and-forget: any module can queue a toast, the `Toaster` component
//! renders whatever is queued, and each toast dismisses itself on its own
//! timer. Messages are lossy; nothing waits on them.

use leptos::prelude::*;

#[cfg(target_arch = "wasm32")]
const TOAST_DISMISS_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    /// Unique within the app's lifetime, strictly increasing.
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone, Copy)]
pub struct Notifier {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn toasts(&self) -> RwSignal<Vec<Toast>> {
        self.toasts
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(message, Severity::Info);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(message, Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(message, Severity::Error);
    }

    /// Queues a toast and schedules its dismissal. Every toast runs its own
    /// timer, so earlier toasts keep their own deadline.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.toasts.update(|list| {
            list.push(Toast {
                id,
                message: message.into(),
                severity,
            });
        });

        #[cfg(target_arch = "wasm32")]
        {
            let notifier = *self;
            gloo_timers::callback::Timeout::new(TOAST_DISMISS_MS, move || {
                notifier.dismiss(id);
            })
            .forget();
        }

        id
    }

    /// Removes one toast; unknown ids are a no-op. The timer may outlive
    /// the reactive owner, hence `try_update`.
    pub fn dismiss(&self, id: u64) {
        self.toasts.try_update(|list| list.retain(|t| t.id != id));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}
