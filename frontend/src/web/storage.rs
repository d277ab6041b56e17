//! Persistent key-value storage seam.

/// Abstraction over `localStorage` so the state modules stay testable on
/// the host. Failures degrade to "not stored"; callers treat storage as a
/// cache, never as ground truth.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`, scoped to the origin and surviving reloads.
///
/// Uses the raw string API rather than gloo's JSON wrapper so stored values
/// stay plain strings.
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        use gloo_storage::{LocalStorage, Storage};
        let _ = LocalStorage::raw().set_item(key, value);
    }

    fn remove(&self, key: &str) {
        use gloo_storage::{LocalStorage, Storage};
        let _ = LocalStorage::raw().remove_item(key);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::KeyValueStore;

    /// In-memory stand-in shared by the unit tests.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        items: Mutex<HashMap<String, String>>,
    }

    impl MemoryStore {
        pub(crate) fn new() -> Self {
            Self::default()
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.items.lock().unwrap().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.items
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.items.lock().unwrap().remove(key);
        }
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_string()));

        store.remove("k");
        assert_eq!(store.get("k"), None);
    }
}
