//! Client-local key/value storage used to hand the provider selection over
//! to the sign-in page. The browser backend mirrors `window.localStorage`;
//! failures there are ignored, the same way the rest of the front-end treats
//! local storage.

use std::collections::HashMap;

pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str);

    fn remove_item(&mut self, key: &str);
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) {
        (**self).set_item(key, value);
    }

    fn remove_item(&mut self, key: &str) {
        (**self).remove_item(key);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::browser::BrowserStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::Storage;

    /// `window.localStorage`.
    pub struct BrowserStorage {
        inner: web_sys::Storage,
    }

    impl BrowserStorage {
        /// Returns `None` when there is no window or local storage is disabled.
        pub fn local() -> Option<Self> {
            let inner = web_sys::window()?.local_storage().ok().flatten()?;
            Some(Self { inner })
        }
    }

    impl Storage for BrowserStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.inner.get_item(key).ok().flatten()
        }

        fn set_item(&mut self, key: &str, value: &str) {
            let _ = self.inner.set_item(key, value);
        }

        fn remove_item(&mut self, key: &str) {
            let _ = self.inner.remove_item(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.set_item("k", "v1");
        storage.set_item("k", "v2");
        assert_eq!(storage.get_item("k"), Some("v2".to_string()));
        assert_eq!(storage.len(), 1);

        storage.remove_item("k");
        storage.remove_item("never-set");
        assert_eq!(storage.get_item("k"), None);
        assert!(storage.is_empty());
    }
}
