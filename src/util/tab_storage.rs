//! Per-tab key/value storage for the active chat pointer.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser implementation wraps `sessionStorage`, so a reload resumes the
//! same chat but a new tab starts fresh. Outside the browser it reads as
//! empty; tests use an in-memory store instead.

#[cfg(test)]
#[path = "tab_storage_test.rs"]
mod tab_storage_test;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
use std::rc::Rc;

/// String key/value store scoped to one browser tab.
pub trait TabStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

impl<T: TabStorage + ?Sized> TabStorage for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}

/// The window's `sessionStorage`. Reads miss and writes are dropped outside
/// a browser or when storage is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStorage;

impl TabStorage for SessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            match session_storage()?.get_item(key) {
                Ok(value) => value,
                Err(err) => {
                    log::warn!("sessionStorage read of {key} failed: {err:?}");
                    None
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("no sessionStorage outside the browser; {key} reads as unset");
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = session_storage() else {
                log::warn!("sessionStorage unavailable; {key} not persisted");
                return;
            };
            if let Err(err) = storage.set_item(key, value) {
                log::warn!("sessionStorage write of {key} failed: {err:?}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("no sessionStorage outside the browser; {key}={value} not persisted");
        }
    }
}

#[cfg(feature = "csr")]
fn session_storage() -> Option<web_sys::Storage> {
    match web_sys::window()?.session_storage() {
        Ok(storage) => storage,
        Err(err) => {
            log::warn!("sessionStorage access denied: {err:?}");
            None
        }
    }
}

/// In-memory [`TabStorage`] for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    /// Storage pre-populated with one entry, as if left by an earlier page load.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.set(key, value);
        storage
    }
}

#[cfg(test)]
impl TabStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }
}
