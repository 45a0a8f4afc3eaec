//! Settings snapshots and change subscriptions.
//!
//! The engine reads settings through [`SettingsSource`] and learns about
//! changes through a [`Subscription`] it holds for its whole life. Dropping
//! the subscription unsubscribes.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::Settings;

/// Callback invoked after the settings snapshot changes.
pub type SettingsListener = Box<dyn Fn() + Send + Sync>;

/// Provider of the current settings snapshot.
///
/// Listeners are called without any of the source's locks held, so they may
/// call [`SettingsSource::current`].
pub trait SettingsSource: Send + Sync {
    /// Clone of the current snapshot.
    fn current(&self) -> Settings;

    /// Register `listener` until the returned guard is dropped.
    fn subscribe(&self, listener: SettingsListener) -> Subscription;
}

/// Guard for a settings listener registration.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// A subscription that runs `unsubscribe` when dropped.
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with nothing to release, for sources that never change.
    pub fn inert() -> Self {
        Self { unsubscribe: None }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Arc<dyn Fn() + Send + Sync>)>,
}

struct StoreInner {
    settings: Mutex<Settings>,
    listeners: Mutex<Listeners>,
}

/// In-memory [`SettingsSource`] that notifies listeners on every update.
///
/// Cloning shares the same store.
#[derive(Clone)]
pub struct SettingsStore {
    inner: Arc<StoreInner>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                settings: Mutex::new(settings),
                listeners: Mutex::new(Listeners::default()),
            }),
        }
    }

    /// Replace the snapshot and notify every listener.
    pub fn update(&self, settings: Settings) {
        *self
            .inner
            .settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = settings;

        // Snapshot the listeners so none of our locks are held while they run
        let listeners: Vec<_> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener();
        }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl SettingsSource for SettingsStore {
    fn current(&self) -> Settings {
        self.inner
            .settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn subscribe(&self, listener: SettingsListener) -> Subscription {
        let id = {
            let mut listeners = self
                .inner
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Arc::from(listener)));
            id
        };

        let weak: Weak<StoreInner> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .listeners
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .entries
                    .retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }
}
