//! File watching module for hot config reloading.
//!
//! [`FileSettingsSource`] loads the configuration file once, then watches its
//! directory and republishes the settings snapshot whenever the file changes.
//! Editors often save in several steps (truncate, write, rename), so events
//! are debounced: a reload happens once the file has been quiet for
//! [`CONFIG_WATCH_DEBOUNCE`].

use anyhow::{Context, Result};
use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Mutex, PoisonError};
use std::thread;

use super::source::{SettingsListener, SettingsSource, SettingsStore, Subscription};
use super::{Settings, load_from_path};
use crate::constants::CONFIG_WATCH_DEBOUNCE;

/// Settings backed by a TOML file that is reloaded when it changes.
pub struct FileSettingsSource {
    path: PathBuf,
    store: SettingsStore,
    // Dropping the watcher closes the event channel and ends the reload thread
    watcher: Mutex<Option<RecommendedWatcher>>,
}

impl FileSettingsSource {
    /// Load `path` and start watching it.
    pub fn start(path: &Path, debug_enabled: bool) -> Result<Self> {
        let settings = load_settings(path)?;
        let store = SettingsStore::new(settings);

        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    // Only care about write/create/remove events
                    match event.kind {
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {
                            let _ = tx.send(event);
                        }
                        _ => {}
                    }
                }
            },
            NotifyConfig::default(),
        )
        .context("Failed to create file watcher")?;

        // Watch the parent directory: editors replace files rather than
        // writing them in place, which a direct file watch would miss.
        let watch_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        watcher
            .watch(watch_dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", watch_dir.display()))?;

        if debug_enabled {
            log_pipe!();
            log_debug!("Starting config file watcher for hot reload:");
            log_indented!("Watching: {}", path.display());
        }

        let thread_store = store.clone();
        let thread_path = path.to_path_buf();
        thread::Builder::new()
            .name("config-watcher".to_string())
            .spawn(move || watch_loop(rx, &thread_path, &thread_store, debug_enabled))
            .context("Failed to spawn config watcher thread")?;

        Ok(Self {
            path: path.to_path_buf(),
            store,
            watcher: Mutex::new(Some(watcher)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload the file now, outside of the watcher.
    ///
    /// Returns whether the snapshot changed. Invalid files leave the current
    /// snapshot in place.
    pub fn reload(&self) -> Result<bool> {
        reload_into(&self.path, &self.store)
    }

    /// Stop watching. The last loaded snapshot stays available.
    pub fn stop(&self) {
        self.watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl SettingsSource for FileSettingsSource {
    fn current(&self) -> Settings {
        self.store.current()
    }

    fn subscribe(&self, listener: SettingsListener) -> Subscription {
        self.store.subscribe(listener)
    }
}

fn load_settings(path: &Path) -> Result<Settings> {
    load_from_path(path)?.to_settings()
}

fn reload_into(path: &Path, store: &SettingsStore) -> Result<bool> {
    let settings = load_settings(path)?;
    if settings == store.current() {
        return Ok(false);
    }
    store.update(settings);
    Ok(true)
}

fn watch_loop(rx: mpsc::Receiver<Event>, path: &Path, store: &SettingsStore, debug_enabled: bool) {
    let file_name = path.file_name();

    while let Ok(event) = rx.recv() {
        let affects_config = event
            .paths
            .iter()
            .any(|event_path| event_path.file_name() == file_name);
        if !affects_config {
            continue;
        }

        // Wait for the burst of events from one save to settle
        loop {
            match rx.recv_timeout(CONFIG_WATCH_DEBOUNCE) {
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }

        if debug_enabled {
            log_pipe!();
            log_info!("Configuration file change detected");
        }

        match reload_into(path, store) {
            Ok(true) => {}
            Ok(false) => {
                if debug_enabled {
                    log_indented!("Configuration unchanged");
                }
            }
            Err(e) => {
                log_pipe!();
                log_warning!("Ignoring invalid configuration: {:#}", e);
                log_indented!("Keeping the previous settings");
            }
        }
    }
}
