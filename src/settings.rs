//! Settings ownership and change notification.
//!
//! Rendering passes never watch the configuration themselves. They
//! [`subscribe`](SettingsStore::subscribe) to a [`SettingsStore`] and are told
//! which surfaces changed after each update, then start a fresh pass.

use crate::config::{Config, Surface};
use std::sync::mpsc::{self, Receiver, Sender};

/// Notification sent to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Settings of these surfaces changed
    Changed(Vec<Surface>),
}

/// Owns the current [`Config`] and notifies subscribers about changes.
#[derive(Debug, Default)]
pub struct SettingsStore {
    config: Config,
    subscribers: Vec<Sender<SettingsEvent>>,
}

impl SettingsStore {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            subscribers: Vec::new(),
        }
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register for change notifications.
    pub fn subscribe(&mut self) -> Receiver<SettingsEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Edit the configuration in place and notify subscribers about the
    /// surfaces that changed. Returns those surfaces.
    pub fn update(&mut self, edit: impl FnOnce(&mut Config)) -> Vec<Surface> {
        let mut next = self.config.clone();
        edit(&mut next);
        self.replace(next)
    }

    /// Swap in a whole new configuration, e.g. after reloading it from disk.
    pub fn replace(&mut self, config: Config) -> Vec<Surface> {
        let changed = self.config.changed_surfaces(&config);
        self.config = config;

        if changed.is_empty() {
            tracing::debug!("settings unchanged");
            return changed;
        }

        tracing::info!(surfaces = ?changed, "settings changed");
        let event = SettingsEvent::Changed(changed.clone());
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
        changed
    }

    /// Number of live subscribers, as of the last notification.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
