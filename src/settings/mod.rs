use crate::quotation::types::{DiscountSettings, VolumeTier};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to write settings file:{0}")]
    FileWriteError(String),

    #[error("Failed to serialize settings:{0}")]
    SerializeError(String),
}

/// Persisted pricing settings, previously scattered across ad-hoc key/value
/// reads. Missing or malformed values fall back to the documented defaults:
/// discount disabled at 0%, no volume tiers, additional charges enabled.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingSettings {
    #[serde(default)]
    pub discount: DiscountSettings,
    #[serde(default)]
    pub volume_tiers: Vec<VolumeTier>,
    #[serde(default = "default_additional_charges_enabled")]
    pub additional_charges_enabled: bool,
}

fn default_additional_charges_enabled() -> bool {
    true
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            discount: DiscountSettings::default(),
            volume_tiers: Vec::new(),
            additional_charges_enabled: true,
        }
    }
}

/// Single owner of the pricing settings. Everyone else takes point-in-time
/// snapshots per computation and, if long-lived, subscribes for change
/// notifications instead of re-reading shared mutable state.
pub struct SettingsStore {
    path: PathBuf,
    sender: watch::Sender<PricingSettings>,
}

impl SettingsStore {
    /// Opens the store backed by `path`. A missing or unparseable file yields
    /// the defaults, it never fails the caller.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = Self::load_or_default(&path);
        let (sender, _) = watch::channel(settings);
        Self { path, sender }
    }

    fn load_or_default(path: &PathBuf) -> PricingSettings {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Malformed settings file, using defaults: {}", e);
                PricingSettings::default()
            }),
            Err(_) => PricingSettings::default(),
        }
    }

    /// Fresh snapshot for one computation.
    pub fn snapshot(&self) -> PricingSettings {
        self.sender.borrow().clone()
    }

    /// Change notifications for dependents that must recompute when the
    /// settings are edited elsewhere.
    pub fn subscribe(&self) -> watch::Receiver<PricingSettings> {
        self.sender.subscribe()
    }

    /// Persists new settings and notifies subscribers.
    pub fn update(&self, settings: PricingSettings) -> Result<(), SettingsError> {
        let serialized = serde_json::to_string_pretty(&settings)
            .map_err(|e| SettingsError::SerializeError(e.to_string()))?;
        fs::write(&self.path, serialized)
            .map_err(|e| SettingsError::FileWriteError(e.to_string()))?;
        self.sender.send_replace(settings);
        Ok(())
    }
}

#[cfg(test)]
mod settings_tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::open(dir.path().join("does_not_exist.json"));
        let settings = store.snapshot();
        assert!(!settings.discount.enabled);
        assert_eq!(settings.discount.percentage, 0.0);
        assert!(settings.volume_tiers.is_empty());
        assert!(settings.additional_charges_enabled);
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json at all").unwrap();
        let store = SettingsStore::open(&path);
        assert!(store.snapshot().volume_tiers.is_empty());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"discount":{"enabled":true,"percentage":5.0}}"#).unwrap();
        let store = SettingsStore::open(&path);
        let settings = store.snapshot();
        assert!(settings.discount.enabled);
        assert_eq!(settings.discount.percentage, 5.0);
        assert!(settings.additional_charges_enabled);
    }

    #[test]
    fn update_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::open(&path);
        let mut settings = store.snapshot();
        settings.discount.enabled = true;
        settings.discount.percentage = 12.0;
        settings.volume_tiers.push(VolumeTier {
            min_volume: 1000.0,
            discount_percent: 10.0,
            label: "Bulk".to_string(),
        });
        store.update(settings).unwrap();

        let reopened = SettingsStore::open(&path);
        let reloaded = reopened.snapshot();
        assert_eq!(reloaded.discount.percentage, 12.0);
        assert_eq!(reloaded.volume_tiers.len(), 1);
    }

    #[test]
    fn update_notifies_subscribers() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::open(dir.path().join("settings.json"));
        let mut receiver = store.subscribe();
        assert!(!receiver.has_changed().unwrap());

        let mut settings = store.snapshot();
        settings.additional_charges_enabled = false;
        store.update(settings).unwrap();

        assert!(receiver.has_changed().unwrap());
        assert!(!receiver.borrow_and_update().additional_charges_enabled);
    }
}
