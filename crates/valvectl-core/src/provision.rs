//! Provisioning storage abstraction.
//!
//! This module provides the contract between the configuration store and the
//! persistence collaborator that supplies saved state at boot and receives it
//! on save. Implementations differ per platform:
//! - Linux: file-based storage
//! - On-device: NVS (Non-Volatile Storage)
//!
//! All methods are synchronous to keep the trait usable on embedded targets.
//! Valve status is runtime state and is never persisted; only pin, label and
//! the external service identifier travel through this layer.

use serde::{Deserialize, Serialize};

use crate::model::{ModelError, ValveEntry, WifiCredentials};
use crate::store::{ConfigStore, VALVE_COUNT};

/// Errors that can occur during provisioning operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProvisionError {
    /// Nothing has been saved under the requested key yet.
    #[error("no saved {0}")]
    NotFound(String),
    /// Failed to read saved state.
    #[error("read error: {0}")]
    Read(String),
    /// Failed to write state.
    #[error("write error: {0}")]
    Write(String),
    /// Saved state does not decode into the expected shape.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Abstract provisioning storage.
pub trait ProvisioningStore: Send + Sync {
    /// Load saved WiFi credentials.
    fn load_credentials(&self) -> Result<WifiCredentials, ProvisionError>;

    /// Save WiFi credentials.
    fn save_credentials(&self, credentials: &WifiCredentials) -> Result<(), ProvisionError>;

    /// Load the saved valve table.
    fn load_valves(&self) -> Result<Vec<ValveProvisioning>, ProvisionError>;

    /// Save the valve table.
    fn save_valves(&self, valves: &[ValveProvisioning]) -> Result<(), ProvisionError>;
}

/// Per-valve record exchanged with the provisioning collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValveProvisioning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<u8>,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_service_id: Option<String>,
}

impl ValveProvisioning {
    pub fn from_entry(entry: &ValveEntry) -> Self {
        Self {
            pin: entry.pin,
            label: entry.label.clone(),
            external_service_id: entry.external_service_id.clone(),
        }
    }

    fn into_entry(self) -> Result<ValveEntry, ModelError> {
        ValveEntry::new(self.pin, &self.label, self.external_service_id)
    }
}

/// Snapshot of a store's valve table in provisioning form.
pub fn snapshot_valves(store: &ConfigStore) -> Vec<ValveProvisioning> {
    store.valves().iter().map(ValveProvisioning::from_entry).collect()
}

/// Build the boot-time store from persisted state.
///
/// Missing credentials boot empty, a missing valve table boots the factory
/// layout; anything saved but undecodable is a hard error so a corrupt file
/// is noticed rather than silently replaced.
pub fn boot_store(storage: &dyn ProvisioningStore) -> Result<ConfigStore, ProvisionError> {
    let credentials = match storage.load_credentials() {
        Ok(credentials) => credentials,
        Err(ProvisionError::NotFound(_)) => WifiCredentials::default(),
        Err(err) => return Err(err),
    };

    let mut store = ConfigStore::factory(credentials);
    match storage.load_valves() {
        Ok(saved) => {
            let mut valves: [ValveEntry; VALVE_COUNT] = Default::default();
            for (slot, record) in valves.iter_mut().zip(saved) {
                *slot = record
                    .into_entry()
                    .map_err(|err| ProvisionError::InvalidData(err.to_string()))?;
            }
            store.set_valves(valves);
        }
        Err(ProvisionError::NotFound(_)) => {}
        Err(err) => return Err(err),
    }
    Ok(store)
}
