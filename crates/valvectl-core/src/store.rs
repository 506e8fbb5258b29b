//! In-memory configuration store.
//!
//! The store is the single owned configuration record of the device: WiFi
//! credentials, the fixed valve table, and the UI palette. It is created at
//! startup and handed by reference to whichever component needs it (renderer,
//! web layer, hardware driver).

use crate::model::{UiColors, ValveEntry, WifiCredentials};

/// Fixed capacity of the valve table.
pub const VALVE_COUNT: usize = 8;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("valve index {index} out of range (0..{count})")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Owned in-memory configuration record.
///
/// The valve table always holds exactly [`VALVE_COUNT`] entries; slots not
/// mapped to hardware carry [`ValveEntry::unused`]. Valve status is the only
/// field mutated at runtime; labels, pins and credentials change through
/// provisioning only.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
    credentials: WifiCredentials,
    valves: [ValveEntry; VALVE_COUNT],
    colors: UiColors,
}

impl ConfigStore {
    /// Create a store with an empty valve table (all slots unused).
    pub fn new(credentials: WifiCredentials) -> Self {
        Self {
            credentials,
            valves: Default::default(),
            colors: UiColors::defaults(),
        }
    }

    /// Create a store with an explicit valve table.
    pub fn with_valves(credentials: WifiCredentials, valves: [ValveEntry; VALVE_COUNT]) -> Self {
        Self {
            credentials,
            valves,
            colors: UiColors::defaults(),
        }
    }

    /// The compiled-in valve layout the device ships with.
    pub fn factory(credentials: WifiCredentials) -> Self {
        Self::with_valves(credentials, factory_valves())
    }

    /// Fixed capacity of the valve table, independent of how many slots are
    /// assigned.
    pub fn valve_count(&self) -> usize {
        self.valves.len()
    }

    /// The entry at `index`.
    pub fn valve(&self, index: usize) -> Result<&ValveEntry, StoreError> {
        self.valves.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            count: VALVE_COUNT,
        })
    }

    /// The full table in slot order.
    pub fn valves(&self) -> &[ValveEntry] {
        &self.valves
    }

    /// Set the open/closed status of one valve.
    ///
    /// This is the only runtime mutation point for valve state; the effect is
    /// purely in-memory. An out-of-range index leaves the table untouched.
    pub fn set_valve_status(&mut self, index: usize, open: bool) -> Result<(), StoreError> {
        let entry = self
            .valves
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange {
                index,
                count: VALVE_COUNT,
            })?;
        entry.status = open;
        Ok(())
    }

    /// Replace the valve table wholesale (provisioning path).
    pub fn set_valves(&mut self, valves: [ValveEntry; VALVE_COUNT]) {
        self.valves = valves;
    }

    pub fn credentials(&self) -> &WifiCredentials {
        &self.credentials
    }

    /// Replace the credentials (setup form / provisioning path).
    pub fn set_credentials(&mut self, credentials: WifiCredentials) {
        self.credentials = credentials;
    }

    pub fn colors(&self) -> &UiColors {
        &self.colors
    }
}

/// Valve layout compiled into the firmware image.
fn factory_valves() -> [ValveEntry; VALVE_COUNT] {
    let mut valves: [ValveEntry; VALVE_COUNT] = Default::default();
    let assigned: [(u8, &str); 3] = [(12, "Garden Lights"), (4, "Gate"), (3, "Watering")];
    for (slot, (pin, label)) in valves.iter_mut().zip(assigned) {
        slot.pin = Some(pin);
        slot.label = label.to_string();
    }
    // Slot 3 is wired but not yet labeled in the shipped layout
    valves[3].pin = Some(5);
    valves
}
