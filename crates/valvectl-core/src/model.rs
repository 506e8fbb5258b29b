//! Valve controller data model types.
//!
//! These types mirror the on-device configuration record: per-device WiFi
//! credentials, entries of the fixed valve table, and the UI color palette.

use serde::{Deserialize, Serialize};

/// Maximum usable length of a WiFi SSID.
pub const SSID_MAX_LEN: usize = 19;

/// Maximum usable length of a WiFi password.
pub const PASSWORD_MAX_LEN: usize = 19;

/// Maximum usable length of the host used to build asset URLs.
pub const HOST_MAX_LEN: usize = 14;

/// Maximum usable length of a valve display label.
pub const LABEL_MAX_LEN: usize = 19;

/// Label carried by valve slots that are not mapped to hardware.
pub const UNUSED_LABEL: &str = "Unused";

/// Errors raised when constructing model values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("{field} is {len} characters, limit is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<(), ModelError> {
    let len = value.chars().count();
    if len > max {
        return Err(ModelError::FieldTooLong { field, len, max });
    }
    Ok(())
}

/// Per-device WiFi credentials plus the host used for asset links.
///
/// Populated once at provisioning time (setup form or persisted state) and
/// read-only to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiCredentials {
    /// Network name.
    pub ssid: String,

    /// Network password (empty for open networks).
    pub password: String,

    /// Host for the includes: script and stylesheet URLs on served pages.
    pub host: String,
}

impl WifiCredentials {
    /// Build credentials, rejecting fields longer than the device limits.
    pub fn new(ssid: &str, password: &str, host: &str) -> Result<Self, ModelError> {
        bounded("ssid", ssid, SSID_MAX_LEN)?;
        bounded("password", password, PASSWORD_MAX_LEN)?;
        bounded("host", host, HOST_MAX_LEN)?;
        Ok(Self {
            ssid: ssid.to_string(),
            password: password.to_string(),
            host: host.to_string(),
        })
    }
}

/// One slot in the fixed valve table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValveEntry {
    /// GPIO pin driving this valve; `None` marks the slot as unassigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<u8>,

    /// Display label shown on the control page.
    pub label: String,

    /// True while the valve is open.
    pub status: bool,

    /// Opaque identifier correlating this valve with a remote automation
    /// platform. Stored and passed through, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_service_id: Option<String>,
}

impl ValveEntry {
    /// Build an entry, rejecting over-long labels.
    pub fn new(
        pin: Option<u8>,
        label: &str,
        external_service_id: Option<String>,
    ) -> Result<Self, ModelError> {
        bounded("label", label, LABEL_MAX_LEN)?;
        Ok(Self {
            pin,
            label: label.to_string(),
            status: false,
            external_service_id,
        })
    }

    /// An unassigned slot: no pin, the "Unused" label, closed.
    pub fn unused() -> Self {
        Self {
            pin: None,
            label: UNUSED_LABEL.to_string(),
            status: false,
            external_service_id: None,
        }
    }

    /// Whether this slot is mapped to physical hardware.
    pub fn is_assigned(&self) -> bool {
        self.pin.is_some()
    }

    /// Displayed state: unassigned slots are offline regardless of status.
    pub fn state(&self) -> ValveState {
        if !self.is_assigned() {
            ValveState::Offline
        } else if self.status {
            ValveState::On
        } else {
            ValveState::Off
        }
    }
}

impl Default for ValveEntry {
    fn default() -> Self {
        Self::unused()
    }
}

/// Displayed valve state as the web UI understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValveState {
    On,
    Off,
    Offline,
}

impl ValveState {
    /// Wire string used in the `status` attribute and JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ValveState::On => "ON",
            ValveState::Off => "OFF",
            ValveState::Offline => "OFFLINE",
        }
    }
}

impl std::fmt::Display for ValveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// UI color palette for valve rendering. Immutable after compile.
#[derive(Debug, Clone, PartialEq)]
pub struct UiColors {
    pub on: &'static str,
    pub off: &'static str,
    pub offline: &'static str,
}

impl UiColors {
    pub const fn defaults() -> Self {
        Self {
            on: "#00D800",
            off: "#FF0000",
            offline: "gray",
        }
    }

    /// Fill color for a valve in the given state.
    pub fn for_state(&self, state: ValveState) -> &'static str {
        match state {
            ValveState::On => self.on,
            ValveState::Off => self.off,
            ValveState::Offline => self.offline,
        }
    }
}

impl Default for UiColors {
    fn default() -> Self {
        Self::defaults()
    }
}
