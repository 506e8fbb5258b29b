//! File-backed provisioning storage.
//!
//! Persists the provisioning record set as one JSON document on disk, the
//! Linux counterpart of the device's NVS storage.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use valvectl_core::provision::{ProvisionError, ProvisioningStore, ValveProvisioning};
use valvectl_core::WifiCredentials;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileContents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credentials: Option<WifiCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    valves: Option<Vec<ValveProvisioning>>,
}

/// JSON-file [`ProvisioningStore`].
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<FileContents, ProvisionError> {
        if !self.path.exists() {
            return Ok(FileContents::default());
        }
        let text =
            fs::read_to_string(&self.path).map_err(|e| ProvisionError::Read(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| ProvisionError::InvalidData(e.to_string()))
    }

    fn write(&self, contents: &FileContents) -> Result<(), ProvisionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ProvisionError::Write(e.to_string()))?;
            }
        }
        let text = serde_json::to_string_pretty(contents)
            .map_err(|e| ProvisionError::Write(e.to_string()))?;
        fs::write(&self.path, text).map_err(|e| ProvisionError::Write(e.to_string()))
    }
}

impl ProvisioningStore for FileStore {
    fn load_credentials(&self) -> Result<WifiCredentials, ProvisionError> {
        self.read()?
            .credentials
            .ok_or_else(|| ProvisionError::NotFound("credentials".to_string()))
    }

    fn save_credentials(&self, credentials: &WifiCredentials) -> Result<(), ProvisionError> {
        let mut contents = self.read()?;
        contents.credentials = Some(credentials.clone());
        self.write(&contents)
    }

    fn load_valves(&self) -> Result<Vec<ValveProvisioning>, ProvisionError> {
        self.read()?
            .valves
            .ok_or_else(|| ProvisionError::NotFound("valves".to_string()))
    }

    fn save_valves(&self, valves: &[ValveProvisioning]) -> Result<(), ProvisionError> {
        let mut contents = self.read()?;
        contents.valves = Some(valves.to_vec());
        self.write(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileStore {
        let path = std::env::temp_dir().join(format!("valvectl-{}-{}.json", name, std::process::id()));
        let _ = fs::remove_file(&path);
        FileStore::new(path)
    }

    #[test]
    fn test_missing_file_reports_not_found() {
        let store = temp_store("missing");
        assert!(matches!(
            store.load_credentials().unwrap_err(),
            ProvisionError::NotFound(_)
        ));
        assert!(matches!(
            store.load_valves().unwrap_err(),
            ProvisionError::NotFound(_)
        ));
    }

    #[test]
    fn test_round_trip() {
        let store = temp_store("roundtrip");

        let credentials = WifiCredentials::new("HomeNet", "hunter22", "192.168.1.50").unwrap();
        store.save_credentials(&credentials).unwrap();

        let valves = vec![ValveProvisioning {
            pin: Some(12),
            label: "Garden Lights".to_string(),
            external_service_id: Some("skill-0042".to_string()),
        }];
        store.save_valves(&valves).unwrap();

        // Saving valves must not clobber previously saved credentials
        assert_eq!(store.load_credentials().unwrap(), credentials);
        assert_eq!(store.load_valves().unwrap(), valves);
    }

    #[test]
    fn test_corrupt_file_reports_invalid_data() {
        let store = temp_store("corrupt");
        fs::write(&store.path, "{ not json").unwrap();
        assert!(matches!(
            store.load_credentials().unwrap_err(),
            ProvisionError::InvalidData(_)
        ));
    }
}
