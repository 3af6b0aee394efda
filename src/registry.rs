//! In-memory device registry
//!
//! The registry is the ordered device list a session works on. It is owned by
//! the caller and passed by reference; the device file stays the durable copy and
//! is rewritten by the caller after every mutation.
//!
//! Loads and imports are all-or-nothing: when reading the file fails the registry
//! keeps its previous contents.

use crate::config::{ConfigManager, Device};
use crate::error::{Result, WolError};
use std::cmp::Ordering;
use std::path::Path;
use tracing::debug;

/// Column a registry can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Device name, case-insensitive
    Name,
    /// MAC address as stored
    MacAddress,
    /// IP address, broadcast devices first
    IpAddress,
    /// UDP port
    Port,
}

/// Ordered collection of devices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `devices` in the given order
    pub fn from_devices(devices: Vec<Device>) -> Self {
        Self { devices }
    }

    /// All devices in display order
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Number of devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the registry holds no devices
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Index of the device called `name`
    ///
    /// An exact match wins; otherwise the first case-insensitive match is used.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.devices
            .iter()
            .position(|d| d.name == name)
            .or_else(|| {
                self.devices
                    .iter()
                    .position(|d| d.name.to_lowercase() == name.to_lowercase())
            })
    }

    /// Device called `name`, see [`DeviceRegistry::position`]
    pub fn find(&self, name: &str) -> Result<&Device> {
        self.position(name)
            .map(|index| &self.devices[index])
            .ok_or_else(|| WolError::DeviceNotFound(name.to_string()))
    }

    /// Append a device
    pub fn add(&mut self, device: Device) {
        debug!("Adding {}", device);
        self.devices.push(device);
    }

    /// Replace the device called `name` with `device`, keeping its position
    ///
    /// Returns the device that was replaced.
    pub fn replace(&mut self, name: &str, device: Device) -> Result<Device> {
        let index = self
            .position(name)
            .ok_or_else(|| WolError::DeviceNotFound(name.to_string()))?;
        debug!("Replacing entry {} with {}", index, device);
        Ok(std::mem::replace(&mut self.devices[index], device))
    }

    /// Remove the device called `name`, returning it
    pub fn remove(&mut self, name: &str) -> Result<Device> {
        let index = self
            .position(name)
            .ok_or_else(|| WolError::DeviceNotFound(name.to_string()))?;
        let removed = self.devices.remove(index);
        debug!("Removed {}", removed);
        Ok(removed)
    }

    /// Replace the whole list
    pub fn replace_all(&mut self, devices: Vec<Device>) {
        debug!(
            "Replacing {} devices with {}",
            self.devices.len(),
            devices.len()
        );
        self.devices = devices;
    }

    /// Stable sort by `key`, descending when `reverse` is set
    pub fn sort_by(&mut self, key: SortKey, reverse: bool) {
        self.devices.sort_by(|a, b| {
            let ordering = compare(a, b, key);
            if reverse { ordering.reverse() } else { ordering }
        });
    }

    /// Reload from the manager's device file
    ///
    /// On error the registry is left untouched.
    pub fn load(&mut self, manager: &ConfigManager) -> Result<()> {
        let devices = manager.load_devices()?;
        self.replace_all(devices);
        Ok(())
    }

    /// Write the registry to the manager's device file
    pub fn save(&self, manager: &ConfigManager) -> Result<()> {
        manager.save_devices(&self.devices)
    }

    /// Replace the registry with the devices in `path`
    ///
    /// On error the registry is left untouched. Returns the number of devices
    /// imported.
    pub fn import(&mut self, manager: &ConfigManager, path: &Path) -> Result<usize> {
        let devices = manager.import_devices(path)?;
        let count = devices.len();
        self.replace_all(devices);
        Ok(count)
    }

    /// Write the registry to a backup file at `path`
    pub fn export(&self, manager: &ConfigManager, path: &Path) -> Result<()> {
        manager.export_devices(&self.devices, path)
    }
}

fn compare(a: &Device, b: &Device, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::MacAddress => a.mac_address.cmp(&b.mac_address),
        SortKey::IpAddress => a.ip_address.cmp(&b.ip_address),
        SortKey::Port => a.port.cmp(&b.port),
    }
}

impl<'a> IntoIterator for &'a DeviceRegistry {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_utils::create_test_dir;

    fn registry() -> DeviceRegistry {
        DeviceRegistry::from_devices(vec![
            Device::new("office", "AA:BB:CC:DD:EE:FF", "192.168.1.10", 9),
            Device::new("NAS", "00:11:22:33:44:55", "", 7),
            Device::new("Media", "66:77:88:99:AA:BB", "192.168.1.2", 0),
        ])
    }

    fn names(registry: &DeviceRegistry) -> Vec<&str> {
        registry.into_iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_find_exact_then_case_insensitive() {
        let mut registry = registry();
        registry.add(Device::new("nas", "12:34:56:78:9A:BC", "", 9));

        assert_eq!(registry.find("nas").unwrap().mac_address, "12:34:56:78:9A:BC");
        assert_eq!(registry.find("NAS").unwrap().mac_address, "00:11:22:33:44:55");
        assert_eq!(registry.find("Office").unwrap().name, "office");
        assert!(matches!(
            registry.find("printer"),
            Err(WolError::DeviceNotFound(_))
        ));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut registry = registry();
        let old = registry
            .replace("NAS", Device::new("Storage", "00:11:22:33:44:55", "10.0.0.3", 9))
            .unwrap();

        assert_eq!(old.name, "NAS");
        assert_eq!(names(&registry), ["office", "Storage", "Media"]);
    }

    #[test]
    fn test_remove() {
        let mut registry = registry();
        let removed = registry.remove("media").unwrap();
        assert_eq!(removed.name, "Media");
        assert_eq!(registry.len(), 2);
        assert!(registry.remove("media").is_err());
    }

    #[test]
    fn test_sort_by_name_case_insensitive() {
        let mut registry = registry();
        registry.sort_by(SortKey::Name, false);
        assert_eq!(names(&registry), ["Media", "NAS", "office"]);

        registry.sort_by(SortKey::Name, true);
        assert_eq!(names(&registry), ["office", "NAS", "Media"]);
    }

    #[test]
    fn test_sort_by_ip_broadcast_first() {
        let mut registry = registry();
        registry.sort_by(SortKey::IpAddress, false);
        assert_eq!(names(&registry), ["NAS", "office", "Media"]);
    }

    #[test]
    fn test_sort_by_port_and_mac() {
        let mut registry = registry();
        registry.sort_by(SortKey::Port, false);
        assert_eq!(names(&registry), ["Media", "NAS", "office"]);

        registry.sort_by(SortKey::MacAddress, true);
        assert_eq!(names(&registry), ["office", "Media", "NAS"]);
    }

    #[test]
    fn test_load_failure_leaves_registry_untouched() {
        let dir = create_test_dir();
        let path = dir.path().join("devices.json");
        std::fs::write(&path, "[{\"name\": ").unwrap();
        let manager = ConfigManager::new(&path);

        let mut registry = registry();
        let before = registry.clone();
        let err = registry.load(&manager).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert_eq!(registry, before);
    }

    #[test]
    fn test_import_replaces_everything() {
        let dir = create_test_dir();
        let manager = ConfigManager::new(dir.path().join("devices.json"));
        let backup = dir.path().join("backup.json");
        let incoming = vec![
            Device::new("Laptop", "01:02:03:04:05:06", "", 9),
            Device::new("Tower", "0A:0B:0C:0D:0E:0F", "10.0.0.9", 9),
        ];
        crate::config::manager::save(&backup, &incoming).unwrap();

        let mut registry = registry();
        let count = registry.import(&manager, &backup).unwrap();

        assert_eq!(count, 2);
        assert_eq!(registry.devices(), incoming.as_slice());
    }

    #[test]
    fn test_save_then_load() {
        let dir = create_test_dir();
        let manager = ConfigManager::new(dir.path().join("devices.json"));

        let registry = registry();
        registry.save(&manager).unwrap();

        let mut reloaded = DeviceRegistry::new();
        reloaded.load(&manager).unwrap();
        assert_eq!(reloaded, registry);
    }
}
