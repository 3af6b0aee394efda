//! Device file manager for loading, saving, importing and exporting devices
//!
//! Devices are stored as a flat, pretty-printed JSON array. Writes go through a
//! temporary file in the target directory and a rename, so a crash never leaves a
//! half-written device file behind.

use crate::config::models::Device;
use crate::error::{Result, WolError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable that overrides the default device file location
pub const CONFIG_ENV_VAR: &str = "SIMPLE_WOL_CONFIG";

/// Default device file name, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "devices.json";

/// Load devices from `path`
///
/// A missing file yields an empty list. A file that exists but is not a JSON array
/// of device records is an error.
pub fn load(path: &Path) -> Result<Vec<Device>> {
    if !path.exists() {
        info!("Device file {} not found, starting empty", path.display());
        return Ok(Vec::new());
    }

    read_devices(path)
}

/// Save `devices` to `path`, replacing any existing content
///
/// An existing file keeps its permissions, and a symlink is written through to
/// its target rather than replaced.
pub fn save(path: &Path, devices: &[Device]) -> Result<()> {
    let mut json =
        serde_json::to_string_pretty(devices).map_err(|e| WolError::persistence(path, e))?;
    json.push('\n');

    let existing = if path.exists() {
        let target = std::fs::canonicalize(path).map_err(|e| WolError::persistence(path, e))?;
        let permissions = std::fs::metadata(&target)
            .map_err(|e| WolError::persistence(path, e))?
            .permissions();
        Some((target, permissions))
    } else {
        None
    };
    let target = existing.as_ref().map_or(path, |(target, _)| target.as_path());

    // An empty parent means the working directory
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| WolError::persistence(path, e))?;

    // Atomic write: write to temp file, then rename
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| WolError::persistence(path, e))?;
    temp.write_all(json.as_bytes())
        .map_err(|e| WolError::persistence(path, e))?;
    if let Some((_, permissions)) = &existing {
        temp.as_file()
            .set_permissions(permissions.clone())
            .map_err(|e| WolError::persistence(path, e))?;
    }
    temp.persist(target)
        .map_err(|e| WolError::persistence(path, e.error))?;

    debug!("Wrote {} devices to {}", devices.len(), target.display());
    Ok(())
}

/// Read a device file that must exist
fn read_devices(path: &Path) -> Result<Vec<Device>> {
    let json = std::fs::read_to_string(path).map_err(|e| WolError::persistence(path, e))?;
    let devices: Vec<Device> =
        serde_json::from_str(&json).map_err(|e| WolError::persistence(path, e))?;
    debug!("Read {} devices from {}", devices.len(), path.display());
    Ok(devices)
}

/// Device file manager bound to one file path
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_file: PathBuf,
}

impl Default for ConfigManager {
    /// Uses `$SIMPLE_WOL_CONFIG` if set, otherwise `devices.json` in the working directory
    fn default() -> Self {
        Self::new(Self::default_config_path())
    }
}

impl ConfigManager {
    /// Create a manager for `config_file`
    pub fn new(config_file: impl Into<PathBuf>) -> Self {
        Self {
            config_file: config_file.into(),
        }
    }

    /// Resolve the default device file path from the environment
    pub fn default_config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
    }

    /// Absolute path this manager reads and writes
    pub fn get_config_path(&self) -> PathBuf {
        std::path::absolute(&self.config_file).unwrap_or_else(|_| self.config_file.clone())
    }

    /// Whether the device file exists yet
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }

    /// Load devices from the device file (empty if it does not exist)
    pub fn load_devices(&self) -> Result<Vec<Device>> {
        let devices = load(&self.config_file)?;
        info!(
            "Loaded {} devices from {}",
            devices.len(),
            self.config_file.display()
        );
        Ok(devices)
    }

    /// Overwrite the device file with `devices`
    pub fn save_devices(&self, devices: &[Device]) -> Result<()> {
        save(&self.config_file, devices)?;
        info!(
            "Saved {} devices to {}",
            devices.len(),
            self.config_file.display()
        );
        Ok(())
    }

    /// Write `devices` to an arbitrary backup file
    pub fn export_devices(&self, devices: &[Device], export_path: &Path) -> Result<()> {
        save(export_path, devices)?;
        info!(
            "Exported {} devices to {}",
            devices.len(),
            export_path.display()
        );
        Ok(())
    }

    /// Read devices from an arbitrary backup file
    ///
    /// Unlike [`ConfigManager::load_devices`], a missing file is an error.
    pub fn import_devices(&self, import_path: &Path) -> Result<Vec<Device>> {
        let devices = read_devices(import_path)?;
        info!(
            "Imported {} devices from {}",
            devices.len(),
            import_path.display()
        );
        Ok(devices)
    }
}
