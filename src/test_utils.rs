//! Shared test utilities for `simple-wol` unit tests.
//!
//! This module is only compiled during testing (`#[cfg(test)]`).

use crate::config::CONFIG_ENV_VAR;
use std::ffi::OsString;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that touch the `SIMPLE_WOL_CONFIG` environment variable.
static CONFIG_ENV_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that sets (or clears) `SIMPLE_WOL_CONFIG` for a test scope
/// and restores the original value when dropped.
///
/// The guard holds `CONFIG_ENV_LOCK` for its whole lifetime, so only one test
/// modifies the variable at a time. No other code in the crate reads it from a
/// background thread.
pub struct ConfigEnvGuard {
    original: Option<OsString>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables under a global lock"
)]
impl ConfigEnvGuard {
    /// Point `SIMPLE_WOL_CONFIG` at `path` for the guard's lifetime.
    pub fn new(path: &Path) -> Self {
        let lock = CONFIG_ENV_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let original = std::env::var_os(CONFIG_ENV_VAR);
        // SAFETY: access to the variable is serialized by CONFIG_ENV_LOCK
        unsafe {
            std::env::set_var(CONFIG_ENV_VAR, path);
        }
        Self {
            original,
            _lock: lock,
        }
    }

    /// Remove `SIMPLE_WOL_CONFIG` for the guard's lifetime.
    pub fn unset() -> Self {
        let lock = CONFIG_ENV_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let original = std::env::var_os(CONFIG_ENV_VAR);
        // SAFETY: access to the variable is serialized by CONFIG_ENV_LOCK
        unsafe {
            std::env::remove_var(CONFIG_ENV_VAR);
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables under a global lock"
)]
impl Drop for ConfigEnvGuard {
    fn drop(&mut self) {
        // SAFETY: the lock is still held; it is released after this body runs
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(CONFIG_ENV_VAR, original);
            }
        } else {
            unsafe {
                std::env::remove_var(CONFIG_ENV_VAR);
            }
        }
    }
}
