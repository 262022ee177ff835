//! Current password, optionally mirrored to a flat file.

use std::path::{Path, PathBuf};

use crate::auth::constant_time_compare;
use crate::errors::AppError;

/// Holds the real password apart from the masked display field.
#[derive(Debug)]
pub struct PasswordVault {
    current: String,
    file: Option<PathBuf>,
}

impl PasswordVault {
    /// Memory-only vault.
    pub fn in_memory(initial: &str) -> Self {
        Self {
            current: initial.to_string(),
            file: None,
        }
    }

    /// Vault backed by `file`.
    ///
    /// An existing file supplies the password. A missing file is created
    /// holding `default`. Read failures fall back to `default`.
    pub async fn open(file: &Path, default: &str) -> Self {
        let current = match tokio::fs::read_to_string(file).await {
            Ok(contents) => contents.trim().to_string(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Err(e) = write_file(file, default).await {
                    tracing::warn!("Failed to create password file: {}", e);
                }
                default.to_string()
            }
            Err(e) => {
                tracing::warn!(path = %file.display(), "Failed to read password file: {}", e);
                default.to_string()
            }
        };

        Self {
            current,
            file: Some(file.to_path_buf()),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.file.is_some()
    }

    /// Replace the password and write it through to the file, if any.
    ///
    /// The in-memory value is updated even when the write fails.
    pub async fn replace(&mut self, password: &str) -> Result<(), AppError> {
        self.current = password.to_string();
        match &self.file {
            Some(path) => write_file(path, password).await,
            None => Ok(()),
        }
    }

    /// Byte-for-byte comparison against the current password.
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_compare(candidate, &self.current)
    }
}

async fn write_file(path: &Path, password: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to save password: {}", e)))?;
    }
    tokio::fs::write(path, password)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to save password: {}", e)))
}
