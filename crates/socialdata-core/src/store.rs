//! Durable storage for the connector's [`EngineConfiguration`].
//!
//! The store keeps the current configuration in memory and, when backed by a
//! file, rewrites the JSON document on every [`EngineStore::save`]. Files are
//! small and written rarely (once per OAuth callback), so plain `std::fs` is
//! used.
//!
//! Credentials applied from the environment live only in memory: a save
//! writes back whatever the file held for those fields.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::{ConfigError, EngineConfiguration};

#[derive(Debug)]
pub struct EngineStore {
    path: Option<PathBuf>,
    current: RwLock<EngineConfiguration>,
    file_credentials: RwLock<FileCredentials>,
}

/// A credential overridden by the environment, holding the value the file
/// had before the override.
#[derive(Clone)]
struct FileValue(Option<String>);

/// On-disk values of the credentials overridden by the environment. Fields
/// left `None` were not overridden and are saved as held in memory.
#[derive(Default)]
struct FileCredentials {
    client_id: Option<FileValue>,
    client_secret: Option<FileValue>,
}

impl std::fmt::Debug for FileCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileCredentials")
            .field("client_id_overridden", &self.client_id.is_some())
            .field("client_secret_overridden", &self.client_secret.is_some())
            .finish()
    }
}

impl FileCredentials {
    fn restore(&self, config: &mut EngineConfiguration) {
        if let Some(FileValue(id)) = &self.client_id {
            config.set_client_id(id.clone());
        }
        if let Some(FileValue(secret)) = &self.client_secret {
            config.set_client_secret(secret.clone());
        }
    }
}

impl EngineStore {
    /// Opens a file-backed store. A missing file yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EngineStoreIo`] if the file exists but cannot be
    /// read, or [`ConfigError::EngineStoreParse`] if it is not valid JSON.
    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        let current = match std::fs::read_to_string(path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| ConfigError::EngineStoreParse {
                    path: path.display().to_string(),
                    source: e,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "engine store missing; starting empty");
                EngineConfiguration::default()
            }
            Err(e) => {
                return Err(ConfigError::EngineStoreIo {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            current: RwLock::new(current),
            file_credentials: RwLock::new(FileCredentials::default()),
        })
    }

    /// A store that never touches disk.
    #[must_use]
    pub fn in_memory(config: EngineConfiguration) -> Self {
        Self {
            path: None,
            current: RwLock::new(config),
            file_credentials: RwLock::new(FileCredentials::default()),
        }
    }

    /// Overrides the stored client credentials with values from the process
    /// environment, when provided. Overridden fields are never written to
    /// the file; saves keep the values it already held.
    pub fn apply_credentials(&self, client_id: Option<&str>, client_secret: Option<&str>) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut file = self
            .file_credentials
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(id) = client_id {
            file.client_id
                .get_or_insert_with(|| FileValue(current.client_id().map(str::to_string)));
            current.set_client_id(Some(id.to_string()));
        }
        if let Some(secret) = client_secret {
            file.client_secret
                .get_or_insert_with(|| FileValue(current.client_secret().map(str::to_string)));
            current.set_client_secret(Some(secret.to_string()));
        }
    }

    /// Snapshot of the current configuration.
    #[must_use]
    pub fn load(&self) -> EngineConfiguration {
        self.current
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Replaces the configuration and persists it when file-backed.
    /// Credentials applied from the environment stay in memory only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EngineStoreIo`] if the file cannot be written.
    pub fn save(&self, config: EngineConfiguration) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            let io_err = |e| ConfigError::EngineStoreIo {
                path: path.display().to_string(),
                source: e,
            };
            let mut on_disk = config.clone();
            self.file_credentials
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .restore(&mut on_disk);
            let body = serde_json::to_string_pretty(&on_disk).map_err(|e| {
                ConfigError::EngineStoreParse {
                    path: path.display().to_string(),
                    source: e,
                }
            })?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
            std::fs::write(path, body).map_err(io_err)?;
            tracing::info!(path = %path.display(), "engine configuration saved");
        }

        *self
            .current
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = config;
        Ok(())
    }
}
