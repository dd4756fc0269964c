//! File storage backend: one pretty-printed JSON file per key.
//!
//! Writes go to `<key>.json.tmp` and are renamed over `<key>.json`, so a
//! file is either written completely or not modified.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::config::{ConfigError, ConfigStorage};

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileConfigStorage {
    dir: PathBuf,
}

impl FileConfigStorage {
    /// Use `dir` as the storage directory, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|err| {
            warn!(?dir, "Failed to create config directory: {:?}", err);
            ConfigError::StorageUnavailable(format!("{}: {}", dir.display(), err))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`. Keys are limited to ASCII
    /// alphanumerics, `-` and `_` so they cannot escape the directory.
    pub fn path(&self, key: &str) -> Result<PathBuf, ConfigError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ConfigError::InvalidData(format!("invalid key {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.{}", key, EXTENSION)))
    }

    fn tmp_path(&self, key: &str) -> Result<PathBuf, ConfigError> {
        Ok(self.path(key)?.with_extension("json.tmp"))
    }
}

impl ConfigStorage for FileConfigStorage {
    fn load_value<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let path = self.path(key)?;
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(key.to_string()));
            }
            Err(err) => {
                warn!(?path, "Failed to read config: {:?}", err);
                return Err(ConfigError::ReadError(err.to_string()));
            }
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|err| {
            warn!(?path, "Failed to parse config: {:?}", err);
            ConfigError::InvalidData(err.to_string())
        })
    }

    fn save_value<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let path = self.path(key)?;
        let tmp_path = self.tmp_path(key)?;
        let mut tmp_file = BufWriter::new(File::create(&tmp_path).map_err(|err| {
            warn!(?tmp_path, "Failed to create config tmp file: {:?}", err);
            ConfigError::WriteError(err.to_string())
        })?);
        let written = serde_json::to_writer_pretty(&mut tmp_file, value)
            .map_err(|err| {
                warn!(?tmp_path, "Failed to serialize config: {:?}", err);
                ConfigError::WriteError(err.to_string())
            })
            .and_then(|()| {
                tmp_file.flush().map_err(|err| {
                    warn!(?tmp_path, "Failed to flush config: {:?}", err);
                    ConfigError::WriteError(err.to_string())
                })
            });
        drop(tmp_file);
        let result = written.and_then(|()| {
            fs::rename(&tmp_path, &path).map_err(|err| {
                warn!(?path, "Failed to rename config: {:?}", err);
                ConfigError::WriteError(err.to_string())
            })
        });
        if result.is_err() {
            remove_tmp(&tmp_path);
            return result;
        }
        debug!(?path, "Saved config");
        Ok(())
    }

    fn has_key(&self, key: &str) -> bool {
        self.path(key).map(|p| p.is_file()).unwrap_or(false)
    }

    fn delete_key(&self, key: &str) -> Result<(), ConfigError> {
        let path = self.path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ConfigError::WriteError(err.to_string())),
        }
    }

    fn list_keys(&self) -> Result<Vec<String>, ConfigError> {
        let entries =
            fs::read_dir(&self.dir).map_err(|err| ConfigError::ReadError(err.to_string()))?;
        let mut keys = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|err| ConfigError::ReadError(err.to_string()))?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

fn remove_tmp(tmp_path: &Path) {
    if let Err(err) = fs::remove_file(tmp_path) {
        if err.kind() != io::ErrorKind::NotFound {
            warn!(?tmp_path, "Failed to remove config tmp file: {:?}", err);
        }
    }
}
