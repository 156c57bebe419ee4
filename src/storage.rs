use crate::model::{Event, ServiceListing, Shift};
use directories::ProjectDirs;
use log::info;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_FILE_NAME: &str = "data.json";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("No data file at {0}")]
    Missing(PathBuf),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed data in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Could not determine a data directory")]
    NoDataDir,
}

/// Everything the calendar reads from the platform's data file.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub services: Vec<ServiceListing>,
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StorageError::Missing(path.to_path_buf()));
        }
        let json = fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json(&json).map_err(|source| StorageError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "Loaded {} shifts, {} events, {} listings from {}",
            data.shifts.len(),
            data.events.len(),
            data.services.len(),
            path.display()
        );
        Ok(data)
    }

    pub fn default_path() -> Result<PathBuf, StorageError> {
        Ok(LocalStorage::data_dir()?.join(DATA_FILE_NAME))
    }
}

pub struct LocalStorage;

impl LocalStorage {
    /// Data directory, `HUBCAL_DATA_DIR` first, platform default otherwise.
    /// Created if missing.
    pub fn data_dir() -> Result<PathBuf, StorageError> {
        let dir = if let Ok(custom) = env::var("HUBCAL_DATA_DIR") {
            PathBuf::from(custom)
        } else if let Some(proj) = ProjectDirs::from("org", "hubcal", "hubcal") {
            proj.data_dir().to_path_buf()
        } else {
            return Err(StorageError::NoDataDir);
        };
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }
        Ok(dir)
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
        path: P,
        contents: C,
    ) -> Result<(), StorageError> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        let io_err = |source: std::io::Error| StorageError::Io {
            path: path.to_path_buf(),
            source,
        };
        fs::write(&tmp_path, contents).map_err(io_err)?;
        fs::rename(&tmp_path, path).map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_arrays_default_to_empty() {
        let data = Dataset::from_json(r#"{"events": []}"#).unwrap();
        assert!(data.shifts.is_empty());
        assert!(data.services.is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StorageError::Missing(_)));
    }

    #[test]
    fn load_reports_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Dataset::load(&path).unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
    }

    #[test]
    fn atomic_write_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ics");
        LocalStorage::atomic_write(&path, "one").unwrap();
        LocalStorage::atomic_write(&path, "two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
        assert!(!path.with_extension("tmp").exists());
    }
}
