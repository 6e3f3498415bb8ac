//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt the store on failure.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TwofaError;

/// Read YAML from a file
///
/// Returns `Ok(None)` when the file does not exist. Any other failure to open
/// or parse the file is reported as [`TwofaError::StoreUnreadable`].
pub fn read_yaml<T, P>(path: P) -> Result<Option<T>, TwofaError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(TwofaError::StoreUnreadable(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    let reader = BufReader::new(file);
    serde_yaml::from_reader(reader).map(Some).map_err(|e| {
        TwofaError::StoreUnreadable(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Path of the temp file used while replacing `path`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("store"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write YAML to a file atomically (write to temp, then rename)
///
/// The file is either completely replaced or not modified at all.
pub fn write_yaml_atomic<T, P>(path: P, data: &T) -> Result<(), TwofaError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    // Serialize fully before touching the filesystem
    let contents = serde_yaml::to_string(data)
        .map_err(|e| TwofaError::Serialization(format!("Failed to serialize store: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            TwofaError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, contents.as_bytes()).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| TwofaError::Io(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

/// Write bytes to a fresh file and sync it; the handle is closed on return
fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<(), TwofaError> {
    let file = File::create(path)
        .map_err(|e| TwofaError::Io(format!("Failed to create temp file: {}", e)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| TwofaError::Io(format!("Failed to restrict permissions: {}", e)))?;
    }

    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .map_err(|e| TwofaError::Io(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| TwofaError::Io(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| TwofaError::Io(format!("Failed to sync data: {}", e)))?;

    Ok(())
}
