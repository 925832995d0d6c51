//! Whole-file JSON reads and transactional replacement.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// The result of reading a collection file.
///
/// Distinguishes a collection that is legitimately empty (or was never
/// written) from one whose file could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot<T> {
    /// The file does not exist yet.
    Missing,
    /// The file was read and decoded.
    Records(Vec<T>),
    /// The file exists but could not be read or decoded.
    Unreadable {
        /// What went wrong.
        reason: String,
    },
}

impl<T> Snapshot<T> {
    /// Collapse into a record list, treating missing and unreadable files as
    /// empty.
    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        match self {
            Self::Records(records) => records,
            Self::Missing | Self::Unreadable { .. } => Vec::new(),
        }
    }

    /// Check if the file was present but unusable.
    #[must_use]
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Self::Unreadable { .. })
    }
}

/// Read and decode a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Snapshot<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Snapshot::Missing,
        Err(err) => {
            return Snapshot::Unreadable {
                reason: err.to_string(),
            }
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(records) => Snapshot::Records(records),
        Err(err) => Snapshot::Unreadable {
            reason: err.to_string(),
        },
    }
}

/// Serialize `value` as pretty-printed JSON and replace the file at `path`.
///
/// The content is written to a sibling temporary file which is then renamed
/// over the target, so readers see either the old or the new content.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or any file
/// operation fails.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');

    let tmp = temp_path(path);
    let mut file = fs::File::create(&tmp).map_err(|e| Error::io(&tmp, e))?;
    file.write_all(&bytes).map_err(|e| Error::io(&tmp, e))?;
    file.sync_all().map_err(|e| Error::io(&tmp, e))?;
    drop(file);

    fs::rename(&tmp, path).map_err(|e| Error::io(path, e))
}

/// Move an unreadable file aside so the next write does not destroy it.
///
/// Returns the path the file was moved to.
///
/// # Errors
///
/// Returns an error if the rename fails.
pub fn preserve_unreadable(path: &Path) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    let backup = sibling(path, &format!("unreadable-{stamp}"));
    fs::rename(path, &backup).map_err(|e| Error::io(path, e))?;
    Ok(backup)
}

/// `dir/.name.tmp` for `dir/name`.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "collection".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.tmp"))
}

/// `dir/name.suffix` for `dir/name`.
pub(crate) fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "collection".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!("{name}.{suffix}"))
}
