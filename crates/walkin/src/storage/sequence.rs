//! Monotonic id sequence persisted beside a collection file.
//!
//! Ids are never reused: the sidecar remembers the next id even after records
//! are removed or the collection is cleared. When the sidecar is missing the
//! sequence resumes above every id still in the collection.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::file::{sibling, write_json};
use crate::error::Result;

/// On-disk form of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct SequenceState {
    next_id: u64,
}

/// Id generator for one collection.
#[derive(Debug, Clone)]
pub struct IdSequence {
    path: PathBuf,
}

impl IdSequence {
    /// Create the sequence that belongs to `collection_path`.
    #[must_use]
    pub fn for_collection(collection_path: &Path) -> Self {
        Self {
            path: sibling(collection_path, "seq"),
        }
    }

    /// Path of the sidecar file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The id the next inserted record should get, given the ids currently
    /// in the collection.
    #[must_use]
    pub fn peek(&self, existing: impl IntoIterator<Item = u64>) -> u64 {
        let mut count = 0_u64;
        let mut max_id = 0_u64;
        for id in existing {
            count += 1;
            max_id = max_id.max(id);
        }
        let floor = max_id.max(count) + 1;

        match read_json_state(&self.path) {
            Some(state) => state.next_id.max(floor),
            None => floor,
        }
    }

    /// Record that `id` has been handed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the sidecar cannot be written.
    pub fn commit(&self, id: u64) -> Result<()> {
        debug!(path = %self.path.display(), next_id = id + 1, "advancing id sequence");
        write_json(&self.path, &SequenceState { next_id: id + 1 })
    }
}

fn read_json_state(path: &Path) -> Option<SequenceState> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "id sequence unreadable, resuming");
            return None;
        }
    };

    serde_json::from_slice(&bytes)
        .map_err(|err| {
            warn!(path = %path.display(), error = %err, "id sequence unreadable, resuming");
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_path() {
        let seq = IdSequence::for_collection(Path::new("/data/live_queue.json"));
        assert_eq!(seq.path(), Path::new("/data/live_queue.json.seq"));
    }

    #[test]
    fn test_peek_without_sidecar_uses_collection() {
        let dir = tempfile::tempdir().unwrap();
        let seq = IdSequence::for_collection(&dir.path().join("q.json"));

        assert_eq!(seq.peek([]), 1);
        assert_eq!(seq.peek([1, 2, 3]), 4);
        // A gap left by a removal does not pull the next id down
        assert_eq!(seq.peek([1, 3]), 4);
        assert_eq!(seq.peek([7]), 8);
    }

    #[test]
    fn test_commit_survives_clear() {
        let dir = tempfile::tempdir().unwrap();
        let seq = IdSequence::for_collection(&dir.path().join("q.json"));

        seq.commit(5).unwrap();
        assert_eq!(seq.peek([]), 6);
        assert_eq!(seq.peek([1, 2, 3, 4, 5, 6, 7, 8, 9]), 10);
    }

    #[test]
    fn test_unreadable_sidecar_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let seq = IdSequence::for_collection(&dir.path().join("q.json"));
        std::fs::write(seq.path(), "??").unwrap();

        assert_eq!(seq.peek([1, 2]), 3);
    }
}
