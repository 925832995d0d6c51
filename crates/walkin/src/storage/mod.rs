//! Storage layer for walkin.
//!
//! Two flat JSON collections back the application: the live queue and the
//! customer log. Each collection is loaded in full, changed in memory and
//! written back in full. Within one process every read-modify-write of a
//! collection holds that collection's lock, so concurrent submissions do not
//! lose each other's appends.

pub mod file;
pub mod sequence;

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::record::{Contact, CustomerRecord, QueueRecord, Record};

pub use file::Snapshot;
pub use sequence::IdSequence;

/// One JSON collection file.
#[derive(Debug)]
pub struct Collection<T> {
    /// Path to the collection file.
    path: PathBuf,
    /// Id generator persisted beside the file.
    sequence: IdSequence,
    /// Serializes read-modify-write cycles.
    lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T: Record> Collection<T> {
    /// Create a handle to the collection stored at `path`.
    ///
    /// Nothing is read or created until the collection is used.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            sequence: IdSequence::for_collection(&path),
            path,
            lock: Mutex::new(()),
            _records: PhantomData,
        }
    }

    /// Get the path to the collection file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection file.
    ///
    /// Missing files are logged at debug level, unreadable ones at warn.
    #[must_use]
    pub fn load(&self) -> Snapshot<T> {
        let snapshot = file::read_json(&self.path);
        match &snapshot {
            Snapshot::Missing => debug!(path = %self.path.display(), "collection file not found"),
            Snapshot::Records(records) => {
                debug!(path = %self.path.display(), count = records.len(), "loaded collection");
            }
            Snapshot::Unreadable { reason } => {
                warn!(
                    path = %self.path.display(),
                    %reason,
                    "collection file unreadable, treating as empty"
                );
            }
        }
        snapshot
    }

    /// All records, with missing or unreadable files treated as empty.
    #[must_use]
    pub fn records(&self) -> Vec<T> {
        self.load().into_records()
    }

    /// Replace the whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, records: &[T]) -> Result<()> {
        let _guard = self.guard();
        self.write(records)
    }

    /// Append a record built from `contact`, stamped with the current local
    /// time.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn append(&self, contact: Contact) -> Result<T> {
        self.append_at(contact, Local::now().naive_local())
    }

    /// Append a record built from `contact` with an explicit creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn append_at(&self, contact: Contact, timestamp: NaiveDateTime) -> Result<T> {
        let _guard = self.guard();
        let mut records = self.load_for_update()?;

        let id = self.sequence.peek(records.iter().map(|record| record.id()));
        let record = T::from_contact(contact, id, timestamp);
        records.push(record.clone());
        self.write(&records)?;

        if let Err(err) = self.sequence.commit(id) {
            warn!(
                path = %self.sequence.path().display(),
                error = %err,
                "failed to persist id sequence"
            );
        }
        Ok(record)
    }

    /// Remove every record whose id is `id`, keeping the others in order.
    ///
    /// Returns the removed records; removing an unknown id changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn remove(&self, id: u64) -> Result<Vec<T>> {
        let _guard = self.guard();
        let records = self.load_for_update()?;

        let (removed, kept): (Vec<T>, Vec<T>) =
            records.into_iter().partition(|record| record.id() == id);
        if removed.is_empty() {
            debug!(path = %self.path.display(), id, "no record to remove");
            return Ok(removed);
        }

        self.write(&kept)?;
        Ok(removed)
    }

    /// Empty the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn clear(&self) -> Result<()> {
        let _guard = self.guard();
        self.write(&[])
    }

    /// Load before a mutation. An unreadable file is moved aside first so the
    /// write that follows does not silently destroy it.
    fn load_for_update(&self) -> Result<Vec<T>> {
        let snapshot = self.load();
        if snapshot.is_unreadable() {
            let backup = file::preserve_unreadable(&self.path)?;
            warn!(
                path = %self.path.display(),
                backup = %backup.display(),
                "moved unreadable collection aside before writing"
            );
        }
        Ok(snapshot.into_records())
    }

    fn write(&self, records: &[T]) -> Result<()> {
        file::write_json(&self.path, records)?;
        debug!(path = %self.path.display(), count = records.len(), "saved collection");
        Ok(())
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The lock protects no data, so a poisoned lock is still usable
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The two collections of the application.
#[derive(Debug)]
pub struct Store {
    queue: Collection<QueueRecord>,
    customers: Collection<CustomerRecord>,
}

impl Store {
    /// Open the store at explicit file paths.
    #[must_use]
    pub fn new(queue_path: impl AsRef<Path>, customers_path: impl AsRef<Path>) -> Self {
        Self {
            queue: Collection::new(queue_path),
            customers: Collection::new(customers_path),
        }
    }

    /// Open the store described by the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.queue_path(), config.customers_path())
    }

    /// The live queue collection.
    #[must_use]
    pub fn queue(&self) -> &Collection<QueueRecord> {
        &self.queue
    }

    /// The customer log collection.
    #[must_use]
    pub fn customers(&self) -> &Collection<CustomerRecord> {
        &self.customers
    }

    /// Add a waiting customer to the live queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue file cannot be written.
    pub fn enqueue(&self, contact: Contact) -> Result<QueueRecord> {
        let record = self.queue.append(contact)?;
        info!(id = record.id, "customer added to queue");
        Ok(record)
    }

    /// Add a customer to the permanent log.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer log cannot be written.
    pub fn log_customer(&self, contact: Contact) -> Result<CustomerRecord> {
        let record = self.customers.append(contact)?;
        info!(id = record.id, "customer logged");
        Ok(record)
    }

    /// Remove a customer from the live queue (the "assign" action).
    ///
    /// # Errors
    ///
    /// Returns an error if the queue file cannot be written.
    pub fn dequeue(&self, id: u64) -> Result<Vec<QueueRecord>> {
        let removed = self.queue.remove(id)?;
        if !removed.is_empty() {
            info!(id, "customer assigned");
        }
        Ok(removed)
    }

    /// Empty the live queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue file cannot be written.
    pub fn clear_queue(&self) -> Result<()> {
        self.queue.clear()?;
        info!("queue cleared");
        Ok(())
    }

    /// Empty the customer log.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer log cannot be written.
    pub fn clear_customers(&self) -> Result<()> {
        self.customers.clear()?;
        info!("customer log cleared");
        Ok(())
    }
}
