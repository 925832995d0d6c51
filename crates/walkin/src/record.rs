//! Record types for the two collections.
//!
//! A walk-in customer is described once by a [`Contact`]; storing it produces
//! a [`QueueRecord`] in the live queue and a [`CustomerRecord`] in the
//! customer log.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The status of a queue entry.
///
/// Only `waiting` is ever persisted: assigning a customer removes the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    /// The customer is waiting to be seen.
    #[default]
    Waiting,
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
        }
    }
}

/// The details a customer provides at the desk, already validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Full name, trimmed and non-empty.
    pub name: String,
    /// Phone number, trimmed and non-empty.
    pub phone: String,
    /// Preferred appointment date.
    pub date: NaiveDate,
    /// Preferred appointment time.
    pub time: NaiveTime,
    /// Free-form notes, empty when none were given.
    #[serde(default)]
    pub notes: String,
}

/// An entry in the live queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRecord {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Preferred appointment date.
    pub date: NaiveDate,
    /// Preferred appointment time.
    pub time: NaiveTime,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Identifier within the queue file.
    pub id: u64,
    /// When the record was added (local wall clock).
    pub timestamp: NaiveDateTime,
    /// Queue status.
    #[serde(default)]
    pub status: QueueStatus,
}

/// An entry in the customer log.
///
/// Same shape as [`QueueRecord`] without a status. Older log files carry a
/// stray `status` key; it is ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Preferred appointment date.
    pub date: NaiveDate,
    /// Preferred appointment time.
    pub time: NaiveTime,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Identifier within the customer log file.
    pub id: u64,
    /// When the record was added (local wall clock).
    pub timestamp: NaiveDateTime,
}

/// Common behavior of records stored in a collection file.
pub trait Record: Serialize + for<'de> Deserialize<'de> + Clone + Send + Sync + 'static {
    /// Build a new record from a contact, an id and a creation instant.
    fn from_contact(contact: Contact, id: u64, timestamp: NaiveDateTime) -> Self;

    /// The record's identifier.
    fn id(&self) -> u64;

    /// The contact details the record was created from.
    fn contact(&self) -> Contact;
}

impl Record for QueueRecord {
    fn from_contact(contact: Contact, id: u64, timestamp: NaiveDateTime) -> Self {
        Self {
            name: contact.name,
            phone: contact.phone,
            date: contact.date,
            time: contact.time,
            notes: contact.notes,
            id,
            timestamp,
            status: QueueStatus::Waiting,
        }
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn contact(&self) -> Contact {
        Contact {
            name: self.name.clone(),
            phone: self.phone.clone(),
            date: self.date,
            time: self.time,
            notes: self.notes.clone(),
        }
    }
}

impl Record for CustomerRecord {
    fn from_contact(contact: Contact, id: u64, timestamp: NaiveDateTime) -> Self {
        Self {
            name: contact.name,
            phone: contact.phone,
            date: contact.date,
            time: contact.time,
            notes: contact.notes,
            id,
            timestamp,
        }
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn contact(&self) -> Contact {
        Contact {
            name: self.name.clone(),
            phone: self.phone.clone(),
            date: self.date,
            time: self.time,
            notes: self.notes.clone(),
        }
    }
}

impl QueueRecord {
    /// Check if the customer is still waiting.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.status == QueueStatus::Waiting
    }
}
