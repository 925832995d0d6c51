//! Public intake flow.
//!
//! A submitted form is validated into a [`Contact`], then written to the live
//! queue and the customer log. An invalid form has no side effects; a failed
//! write hands the form back so nothing the customer typed is lost.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::error::Error;
use crate::record::{Contact, CustomerRecord, QueueRecord};
use crate::storage::Store;

/// A required intake field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The customer's name.
    Name,
    /// The customer's phone number.
    Phone,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "Name"),
            Self::Phone => write!(f, "Phone"),
        }
    }
}

/// Why a submitted form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields were blank.
    #[error("Please fill in all required fields ({})", join_fields(.0))]
    MissingFields(Vec<Field>),

    /// The preferred date did not parse.
    #[error("Preferred date '{0}' is not a valid date")]
    InvalidDate(String),

    /// The preferred time did not parse.
    #[error("Preferred time '{0}' is not a valid time")]
    InvalidTime(String),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}

/// The raw intake form as submitted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeForm {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Preferred date, `YYYY-MM-DD`; blank means today.
    pub date: String,
    /// Preferred time, `HH:MM` or `HH:MM:SS`; blank means now.
    pub time: String,
    /// Additional notes.
    pub notes: String,
}

impl IntakeForm {
    /// Validate the form against the current local time.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming what is wrong with the form.
    pub fn validate(&self, now: NaiveDateTime) -> Result<Contact, ValidationError> {
        let name = self.name.trim();
        let phone = self.phone.trim();

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push(Field::Name);
        }
        if phone.is_empty() {
            missing.push(Field::Phone);
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let date = match self.date.trim() {
            "" => now.date(),
            raw => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ValidationError::InvalidDate(raw.to_string()))?,
        };

        let time = match self.time.trim() {
            "" => now
                .time()
                .with_second(0)
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or_else(|| now.time()),
            raw => parse_time(raw).ok_or_else(|| ValidationError::InvalidTime(raw.to_string()))?,
        };

        Ok(Contact {
            name: name.to_string(),
            phone: phone.to_string(),
            date,
            time,
            notes: self.notes.trim().to_string(),
        })
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// What happened to a submitted form.
#[derive(Debug)]
pub enum IntakeOutcome {
    /// The customer was added to both collections.
    Accepted {
        /// The new live queue entry.
        queue: QueueRecord,
        /// The new customer log entry.
        customer: CustomerRecord,
    },
    /// The form was rejected; nothing was written.
    Invalid {
        /// The form as submitted.
        form: IntakeForm,
        /// What is wrong with it.
        error: ValidationError,
    },
    /// Writing failed; the customer may try again.
    Failed {
        /// The form as submitted.
        form: IntakeForm,
        /// The storage failure.
        error: Error,
    },
}

impl IntakeOutcome {
    /// Check if the form was stored.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Validate and store a submitted form.
///
/// The queue entry is written first, then the customer log entry. If the
/// second write fails the queue entry is taken back out, so resubmitting the
/// form adds exactly one record to each collection.
pub fn submit(store: &Store, form: IntakeForm, now: NaiveDateTime) -> IntakeOutcome {
    let contact = match form.validate(now) {
        Ok(contact) => contact,
        Err(error) => return IntakeOutcome::Invalid { form, error },
    };

    let queue = match store.enqueue(contact.clone()) {
        Ok(record) => record,
        Err(error) => {
            error!(%error, "failed to add customer to queue");
            return IntakeOutcome::Failed { form, error };
        }
    };

    match store.log_customer(contact) {
        Ok(customer) => {
            info!(queue_id = queue.id, customer_id = customer.id, "intake accepted");
            IntakeOutcome::Accepted { queue, customer }
        }
        Err(error) => {
            error!(%error, queue_id = queue.id, "failed to log customer");
            if let Err(rollback) = store.queue().remove(queue.id) {
                error!(error = %rollback, queue_id = queue.id, "failed to withdraw queue entry");
            }
            IntakeOutcome::Failed { form, error }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(11, 42, 17, 250)
            .unwrap()
    }

    fn form(name: &str, phone: &str) -> IntakeForm {
        IntakeForm {
            name: name.to_string(),
            phone: phone.to_string(),
            date: "2024-03-10".to_string(),
            time: "15:30".to_string(),
            notes: "  Prefers Sam  ".to_string(),
        }
    }

    fn create_test_store(dir: &tempfile::TempDir) -> Store {
        Store::new(
            dir.path().join("live_queue.json"),
            dir.path().join("customers.json"),
        )
    }

    #[test]
    fn test_validate_trims_fields() {
        let contact = form("  Alice Smith ", " 555-0101").validate(now()).unwrap();
        assert_eq!(contact.name, "Alice Smith");
        assert_eq!(contact.phone, "555-0101");
        assert_eq!(contact.notes, "Prefers Sam");
        assert_eq!(contact.date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(contact.time, NaiveTime::from_hms_opt(15, 30, 0).unwrap());
    }

    #[test]
    fn test_validate_missing_both() {
        let err = form("", "   ").validate(now()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec![Field::Name, Field::Phone])
        );
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields (Name and Phone)"
        );
    }

    #[test]
    fn test_validate_missing_phone() {
        let err = form("Alice", "").validate(now()).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields (Phone)");
    }

    #[test]
    fn test_validate_defaults_date_and_time() {
        let mut f = form("Alice", "555");
        f.date = String::new();
        f.time = String::new();

        let contact = f.validate(now()).unwrap();
        assert_eq!(contact.date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(contact.time, NaiveTime::from_hms_opt(11, 42, 0).unwrap());
    }

    #[test]
    fn test_validate_accepts_seconds() {
        let mut f = form("Alice", "555");
        f.time = "09:15:30".to_string();
        let contact = f.validate(now()).unwrap();
        assert_eq!(contact.time, NaiveTime::from_hms_opt(9, 15, 30).unwrap());
    }

    #[test]
    fn test_validate_bad_date_and_time() {
        let mut f = form("Alice", "555");
        f.date = "next tuesday".to_string();
        assert!(matches!(
            f.validate(now()),
            Err(ValidationError::InvalidDate(_))
        ));

        let mut f = form("Alice", "555");
        f.time = "25:99".to_string();
        assert!(matches!(
            f.validate(now()),
            Err(ValidationError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_submit_writes_both_collections() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);

        let outcome = submit(&store, form("Alice", "555-0101"), now());
        assert!(outcome.is_accepted());

        let queue = store.queue().records();
        let customers = store.customers().records();
        assert_eq!(queue.len(), 1);
        assert_eq!(customers.len(), 1);
        assert_eq!(queue[0].contact(), customers[0].contact());
    }

    #[test]
    fn test_submit_invalid_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir);

        let outcome = submit(&store, form("", "555-0101"), now());
        match outcome {
            IntakeOutcome::Invalid { form, error } => {
                assert_eq!(form.phone, "555-0101");
                assert_eq!(error, ValidationError::MissingFields(vec![Field::Name]));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert!(!store.queue().path().exists());
        assert!(!store.customers().path().exists());
    }

    #[test]
    fn test_submit_write_failure_keeps_form() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the data directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = Store::new(
            blocker.join("live_queue.json"),
            dir.path().join("customers.json"),
        );

        let outcome = submit(&store, form("Alice", "555-0101"), now());
        match outcome {
            IntakeOutcome::Failed { form, error } => {
                assert_eq!(form.name, "Alice");
                assert!(error.is_storage_error());
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(!store.customers().path().exists());
    }

    #[test]
    fn test_submit_log_failure_withdraws_queue_entry() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = Store::new(
            dir.path().join("live_queue.json"),
            blocker.join("customers.json"),
        );

        let outcome = submit(&store, form("Alice", "555-0101"), now());
        assert!(matches!(outcome, IntakeOutcome::Failed { .. }));
        assert!(store.queue().records().is_empty());

        // Resubmitting once the log is writable stores one record in each
        std::fs::remove_file(&blocker).unwrap();
        let outcome = submit(&store, form("Alice", "555-0101"), now());
        assert!(outcome.is_accepted());

        let queue = store.queue().records();
        let customers = store.customers().records();
        assert_eq!(queue.len(), 1);
        assert_eq!(customers.len(), 1);
        assert_eq!(queue[0].contact(), customers[0].contact());
        assert_eq!(queue[0].id, 2);
    }
}
