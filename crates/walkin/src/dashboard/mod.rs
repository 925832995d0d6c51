//! Derived views over the collections.
//!
//! Everything here is computed at render time from freshly loaded records;
//! nothing is stored.

pub mod customers;
pub mod queue;

pub use customers::{export_file_name, filter_customers, to_csv, CSV_HEADER};
pub use queue::{estimate_wait, QueueSummary, WaitEstimate};
