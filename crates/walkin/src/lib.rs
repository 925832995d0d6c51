//! `walkin` - Walk-in customer intake and live queue
//!
//! This library provides the pieces behind a reception desk application: a
//! public intake form, a live queue of waiting customers, and a permanent
//! customer log, each persisted as a JSON document on disk.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod branding;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod intake;
pub mod logging;
pub mod record;
pub mod session;
pub mod storage;
pub mod web;

pub use config::Config;
pub use error::{Error, Result};
pub use intake::{IntakeForm, IntakeOutcome};
pub use logging::init_logging;
pub use record::{Contact, CustomerRecord, QueueRecord};
pub use session::{Screen, Session};
pub use storage::Store;
