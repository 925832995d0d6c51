//! Live queue metrics.

use chrono::NaiveDate;

use crate::config::TotalWindow;
use crate::record::QueueRecord;

/// Waiting count at which the desk is considered busy.
pub const BUSY_THRESHOLD: usize = 3;

/// Coarse estimate of how long a new walk-in will wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitEstimate {
    /// Fewer than [`BUSY_THRESHOLD`] customers waiting.
    Short,
    /// [`BUSY_THRESHOLD`] or more customers waiting.
    Long,
}

impl std::fmt::Display for WaitEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Short => write!(f, "5-10 min"),
            Self::Long => write!(f, "15-20 min"),
        }
    }
}

/// Estimate the wait from the number of customers waiting.
#[must_use]
pub fn estimate_wait(waiting_count: usize) -> WaitEstimate {
    if waiting_count < BUSY_THRESHOLD {
        WaitEstimate::Short
    } else {
        WaitEstimate::Long
    }
}

/// Everything the queue dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSummary {
    /// Waiting customers in file order.
    pub waiting: Vec<QueueRecord>,
    /// Number of records in the total window.
    pub total_count: usize,
    /// The window `total_count` was computed over.
    pub total_window: TotalWindow,
    /// Whether the queue file holds any records at all.
    pub has_records: bool,
}

impl QueueSummary {
    /// Summarize the queue as of `today`.
    #[must_use]
    pub fn compute(records: Vec<QueueRecord>, total_window: TotalWindow, today: NaiveDate) -> Self {
        let has_records = !records.is_empty();
        let total_count = match total_window {
            TotalWindow::AllTime => records.len(),
            TotalWindow::Today => records
                .iter()
                .filter(|record| record.timestamp.date() == today)
                .count(),
        };
        let waiting = records.into_iter().filter(QueueRecord::is_waiting).collect();

        Self {
            waiting,
            total_count,
            total_window,
            has_records,
        }
    }

    /// Number of waiting customers.
    #[must_use]
    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    /// Estimated wait for the current queue length.
    #[must_use]
    pub fn estimated_wait(&self) -> WaitEstimate {
        estimate_wait(self.waiting_count())
    }

    /// Label of the total metric.
    #[must_use]
    pub fn total_label(&self) -> &'static str {
        match self.total_window {
            TotalWindow::AllTime => "Total",
            TotalWindow::Today => "Total Today",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Contact, Record};
    use chrono::NaiveTime;

    fn record(id: u64, day: u32) -> QueueRecord {
        let contact = Contact {
            name: format!("Customer {id}"),
            phone: "555".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            notes: String::new(),
        };
        let stamp = NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        QueueRecord::from_contact(contact, id, stamp)
    }

    #[test]
    fn test_estimate_wait_buckets() {
        assert_eq!(estimate_wait(0), WaitEstimate::Short);
        assert_eq!(estimate_wait(2), WaitEstimate::Short);
        assert_eq!(estimate_wait(3), WaitEstimate::Long);
        assert_eq!(estimate_wait(10), WaitEstimate::Long);
    }

    #[test]
    fn test_estimate_wait_display() {
        assert_eq!(estimate_wait(2).to_string(), "5-10 min");
        assert_eq!(estimate_wait(3).to_string(), "15-20 min");
    }

    #[test]
    fn test_summary_all_time() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let summary = QueueSummary::compute(
            vec![record(1, 1), record(2, 2), record(3, 2)],
            TotalWindow::AllTime,
            today,
        );

        assert_eq!(summary.waiting_count(), 3);
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.total_label(), "Total");
        assert_eq!(summary.estimated_wait(), WaitEstimate::Long);
        assert!(summary.has_records);
    }

    #[test]
    fn test_summary_today_window() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let summary = QueueSummary::compute(
            vec![record(1, 1), record(2, 2)],
            TotalWindow::Today,
            today,
        );

        assert_eq!(summary.waiting_count(), 2);
        assert_eq!(summary.total_count, 1);
        assert_eq!(summary.total_label(), "Total Today");
        assert_eq!(summary.estimated_wait(), WaitEstimate::Short);
    }

    #[test]
    fn test_summary_empty() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let summary = QueueSummary::compute(Vec::new(), TotalWindow::AllTime, today);

        assert_eq!(summary.waiting_count(), 0);
        assert_eq!(summary.total_count, 0);
        assert!(!summary.has_records);
    }
}
