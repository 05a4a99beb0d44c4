//! Per-code rows and the aggregated batch report.

use batchcode_core::{AnalysisResult, ExpiryStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// Outcome for one input code.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRow {
    /// Position in the request.
    pub index: usize,
    pub code: String,
    pub result: AnalysisResult,
    /// Days from today to the top interpretation's expiry.
    pub days_to_expiry: Option<i64>,
    pub status: Option<ExpiryStatus>,
}

impl BatchRow {
    pub fn new(index: usize, code: String, result: AnalysisResult, today: NaiveDate) -> Self {
        let days_to_expiry = result.top().map(|top| top.days_to_expiry(today));
        Self {
            index,
            code,
            result,
            days_to_expiry,
            status: days_to_expiry.map(ExpiryStatus::classify),
        }
    }

    pub fn is_dated(&self) -> bool {
        self.days_to_expiry.is_some()
    }
}

/// Result of a batch run, rows in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub today: NaiveDate,
    pub rows: Vec<BatchRow>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Codes with at least one interpretation.
    pub fn dated_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_dated()).count()
    }

    pub fn count_with_status(&self, status: ExpiryStatus) -> usize {
        self.rows.iter().filter(|r| r.status == Some(status)).count()
    }

    /// Rows by days to expiry, soonest first; undated rows last in input order.
    pub fn by_urgency(&self) -> Vec<&BatchRow> {
        let mut rows: Vec<&BatchRow> = self.rows.iter().collect();
        rows.sort_by_key(|r| (r.days_to_expiry.is_none(), r.days_to_expiry));
        rows
    }
}
