//! `BatchEngine`: chunked, parallel analysis of many codes.

use std::sync::Arc;

use batchcode_patterns::BatchCodeAnalyzer;
use rayon::prelude::*;
use tracing::info;

use crate::error::BatchError;
use crate::report::{BatchReport, BatchRow};
use crate::request::BatchRequest;

/// Batch analysis engine.
pub struct BatchEngine {
    analyzer: Arc<BatchCodeAnalyzer>,
}

impl BatchEngine {
    pub fn new(analyzer: Arc<BatchCodeAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &BatchCodeAnalyzer {
        &self.analyzer
    }

    /// Analyse every code in `req`.
    ///
    /// "Today" is read once, so a run that crosses midnight still judges
    /// every code against the same date.
    pub fn run(&self, req: BatchRequest) -> Result<BatchReport, BatchError> {
        if req.codes.is_empty() {
            return Err(BatchError::Empty);
        }
        let window = self.analyzer.window();
        let today = window.today();
        let total = req.codes.len();
        let chunk_size = req.chunk_size.max(1);
        info!(total, chunk_size, %today, "BatchEngine: analysing codes");

        let mut rows: Vec<BatchRow> = Vec::with_capacity(total);
        let mut offset = 0usize;
        for chunk in req.codes.chunks(chunk_size) {
            let analysed: Vec<BatchRow> = chunk
                .par_iter()
                .enumerate()
                .map(|(i, code)| {
                    let result = self.analyzer.analyze_at(code, &window);
                    BatchRow::new(offset + i, code.clone(), result, today)
                })
                .collect();
            offset += chunk.len();
            rows.extend(analysed);

            if let Some(cb) = &req.on_progress {
                cb(offset, total);
            }
        }

        let report = BatchReport { today, rows };
        info!(
            total,
            dated = report.dated_count(),
            "BatchEngine: complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchcode_core::{ExpiryStatus, FixedClock};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn engine() -> BatchEngine {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        BatchEngine::new(Arc::new(BatchCodeAnalyzer::new().with_clock(FixedClock(today))))
    }

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_request_is_an_error() {
        assert!(matches!(
            engine().run(BatchRequest::new(vec![])),
            Err(BatchError::Empty)
        ));
    }

    #[test]
    fn rows_keep_input_order_across_chunks() {
        let input = codes(&["500903", "H1619A", "H2401B", "24123AB", "", "1872417"]);
        let report = engine()
            .run(BatchRequest::new(input.clone()).chunk_size(2))
            .unwrap();
        let got: Vec<&str> = report.rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(got, input.iter().map(String::as_str).collect::<Vec<_>>());
        assert!(report.rows.iter().enumerate().all(|(i, r)| r.index == i));
        assert_eq!(report.dated_count(), 4);
    }

    #[test]
    fn status_comes_from_top_interpretation() {
        let report = engine()
            .run(BatchRequest::new(codes(&["500903", "H2401B", "24123AB"])))
            .unwrap();
        // 500903 expires 2028-01-09, H2401B 2027-01-31, 24123AB (top 2023-08-29) 2026-08-29
        assert_eq!(report.rows[0].days_to_expiry, Some(448));
        assert_eq!(report.rows[0].status, Some(ExpiryStatus::Good));
        assert_eq!(report.rows[1].days_to_expiry, Some(105));
        assert_eq!(report.rows[2].days_to_expiry, Some(-50));
        assert_eq!(report.rows[2].status, Some(ExpiryStatus::Expired));
        assert_eq!(report.count_with_status(ExpiryStatus::Expired), 1);
    }

    #[test]
    fn urgency_puts_undated_last() {
        let report = engine()
            .run(BatchRequest::new(codes(&["H1619A", "500903", "24123AB", "bad", "H2401B"])))
            .unwrap();
        let order: Vec<&str> = report.by_urgency().iter().map(|r| r.code.as_str()).collect();
        assert_eq!(order, vec!["24123AB", "H2401B", "500903", "H1619A", "bad"]);
    }

    #[test]
    fn progress_reports_each_chunk() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let req = BatchRequest::new(codes(&["500903", "505201", "510402", "H2401B", "H0724A"]))
            .chunk_size(2)
            .on_progress(move |done, total| {
                counter.fetch_add(1, Ordering::SeqCst);
                seen.lock().unwrap().push((done, total));
            });
        engine().run(req).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(*calls.lock().unwrap(), vec![(2, 5), (4, 5), (5, 5)]);
    }

    #[test]
    fn zero_chunk_size_is_treated_as_one() {
        let report = engine()
            .run(BatchRequest::new(codes(&["500903", "H2401B"])).chunk_size(0))
            .unwrap();
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn report_serializes() {
        let report = engine().run(BatchRequest::new(codes(&["H2401B"]))).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["today"], "2026-10-18");
        assert_eq!(json["rows"][0]["status"], "good");
        assert_eq!(
            json["rows"][0]["result"]["interpretations"][0]["format"]["kind"],
            "prefix_yymm_suffix"
        );
    }
}
