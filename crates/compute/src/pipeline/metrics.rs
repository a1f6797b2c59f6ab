use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Timing for one report run, filled in as each section finishes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportMetrics {
    /// Order rows the report was built from.
    pub input_rows: usize,
    /// Wall time per section in milliseconds.
    pub top_cities_ms: f64,
    pub top_categories_ms: f64,
    pub weekday_ms: f64,
    pub rfm_ms: f64,
    /// Wall time of the whole report in milliseconds.
    pub total_ms: f64,
    /// When the report finished.
    pub completed_at: Option<DateTime<Utc>>,
}

impl ReportMetrics {
    pub fn new(input_rows: usize) -> Self {
        Self {
            input_rows,
            ..Self::default()
        }
    }

    /// Record completion of the whole report.
    pub fn record_total(&mut self, elapsed: Duration) {
        self.total_ms = as_ms(elapsed);
        self.completed_at = Some(Utc::now());
    }

    /// Sections timed in this run, in report order.
    pub fn sections(&self) -> [(&'static str, f64); 4] {
        [
            ("top_cities", self.top_cities_ms),
            ("top_categories", self.top_categories_ms),
            ("weekday_distribution", self.weekday_ms),
            ("rfm", self.rfm_ms),
        ]
    }
}

pub(crate) fn as_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

/// Run `f` and return its output with the elapsed milliseconds.
pub(crate) fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let out = f();
    (out, as_ms(start.elapsed()))
}
