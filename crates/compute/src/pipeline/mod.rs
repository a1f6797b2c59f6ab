//! Report orchestrator.
//!
//! Runs the four independent aggregation paths over one immutable order
//! table:
//!
//! - **Top cities**: categorical counts of `customer_city`.
//! - **Top categories**: categorical counts of `product_category_name`.
//! - **Weekday distribution**: orders per weekday, Monday..Sunday.
//! - **RFM**: profiles → three quartile scores → composite score.
//!
//! Each section succeeds or fails on its own; a failure is recorded in its
//! [`SectionOutcome`] and never hides the other sections.

pub mod metrics;

use std::time::Instant;

use serde::Serialize;
use shoplens_core::config::ReportConfig;
use shoplens_core::{OrderRecord, ShoplensError};
use tracing::{info, warn};

use crate::algorithms::frequency::{top_k_by_field, CategoryCount, CategoryField};
use crate::algorithms::weekday::{weekday_distribution, WeekdayCount};
use crate::rfm::{rfm_scores, score_distribution, ScoreBucket, ScoredCustomer};

use self::metrics::{timed, ReportMetrics};

/// Result of one report section.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome<T> {
    Ready { table: T },
    Failed { step: String, error: String },
}

impl<T> SectionOutcome<T> {
    fn from_result(step: &str, result: Result<T, ShoplensError>) -> Self {
        match result {
            Ok(table) => SectionOutcome::Ready { table },
            Err(e) => {
                warn!(step, error = %e, "report section failed");
                SectionOutcome::Failed {
                    step: step.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    pub fn table(&self) -> Option<&T> {
        match self {
            SectionOutcome::Ready { table } => Some(table),
            SectionOutcome::Failed { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SectionOutcome::Ready { .. })
    }
}

/// Scored customers plus the composite-score histogram.
#[derive(Debug, Clone, Serialize)]
pub struct RfmTable {
    pub customers: Vec<ScoredCustomer>,
    pub distribution: Vec<ScoreBucket>,
}

/// The four summary tables handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub top_cities: SectionOutcome<Vec<CategoryCount>>,
    pub top_categories: SectionOutcome<Vec<CategoryCount>>,
    pub weekday_distribution: SectionOutcome<Vec<WeekdayCount>>,
    pub rfm: SectionOutcome<RfmTable>,
    pub metrics: ReportMetrics,
}

type Timed<T> = (SectionOutcome<T>, f64);

impl AnalyticsReport {
    /// Build every section from `orders`.
    ///
    /// With `config.parallel` the sections run on the rayon pool; the
    /// tables are identical either way.
    pub fn build(orders: &[OrderRecord], config: &ReportConfig) -> Self {
        let start = Instant::now();
        let top_k = config.top_k;

        let cities = || timed(|| top_k_section(orders, CategoryField::CustomerCity, top_k));
        let categories = || timed(|| top_k_section(orders, CategoryField::ProductCategory, top_k));
        let weekdays = || timed(|| weekday_section(orders));
        let rfm = || timed(|| rfm_section(orders));

        let (cities, categories, weekdays, rfm): (
            Timed<Vec<CategoryCount>>,
            Timed<Vec<CategoryCount>>,
            Timed<Vec<WeekdayCount>>,
            Timed<RfmTable>,
        ) = if config.parallel {
            let ((cities, categories), (weekdays, rfm)) = rayon::join(
                || rayon::join(cities, categories),
                || rayon::join(weekdays, rfm),
            );
            (cities, categories, weekdays, rfm)
        } else {
            (cities(), categories(), weekdays(), rfm())
        };

        let mut metrics = ReportMetrics::new(orders.len());
        metrics.top_cities_ms = cities.1;
        metrics.top_categories_ms = categories.1;
        metrics.weekday_ms = weekdays.1;
        metrics.rfm_ms = rfm.1;
        metrics.record_total(start.elapsed());

        let report = Self {
            top_cities: cities.0,
            top_categories: categories.0,
            weekday_distribution: weekdays.0,
            rfm: rfm.0,
            metrics,
        };

        info!(
            rows = orders.len(),
            failed = report.failed_sections().len(),
            total_ms = report.metrics.total_ms,
            "analytics report built"
        );
        report
    }

    /// Names of the sections that failed.
    pub fn failed_sections(&self) -> Vec<&str> {
        let mut failed = Vec::new();
        for (name, ready) in [
            ("top_cities", self.top_cities.is_ready()),
            ("top_categories", self.top_categories.is_ready()),
            ("weekday_distribution", self.weekday_distribution.is_ready()),
            ("rfm", self.rfm.is_ready()),
        ] {
            if !ready {
                failed.push(name);
            }
        }
        failed
    }
}

fn top_k_section(
    orders: &[OrderRecord],
    field: CategoryField,
    k: usize,
) -> SectionOutcome<Vec<CategoryCount>> {
    let step = format!("top {}", field.column_name());
    SectionOutcome::from_result(&step, Ok(top_k_by_field(orders, field, k)))
}

fn weekday_section(orders: &[OrderRecord]) -> SectionOutcome<Vec<WeekdayCount>> {
    SectionOutcome::from_result("weekday distribution", weekday_distribution(orders))
}

fn rfm_section(orders: &[OrderRecord]) -> SectionOutcome<RfmTable> {
    let result = rfm_scores(orders).map(|customers| {
        let distribution = score_distribution(&customers);
        RfmTable {
            customers,
            distribution,
        }
    });
    SectionOutcome::from_result("rfm scoring", result)
}
