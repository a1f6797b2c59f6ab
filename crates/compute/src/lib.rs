pub mod algorithms;
pub mod pipeline;
pub mod rfm;

pub use algorithms::binning::{QuartileScorer, ScoreDirection, QUARTILES};
pub use algorithms::frequency::{top_k_by_field, top_k_categories, CategoryCount, CategoryField};
pub use algorithms::weekday::{weekday_distribution, DayOfWeek, WeekdayCount};
pub use pipeline::metrics::ReportMetrics;
pub use pipeline::{AnalyticsReport, RfmTable, SectionOutcome};
pub use rfm::{build_profiles, rfm_scores, score_customers, CustomerProfile, ScoredCustomer};
