//! RFM (recency, frequency, monetary) segmentation.
//!
//! Profiles are built first, then each metric column is scored with an
//! equal-width [`QuartileScorer`], then the scores are summed.

pub mod composite;
pub mod profile;

use shoplens_core::{OrderRecord, ShoplensError};
use tracing::debug;

use crate::algorithms::binning::{QuartileScorer, ScoreDirection};

pub use composite::{
    composite_score, score_distribution, ScoreBucket, ScoredCustomer, MAX_RFM_SCORE,
    MIN_RFM_SCORE,
};
pub use profile::{build_profiles, CustomerProfile};

/// Attach R, F, M and composite scores to each profile, preserving order.
pub fn score_customers(
    profiles: Vec<CustomerProfile>,
) -> Result<Vec<ScoredCustomer>, ShoplensError> {
    let recency: Vec<f64> = profiles.iter().map(|p| p.recency_days as f64).collect();
    let frequency: Vec<f64> = profiles.iter().map(|p| p.frequency as f64).collect();
    let monetary: Vec<f64> = profiles.iter().map(|p| p.monetary).collect();

    let r = QuartileScorer::new(ScoreDirection::LowerIsBetter).score("recency", &recency)?;
    let f = QuartileScorer::new(ScoreDirection::HigherIsBetter).score("frequency", &frequency)?;
    let m = QuartileScorer::new(ScoreDirection::HigherIsBetter).score("monetary", &monetary)?;

    let scored: Vec<ScoredCustomer> = profiles
        .into_iter()
        .enumerate()
        .map(|(i, profile)| ScoredCustomer {
            profile,
            r_score: r[i],
            f_score: f[i],
            m_score: m[i],
            rfm_score: composite_score(r[i], f[i], m[i]),
        })
        .collect();

    debug!(customers = scored.len(), "scored RFM profiles");
    Ok(scored)
}

/// Full RFM path: profile, score, sum.
pub fn rfm_scores(records: &[OrderRecord]) -> Result<Vec<ScoredCustomer>, ShoplensError> {
    let profiles = build_profiles(records)?;
    score_customers(profiles)
}
