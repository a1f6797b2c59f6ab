use serde::{Deserialize, Serialize};

use super::profile::CustomerProfile;

/// Lowest possible composite score (1 + 1 + 1).
pub const MIN_RFM_SCORE: u8 = 3;
/// Highest possible composite score (4 + 4 + 4).
pub const MAX_RFM_SCORE: u8 = 12;

/// A customer's profile with its three ordinal scores and their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCustomer {
    #[serde(flatten)]
    pub profile: CustomerProfile,
    pub r_score: u8,
    pub f_score: u8,
    pub m_score: u8,
    pub rfm_score: u8,
}

/// Sum of the three sub-scores.
pub fn composite_score(r_score: u8, f_score: u8, m_score: u8) -> u8 {
    r_score + f_score + m_score
}

/// Number of customers per composite score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub rfm_score: u8,
    pub customers: usize,
}

/// Histogram of composite scores over `MIN_RFM_SCORE..=MAX_RFM_SCORE`,
/// zero-filled so it always has ten rows.
pub fn score_distribution(customers: &[ScoredCustomer]) -> Vec<ScoreBucket> {
    let mut counts = [0usize; (MAX_RFM_SCORE - MIN_RFM_SCORE + 1) as usize];
    for customer in customers {
        let score = customer.rfm_score.clamp(MIN_RFM_SCORE, MAX_RFM_SCORE);
        counts[(score - MIN_RFM_SCORE) as usize] += 1;
    }

    (MIN_RFM_SCORE..=MAX_RFM_SCORE)
        .zip(counts)
        .map(|(rfm_score, customers)| ScoreBucket { rfm_score, customers })
        .collect()
}
