//! Momentum-Adjusted Win Percentage.
//!
//! A naive win/loss ratio is noisy for small samples and blind to form
//! changes. MAWP fixes both: recent games keep full weight, older games decay
//! on two axes (rank and age), old outcomes blend toward 50% instead of
//! merely losing weight, and thin samples are padded with phantom coin-flip
//! observations so one lucky win cannot read as a 100% hero.
//!
//! All probabilities in this module are [0,1] fractions; callers convert to
//! percentages at the presentation boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One historical game. Never mutated by the estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub won: bool,
    pub game_date: DateTime<Utc>,
}

/// Most recent games carrying full weight before the rank decay cliff.
pub const FULL_WEIGHT_GAMES: usize = 30;

/// Days of full time weight before the age decay cliff.
pub const FULL_WEIGHT_DAYS: f64 = 180.0;

/// Sample size below which phantom 50% observations pad the estimate. Also
/// the boundary for the `High` confidence label.
pub const CONFIDENCE_THRESHOLD: u32 = 30;

// Half-lives past the cliffs: rank 60 => 0.5, day 270 => 0.5.
const GAME_HALF_LIFE: f64 = 30.0;
const TIME_HALF_LIFE_DAYS: f64 = 90.0;

const LN_2: f64 = std::f64::consts::LN_2;

/// Weight of a match by recency rank (1 = most recent).
pub fn game_count_weight(rank: usize) -> f64 {
    if rank <= FULL_WEIGHT_GAMES {
        1.0
    } else {
        (-(LN_2 / GAME_HALF_LIFE) * (rank - FULL_WEIGHT_GAMES) as f64).exp()
    }
}

/// Weight of a match by age in days. Future-dated games (`days < 0`) keep
/// full weight.
pub fn time_weight(days: f64) -> f64 {
    if days <= FULL_WEIGHT_DAYS {
        1.0
    } else {
        (-(LN_2 / TIME_HALF_LIFE_DAYS) * (days - FULL_WEIGHT_DAYS)).exp()
    }
}

/// Estimate the player's current win probability with a hero.
///
/// Deterministic in `(matches, now)` and invariant to input ordering. Empty
/// history returns the uninformative prior 0.5.
pub fn compute_mawp(matches: &[MatchRecord], now: DateTime<Utc>) -> f64 {
    if matches.is_empty() {
        return 0.5;
    }

    let mut newest_first: Vec<&MatchRecord> = matches.iter().collect();
    newest_first.sort_by(|a, b| b.game_date.cmp(&a.game_date));

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for (idx, record) in newest_first.iter().enumerate() {
        let rank = idx + 1;
        let w_games = game_count_weight(rank);

        let age_days = (now - record.game_date).num_seconds() as f64 / 86_400.0;
        let w_time = time_weight(age_days);

        // Old outcomes blend toward 50% rather than vanish; an old loss must
        // still temper a hot streak's apparent certainty.
        let outcome = if record.won { 1.0 } else { 0.0 };
        let effective = outcome * w_time + 0.5 * (1.0 - w_time);

        numerator += w_games * effective;
        denominator += w_games;
    }

    // Bayesian padding: below the threshold, phantom coin-flip observations
    // pull the estimate toward 0.5 (1 win in 1 game => ~0.517, not 1.0).
    let n = newest_first.len();
    if n < CONFIDENCE_THRESHOLD as usize {
        let phantom = (CONFIDENCE_THRESHOLD as usize - n) as f64;
        numerator += phantom * 0.5;
        denominator += phantom;
    }

    numerator / denominator
}

/// [`compute_mawp`] scaled to [0,100]. Convenience only.
pub fn compute_mawp_percent(matches: &[MatchRecord], now: DateTime<Utc>) -> f64 {
    compute_mawp(matches, now) * 100.0
}

/// Blend MAWP with the raw win rate by sample confidence.
///
/// MAWP is weighted by `min(games / threshold, 1)` and the raw win rate
/// (a [0,1] fraction here) by the complement. Used wherever MAWP is shown
/// next to a [`Confidence`] label.
pub fn confidence_adjusted_mawp(mawp: f64, win_rate: f64, games: u32, threshold: u32) -> f64 {
    let weight = (games as f64 / threshold as f64).min(1.0);
    mawp * weight + win_rate * (1.0 - weight)
}

/// Sample-size bucket shown next to adjusted MAWP values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    Low,
    Limited,
    High,
}

impl Confidence {
    pub fn from_games(games: u32) -> Self {
        if games < 10 {
            Confidence::Low
        } else if games < CONFIDENCE_THRESHOLD {
            Confidence::Limited
        } else {
            Confidence::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Limited => "limited",
            Confidence::High => "high",
        }
    }
}
