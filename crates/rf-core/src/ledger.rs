//! # Points Ledger
//!
//! The balance is never stored. It is recomputed from the two append-only
//! collections on every query, so it cannot drift from them.

use uuid::Uuid;

use crate::models::{PointsSummary, RatingRecord, RewardClaim, UserStats};

/// Points earned minus points claimed, floored at zero.
/// Records belonging to other users are ignored.
pub fn available_points(user_id: Uuid, ratings: &[RatingRecord], claims: &[RewardClaim]) -> u64 {
    let earned: u64 = ratings
        .iter()
        .filter(|r| r.user_id == user_id)
        .map(|r| r.points_awarded)
        .sum();
    let claimed: u64 = claims
        .iter()
        .filter(|c| c.user_id == user_id)
        .map(|c| c.points_value)
        .sum();
    earned.saturating_sub(claimed)
}

pub fn points_summary(available: u64, reward_unit: u64) -> PointsSummary {
    let claimable_rewards = available.checked_div(reward_unit).unwrap_or(0);
    PointsSummary {
        available,
        reward_unit,
        can_claim: claimable_rewards > 0,
        claimable_rewards,
    }
}

pub fn user_stats(user_id: Uuid, ratings: &[RatingRecord]) -> UserStats {
    let mine: Vec<&RatingRecord> = ratings.iter().filter(|r| r.user_id == user_id).collect();
    let total_points = mine.iter().map(|r| r.points_awarded).sum();
    let average_rating = if mine.is_empty() {
        0.0
    } else {
        let sum: u64 = mine.iter().map(|r| u64::from(r.overall_rating)).sum();
        let mean = sum as f64 / mine.len() as f64;
        (mean * 10.0).round() / 10.0
    };
    UserStats {
        total_ratings: mine.len(),
        total_points,
        average_rating,
    }
}
