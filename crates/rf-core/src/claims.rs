//! # Reward Claim Engine
//!
//! Decides whether a balance can be converted into rewards and builds the
//! claim record. Appending it is the caller's job; nothing is decremented
//! in place.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::ledger::available_points;
use crate::models::{RatingRecord, RewardClaim};

pub const DEFAULT_REWARD_UNIT: u64 = 100;

/// Converts every whole reward unit of the available balance into one claim.
pub fn claim_rewards(
    user_id: Uuid,
    ratings: &[RatingRecord],
    claims: &[RewardClaim],
    reward_unit: u64,
) -> Result<RewardClaim> {
    if reward_unit == 0 {
        return Err(AppError::validation("reward unit must be positive"));
    }
    let available = available_points(user_id, ratings, claims);
    if available < reward_unit {
        return Err(AppError::InsufficientPoints {
            available,
            required: reward_unit,
        });
    }
    let rewards_count = available / reward_unit;
    Ok(RewardClaim {
        id: Uuid::now_v7(),
        user_id,
        rewards_count,
        points_value: rewards_count * reward_unit,
        claimed_at: Utc::now(),
    })
}
