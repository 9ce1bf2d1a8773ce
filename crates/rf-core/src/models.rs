//! # Domain Models
//!
//! These structs represent the core entities of Rusty-Feedback.
//! We use UUID v7 for time-ordered, globally unique identification.
//! Ratings and claims are immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. Only ever handed out as an [`AccountProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub full_name: String,
    /// Unique key of the directory
    pub email: String,
    /// Argon2 PHC string, never the plaintext password
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Strips the credential.
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// An account with the credential field omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Star values collected for one visit, one per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRatings {
    pub food: u8,
    pub service: u8,
    pub cleanliness: u8,
    pub ambiance: u8,
}

/// What a client sends when rating a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSubmission {
    pub restaurant_id: u32,
    pub food_rating: u8,
    pub service_rating: u8,
    pub cleanliness_rating: u8,
    pub ambiance_rating: u8,
    pub comment: String,
}

impl RatingSubmission {
    pub fn categories(&self) -> CategoryRatings {
        CategoryRatings {
            food: self.food_rating,
            service: self.service_rating,
            cleanliness: self.cleanliness_rating,
            ambiance: self.ambiance_rating,
        }
    }
}

/// One submitted review. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub restaurant_id: u32,
    pub restaurant_name: String,
    pub food_rating: u8,
    pub service_rating: u8,
    pub cleanliness_rating: u8,
    pub ambiance_rating: u8,
    /// Derived by the aggregator, 1-5
    pub overall_rating: u8,
    pub comment: String,
    pub submitted_at: DateTime<Utc>,
    /// Derived from `overall_rating`
    pub points_awarded: u64,
}

/// A conversion of points into rewards. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardClaim {
    pub id: Uuid,
    pub user_id: Uuid,
    pub rewards_count: u64,
    /// Always `rewards_count * reward_unit`
    pub points_value: u64,
    pub claimed_at: DateTime<Utc>,
}

/// A catalog entry. Read-only as far as the ledger is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub category: String,
    pub icon: String,
}

/// One line of the "recent activity" feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActivityEntry {
    #[serde(rename_all = "camelCase")]
    Rating {
        restaurant_name: String,
        overall_rating: u8,
        points_awarded: u64,
        at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Claim {
        rewards_count: u64,
        points_value: u64,
        at: DateTime<Utc>,
    },
}

impl ActivityEntry {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            ActivityEntry::Rating { at, .. } | ActivityEntry::Claim { at, .. } => *at,
        }
    }
}

/// Balance view used to enable or disable the claim action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsSummary {
    pub available: u64,
    pub reward_unit: u64,
    pub can_claim: bool,
    pub claimable_rewards: u64,
}

/// Profile page statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_ratings: usize,
    pub total_points: u64,
    /// Mean overall rating, one decimal place
    pub average_rating: f64,
}
