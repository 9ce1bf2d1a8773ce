//! Recent activity feed: ratings and claims merged, newest first.

use crate::models::{ActivityEntry, RatingRecord, RewardClaim};

pub const DEFAULT_FEED_WINDOW: usize = 5;

pub fn activity_feed(
    ratings: &[RatingRecord],
    claims: &[RewardClaim],
    window: usize,
) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = ratings
        .iter()
        .map(|r| ActivityEntry::Rating {
            restaurant_name: r.restaurant_name.clone(),
            overall_rating: r.overall_rating,
            points_awarded: r.points_awarded,
            at: r.submitted_at,
        })
        .chain(claims.iter().map(|c| ActivityEntry::Claim {
            rewards_count: c.rewards_count,
            points_value: c.points_value,
            at: c.claimed_at,
        }))
        .collect();
    // stable sort keeps storage order among equal timestamps
    entries.sort_by(|a, b| b.at().cmp(&a.at()));
    entries.truncate(window);
    entries
}
