//! # Rating Aggregator
//!
//! Turns four category stars into one overall rating and a point award.
//! Overall is the average of the four categories, rounded half-up.

use crate::error::{AppError, Result};
use crate::models::{CategoryRatings, RatingSubmission};

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;
pub const POINTS_PER_STAR: u64 = 10;
pub const MIN_COMMENT_CHARS: usize = 10;

fn check_stars(category: &str, value: u8) -> Result<u8> {
    if (MIN_STARS..=MAX_STARS).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::validation(format!(
            "{category} rating must be between {MIN_STARS} and {MAX_STARS}, got {value}"
        )))
    }
}

/// `round(sum / 4)` with halves rounding up, so 18/4 = 4.5 gives 5.
pub fn compute_overall(food: u8, service: u8, cleanliness: u8, ambiance: u8) -> Result<u8> {
    let sum = u16::from(check_stars("food", food)?)
        + u16::from(check_stars("service", service)?)
        + u16::from(check_stars("cleanliness", cleanliness)?)
        + u16::from(check_stars("ambiance", ambiance)?);
    // sum <= 20, so the result always fits in [1,5]
    Ok(((sum + 2) / 4) as u8)
}

/// Fixed linear schedule: 1 star is 10 points, 5 stars is 50.
pub fn points_for_rating(overall: u8) -> u64 {
    u64::from(overall) * POINTS_PER_STAR
}

/// Convenience over [`compute_overall`] and [`points_for_rating`].
pub fn aggregate(ratings: &CategoryRatings) -> Result<(u8, u64)> {
    let overall = compute_overall(
        ratings.food,
        ratings.service,
        ratings.cleanliness,
        ratings.ambiance,
    )?;
    Ok((overall, points_for_rating(overall)))
}

/// Precondition checked before anything is persisted.
pub fn validate_submission(submission: &RatingSubmission) -> Result<()> {
    let chars = submission.comment.trim().chars().count();
    if chars < MIN_COMMENT_CHARS {
        return Err(AppError::validation(format!(
            "comment must be at least {MIN_COMMENT_CHARS} characters, got {chars}"
        )));
    }
    aggregate(&submission.categories()).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(comment: &str) -> RatingSubmission {
        RatingSubmission {
            restaurant_id: 1,
            food_rating: 4,
            service_rating: 4,
            cleanliness_rating: 4,
            ambiance_rating: 4,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn half_rounds_up() {
        assert_eq!(compute_overall(5, 5, 4, 4), Ok(5));
        assert_eq!(points_for_rating(5), 50);
    }

    #[test]
    fn quarters_round_to_nearest() {
        assert_eq!(compute_overall(5, 4, 4, 4), Ok(4)); // 4.25
        assert_eq!(compute_overall(5, 5, 5, 4), Ok(5)); // 4.75
        assert_eq!(compute_overall(1, 1, 1, 2), Ok(1)); // 1.25
        assert_eq!(compute_overall(1, 1, 2, 2), Ok(2)); // 1.5
    }

    #[test]
    fn every_valid_combination_stays_in_range() {
        for f in 1..=5 {
            for s in 1..=5 {
                for c in 1..=5 {
                    for a in 1..=5 {
                        let overall = compute_overall(f, s, c, a).unwrap();
                        assert!((1..=5).contains(&overall));
                        assert_eq!(points_for_rating(overall) % 10, 0);
                    }
                }
            }
        }
    }

    #[test]
    fn out_of_range_stars_are_rejected() {
        assert!(matches!(compute_overall(0, 3, 3, 3), Err(AppError::Validation(_))));
        assert!(matches!(compute_overall(3, 3, 6, 3), Err(AppError::Validation(_))));
    }

    #[test]
    fn short_comment_is_rejected() {
        let err = validate_submission(&submission("too short")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // padding does not count
        assert!(validate_submission(&submission("   nine char  ")).is_err());
        assert!(validate_submission(&submission("Great food!!")).is_ok());
    }

    #[test]
    fn comment_length_counts_characters_not_bytes() {
        assert!(validate_submission(&submission("très bon é")).is_ok());
        assert!(validate_submission(&submission("ééééééééé")).is_err());
    }
}
