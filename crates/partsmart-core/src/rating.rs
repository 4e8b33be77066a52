//! Seller rating aggregation

use crate::{MarketError, Result};

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// Check a review score and round it to one decimal
pub fn validate_rating(rating: f64) -> Result<f64> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(MarketError::validation(format!(
            "rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }
    Ok(round_to(rating, 1))
}

/// Mean (two decimals) and count of a seller's review scores
///
/// `None` when the seller has no reviews yet.
pub fn seller_rating(ratings: &[f64]) -> Option<(f64, i64)> {
    if ratings.is_empty() {
        return None;
    }
    let total: f64 = ratings.iter().sum();
    let mean = total / ratings.len() as f64;
    Some((round_to(mean, 2), ratings.len() as i64))
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_mean_of_reviews() {
        assert_eq!(seller_rating(&[]), None);
        assert_eq!(seller_rating(&[4.0]), Some((4.0, 1)));
        assert_eq!(seller_rating(&[5.0, 4.0, 4.5]), Some((4.5, 3)));
        assert_eq!(seller_rating(&[5.0, 4.0, 4.0]), Some((4.33, 3)));
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(assert_ok!(validate_rating(4.25)), 4.3);
        assert_ok!(validate_rating(1.0));
        assert_ok!(validate_rating(5.0));
        assert_err!(validate_rating(0.5));
        assert_err!(validate_rating(5.5));
        assert_err!(validate_rating(f64::NAN));
    }
}
