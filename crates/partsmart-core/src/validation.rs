//! Payload checks applied before anything reaches storage

use crate::rating::validate_rating;
use crate::{MarketError, Result};
use partsmart_types::{NewContact, NewPart, NewReview, NewSeller, NewUser, PartUpdate, SellerUpdate};

const MIN_PASSWORD_LEN: usize = 6;

fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MarketError::validation(format!("{} is required", field)));
    }
    Ok(())
}

fn non_blank_if_set(field: &str, value: &Option<String>) -> Result<()> {
    match value {
        Some(v) => required(field, v),
        None => Ok(()),
    }
}

fn price(value: Option<f64>) -> Result<()> {
    match value {
        Some(p) if !p.is_finite() || p < 0.0 => {
            Err(MarketError::validation("price must be a non-negative number"))
        }
        _ => Ok(()),
    }
}

pub fn new_user(user: &NewUser) -> Result<()> {
    required("username", &user.username)?;
    required("email", &user.email)?;
    if !user.email.contains('@') {
        return Err(MarketError::validation("email is invalid"));
    }
    if user.password.len() < MIN_PASSWORD_LEN {
        return Err(MarketError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub fn new_seller(seller: &NewSeller) -> Result<()> {
    required("userId", &seller.user_id)?;
    required("shopName", &seller.shop_name)?;
    required("address", &seller.address)?;
    required("phone", &seller.phone)
}

pub fn seller_update(update: &SellerUpdate) -> Result<()> {
    non_blank_if_set("shopName", &update.shop_name)?;
    non_blank_if_set("address", &update.address)?;
    non_blank_if_set("phone", &update.phone)
}

pub fn new_part(part: &NewPart) -> Result<()> {
    required("sellerId", &part.seller_id)?;
    required("name", &part.name)?;
    price(part.price)
}

pub fn part_update(update: &PartUpdate) -> Result<()> {
    non_blank_if_set("name", &update.name)?;
    price(update.price)
}

/// Returns the review with its rating rounded to one decimal
pub fn new_review(mut review: NewReview) -> Result<NewReview> {
    required("userId", &review.user_id)?;
    required("sellerId", &review.seller_id)?;
    review.rating = validate_rating(review.rating)?;
    Ok(review)
}

pub fn new_contact(contact: &NewContact) -> Result<()> {
    required("userId", &contact.user_id)?;
    required("sellerId", &contact.seller_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use partsmart_types::Role;

    #[test]
    fn test_new_user_rules() {
        let mut user = NewUser {
            username: "yaw".into(),
            password: "secret1".into(),
            email: "yaw@example.com".into(),
            role: Role::Buyer,
        };
        assert!(new_user(&user).is_ok());

        user.password = "123".into();
        assert!(matches!(new_user(&user), Err(MarketError::Validation(_))));

        user.password = "secret1".into();
        user.email = "not-an-email".into();
        assert!(new_user(&user).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let update = PartUpdate {
            price: Some(-1.0),
            ..Default::default()
        };
        let err = part_update(&update).unwrap_err();
        assert_eq!(err.to_string(), "price must be a non-negative number");
    }

    #[test]
    fn test_review_rating_rounded() {
        let review = NewReview {
            user_id: "u1".into(),
            seller_id: "s1".into(),
            rating: 3.96,
            comment: None,
        };
        assert_eq!(new_review(review).unwrap().rating, 4.0);
    }
}
