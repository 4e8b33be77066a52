//! Seller (dealer) types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::opt_string;
use crate::Location;

/// A shop at the market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: String,
    pub user_id: String,
    pub shop_name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub location: Option<Location>,
    pub verified: bool,
    /// Mean of all review ratings, two decimals
    pub rating: f64,
    pub review_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Seller registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSeller {
    pub user_id: String,
    pub shop_name: String,
    #[serde(default, deserialize_with = "opt_string")]
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    #[serde(default, deserialize_with = "opt_string")]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

/// Partial seller update
///
/// Verification and rating fields are deliberately absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerUpdate {
    pub shop_name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub location: Option<Location>,
}

impl Seller {
    pub fn apply(&mut self, update: SellerUpdate) {
        if let Some(shop_name) = update.shop_name {
            self.shop_name = shop_name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(whatsapp) = update.whatsapp {
            self.whatsapp = Some(whatsapp);
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
    }
}
