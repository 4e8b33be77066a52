//! Append-only activity records: searches, reviews and contacts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{f64_lenient, opt_string};
use crate::ContactType;

/// Logged search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Search {
    pub id: String,
    pub user_id: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<String>,
    pub part_name: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Search request body; also the payload logged for signed-in users
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSearch {
    #[serde(default, deserialize_with = "opt_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub vehicle_make: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub vehicle_model: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub vehicle_year: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub part_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub image_url: Option<String>,
}

/// Buyer review of a seller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub seller_id: String,
    pub rating: f64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub user_id: String,
    #[serde(alias = "dealerId")]
    pub seller_id: String,
    #[serde(deserialize_with = "f64_lenient")]
    pub rating: f64,
    #[serde(default, deserialize_with = "opt_string")]
    pub comment: Option<String>,
}

/// Contact event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub user_id: String,
    pub seller_id: String,
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub user_id: String,
    #[serde(alias = "dealerId")]
    pub seller_id: String,
    #[serde(rename = "type")]
    pub contact_type: ContactType,
}
