//! Composite API shapes: search criteria/results and analytics

use serde::{Deserialize, Serialize};

use crate::{NewSearch, Part, Seller, UserSummary};

/// Seller together with its full catalog and owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerWithParts {
    #[serde(flatten)]
    pub seller: Seller,
    pub parts: Vec<Part>,
    pub user: Option<UserSummary>,
}

/// One seller's share of a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub seller: SellerWithParts,
    pub matching_parts: Vec<Part>,
}

/// Search filters; `None` and blank values are not applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<String>,
    pub part_name: Option<String>,
}

impl From<&NewSearch> for SearchCriteria {
    fn from(search: &NewSearch) -> Self {
        Self {
            vehicle_make: search.vehicle_make.clone(),
            vehicle_model: search.vehicle_model.clone(),
            vehicle_year: search.vehicle_year.clone(),
            part_name: search.part_name.clone(),
        }
    }
}

/// Admin dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_sellers: u64,
    pub total_parts: u64,
    pub total_searches: u64,
    pub pending_verifications: u64,
}
