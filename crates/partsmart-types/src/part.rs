//! Inventory listing types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{opt_f64, opt_string};
use crate::Availability;

/// A single inventory listing owned by a seller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: String,
    pub seller_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    /// Free text, often a range such as `2020-2023`
    pub vehicle_year: Option<String>,
    pub availability: Availability,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Part creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPart {
    #[serde(alias = "dealerId")]
    pub seller_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "opt_string")]
    pub vehicle_make: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub vehicle_model: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub vehicle_year: Option<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default, deserialize_with = "opt_string")]
    pub image_url: Option<String>,
}

/// Partial part update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "opt_string")]
    pub vehicle_make: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub vehicle_model: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub vehicle_year: Option<String>,
    pub availability: Option<Availability>,
    #[serde(default, deserialize_with = "opt_string")]
    pub image_url: Option<String>,
}

impl Part {
    pub fn apply(&mut self, update: PartUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(price) = update.price {
            self.price = Some(price);
        }
        if let Some(make) = update.vehicle_make {
            self.vehicle_make = Some(make);
        }
        if let Some(model) = update.vehicle_model {
            self.vehicle_model = Some(model);
        }
        if let Some(year) = update.vehicle_year {
            self.vehicle_year = Some(year);
        }
        if let Some(availability) = update.availability {
            self.availability = availability;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_part_from_form_strings() {
        let req: NewPart = serde_json::from_str(
            r#"{
                "dealerId": "s1",
                "name": "Brake Pad Set - Front",
                "price": "180.00",
                "vehicleMake": "Toyota",
                "vehicleYear": "",
                "availability": "low_stock"
            }"#,
        )
        .unwrap();
        assert_eq!(req.seller_id, "s1");
        assert_eq!(req.price, Some(180.0));
        assert_eq!(req.vehicle_year, None);
        assert_eq!(req.availability, Availability::LowStock);
    }
}
