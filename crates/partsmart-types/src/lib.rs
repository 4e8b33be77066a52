//! PartSmart Types - Pure data definitions shared by the core and the server
//!
//! This crate contains only serde data types and has no async runtime
//! dependencies. Everything serializes with camelCase field names.

pub mod activity;
pub mod market;
pub mod part;
pub mod seller;
pub mod serde_helpers;
pub mod user;

pub use activity::*;
pub use market::*;
pub use part::*;
pub use seller::*;
pub use user::*;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Raised when a wire string does not name a known enum variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Buyer,
    #[serde(alias = "dealer")]
    Seller,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Buyer => write!(f, "buyer"),
            Role::Seller => write!(f, "seller"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Role::Buyer),
            // older rows call sellers dealers
            "seller" | "dealer" => Ok(Role::Seller),
            "admin" => Ok(Role::Admin),
            other => Err(ParseEnumError {
                kind: "role",
                value: other.to_string(),
            }),
        }
    }
}

/// Stock state of a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    InStock,
    LowStock,
    OutOfStock,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::InStock => write!(f, "in_stock"),
            Availability::LowStock => write!(f, "low_stock"),
            Availability::OutOfStock => write!(f, "out_of_stock"),
        }
    }
}

impl FromStr for Availability {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_stock" => Ok(Availability::InStock),
            "low_stock" => Ok(Availability::LowStock),
            "out_of_stock" => Ok(Availability::OutOfStock),
            other => Err(ParseEnumError {
                kind: "availability",
                value: other.to_string(),
            }),
        }
    }
}

/// How a buyer reached out to a seller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    Whatsapp,
    Call,
    ProfileView,
}

impl std::fmt::Display for ContactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactType::Whatsapp => write!(f, "whatsapp"),
            ContactType::Call => write!(f, "call"),
            ContactType::ProfileView => write!(f, "profile_view"),
        }
    }
}

impl FromStr for ContactType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whatsapp" => Ok(ContactType::Whatsapp),
            "call" => Ok(ContactType::Call),
            "profile_view" => Ok(ContactType::ProfileView),
            other => Err(ParseEnumError {
                kind: "contact type",
                value: other.to_string(),
            }),
        }
    }
}

/// Shop coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}
