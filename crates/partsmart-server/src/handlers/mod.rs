//! HTTP handlers

pub mod analytics;
pub mod auth;
pub mod contacts;
pub mod health;
pub mod parts;
pub mod reviews;
pub mod search;
pub mod sellers;
pub mod upload;
pub mod users;

pub use health::health;
