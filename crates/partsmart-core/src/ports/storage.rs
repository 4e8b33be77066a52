//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use partsmart_types::{
    Analytics, Contact, NewContact, NewPart, NewReview, NewSearch, NewSeller, NewUser, Part,
    PartUpdate, Review, Search, SearchCriteria, SearchResult, Seller, SellerUpdate,
    SellerWithParts, User,
};

/// User store
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    /// `user.password` must already be hashed. Duplicate username or email is a conflict.
    async fn create_user(&self, user: NewUser) -> Result<User>;
    async fn count_users(&self) -> Result<u64>;
}

/// Seller store
#[async_trait]
pub trait SellerStore: Send + Sync {
    async fn get_seller(&self, id: &str) -> Result<Option<Seller>>;
    async fn get_seller_by_user_id(&self, user_id: &str) -> Result<Option<Seller>>;
    /// New sellers start unverified with a zero rating.
    async fn create_seller(&self, seller: NewSeller) -> Result<Seller>;
    async fn update_seller(&self, id: &str, update: SellerUpdate) -> Result<Option<Seller>>;
    async fn list_sellers(&self) -> Result<Vec<Seller>>;
    async fn list_pending_sellers(&self) -> Result<Vec<Seller>>;
    async fn verify_seller(&self, id: &str) -> Result<Option<Seller>>;
    async fn get_seller_with_parts(&self, id: &str) -> Result<Option<SellerWithParts>>;
}

/// Part store
#[async_trait]
pub trait PartStore: Send + Sync {
    async fn get_part(&self, id: &str) -> Result<Option<Part>>;
    async fn list_parts(&self) -> Result<Vec<Part>>;
    async fn list_parts_by_seller(&self, seller_id: &str) -> Result<Vec<Part>>;
    async fn create_part(&self, part: NewPart) -> Result<Part>;
    async fn update_part(&self, id: &str, update: PartUpdate) -> Result<Option<Part>>;
    /// Returns whether a part was removed.
    async fn delete_part(&self, id: &str) -> Result<bool>;
    async fn search_parts(&self, criteria: &SearchCriteria) -> Result<Vec<SearchResult>>;
}

/// Search log store
#[async_trait]
pub trait SearchStore: Send + Sync {
    async fn create_search(&self, search: NewSearch) -> Result<Search>;
    /// Newest first.
    async fn list_user_searches(&self, user_id: &str) -> Result<Vec<Search>>;
}

/// Review store
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Inserts the review and recomputes the seller's rating atomically.
    async fn create_review(&self, review: NewReview) -> Result<Review>;
    async fn list_seller_reviews(&self, seller_id: &str) -> Result<Vec<Review>>;
}

/// Contact event store
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn create_contact(&self, contact: NewContact) -> Result<Contact>;
    async fn list_seller_contacts(&self, seller_id: &str) -> Result<Vec<Contact>>;
}

/// Dashboard counters
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    async fn analytics(&self) -> Result<Analytics>;
}

/// Everything the HTTP layer needs from a backend
pub trait Storage:
    UserStore + SellerStore + PartStore + SearchStore + ReviewStore + ContactStore + AnalyticsStore
{
}

impl<T> Storage for T where
    T: UserStore
        + SellerStore
        + PartStore
        + SearchStore
        + ReviewStore
        + ContactStore
        + AnalyticsStore
{
}
