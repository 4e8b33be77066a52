//! In-memory storage (no external dependencies)
//!
//! Every table is a `Vec` in insertion order behind one `RwLock`, so a write
//! that touches several tables (a review and its seller's rating) is atomic.

use async_trait::async_trait;
use chrono::Utc;
use partsmart_core::rating::seller_rating;
use partsmart_core::search;
use partsmart_core::{
    new_id, Analytics, AnalyticsStore, Contact, ContactStore, MarketError, NewContact, NewPart,
    NewReview, NewSearch, NewSeller, NewUser, Part, PartStore, PartUpdate, Result, Review,
    ReviewStore, Search, SearchCriteria, SearchResult, SearchStore, Seller, SellerStore,
    SellerUpdate, SellerWithParts, User, UserStore, UserSummary,
};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    sellers: Vec<Seller>,
    parts: Vec<Part>,
    searches: Vec<Search>,
    reviews: Vec<Review>,
    contacts: Vec<Contact>,
}

impl Tables {
    fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn seller(&self, id: &str) -> Option<&Seller> {
        self.sellers.iter().find(|s| s.id == id)
    }

    fn seller_mut(&mut self, id: &str) -> Option<&mut Seller> {
        self.sellers.iter_mut().find(|s| s.id == id)
    }

    fn parts_of(&self, seller_id: &str) -> Vec<Part> {
        self.parts
            .iter()
            .filter(|p| p.seller_id == seller_id)
            .cloned()
            .collect()
    }

    fn with_parts(&self, seller: &Seller) -> SellerWithParts {
        SellerWithParts {
            seller: seller.clone(),
            parts: self.parts_of(&seller.id),
            user: self.user(&seller.user_id).map(UserSummary::from),
        }
    }

    fn require_user(&self, id: &str) -> Result<()> {
        self.user(id)
            .map(|_| ())
            .ok_or_else(|| MarketError::missing("User", id))
    }

    fn require_seller(&self, id: &str) -> Result<()> {
        self.seller(id)
            .map(|_| ())
            .ok_or_else(|| MarketError::missing("Seller", id))
    }
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.tables.read().await.user(id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(MarketError::Conflict("Username already taken".to_string()));
        }
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(MarketError::Conflict("Email already registered".to_string()));
        }

        let user = User {
            id: new_id(),
            username: user.username,
            password: user.password,
            email: user.email,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn count_users(&self) -> Result<u64> {
        Ok(self.tables.read().await.users.len() as u64)
    }
}

#[async_trait]
impl SellerStore for MemoryStore {
    async fn get_seller(&self, id: &str) -> Result<Option<Seller>> {
        Ok(self.tables.read().await.seller(id).cloned())
    }

    async fn get_seller_by_user_id(&self, user_id: &str) -> Result<Option<Seller>> {
        let tables = self.tables.read().await;
        Ok(tables.sellers.iter().find(|s| s.user_id == user_id).cloned())
    }

    async fn create_seller(&self, seller: NewSeller) -> Result<Seller> {
        let mut tables = self.tables.write().await;
        tables.require_user(&seller.user_id)?;

        let seller = Seller {
            id: new_id(),
            user_id: seller.user_id,
            shop_name: seller.shop_name,
            description: seller.description,
            address: seller.address,
            phone: seller.phone,
            whatsapp: seller.whatsapp,
            location: seller.location,
            verified: false,
            rating: 0.0,
            review_count: 0,
            created_at: Utc::now(),
        };
        tables.sellers.push(seller.clone());
        Ok(seller)
    }

    async fn update_seller(&self, id: &str, update: SellerUpdate) -> Result<Option<Seller>> {
        let mut tables = self.tables.write().await;
        Ok(tables.seller_mut(id).map(|seller| {
            seller.apply(update);
            seller.clone()
        }))
    }

    async fn list_sellers(&self) -> Result<Vec<Seller>> {
        Ok(self.tables.read().await.sellers.clone())
    }

    async fn list_pending_sellers(&self) -> Result<Vec<Seller>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sellers
            .iter()
            .filter(|s| !s.verified)
            .cloned()
            .collect())
    }

    async fn verify_seller(&self, id: &str) -> Result<Option<Seller>> {
        let mut tables = self.tables.write().await;
        Ok(tables.seller_mut(id).map(|seller| {
            seller.verified = true;
            seller.clone()
        }))
    }

    async fn get_seller_with_parts(&self, id: &str) -> Result<Option<SellerWithParts>> {
        let tables = self.tables.read().await;
        Ok(tables.seller(id).map(|seller| tables.with_parts(seller)))
    }
}

#[async_trait]
impl PartStore for MemoryStore {
    async fn get_part(&self, id: &str) -> Result<Option<Part>> {
        let tables = self.tables.read().await;
        Ok(tables.parts.iter().find(|p| p.id == id).cloned())
    }

    async fn list_parts(&self) -> Result<Vec<Part>> {
        Ok(self.tables.read().await.parts.clone())
    }

    async fn list_parts_by_seller(&self, seller_id: &str) -> Result<Vec<Part>> {
        Ok(self.tables.read().await.parts_of(seller_id))
    }

    async fn create_part(&self, part: NewPart) -> Result<Part> {
        let mut tables = self.tables.write().await;
        tables.require_seller(&part.seller_id)?;

        let part = Part {
            id: new_id(),
            seller_id: part.seller_id,
            name: part.name,
            description: part.description,
            price: part.price,
            vehicle_make: part.vehicle_make,
            vehicle_model: part.vehicle_model,
            vehicle_year: part.vehicle_year,
            availability: part.availability,
            image_url: part.image_url,
            created_at: Utc::now(),
        };
        tables.parts.push(part.clone());
        Ok(part)
    }

    async fn update_part(&self, id: &str, update: PartUpdate) -> Result<Option<Part>> {
        let mut tables = self.tables.write().await;
        Ok(tables.parts.iter_mut().find(|p| p.id == id).map(|part| {
            part.apply(update);
            part.clone()
        }))
    }

    async fn delete_part(&self, id: &str) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.parts.len();
        tables.parts.retain(|p| p.id != id);
        Ok(tables.parts.len() != before)
    }

    async fn search_parts(&self, criteria: &SearchCriteria) -> Result<Vec<SearchResult>> {
        let tables = self.tables.read().await;

        let matching: Vec<Part> = tables
            .parts
            .iter()
            .filter(|p| search::matches(criteria, p))
            .cloned()
            .collect();

        let results = search::group_by_seller(matching)
            .into_iter()
            .filter_map(|(seller_id, matching_parts)| {
                let seller = tables.seller(&seller_id)?;
                tables.user(&seller.user_id)?;
                Some(SearchResult {
                    seller: tables.with_parts(seller),
                    matching_parts,
                })
            })
            .collect();

        Ok(results)
    }
}

#[async_trait]
impl SearchStore for MemoryStore {
    async fn create_search(&self, search: NewSearch) -> Result<Search> {
        let mut tables = self.tables.write().await;
        if let Some(user_id) = &search.user_id {
            tables.require_user(user_id)?;
        }

        let search = Search {
            id: new_id(),
            user_id: search.user_id,
            vehicle_make: search.vehicle_make,
            vehicle_model: search.vehicle_model,
            vehicle_year: search.vehicle_year,
            part_name: search.part_name,
            image_url: search.image_url,
            created_at: Utc::now(),
        };
        tables.searches.push(search.clone());
        Ok(search)
    }

    async fn list_user_searches(&self, user_id: &str) -> Result<Vec<Search>> {
        let tables = self.tables.read().await;
        Ok(tables
            .searches
            .iter()
            .rev()
            .filter(|s| s.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn create_review(&self, review: NewReview) -> Result<Review> {
        let mut tables = self.tables.write().await;
        tables.require_user(&review.user_id)?;
        tables.require_seller(&review.seller_id)?;

        let review = Review {
            id: new_id(),
            user_id: review.user_id,
            seller_id: review.seller_id,
            rating: review.rating,
            comment: review.comment,
            created_at: Utc::now(),
        };
        tables.reviews.push(review.clone());

        let ratings: Vec<f64> = tables
            .reviews
            .iter()
            .filter(|r| r.seller_id == review.seller_id)
            .map(|r| r.rating)
            .collect();
        if let (Some((rating, count)), Some(seller)) =
            (seller_rating(&ratings), tables.seller_mut(&review.seller_id))
        {
            seller.rating = rating;
            seller.review_count = count;
        }

        Ok(review)
    }

    async fn list_seller_reviews(&self, seller_id: &str) -> Result<Vec<Review>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.seller_id == seller_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create_contact(&self, contact: NewContact) -> Result<Contact> {
        let mut tables = self.tables.write().await;
        tables.require_user(&contact.user_id)?;
        tables.require_seller(&contact.seller_id)?;

        let contact = Contact {
            id: new_id(),
            user_id: contact.user_id,
            seller_id: contact.seller_id,
            contact_type: contact.contact_type,
            created_at: Utc::now(),
        };
        tables.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn list_seller_contacts(&self, seller_id: &str) -> Result<Vec<Contact>> {
        let tables = self.tables.read().await;
        Ok(tables
            .contacts
            .iter()
            .filter(|c| c.seller_id == seller_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AnalyticsStore for MemoryStore {
    async fn analytics(&self) -> Result<Analytics> {
        let tables = self.tables.read().await;
        Ok(Analytics {
            total_sellers: tables.sellers.len() as u64,
            total_parts: tables.parts.len() as u64,
            total_searches: tables.searches.len() as u64,
            pending_verifications: tables.sellers.iter().filter(|s| !s.verified).count() as u64,
        })
    }
}
