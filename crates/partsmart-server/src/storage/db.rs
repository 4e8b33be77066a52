//! SQLite database layer (embedded, no external dependencies)

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use partsmart_core::rating::seller_rating;
use partsmart_core::search;
use partsmart_core::{
    new_id, Analytics, AnalyticsStore, Contact, ContactStore, Location, MarketError, NewContact,
    NewPart, NewReview, NewSearch, NewSeller, NewUser, Part, PartStore, PartUpdate, Result, Review,
    ReviewStore, Search, SearchCriteria, SearchResult, SearchStore, Seller, SellerStore,
    SellerUpdate, SellerWithParts, User, UserStore, UserSummary,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;

const SELLER_COLUMNS: &str = "id, user_id, shop_name, description, address, phone, whatsapp, \
     location, verified, rating, review_count, created_at";
const PART_COLUMNS: &str = "id, seller_id, name, description, price, vehicle_make, \
     vehicle_model, vehicle_year, availability, image_url, created_at";
const SEARCH_COLUMNS: &str =
    "id, user_id, vehicle_make, vehicle_model, vehicle_year, part_name, image_url, created_at";

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> anyhow::Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Private in-memory database on a single pinned connection
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
        // Users table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                role TEXT NOT NULL DEFAULT 'buyer',
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Sellers table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sellers (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                shop_name TEXT NOT NULL,
                description TEXT,
                address TEXT NOT NULL,
                phone TEXT NOT NULL,
                whatsapp TEXT,
                location TEXT,
                verified BOOLEAN NOT NULL DEFAULT 0,
                rating REAL NOT NULL DEFAULT 0,
                review_count INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Parts table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS parts (
                id TEXT PRIMARY KEY,
                seller_id TEXT NOT NULL REFERENCES sellers(id),
                name TEXT NOT NULL,
                description TEXT,
                price REAL,
                vehicle_make TEXT,
                vehicle_model TEXT,
                vehicle_year TEXT,
                availability TEXT NOT NULL DEFAULT 'in_stock',
                image_url TEXT,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_parts_seller ON parts(seller_id)")
            .execute(pool)
            .await?;

        // Searches table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS searches (
                id TEXT PRIMARY KEY,
                user_id TEXT REFERENCES users(id),
                vehicle_make TEXT,
                vehicle_model TEXT,
                vehicle_year TEXT,
                part_name TEXT,
                image_url TEXT,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Reviews table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reviews (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                seller_id TEXT NOT NULL REFERENCES sellers(id),
                rating REAL NOT NULL,
                comment TEXT,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Contacts table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                seller_id TEXT NOT NULL REFERENCES sellers(id),
                type TEXT NOT NULL,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn exists(&self, table: &str, id: &str) -> Result<bool> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?1", table);
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&*self.pool)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn require(&self, table: &str, entity: &'static str, id: &str) -> Result<()> {
        if self.exists(table, id).await? {
            Ok(())
        } else {
            Err(MarketError::missing(entity, id))
        }
    }

    async fn with_parts(&self, seller: Seller) -> Result<SellerWithParts> {
        let parts = self.list_parts_by_seller(&seller.id).await?;
        let user = self.get_user(&seller.user_id).await?;
        Ok(SellerWithParts {
            seller,
            parts,
            user: user.as_ref().map(UserSummary::from),
        })
    }
}

/// Unique violations become conflicts, everything else a database error
fn db_err(e: sqlx::Error) -> MarketError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            let message = db.message();
            if message.contains("users.username") {
                MarketError::Conflict("Username already taken".to_string())
            } else if message.contains("users.email") {
                MarketError::Conflict("Email already registered".to_string())
            } else {
                MarketError::Conflict(message.to_string())
            }
        }
        _ => MarketError::Database(e.to_string()),
    }
}

fn collect<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = MarketError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[async_trait]
impl UserStore for Database {
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, password, email, role, created_at FROM users WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_err)?;

        row.map(User::try_from).transpose()
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, password, email, role, created_at FROM users WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_err)?;

        row.map(User::try_from).transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, password, email, role, created_at FROM users WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_err)?;

        row.map(User::try_from).transpose()
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let user = User {
            id: new_id(),
            username: user.username,
            password: user.password,
            email: user.email,
            role: user.role,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, username, password, email, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.email)
        .bind(user.role.to_string())
        .bind(user.created_at)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(user)
    }

    async fn count_users(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&*self.pool)
            .await
            .map_err(db_err)?;
        Ok(count as u64)
    }
}

#[async_trait]
impl SellerStore for Database {
    async fn get_seller(&self, id: &str) -> Result<Option<Seller>> {
        let sql = format!("SELECT {} FROM sellers WHERE id = ?1", SELLER_COLUMNS);
        let row: Option<SellerRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(db_err)?;

        row.map(Seller::try_from).transpose()
    }

    async fn get_seller_by_user_id(&self, user_id: &str) -> Result<Option<Seller>> {
        let sql = format!(
            "SELECT {} FROM sellers WHERE user_id = ?1 ORDER BY rowid LIMIT 1",
            SELLER_COLUMNS
        );
        let row: Option<SellerRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(db_err)?;

        row.map(Seller::try_from).transpose()
    }

    async fn create_seller(&self, seller: NewSeller) -> Result<Seller> {
        self.require("users", "User", &seller.user_id).await?;

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

        sqlx::query(
            r#"
            INSERT INTO sellers (id, user_id, shop_name, description, address, phone, whatsapp,
                                 location, verified, rating, review_count, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, 0, 0, ?9)
            "#,
        )
        .bind(&seller.id)
        .bind(&seller.user_id)
        .bind(&seller.shop_name)
        .bind(&seller.description)
        .bind(&seller.address)
        .bind(&seller.phone)
        .bind(&seller.whatsapp)
        .bind(location_json(seller.location.as_ref())?)
        .bind(seller.created_at)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(seller)
    }

    async fn update_seller(&self, id: &str, update: SellerUpdate) -> Result<Option<Seller>> {
        let Some(mut seller) = self.get_seller(id).await? else {
            return Ok(None);
        };
        seller.apply(update);

        sqlx::query(
            r#"
            UPDATE sellers
            SET shop_name = ?1, description = ?2, address = ?3, phone = ?4,
                whatsapp = ?5, location = ?6
            WHERE id = ?7
            "#,
        )
        .bind(&seller.shop_name)
        .bind(&seller.description)
        .bind(&seller.address)
        .bind(&seller.phone)
        .bind(&seller.whatsapp)
        .bind(location_json(seller.location.as_ref())?)
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(Some(seller))
    }

    async fn list_sellers(&self) -> Result<Vec<Seller>> {
        let sql = format!("SELECT {} FROM sellers ORDER BY rowid", SELLER_COLUMNS);
        let rows: Vec<SellerRow> = sqlx::query_as(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(db_err)?;

        collect(rows)
    }

    async fn list_pending_sellers(&self) -> Result<Vec<Seller>> {
        let sql = format!(
            "SELECT {} FROM sellers WHERE verified = 0 ORDER BY rowid",
            SELLER_COLUMNS
        );
        let rows: Vec<SellerRow> = sqlx::query_as(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(db_err)?;

        collect(rows)
    }

    async fn verify_seller(&self, id: &str) -> Result<Option<Seller>> {
        let result = sqlx::query("UPDATE sellers SET verified = 1 WHERE id = ?1")
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_seller(id).await
    }

    async fn get_seller_with_parts(&self, id: &str) -> Result<Option<SellerWithParts>> {
        match self.get_seller(id).await? {
            Some(seller) => self.with_parts(seller).await.map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PartStore for Database {
    async fn get_part(&self, id: &str) -> Result<Option<Part>> {
        let sql = format!("SELECT {} FROM parts WHERE id = ?1", PART_COLUMNS);
        let row: Option<PartRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(db_err)?;

        row.map(Part::try_from).transpose()
    }

    async fn list_parts(&self) -> Result<Vec<Part>> {
        let sql = format!("SELECT {} FROM parts ORDER BY rowid", PART_COLUMNS);
        let rows: Vec<PartRow> = sqlx::query_as(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(db_err)?;

        collect(rows)
    }

    async fn list_parts_by_seller(&self, seller_id: &str) -> Result<Vec<Part>> {
        let sql = format!(
            "SELECT {} FROM parts WHERE seller_id = ?1 ORDER BY rowid",
            PART_COLUMNS
        );
        let rows: Vec<PartRow> = sqlx::query_as(&sql)
            .bind(seller_id)
            .fetch_all(&*self.pool)
            .await
            .map_err(db_err)?;

        collect(rows)
    }

    async fn create_part(&self, part: NewPart) -> Result<Part> {
        self.require("sellers", "Seller", &part.seller_id).await?;

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

        sqlx::query(
            r#"
            INSERT INTO parts (id, seller_id, name, description, price, vehicle_make,
                               vehicle_model, vehicle_year, availability, image_url, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&part.id)
        .bind(&part.seller_id)
        .bind(&part.name)
        .bind(&part.description)
        .bind(part.price)
        .bind(&part.vehicle_make)
        .bind(&part.vehicle_model)
        .bind(&part.vehicle_year)
        .bind(part.availability.to_string())
        .bind(&part.image_url)
        .bind(part.created_at)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(part)
    }

    async fn update_part(&self, id: &str, update: PartUpdate) -> Result<Option<Part>> {
        let Some(mut part) = self.get_part(id).await? else {
            return Ok(None);
        };
        part.apply(update);

        sqlx::query(
            r#"
            UPDATE parts
            SET name = ?1, description = ?2, price = ?3, vehicle_make = ?4, vehicle_model = ?5,
                vehicle_year = ?6, availability = ?7, image_url = ?8
            WHERE id = ?9
            "#,
        )
        .bind(&part.name)
        .bind(&part.description)
        .bind(part.price)
        .bind(&part.vehicle_make)
        .bind(&part.vehicle_model)
        .bind(&part.vehicle_year)
        .bind(part.availability.to_string())
        .bind(&part.image_url)
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(Some(part))
    }

    async fn delete_part(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM parts WHERE id = ?1")
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_parts(&self, criteria: &SearchCriteria) -> Result<Vec<SearchResult>> {
        let criteria = search::normalize(criteria);

        // SQLite LOWER() only folds ASCII, so case-insensitive filters run in Rust
        let sql = format!(
            r#"
            SELECT {} FROM parts
            WHERE (?1 IS NULL OR instr(vehicle_year, ?1) > 0)
            ORDER BY rowid
            "#,
            PART_COLUMNS
        );
        let rows: Vec<PartRow> = sqlx::query_as(&sql)
            .bind(&criteria.vehicle_year)
            .fetch_all(&*self.pool)
            .await
            .map_err(db_err)?;
        let parts: Vec<Part> = collect(rows)?;
        let matching: Vec<Part> = parts
            .into_iter()
            .filter(|p| search::matches(&criteria, p))
            .collect();

        let mut results = Vec::new();
        for (seller_id, matching_parts) in search::group_by_seller(matching) {
            let Some(seller) = self.get_seller(&seller_id).await? else {
                continue;
            };
            let seller = self.with_parts(seller).await?;
            if seller.user.is_none() {
                continue;
            }
            results.push(SearchResult {
                seller,
                matching_parts,
            });
        }

        Ok(results)
    }
}

#[async_trait]
impl SearchStore for Database {
    async fn create_search(&self, search: NewSearch) -> Result<Search> {
        if let Some(user_id) = &search.user_id {
            self.require("users", "User", user_id).await?;
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

        sqlx::query(
            r#"
            INSERT INTO searches (id, user_id, vehicle_make, vehicle_model, vehicle_year,
                                  part_name, image_url, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&search.id)
        .bind(&search.user_id)
        .bind(&search.vehicle_make)
        .bind(&search.vehicle_model)
        .bind(&search.vehicle_year)
        .bind(&search.part_name)
        .bind(&search.image_url)
        .bind(search.created_at)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(search)
    }

    async fn list_user_searches(&self, user_id: &str) -> Result<Vec<Search>> {
        let sql = format!(
            "SELECT {} FROM searches WHERE user_id = ?1 ORDER BY rowid DESC",
            SEARCH_COLUMNS
        );
        let rows: Vec<SearchRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(&*self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Search::from).collect())
    }
}

#[async_trait]
impl ReviewStore for Database {
    async fn create_review(&self, review: NewReview) -> Result<Review> {
        self.require("users", "User", &review.user_id).await?;
        self.require("sellers", "Seller", &review.seller_id).await?;

        let review = Review {
            id: new_id(),
            user_id: review.user_id,
            seller_id: review.seller_id,
            rating: review.rating,
            comment: review.comment,
            created_at: Utc::now(),
        };

        // Insert and rating recomputation commit together
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(
            r#"
            INSERT INTO reviews (id, user_id, seller_id, rating, comment, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&review.id)
        .bind(&review.user_id)
        .bind(&review.seller_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        let ratings: Vec<f64> = sqlx::query_scalar("SELECT rating FROM reviews WHERE seller_id = ?1")
            .bind(&review.seller_id)
            .fetch_all(&mut *tx)
            .await
            .map_err(db_err)?;

        if let Some((rating, count)) = seller_rating(&ratings) {
            sqlx::query("UPDATE sellers SET rating = ?1, review_count = ?2 WHERE id = ?3")
                .bind(rating)
                .bind(count)
                .bind(&review.seller_id)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;

        Ok(review)
    }

    async fn list_seller_reviews(&self, seller_id: &str) -> Result<Vec<Review>> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, seller_id, rating, comment, created_at
            FROM reviews WHERE seller_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(seller_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}

#[async_trait]
impl ContactStore for Database {
    async fn create_contact(&self, contact: NewContact) -> Result<Contact> {
        self.require("users", "User", &contact.user_id).await?;
        self.require("sellers", "Seller", &contact.seller_id).await?;

        let contact = Contact {
            id: new_id(),
            user_id: contact.user_id,
            seller_id: contact.seller_id,
            contact_type: contact.contact_type,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO contacts (id, user_id, seller_id, type, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&contact.id)
        .bind(&contact.user_id)
        .bind(&contact.seller_id)
        .bind(contact.contact_type.to_string())
        .bind(contact.created_at)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(contact)
    }

    async fn list_seller_contacts(&self, seller_id: &str) -> Result<Vec<Contact>> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, seller_id, type, created_at
            FROM contacts WHERE seller_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(seller_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(db_err)?;

        collect(rows)
    }
}

#[async_trait]
impl AnalyticsStore for Database {
    async fn analytics(&self) -> Result<Analytics> {
        let (sellers, parts, searches, pending): (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM sellers),
                (SELECT COUNT(*) FROM parts),
                (SELECT COUNT(*) FROM searches),
                (SELECT COUNT(*) FROM sellers WHERE verified = 0)
            "#,
        )
        .fetch_one(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(Analytics {
            total_sellers: sellers as u64,
            total_parts: parts as u64,
            total_searches: searches as u64,
            pending_verifications: pending as u64,
        })
    }
}

fn location_json(location: Option<&Location>) -> Result<Option<String>> {
    location
        .map(serde_json::to_string)
        .transpose()
        .map_err(MarketError::from)
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    password: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = MarketError;

    fn try_from(r: UserRow) -> Result<Self> {
        Ok(User {
            id: r.id,
            username: r.username,
            password: r.password,
            email: r.email,
            role: r.role.parse()?,
            created_at: r.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SellerRow {
    id: String,
    user_id: String,
    shop_name: String,
    description: Option<String>,
    address: String,
    phone: String,
    whatsapp: Option<String>,
    location: Option<String>,
    verified: bool,
    rating: f64,
    review_count: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<SellerRow> for Seller {
    type Error = MarketError;

    fn try_from(r: SellerRow) -> Result<Self> {
        let location = r
            .location
            .as_deref()
            .map(serde_json::from_str::<Location>)
            .transpose()?;

        Ok(Seller {
            id: r.id,
            user_id: r.user_id,
            shop_name: r.shop_name,
            description: r.description,
            address: r.address,
            phone: r.phone,
            whatsapp: r.whatsapp,
            location,
            verified: r.verified,
            rating: r.rating,
            review_count: r.review_count,
            created_at: r.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PartRow {
    id: String,
    seller_id: String,
    name: String,
    description: Option<String>,
    price: Option<f64>,
    vehicle_make: Option<String>,
    vehicle_model: Option<String>,
    vehicle_year: Option<String>,
    availability: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PartRow> for Part {
    type Error = MarketError;

    fn try_from(r: PartRow) -> Result<Self> {
        Ok(Part {
            id: r.id,
            seller_id: r.seller_id,
            name: r.name,
            description: r.description,
            price: r.price,
            vehicle_make: r.vehicle_make,
            vehicle_model: r.vehicle_model,
            vehicle_year: r.vehicle_year,
            availability: r.availability.parse()?,
            image_url: r.image_url,
            created_at: r.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SearchRow {
    id: String,
    user_id: Option<String>,
    vehicle_make: Option<String>,
    vehicle_model: Option<String>,
    vehicle_year: Option<String>,
    part_name: Option<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SearchRow> for Search {
    fn from(r: SearchRow) -> Self {
        Search {
            id: r.id,
            user_id: r.user_id,
            vehicle_make: r.vehicle_make,
            vehicle_model: r.vehicle_model,
            vehicle_year: r.vehicle_year,
            part_name: r.part_name,
            image_url: r.image_url,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: String,
    user_id: String,
    seller_id: String,
    rating: f64,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(r: ReviewRow) -> Self {
        Review {
            id: r.id,
            user_id: r.user_id,
            seller_id: r.seller_id,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: String,
    user_id: String,
    seller_id: String,
    #[sqlx(rename = "type")]
    contact_type: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = MarketError;

    fn try_from(r: ContactRow) -> Result<Self> {
        Ok(Contact {
            id: r.id,
            user_id: r.user_id,
            seller_id: r.seller_id,
            contact_type: r.contact_type.parse()?,
            created_at: r.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partsmart_core::{Availability, Role};

    async fn seeded() -> (Database, User, Seller) {
        let db = Database::in_memory().await.unwrap();
        let user = db
            .create_user(NewUser {
                username: "kantamanto".into(),
                password: "hashed".into(),
                email: "sales@kantamanto.com".into(),
                role: Role::Seller,
            })
            .await
            .unwrap();
        let seller = db
            .create_seller(NewSeller {
                user_id: user.id.clone(),
                shop_name: "Kantamanto Motors".into(),
                description: Some("Japanese parts".into()),
                address: "Row 7, Kantamanto".into(),
                phone: "+233244000111".into(),
                whatsapp: Some("+233244000111".into()),
                location: Some(Location {
                    lat: 5.55,
                    lng: -0.21,
                }),
            })
            .await
            .unwrap();
        (db, user, seller)
    }

    fn new_part(seller_id: &str, name: &str, make: Option<&str>, year: &str) -> NewPart {
        NewPart {
            seller_id: seller_id.to_string(),
            name: name.to_string(),
            description: None,
            price: Some(120.5),
            vehicle_make: make.map(str::to_string),
            vehicle_model: Some("Corolla".into()),
            vehicle_year: Some(year.to_string()),
            availability: Availability::LowStock,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_seller_round_trip() {
        let (db, user, seller) = seeded().await;
        let loaded = db.get_seller(&seller.id).await.unwrap().unwrap();
        assert_eq!(loaded.shop_name, "Kantamanto Motors");
        assert_eq!(loaded.location, seller.location);
        assert_eq!(
            db.get_seller_by_user_id(&user.id).await.unwrap().map(|s| s.id),
            Some(seller.id)
        );
    }

    #[tokio::test]
    async fn test_unique_username_is_conflict() {
        let (db, user, _) = seeded().await;
        let err = db
            .create_user(NewUser {
                username: user.username,
                password: "hashed".into(),
                email: "different@example.com".into(),
                role: Role::Buyer,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Username already taken");
    }

    #[tokio::test]
    async fn test_search_filters_in_sql() {
        let (db, _, seller) = seeded().await;
        db.create_part(new_part(&seller.id, "Timing Belt", Some("Toyota"), "2014-2018"))
            .await
            .unwrap();
        db.create_part(new_part(&seller.id, "Timing Chain", None, "2016"))
            .await
            .unwrap();

        let criteria = SearchCriteria {
            vehicle_make: Some("TOYOTA".into()),
            vehicle_year: Some("2016".into()),
            part_name: Some("timing".into()),
            ..Default::default()
        };
        let results = db.search_parts(&criteria).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matching_parts.len(), 1);
        assert_eq!(results[0].matching_parts[0].name, "Timing Belt");
        assert_eq!(results[0].seller.parts.len(), 2);
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case_like_memory_store() {
        use crate::storage::MemoryStore;
        use partsmart_core::Storage;

        let memory = MemoryStore::new();
        let (db, _, _) = seeded().await;
        let criteria = SearchCriteria {
            vehicle_make: Some("ŠKODA".into()),
            part_name: Some("ölFILTER".into()),
            ..Default::default()
        };

        for store in [&memory as &dyn Storage, &db as &dyn Storage] {
            let owner = store
                .create_user(NewUser {
                    username: "skoda_shop".into(),
                    password: "hashed".into(),
                    email: "skoda@example.com".into(),
                    role: Role::Seller,
                })
                .await
                .unwrap();
            let seller = store
                .create_seller(NewSeller {
                    user_id: owner.id,
                    shop_name: "Škoda Teile".into(),
                    description: None,
                    address: "Hauptstraße 1".into(),
                    phone: "+49 30 1234".into(),
                    whatsapp: None,
                    location: None,
                })
                .await
                .unwrap();
            store
                .create_part(new_part(&seller.id, "Ölfilter", Some("Škoda"), "2018"))
                .await
                .unwrap();

            let results = store.search_parts(&criteria).await.unwrap();
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].matching_parts[0].name, "Ölfilter");
        }
    }

    #[tokio::test]
    async fn test_review_updates_rating_in_transaction() {
        let (db, user, seller) = seeded().await;
        for rating in [4.0, 5.0] {
            db.create_review(NewReview {
                user_id: user.id.clone(),
                seller_id: seller.id.clone(),
                rating,
                comment: Some("Genuine parts".into()),
            })
            .await
            .unwrap();
        }
        let seller = db.get_seller(&seller.id).await.unwrap().unwrap();
        assert_eq!(seller.rating, 4.5);
        assert_eq!(seller.review_count, 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_part() {
        let (db, _, seller) = seeded().await;
        let part = db
            .create_part(new_part(&seller.id, "Alternator", Some("Nissan"), "2010"))
            .await
            .unwrap();

        let updated = db
            .update_part(
                &part.id,
                PartUpdate {
                    availability: Some(Availability::OutOfStock),
                    price: Some(99.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.availability, Availability::OutOfStock);
        assert_eq!(db.get_part(&part.id).await.unwrap().unwrap().price, Some(99.0));

        assert!(db.delete_part(&part.id).await.unwrap());
        assert!(!db.delete_part(&part.id).await.unwrap());
        assert!(db.update_part(&part.id, PartUpdate::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_analytics_counts() {
        let (db, _, seller) = seeded().await;
        db.create_part(new_part(&seller.id, "Wiper Blade", Some("Kia"), "2020"))
            .await
            .unwrap();
        let analytics = db.analytics().await.unwrap();
        assert_eq!(analytics.total_sellers, 1);
        assert_eq!(analytics.total_parts, 1);
        assert_eq!(analytics.pending_verifications, 1);

        db.verify_seller(&seller.id).await.unwrap();
        assert_eq!(db.analytics().await.unwrap().pending_verifications, 0);
    }
}
