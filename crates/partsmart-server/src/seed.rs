//! Demo data for a fresh store
//!
//! Everything goes through the regular services so passwords are hashed and
//! seller ratings come from real reviews.

use crate::AppState;
use partsmart_core::{
    Availability, Location, NewPart, NewReview, NewSeller, NewUser, PartStore, Result, ReviewStore,
    Role, SellerStore, User, UserStore,
};
use tracing::info;

struct DemoSeller {
    username: &'static str,
    email: &'static str,
    shop_name: &'static str,
    description: &'static str,
    address: &'static str,
    phone: &'static str,
    location: (f64, f64),
    verified: bool,
    /// name, make, model, year, price, availability
    parts: &'static [(&'static str, &'static str, &'static str, &'static str, f64, Availability)],
    /// one score per demo buyer
    ratings: &'static [f64],
}

const BUYERS: &[(&str, &str)] = &[
    ("john_buyer", "john@example.com"),
    ("sarah_buyer", "sarah@example.com"),
];

const SELLERS: &[DemoSeller] = &[
    DemoSeller {
        username: "autopartsghana",
        email: "contact@autopartsghana.com",
        shop_name: "Auto Parts Ghana",
        description: "Toyota and Honda specialists since 2015",
        address: "Shop 45, Abossey Okai Market",
        phone: "+233201234567",
        location: (5.5777, -0.2309),
        verified: true,
        parts: &[
            ("Brake Pad Set - Front", "Toyota", "Camry", "2020-2023", 180.0, Availability::InStock),
            ("Air Filter", "Honda", "Civic", "2016-2021", 45.0, Availability::InStock),
            ("Headlight Assembly - Right", "Honda", "Civic", "2019", 850.0, Availability::LowStock),
        ],
        ratings: &[5.0, 4.5],
    },
    DemoSeller {
        username: "quickparts",
        email: "info@quickparts.com",
        shop_name: "QuickParts Express",
        description: "Genuine parts, fast delivery, fair prices",
        address: "Row 12, Abossey Okai Market",
        phone: "+233244556677",
        location: (5.5791, -0.2297),
        verified: true,
        parts: &[
            ("Engine Oil Filter", "Toyota", "Corolla", "2014-2019", 35.0, Availability::InStock),
            ("Spark Plug Set", "Hyundai", "Elantra", "2017", 120.0, Availability::InStock),
            ("Radiator", "Hyundai", "Elantra", "2016-2020", 650.0, Availability::OutOfStock),
        ],
        ratings: &[4.0, 4.5],
    },
    DemoSeller {
        username: "engine_experts",
        email: "parts@engineexperts.com",
        shop_name: "Engine Experts",
        description: "Engine components through to complete rebuilds",
        address: "Block C, Kokompe Artisan Enclave",
        phone: "+233277889900",
        location: (5.5702, -0.2254),
        verified: true,
        parts: &[
            ("Timing Belt Kit", "Toyota", "Corolla", "2019", 450.0, Availability::InStock),
            ("Cylinder Head Gasket", "Toyota", "Camry", "2018-2022", 280.0, Availability::LowStock),
        ],
        ratings: &[5.0, 5.0],
    },
    DemoSeller {
        username: "carzone_parts",
        email: "sales@carzone.com",
        shop_name: "CarZone Parts",
        description: "European and Japanese parts, quality guaranteed",
        address: "Shop 7, Suame Magazine",
        phone: "+233209998887",
        location: (6.7209, -1.6154),
        verified: false,
        parts: &[
            ("Brake Disc Rotor - Front", "Mercedes-Benz", "C-Class", "2015-2018", 350.0, Availability::InStock),
        ],
        ratings: &[],
    },
];

/// Populate an empty store; does nothing when any user exists
pub async fn seed_demo_data(state: &AppState) -> Result<()> {
    if state.store.count_users().await? > 0 {
        info!("Store already has data, skipping demo seed");
        return Ok(());
    }

    info!("Seeding demo data...");

    state
        .auth_service
        .register(NewUser {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            email: "admin@partsmart.local".to_string(),
            role: Role::Admin,
        })
        .await?;

    let mut buyers: Vec<User> = Vec::new();
    for (username, email) in BUYERS {
        let buyer = state
            .auth_service
            .register(NewUser {
                username: username.to_string(),
                password: "password123".to_string(),
                email: email.to_string(),
                role: Role::Buyer,
            })
            .await?;
        buyers.push(buyer);
    }

    let mut part_count = 0;
    for demo in SELLERS {
        let owner = state
            .auth_service
            .register(NewUser {
                username: demo.username.to_string(),
                password: "seller123".to_string(),
                email: demo.email.to_string(),
                role: Role::Seller,
            })
            .await?;

        let seller = state
            .store
            .create_seller(NewSeller {
                user_id: owner.id,
                shop_name: demo.shop_name.to_string(),
                description: Some(demo.description.to_string()),
                address: demo.address.to_string(),
                phone: demo.phone.to_string(),
                whatsapp: Some(demo.phone.to_string()),
                location: Some(Location {
                    lat: demo.location.0,
                    lng: demo.location.1,
                }),
            })
            .await?;

        if demo.verified {
            state.store.verify_seller(&seller.id).await?;
        }

        for (name, make, model, year, price, availability) in demo.parts {
            state
                .store
                .create_part(NewPart {
                    seller_id: seller.id.clone(),
                    name: name.to_string(),
                    description: None,
                    price: Some(*price),
                    vehicle_make: Some(make.to_string()),
                    vehicle_model: Some(model.to_string()),
                    vehicle_year: Some(year.to_string()),
                    availability: *availability,
                    image_url: None,
                })
                .await?;
            part_count += 1;
        }

        for (buyer, rating) in buyers.iter().zip(demo.ratings) {
            state
                .store
                .create_review(NewReview {
                    user_id: buyer.id.clone(),
                    seller_id: seller.id.clone(),
                    rating: *rating,
                    comment: Some("Reliable shop, parts as described".to_string()),
                })
                .await?;
        }
    }

    info!(
        "Demo data ready: {} users, {} sellers, {} parts",
        1 + BUYERS.len() + SELLERS.len(),
        SELLERS.len(),
        part_count
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::UploadService;
    use crate::storage::MemoryStore;
    use partsmart_core::{AnalyticsStore, SearchCriteria};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_seed_is_consistent_and_idempotent() {
        let uploads = UploadService::new(std::env::temp_dir().join("partsmart_seed_test"), 1024)
            .await
            .unwrap();
        let state = AppState::new(Arc::new(MemoryStore::new()), uploads);

        seed_demo_data(&state).await.unwrap();
        seed_demo_data(&state).await.unwrap();

        let analytics = state.store.analytics().await.unwrap();
        assert_eq!(analytics.total_sellers, SELLERS.len() as u64);
        assert_eq!(analytics.pending_verifications, 1);
        assert_eq!(analytics.total_parts, 9);

        let sellers = state.store.list_sellers().await.unwrap();
        assert_eq!(sellers[0].rating, 4.75);
        assert_eq!(sellers[0].review_count, 2);
        assert_eq!(sellers[3].review_count, 0);

        let results = state
            .store
            .search_parts(&SearchCriteria {
                vehicle_make: Some("toyota".to_string()),
                vehicle_year: Some("2019".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        // year matches by substring, so "2014-2019" counts and "2018-2022" does not
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].seller.seller.shop_name, "QuickParts Express");
        assert_eq!(results[1].matching_parts[0].name, "Timing Belt Kit");

        let admin = state.auth_service.login("admin", "admin123").await.unwrap();
        assert_eq!(admin.role, Role::Admin);
    }
}
