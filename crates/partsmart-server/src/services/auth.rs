//! Account registration and login
//!
//! Passwords are stored as Argon2 hashes. No tokens are issued: a successful
//! login simply returns the user record.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use partsmart_core::{validation, MarketError, NewUser, Result, Storage, User, UserStore};
use rand::rngs::OsRng;
use std::sync::Arc;
use tracing::info;

pub struct AuthService {
    store: Arc<dyn Storage>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub async fn register(&self, mut user: NewUser) -> Result<User> {
        validation::new_user(&user)?;

        if self.store.get_user_by_username(&user.username).await?.is_some() {
            return Err(MarketError::Conflict("Username already taken".to_string()));
        }
        if self.store.get_user_by_email(&user.email).await?.is_some() {
            return Err(MarketError::Conflict("Email already registered".to_string()));
        }

        user.password = hash_password(&user.password)?;
        let user = self.store.create_user(user).await?;
        info!("Registered user {} ({})", user.username, user.role);

        Ok(user)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let user = self.store.get_user_by_username(username).await?;

        if let Some(user) = user {
            if verify_password(password, &user.password)? {
                return Ok(user);
            }
        }

        Err(MarketError::InvalidCredentials)
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| MarketError::Internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(stored)
        .map_err(|e| MarketError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
