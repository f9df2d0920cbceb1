//! Registration, login and bearer-token resolution.
//!
//! Passwords are stored as argon2 PHC strings. Tokens are random and only
//! their SHA-256 digest is kept, so a leaked database cannot be replayed.

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;

use super::error::{BoardError, BoardResult};
use crate::db::utils::{generate_entity_id, sha256_hex};
use crate::db::{Database, Id, User, UserRepository, UserSummary};

/// A user together with a freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IssuedToken {
    #[schema(example = "a1b2c3d4")]
    pub id: Id,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub token: String,
}

pub struct AccountService<'a, D: Database> {
    db: &'a D,
}

impl<'a, D: Database> AccountService<'a, D> {
    pub fn new(db: &'a D) -> Self {
        Self { db }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> BoardResult<IssuedToken> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(BoardError::validation("Name, email and password are required"));
        }

        let user = self
            .db
            .users()
            .create(&User {
                id: generate_entity_id(),
                name: name.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
                created_at: String::new(),
            })
            .await?;

        info!(user_id = %user.id, "user registered");
        self.issue(&user).await
    }

    pub async fn login(&self, email: &str, password: &str) -> BoardResult<IssuedToken> {
        let invalid = || BoardError::Unauthenticated {
            message: "Invalid email or password".to_string(),
        };

        let user = self
            .db
            .users()
            .get_by_email(email.trim())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password_hash) {
            debug!(user_id = %user.id, "password mismatch");
            return Err(invalid());
        }

        self.issue(&user).await
    }

    /// Resolve a bearer token to the user it was issued for.
    pub async fn authenticate(&self, token: &str) -> BoardResult<UserSummary> {
        let user = self
            .db
            .users()
            .find_by_session(&sha256_hex(token.as_bytes()))
            .await?
            .ok_or_else(|| BoardError::Unauthenticated {
                message: "Invalid or expired token".to_string(),
            })?;
        Ok(UserSummary::from(&user))
    }

    async fn issue(&self, user: &User) -> BoardResult<IssuedToken> {
        let token = generate_token();
        self.db
            .users()
            .create_session(&user.id, &sha256_hex(token.as_bytes()))
            .await?;

        Ok(IssuedToken {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            token,
        })
    }
}

/// 256 random bits, URL-safe base64.
fn generate_token() -> String {
    let mut bytes = Vec::with_capacity(32);
    bytes.extend_from_slice(uuid::Uuid::new_v4().as_bytes());
    bytes.extend_from_slice(uuid::Uuid::new_v4().as_bytes());
    URL_SAFE_NO_PAD.encode(bytes)
}

fn hash_password(password: &str) -> BoardResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BoardError::Internal {
            message: format!("password hashing failed: {}", e),
        })
}

fn verify_password(password: &str, phc: &str) -> bool {
    PasswordHash::new(phc)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
