//! Database utility functions.

use chrono::Utc;
use sha2::{Digest, Sha256};

/// Generate an 8-character hex ID for database entities.
pub fn generate_entity_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..8].to_string()
}

/// Get current datetime as string in SQLite format.
pub fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Hex-encoded SHA-256 digest, used to store session tokens.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
