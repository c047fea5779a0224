//! Demo login seed.
//!
//! The digest is a single unsalted SHA-256 round. It exists so the demo has a
//! known login and must not be reused for real credentials.

use anyhow::{bail, Result};
use callcenter_sqlite::{AuthUser, Batch, Db, StoreError};
use sha2::{Digest, Sha256};

pub const DEMO_NAME: &str = "John Doe";
pub const DEMO_EMAIL: &str = "john@example.com";
pub const DEMO_PASSWORD: &str = "password123";

/// Lowercase hex SHA-256 of `password`.
pub fn password_digest(password: &str) -> String {
    let mut sha = Sha256::new();
    sha.update(password.as_bytes());
    hex::encode(sha.finalize())
}

/// Writes the demo account, replacing any existing row with the same email.
pub fn seed_demo_user(batch: &Batch<'_>) -> Result<()> {
    batch.upsert_auth_user(DEMO_NAME, DEMO_EMAIL, &password_digest(DEMO_PASSWORD))
}

/// Registers a new account with the same digest as the demo seed. All three
/// fields are required; a taken email fails with [`StoreError::EmailTaken`].
pub fn signup(batch: &Batch<'_>, name: &str, email: &str, password: &str) -> Result<i64> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        bail!("All fields are required");
    }
    batch.create_auth_user(name, email, &password_digest(password))
}

pub fn authenticate(db: &Db, email: &str, password: &str) -> Result<Option<AuthUser>> {
    db.find_auth_user(email, &password_digest(password))
}
