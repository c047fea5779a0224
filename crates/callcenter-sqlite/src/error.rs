use thiserror::Error;

/// Store failures callers are expected to tell apart from plain SQL errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("User already exists with this email")]
    EmailTaken { email: String },
}
