mod open;
mod models;
mod insert;
mod query;
mod schema;
mod export_csv;
mod error;

pub use open::{Batch, Db};
pub use models::*;
pub use error::StoreError;
pub use schema::{AUTH_USERS, CALL_LOGS, USERS};
