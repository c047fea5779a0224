use crate::{Batch, CallId, NewCallLog, StoreError, UserId};
use anyhow::Result;
use rusqlite::{params, OptionalExtension};

impl Batch<'_> {
    /// Insert-or-replace keyed by `userId`; reloading the same file overwrites.
    pub fn upsert_user(&self, user_id: UserId, first_name: &str, last_name: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO users (userId, firstName, lastName) VALUES (?, ?, ?)",
            params![user_id, first_name, last_name],
        )?;
        Ok(())
    }

    /// Plain insert. `callId` is assigned by the store, so loading the same
    /// rows twice produces duplicates.
    pub fn add_call_log(&self, call: &NewCallLog) -> Result<CallId> {
        self.conn().execute(
            "INSERT INTO callLogs (phoneNumber, startTime, endTime, direction, userId) VALUES (?, ?, ?, ?, ?)",
            params![call.phone_number, call.start_time, call.end_time, call.direction, call.user_id],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    /// Insert-or-replace keyed by the unique `email`.
    pub fn upsert_auth_user(&self, name: &str, email: &str, password_hash: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO auth_users (name, email, password_hash) VALUES (?, ?, ?)",
            params![name, email, password_hash],
        )?;
        Ok(())
    }

    /// Plain insert for a new account. An existing email is refused with
    /// [`StoreError::EmailTaken`] and the stored row is left untouched.
    pub fn create_auth_user(&self, name: &str, email: &str, password_hash: &str) -> Result<i64> {
        let existing: Option<i64> = self
            .conn()
            .query_row("SELECT id FROM auth_users WHERE email = ?", [email], |r| r.get(0))
            .optional()?;
        if existing.is_some() {
            return Err(StoreError::EmailTaken { email: email.to_string() }.into());
        }
        self.conn().execute(
            "INSERT INTO auth_users (name, email, password_hash) VALUES (?, ?, ?)",
            params![name, email, password_hash],
        )?;
        Ok(self.conn().last_insert_rowid())
    }
}
