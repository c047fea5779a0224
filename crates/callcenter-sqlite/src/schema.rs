use anyhow::Result;
use rusqlite::Connection;

pub const AUTH_USERS: &str = "auth_users";
pub const USERS: &str = "users";
pub const CALL_LOGS: &str = "callLogs";

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS auth_users (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  name            TEXT NOT NULL,
  email           TEXT UNIQUE NOT NULL,
  password_hash   TEXT NOT NULL,
  created_at      TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS users (
  userId          INTEGER PRIMARY KEY,
  firstName       TEXT,
  lastName        TEXT
);

CREATE TABLE IF NOT EXISTS callLogs (
  callId          INTEGER PRIMARY KEY AUTOINCREMENT,
  phoneNumber     TEXT,
  startTime       INTEGER,
  endTime         INTEGER,
  direction       TEXT,
  userId          INTEGER,
  FOREIGN KEY (userId) REFERENCES users(userId)
);
"#;

/// Creates the three tables when missing. Safe to run repeatedly.
pub(crate) fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_TABLES)?;
    Ok(())
}
