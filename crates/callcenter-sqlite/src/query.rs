use crate::{AuthUser, CallCenterUser, CallLog, DashboardStats, Db, UserAnalytics, AUTH_USERS, CALL_LOGS, USERS};
use anyhow::{bail, Result};
use rusqlite::{params, OptionalExtension, Row};

impl Db {
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let cnt: i64 = self.conn.query_row(
            "SELECT COUNT(1) FROM sqlite_master WHERE type='table' AND name=?",
            [name],
            |r| r.get(0),
        )?;
        Ok(cnt > 0)
    }

    pub fn count_rows(&self, table: &str) -> Result<i64> {
        if ![AUTH_USERS, USERS, CALL_LOGS].contains(&table) {
            bail!("unsupported table: {table}");
        }
        let sql = format!("SELECT COUNT(1) FROM {}", table);
        Ok(self.conn.query_row(&sql, [], |r| r.get(0))?)
    }

    pub fn users(&self) -> Result<Vec<CallCenterUser>> {
        let mut stmt = self.conn.prepare("SELECT userId, firstName, lastName FROM users ORDER BY userId")?;
        let rows = stmt.query_map([], |r| {
            Ok(CallCenterUser { user_id: r.get(0)?, first_name: r.get(1)?, last_name: r.get(2)? })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn call_logs(&self) -> Result<Vec<CallLog>> {
        let mut stmt = self.conn.prepare(
            "SELECT callId, phoneNumber, startTime, endTime, direction, userId FROM callLogs ORDER BY callId",
        )?;
        let rows = stmt.query_map([], call_log_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn auth_user_by_email(&self, email: &str) -> Result<Option<AuthUser>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, email, password_hash, created_at FROM auth_users WHERE email = ?",
                [email],
                auth_user_from_row,
            )
            .optional()?)
    }

    /// Matches both the email and the stored digest.
    pub fn find_auth_user(&self, email: &str, password_hash: &str) -> Result<Option<AuthUser>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, email, password_hash, created_at FROM auth_users WHERE email = ? AND password_hash = ?",
                params![email, password_hash],
                auth_user_from_row,
            )
            .optional()?)
    }

    /// Grouped over `callLogs`, so users without calls are absent and orphan
    /// `userId`s are included.
    pub fn user_analytics(&self) -> Result<Vec<UserAnalytics>> {
        let mut stmt = self.conn.prepare(
            "SELECT userId, AVG(endTime - startTime), COUNT(*) FROM callLogs GROUP BY userId ORDER BY userId",
        )?;
        let rows = stmt.query_map([], user_analytics_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn stats(&self) -> Result<DashboardStats> {
        let total_users = self.count_rows(USERS)?;
        let total_calls = self.count_rows(CALL_LOGS)?;
        let avg: Option<f64> =
            self.conn.query_row("SELECT AVG(endTime - startTime) FROM callLogs", [], |r| r.get(0))?;
        let active_users: i64 = self.conn.query_row(
            "SELECT COUNT(1) FROM users u WHERE EXISTS (SELECT 1 FROM callLogs c WHERE c.userId = u.userId)",
            [],
            |r| r.get(0),
        )?;
        Ok(DashboardStats {
            total_users,
            total_calls,
            avg_call_duration: avg.map(|a| (a * 10.0).round() / 10.0).unwrap_or(0.0),
            active_users,
        })
    }
}

pub(crate) fn call_log_from_row(r: &Row<'_>) -> rusqlite::Result<CallLog> {
    Ok(CallLog {
        call_id: r.get(0)?,
        phone_number: r.get(1)?,
        start_time: r.get(2)?,
        end_time: r.get(3)?,
        direction: r.get(4)?,
        user_id: r.get(5)?,
    })
}

pub(crate) fn user_analytics_from_row(r: &Row<'_>) -> rusqlite::Result<UserAnalytics> {
    Ok(UserAnalytics { user_id: r.get(0)?, avg_duration: r.get(1)?, num_calls: r.get(2)? })
}

fn auth_user_from_row(r: &Row<'_>) -> rusqlite::Result<AuthUser> {
    Ok(AuthUser {
        id: r.get(0)?,
        name: r.get(1)?,
        email: r.get(2)?,
        password_hash: r.get(3)?,
        created_at: r.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::{Db, NewCallLog};

    fn seeded() -> Db {
        let mut db = Db::open_in_memory().unwrap();
        db.init_schema().unwrap();
        let batch = db.begin().unwrap();
        batch.upsert_user(1, "Jane", "Smith").unwrap();
        batch.upsert_user(2, "John", "Doe").unwrap();
        for (start, end, user_id) in [(0, 60, 1), (100, 145, 1), (10, 20, 9)] {
            batch
                .add_call_log(&NewCallLog {
                    phone_number: "5551234".into(),
                    start_time: start,
                    end_time: end,
                    direction: "outbound".into(),
                    user_id,
                })
                .unwrap();
        }
        batch.commit().unwrap();
        db
    }

    #[test]
    fn stats_over_loaded_rows() {
        let stats = seeded().stats().unwrap();
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_calls, 3);
        // (60 + 45 + 10) / 3
        assert_eq!(stats.avg_call_duration, 38.3);
        assert_eq!(stats.active_users, 1);
    }

    #[test]
    fn stats_on_empty_store() {
        let db = Db::open_in_memory().unwrap();
        db.init_schema().unwrap();
        let stats = db.stats().unwrap();
        assert_eq!(stats.total_calls, 0);
        assert_eq!(stats.avg_call_duration, 0.0);
    }

    #[test]
    fn table_exists_and_unknown_tables() {
        let db = seeded();
        assert!(db.table_exists("callLogs").unwrap());
        assert!(!db.table_exists("runs").unwrap());
        assert!(db.count_rows("sqlite_master").is_err());
    }

    #[test]
    fn find_auth_user_requires_matching_hash() {
        let mut db = seeded();
        let batch = db.begin().unwrap();
        batch.upsert_auth_user("John Doe", "john@example.com", "abc").unwrap();
        batch.commit().unwrap();
        assert!(db.find_auth_user("john@example.com", "abc").unwrap().is_some());
        assert!(db.find_auth_user("john@example.com", "abd").unwrap().is_none());
        assert!(db.find_auth_user("jane@example.com", "abc").unwrap().is_none());
    }

    #[test]
    fn analytics_grouped_per_user() {
        let rows = seeded().user_analytics().unwrap();
        let got: Vec<(i64, f64, i64)> = rows.iter().map(|a| (a.user_id, a.avg_duration, a.num_calls)).collect();
        // user 2 has no calls; user 9 is not in `users`
        assert_eq!(got, vec![(1, 52.5, 2), (9, 10.0, 1)]);
    }

    #[test]
    fn analytics_empty_without_calls() {
        let db = Db::open_in_memory().unwrap();
        db.init_schema().unwrap();
        assert!(db.user_analytics().unwrap().is_empty());
    }
}
