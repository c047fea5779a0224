//! The setup run: schema, datasets, demo login, commit.

use crate::config::Settings;
use anyhow::Result;
use auth_seed::{seed_demo_user, DEMO_EMAIL, DEMO_PASSWORD};
use callcenter_sqlite::{Batch, Db};
use dataset_loader::{load_call_logs, load_users, Fetcher};
use std::io::Write;
use tracing::{error, info};

/// Runs every stage inside one transaction. Loader failures are reported on
/// `out` and the run carries on; store and seeder failures abort it and the
/// uncommitted transaction is rolled back.
pub async fn run_setup(settings: &Settings, out: &mut dyn Write) -> Result<()> {
    info!(database = %settings.database.display(), "opening store");
    let mut db = Db::open_or_create(&settings.database)?;
    let batch = db.begin()?;

    batch.init_schema()?;
    writeln!(out, "Database tables created successfully!")?;

    if let Err(e) = load_datasets(settings, &batch, out).await {
        error!(error = %e, "loading stage failed");
        writeln!(out, "Error loading CSV data: {e}")?;
    }

    seed_demo_user(&batch)?;
    writeln!(out, "Sample auth user created: {DEMO_EMAIL} / {DEMO_PASSWORD}")?;

    batch.commit()?;
    db.close()?;
    writeln!(out, "Database setup completed!")?;
    Ok(())
}

async fn load_datasets(settings: &Settings, batch: &Batch<'_>, out: &mut dyn Write) -> Result<()> {
    let fetcher = Fetcher::new(&settings.fetch)?;
    let users = load_users(&fetcher, batch, &settings.users_url).await?;
    writeln!(out, "Loaded {users} users")?;
    let calls = load_call_logs(&fetcher, batch, &settings.call_logs_url).await?;
    writeln!(out, "Loaded {calls} call logs")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use callcenter_sqlite::{AUTH_USERS, CALL_LOGS, USERS};
    use dataset_loader::FetchOptions;
    use std::path::Path;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USERS_CSV: &str = "firstName,lastName\n\"Jane\",\"Smith\"\nJohn,Doe\n,Missing\n";
    const CALLS_CSV: &str = "phoneNumber,startTime,endTime,direction,userId\n\
                             5551234,1000,2000,inbound,1\n\
                             5551234,1000,900,inbound,1\n\
                             5559876,3000,3060,outbound,2\n";

    async fn serve(server: &MockServer, route: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    fn settings(server: &MockServer, db: &Path) -> Settings {
        Settings {
            database: db.to_path_buf(),
            users_url: format!("{}/users.csv", server.uri()),
            call_logs_url: format!("{}/callLogs.csv", server.uri()),
            fetch: FetchOptions::default(),
        }
    }

    async fn run(settings: &Settings) -> (Result<()>, String) {
        let mut out = Vec::new();
        let res = run_setup(settings, &mut out).await;
        (res, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn full_run_loads_everything() {
        let server = MockServer::start().await;
        serve(&server, "/users.csv", 200, USERS_CSV).await;
        serve(&server, "/callLogs.csv", 200, CALLS_CSV).await;
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&server, &dir.path().join("call_center.db"));

        let (res, out) = run(&settings).await;
        res.unwrap();
        assert_eq!(
            out,
            "Database tables created successfully!\n\
             Loaded 2 users\n\
             Loaded 2 call logs\n\
             Sample auth user created: john@example.com / password123\n\
             Database setup completed!\n"
        );

        let db = Db::open_or_create(&settings.database).unwrap();
        assert_eq!(db.users().unwrap().len(), 2);
        assert_eq!(db.count_rows(CALL_LOGS).unwrap(), 2);
        assert!(auth_seed::authenticate(&db, DEMO_EMAIL, DEMO_PASSWORD).unwrap().is_some());
    }

    #[tokio::test]
    async fn loader_failure_is_reported_and_run_continues() {
        let server = MockServer::start().await;
        serve(&server, "/users.csv", 500, "").await;
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&server, &dir.path().join("call_center.db"));

        let (res, out) = run(&settings).await;
        res.unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("Error loading CSV data: "), "{out}");
        assert!(lines[1].contains("500"), "{out}");

        let db = Db::open_or_create(&settings.database).unwrap();
        assert_eq!(db.users().unwrap().len(), 0);
        assert_eq!(db.count_rows(AUTH_USERS).unwrap(), 1);
    }

    #[tokio::test]
    async fn users_loaded_before_a_call_log_failure_are_kept() {
        let server = MockServer::start().await;
        serve(&server, "/users.csv", 200, USERS_CSV).await;
        serve(&server, "/callLogs.csv", 404, "").await;
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&server, &dir.path().join("call_center.db"));

        let (res, out) = run(&settings).await;
        res.unwrap();
        assert!(out.contains("Loaded 2 users\nError loading CSV data: "), "{out}");

        let db = Db::open_or_create(&settings.database).unwrap();
        assert_eq!(db.users().unwrap().len(), 2);
        assert_eq!(db.count_rows(CALL_LOGS).unwrap(), 0);
    }

    #[tokio::test]
    async fn rerun_replaces_users_but_duplicates_calls() {
        let server = MockServer::start().await;
        serve(&server, "/users.csv", 200, USERS_CSV).await;
        serve(&server, "/callLogs.csv", 200, CALLS_CSV).await;
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&server, &dir.path().join("call_center.db"));

        run(&settings).await.0.unwrap();
        run(&settings).await.0.unwrap();

        let db = Db::open_or_create(&settings.database).unwrap();
        assert_eq!(db.users().unwrap().len(), 2);
        assert_eq!(db.count_rows(CALL_LOGS).unwrap(), 4);
        assert_eq!(db.count_rows(AUTH_USERS).unwrap(), 1);
    }

    #[tokio::test]
    async fn unreachable_store_is_fatal() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&server, &dir.path().join("no/such/dir/call_center.db"));

        let (res, out) = run(&settings).await;
        assert!(res.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn seeder_failure_rolls_back_loaded_datasets() {
        let server = MockServer::start().await;
        serve(&server, "/users.csv", 200, USERS_CSV).await;
        serve(&server, "/callLogs.csv", 200, CALLS_CSV).await;
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&server, &dir.path().join("call_center.db"));
        {
            // an auth_users table without the columns the seeder writes
            let db = Db::open_or_create(&settings.database).unwrap();
            db.conn.execute_batch("CREATE TABLE auth_users (id INTEGER PRIMARY KEY)").unwrap();
            db.close().unwrap();
        }

        let (res, out) = run(&settings).await;
        assert!(res.is_err());
        assert!(out.contains("Loaded 2 users\nLoaded 2 call logs\n"), "{out}");
        assert!(!out.contains("Database setup completed!"), "{out}");

        let db = Db::open_or_create(&settings.database).unwrap();
        assert!(db.table_exists(AUTH_USERS).unwrap());
        assert!(!db.table_exists(USERS).unwrap());
        assert!(!db.table_exists(CALL_LOGS).unwrap());
    }
}
