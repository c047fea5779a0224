//! Read and account commands run against an already provisioned store.

use anyhow::{bail, Result};
use callcenter_sqlite::{Db, StoreError, AUTH_USERS, CALL_LOGS, USERS};
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat { Text, Json }

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportKind { Calls, Analytics }

/// Opens `path` and refuses stores the setup run has not created yet.
pub fn open_initialised(path: &Path) -> Result<Db> {
    let db = Db::open_or_create(path)?;
    for table in [AUTH_USERS, USERS, CALL_LOGS] {
        if !db.table_exists(table)? {
            bail!("{} has no {} table; run callcenter-setup without a subcommand first", path.display(), table);
        }
    }
    Ok(db)
}

pub fn stats(db: &Db, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let stats = db.stats()?;
    match format {
        OutputFormat::Text => {
            writeln!(out, "Total users: {}", stats.total_users)?;
            writeln!(out, "Total calls: {}", stats.total_calls)?;
            writeln!(out, "Average call duration: {:.1}s", stats.avg_call_duration)?;
            writeln!(out, "Active users: {}", stats.active_users)?;
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&stats)?)?,
    }
    Ok(())
}

pub fn analytics(db: &Db, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let rows = db.user_analytics()?;
    match format {
        OutputFormat::Text => {
            for a in &rows {
                writeln!(out, "user {}: {} calls, avg {:.1}s", a.user_id, a.num_calls, a.avg_duration)?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&rows)?)?,
    }
    Ok(())
}

pub fn calls(db: &Db, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let rows = db.call_logs()?;
    match format {
        OutputFormat::Text => {
            for c in &rows {
                writeln!(
                    out,
                    "{} {} {}..{} {} user {}",
                    c.call_id, c.phone_number, c.start_time, c.end_time, c.direction, c.user_id
                )?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&rows)?)?,
    }
    Ok(())
}

/// Returns whether the credentials matched.
pub fn login(db: &Db, email: &str, password: &str, out: &mut dyn Write) -> Result<bool> {
    match auth_seed::authenticate(db, email, password)? {
        Some(user) => {
            writeln!(out, "Login successful: {} <{}> (id {})", user.name, user.email, user.id)?;
            Ok(true)
        }
        None => {
            writeln!(out, "Invalid email or password")?;
            Ok(false)
        }
    }
}

/// Returns whether the account was created.
pub fn signup(db: &mut Db, name: &str, email: &str, password: &str, out: &mut dyn Write) -> Result<bool> {
    let batch = db.begin()?;
    match auth_seed::signup(&batch, name, email, password) {
        Ok(_) => {
            batch.commit()?;
            writeln!(out, "User created successfully")?;
            Ok(true)
        }
        Err(e) if matches!(e.downcast_ref::<StoreError>(), Some(StoreError::EmailTaken { .. })) => {
            writeln!(out, "{e}")?;
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

pub fn export(db: &Db, kind: ExportKind, path: &Path, out: &mut dyn Write) -> Result<()> {
    match kind {
        ExportKind::Calls => {
            let n = db.export_call_logs_csv(path)?;
            writeln!(out, "Exported {} call logs to {}", n, path.display())?;
        }
        ExportKind::Analytics => {
            let n = db.export_user_analytics_csv(path)?;
            writeln!(out, "Exported analytics for {} users to {}", n, path.display())?;
        }
    }
    Ok(())
}
