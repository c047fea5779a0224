use crate::schema::create_tables;
use anyhow::Result;
use rusqlite::{Connection, Transaction};

pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn open_or_create(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        apply_pragmas(&conn)?;
        Ok(Db { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_pragmas(&conn)?;
        Ok(Db { conn })
    }

    pub fn init_schema(&self) -> Result<()> {
        create_tables(&self.conn)
    }

    /// Starts the run-wide transaction. Dropping the batch without calling
    /// [`Batch::commit`] rolls everything back.
    pub fn begin(&mut self) -> Result<Batch<'_>> {
        Ok(Batch { tx: self.conn.transaction()? })
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}

pub struct Batch<'a> {
    tx: Transaction<'a>,
}

impl Batch<'_> {
    pub fn init_schema(&self) -> Result<()> {
        create_tables(&self.tx)
    }

    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.tx
    }
}

fn apply_pragmas(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "synchronous", &"NORMAL")?;
    // callLogs.userId may point at users that were never loaded
    conn.pragma_update(None, "foreign_keys", &"OFF")?;
    Ok(())
}
