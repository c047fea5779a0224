use crate::query::{call_log_from_row, user_analytics_from_row};
use crate::Db;
use anyhow::Result;
use std::io::Write;

impl Db {
    /// Streams every call log, ordered by `callId`, as CSV with a
    /// `callId,phoneNumber,startTime,endTime,direction,userId` header.
    pub fn write_call_logs_csv<W: Write>(&self, out: W) -> Result<usize> {
        let mut stmt = self.conn.prepare(
            "SELECT callId, phoneNumber, startTime, endTime, direction, userId FROM callLogs ORDER BY callId",
        )?;
        let mut rows = stmt.query([])?;
        // header written by hand so an empty export still carries it
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
        wtr.write_record(["callId", "phoneNumber", "startTime", "endTime", "direction", "userId"])?;
        let mut written = 0;
        while let Some(row) = rows.next()? {
            let call = call_log_from_row(row)?;
            wtr.serialize(&call)?;
            written += 1;
        }
        wtr.flush()?;
        Ok(written)
    }

    pub fn export_call_logs_csv(&self, path: &std::path::Path) -> Result<usize> {
        let file = std::fs::File::create(path)?;
        self.write_call_logs_csv(file)
    }

    /// Same shape as [`Db::user_analytics`], header `userId,avgDuration,numCalls`.
    pub fn write_user_analytics_csv<W: Write>(&self, out: W) -> Result<usize> {
        let mut stmt = self.conn.prepare(
            "SELECT userId, AVG(endTime - startTime), COUNT(*) FROM callLogs GROUP BY userId ORDER BY userId",
        )?;
        let mut rows = stmt.query([])?;
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
        wtr.write_record(["userId", "avgDuration", "numCalls"])?;
        let mut written = 0;
        while let Some(row) = rows.next()? {
            wtr.serialize(user_analytics_from_row(row)?)?;
            written += 1;
        }
        wtr.flush()?;
        Ok(written)
    }

    pub fn export_user_analytics_csv(&self, path: &std::path::Path) -> Result<usize> {
        let file = std::fs::File::create(path)?;
        self.write_user_analytics_csv(file)
    }
}
