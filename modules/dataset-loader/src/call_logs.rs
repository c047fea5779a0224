use crate::Fetcher;
use anyhow::Result;
use callcenter_core::{clean_text, non_blank_data_lines, parse_int, split_fields, FieldError};
use callcenter_sqlite::{Batch, NewCallLog};

/// Fetches the call-log CSV and inserts it. Returns the number of rows loaded.
pub async fn load_call_logs(fetcher: &Fetcher, batch: &Batch<'_>, url: &str) -> Result<usize> {
    let text = fetcher.fetch_text(url).await?;
    insert_call_logs(batch, &text)
}

/// `phoneNumber,startTime,endTime,direction,userId`; extra fields are ignored.
pub fn parse_call_log(line: &str) -> Result<NewCallLog, FieldError> {
    let parts = split_fields(line, 5)?;
    Ok(NewCallLog {
        phone_number: clean_text(parts[0]).to_string(),
        start_time: parse_int(parts[1])?,
        end_time: parse_int(parts[2])?,
        direction: clean_text(parts[3]).to_string(),
        user_id: parse_int(parts[4])?,
    })
}

/// Unparseable or invalid lines are dropped silently; only the total is
/// reported.
pub fn insert_call_logs(batch: &Batch<'_>, text: &str) -> Result<usize> {
    let mut loaded = 0usize;
    let mut skipped = 0usize;
    for line in non_blank_data_lines(text) {
        match parse_call_log(line) {
            Ok(call) if call.is_valid() => {
                batch.add_call_log(&call)?;
                loaded += 1;
            }
            _ => skipped += 1,
        }
    }
    tracing::debug!(loaded, skipped, "call logs processed");
    Ok(loaded)
}
