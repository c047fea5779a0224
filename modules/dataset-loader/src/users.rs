use crate::Fetcher;
use anyhow::Result;
use callcenter_core::{clean_text, non_blank_data_lines, split_fields};
use callcenter_sqlite::Batch;

/// Fetches the users CSV and inserts it. Returns the number of users loaded.
pub async fn load_users(fetcher: &Fetcher, batch: &Batch<'_>, url: &str) -> Result<usize> {
    let text = fetcher.fetch_text(url).await?;
    insert_users(batch, &text)
}

/// Inserts `firstName,lastName` rows with ids 1, 2, ... in file order.
/// Lines with fewer than two fields or an empty name are skipped and do not
/// consume an id.
pub fn insert_users(batch: &Batch<'_>, text: &str) -> Result<usize> {
    let mut next_id = 1i64;
    let mut skipped = 0usize;
    for line in non_blank_data_lines(text) {
        let Ok(parts) = split_fields(line, 2) else {
            skipped += 1;
            continue;
        };
        let first_name = clean_text(parts[0]);
        let last_name = clean_text(parts[1]);
        if first_name.is_empty() || last_name.is_empty() {
            skipped += 1;
            continue;
        }
        batch.upsert_user(next_id, first_name, last_name)?;
        next_id += 1;
    }
    let loaded = (next_id - 1) as usize;
    tracing::debug!(loaded, skipped, "users processed");
    Ok(loaded)
}
