//! Fetches the two demo CSV datasets and loads them into the store.

mod call_logs;
mod fetch;
mod users;

pub use call_logs::{insert_call_logs, load_call_logs, parse_call_log};
pub use fetch::{FetchOptions, Fetcher, LoadError};
pub use users::{insert_users, load_users};

pub const USERS_URL: &str =
    "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/users-JzbqUPjpdEri0Xf1nF4unX2MDlq3kH.csv";
pub const CALL_LOGS_URL: &str =
    "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/callLogs-Du11Imbq2ytLhOEvJil8SIbFEFrk2Y.csv";
