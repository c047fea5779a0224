//! Core utilities and shared types for the call-center setup pipeline.

mod fields;

pub use fields::{clean_text, non_blank_data_lines, parse_int, split_fields, FieldError};

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
