//! Log ingestion.
//!
//! A forester log is read once, line by line:
//!
//! raw line
//! strip_ansi / extract_timestamp
//! classify (marker priority)
//! extract_* (kind-specific fields)
//! EventStore::record
//!
//! Nothing downstream mutates the store.

mod classify;
pub mod constants;
mod extract;
mod store;
mod types;

#[cfg(test)]
mod tests;

pub use classify::{LineKind, classify, line_kind};
pub use extract::{extract_timestamp, parse_kv, strip_ansi};
pub use store::{EventStore, load_log};
pub use types::*;
