//! Storage layer: disk I/O and page management.
//!
//! This module owns the single `Pager` type: a demand-paged, fixed-size
//! cache over the database file with write-on-close durability.

mod pager;

pub use pager::{Pager, MAX_PAGES};
