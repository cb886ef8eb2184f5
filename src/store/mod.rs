//! Summary persistence.

mod memory;

pub use memory::{SummaryRecord, SummaryStore};
