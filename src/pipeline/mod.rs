//! Summarization pipeline: budgeting, chunk selection, orchestration and
//! the fallback excerpt.

mod budget;
mod fallback;
mod orchestrator;
mod selector;

pub use budget::BudgetEstimator;
pub use fallback::FallbackPolicy;
pub use orchestrator::{choose_mode, order_mini_summaries, Summarizer};
pub use selector::ChunkSelector;
