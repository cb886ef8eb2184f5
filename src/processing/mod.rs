//! Text processing: segmentation, noise filtering and cleaning.

pub mod cleaner;
pub mod filter;
pub mod segmenter;
pub mod truncate;

pub use cleaner::{CleanedBody, TextCleaner};
pub use filter::{FilterConfig, NoiseFilter};
pub use segmenter::Segmenter;
pub use truncate::{truncate_chars, truncate_to_last_sentence};
