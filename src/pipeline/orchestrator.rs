//! Long-document summarization orchestration.
//!
//! Decides between summarizing a cleaned article in one generation call and a
//! map-reduce pass over selected paragraphs, recombines the partial
//! summaries and reduces them once more when they are still too long. Every
//! stage returns a [`Result`]; an error anywhere turns into the fallback
//! excerpt, so [`Summarizer::summarize`] never fails.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::budget::BudgetEstimator;
use super::fallback::FallbackPolicy;
use super::selector::ChunkSelector;
use crate::error::Result;
use crate::generation::{GenerationRequest, ModelHandle};
use crate::processing::{truncate_to_last_sentence, CleanedBody, TextCleaner};
use crate::types::{Document, SummarizerConfig, SummaryMode, SummaryOutcome, TokenRange};

/// Paragraph count that forces paragraph mode.
const MANY_PARAGRAPHS: usize = 10;
/// Token count that, with at least [`SOME_PARAGRAPHS`], forces paragraph mode.
const LONG_BODY_TOKENS: usize = 1000;
const SOME_PARAGRAPHS: usize = 5;

/// Intermediate text within this factor of the budget is returned as is.
const REDUCTION_SLACK: f64 = 1.2;

/// Mini-summaries kept from each end when there are more than five.
const KEEP_TAIL: usize = 3;
const KEEP_HEAD: usize = 2;
const SMALL_SET: usize = 5;

/// Pick the summarization mode for a cleaned body.
pub fn choose_mode(total_tokens: usize, paragraph_count: usize, source_ceiling: usize) -> SummaryMode {
    let paragraph_mode = total_tokens > source_ceiling
        || paragraph_count >= MANY_PARAGRAPHS
        || (total_tokens > LONG_BODY_TOKENS && paragraph_count >= SOME_PARAGRAPHS);

    if paragraph_mode {
        SummaryMode::Paragraph
    } else {
        SummaryMode::SinglePass
    }
}

/// Order mini-summaries tail-first.
///
/// Up to five: the later two thirds go before the first third. More than
/// five: the last three followed by the first two; the middle is dropped.
pub fn order_mini_summaries(minis: Vec<String>) -> Vec<String> {
    let n = minis.len();
    if n < 2 {
        return minis;
    }

    if n <= SMALL_SET {
        let head_count = (n / 3).max(1);
        let mut ordered = minis[head_count..].to_vec();
        ordered.extend_from_slice(&minis[..head_count]);
        return ordered;
    }

    let mut ordered = minis[n - KEEP_TAIL..].to_vec();
    ordered.extend_from_slice(&minis[..KEEP_HEAD]);
    ordered
}

/// The summarization pipeline.
pub struct Summarizer {
    model: Arc<ModelHandle>,
    cleaner: TextCleaner,
    budget: BudgetEstimator,
    selector: ChunkSelector,
    fallback: FallbackPolicy,
    config: SummarizerConfig,
}

impl Summarizer {
    /// Create a summarizer over a shared model handle.
    pub fn new(model: Arc<ModelHandle>, config: SummarizerConfig) -> Self {
        Self {
            model,
            cleaner: TextCleaner::with_defaults(),
            budget: BudgetEstimator::new(),
            selector: ChunkSelector::new(),
            fallback: FallbackPolicy::new(config.fallback_max_chars),
            config,
        }
    }

    /// Replace the text cleaner.
    pub fn with_cleaner(mut self, cleaner: TextCleaner) -> Self {
        self.cleaner = cleaner;
        self
    }

    /// The shared model handle.
    pub fn model(&self) -> &Arc<ModelHandle> {
        &self.model
    }

    /// The active configuration.
    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Unload the model. The next call loads it again.
    pub fn release_resources(&self) {
        self.model.release();
    }

    /// Summarize an article body. Never fails; blank bodies give "".
    pub fn summarize(&self, title: Option<&str>, body: &str) -> String {
        self.summarize_document(&Document {
            title: title.map(String::from),
            body: body.to_string(),
        })
        .text
    }

    /// Summarize a document and report how the summary was produced.
    pub fn summarize_document(&self, document: &Document) -> SummaryOutcome {
        if document.is_blank() {
            return SummaryOutcome::empty();
        }

        match self.run(document) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Summarization failed, returning fallback excerpt");
                SummaryOutcome::fallback(self.fallback_excerpt(&document.body))
            }
        }
    }

    /// Apply the cleaner's source-specific fixes to a finished summary.
    pub fn finish_for_source(&self, summary: &str, source: Option<&str>) -> String {
        self.cleaner.finish_for_source(summary, source)
    }

    /// Fallback excerpt of a raw body.
    pub fn fallback_excerpt(&self, raw_body: &str) -> String {
        self.fallback.excerpt(&self.cleaner, raw_body)
    }

    fn run(&self, document: &Document) -> Result<SummaryOutcome> {
        let cleaned = self.cleaner.clean_body(
            &document.body,
            document.title(),
            self.config.strip_source_header,
        );
        if cleaned.is_empty() {
            debug!("Cleaning removed the whole body");
            return Ok(SummaryOutcome::empty());
        }

        let total_tokens = self.model.count_tokens(&cleaned.text)?;
        let paragraph_count = cleaned.paragraph_count();
        let mode = choose_mode(total_tokens, paragraph_count, self.config.max_source_len);

        info!(
            total_tokens,
            paragraphs = paragraph_count,
            %mode,
            "Selected summarization mode"
        );

        match mode {
            SummaryMode::Paragraph => self.paragraph_mode(&cleaned),
            _ => self
                .single_pass(&cleaned)
                .map(|text| SummaryOutcome::new(text, SummaryMode::SinglePass)),
        }
    }

    fn single_pass(&self, cleaned: &CleanedBody) -> Result<String> {
        let range = self
            .budget
            .estimate(&cleaned.text, Some(cleaned.paragraph_count()));
        self.generate_clean(&cleaned.text, range, self.config.max_source_len)
    }

    fn paragraph_mode(&self, cleaned: &CleanedBody) -> Result<SummaryOutcome> {
        let paragraph_count = cleaned.paragraph_count();
        let budget = paragraph_count.min(self.config.max_paragraphs);
        let selected = self.selector.select(&cleaned.paragraphs, budget);
        let source_limit = self.config.paragraph_source_limit();

        let mut minis = Vec::with_capacity(selected.len());
        for (index, paragraph) in selected.iter().enumerate() {
            let range = self
                .budget
                .estimate_paragraph(paragraph, self.config.paragraph_max_new_tokens);
            match self.generate_clean(paragraph, range, source_limit) {
                Ok(mini) if !mini.is_empty() => minis.push(mini),
                Ok(_) => debug!(index, "Empty mini-summary skipped"),
                Err(e) => warn!(index, error = %e, "Paragraph generation failed, skipping"),
            }
        }

        debug!(
            selected = selected.len(),
            summarized = minis.len(),
            "Paragraph pass complete"
        );

        if minis.is_empty() {
            warn!("No paragraph produced a summary, summarizing whole body");
            return self
                .single_pass(cleaned)
                .map(|text| SummaryOutcome::new(text, SummaryMode::SinglePass));
        }

        let intermediate = order_mini_summaries(minis).join(" ").trim().to_string();
        let text = self.reduce(&intermediate, paragraph_count)?;
        Ok(SummaryOutcome::new(text, SummaryMode::Paragraph))
    }

    /// Return the joined mini-summaries directly when they are already
    /// summary-sized, otherwise summarize them once more.
    fn reduce(&self, intermediate: &str, paragraph_count: usize) -> Result<String> {
        if intermediate.is_empty() {
            return Ok(String::new());
        }

        let range = self.budget.estimate(intermediate, Some(paragraph_count));
        let tokens = self.model.count_tokens(intermediate)?;

        if tokens as f64 <= range.max() as f64 * REDUCTION_SLACK {
            debug!(tokens, max = range.max(), "Intermediate summary fits, no reduction");
            return Ok(truncate_to_last_sentence(intermediate));
        }

        debug!(tokens, max = range.max(), "Reducing intermediate summary");
        self.generate_clean(intermediate, range, self.config.max_source_len)
    }

    fn generate_clean(&self, input: &str, range: TokenRange, max_source_length: usize) -> Result<String> {
        let request = GenerationRequest::new(input, range, max_source_length);
        let raw = self.model.generate(&request)?;
        Ok(self.cleaner.clean_summary(&raw))
    }
}
