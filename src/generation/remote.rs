//! HTTP client for the model-serving endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::base::{GenerationRequest, ModelLoader, SequenceModel};
use super::tokenizer::{TiktokenCounter, TokenCounter};
use crate::error::{Result, SummarizeError};
use crate::types::{DecodingParams, SummarizerConfig};

/// Loads a [`RemoteModel`] after checking that the model server is up.
pub struct RemoteModelLoader {
    base_url: String,
    timeout: Duration,
    decoding: DecodingParams,
}

impl RemoteModelLoader {
    /// Create a loader for the server at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(120),
            decoding: DecodingParams::default(),
        }
    }

    /// Create a loader from service configuration.
    pub fn from_config(config: &SummarizerConfig) -> Self {
        Self::new(&config.model_service_url)
            .with_timeout(Duration::from_secs(config.model_timeout_secs))
            .with_decoding(config.decoding.clone())
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set decoding parameters.
    pub fn with_decoding(mut self, decoding: DecodingParams) -> Self {
        self.decoding = decoding;
        self
    }
}

impl ModelLoader for RemoteModelLoader {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn load(&self) -> Result<Box<dyn SequenceModel>> {
        let tokenizer = TiktokenCounter::new()?;

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SummarizeError::unavailable(format!("failed to create HTTP client: {}", e)))?;

        let url = format!("{}/health", self.base_url);
        let response = client
            .get(&url)
            .send()
            .map_err(|e| SummarizeError::unavailable(format!("model server unreachable: {}", e)))?;
        if !response.status().is_success() {
            return Err(SummarizeError::unavailable(format!(
                "model server not ready: {}",
                response.status()
            )));
        }

        Ok(Box::new(RemoteModel {
            client,
            base_url: self.base_url.clone(),
            tokenizer,
            decoding: self.decoding.clone(),
        }))
    }
}

/// Sequence model served over HTTP; tokens are counted locally.
pub struct RemoteModel {
    client: Client,
    base_url: String,
    tokenizer: TiktokenCounter,
    decoding: DecodingParams,
}

/// Request payload for the model server.
#[derive(Debug, Serialize)]
struct GeneratePayload<'a> {
    text: &'a str,
    min_new_tokens: usize,
    max_new_tokens: usize,
    num_beams: u32,
    length_penalty: f32,
    no_repeat_ngram_size: u32,
    repetition_penalty: f32,
    early_stopping: bool,
    do_sample: bool,
}

/// Response from the model server.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    summary: String,
}

impl SequenceModel for RemoteModel {
    fn count_tokens(&self, text: &str) -> usize {
        self.tokenizer.count_tokens(text)
    }

    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let source = self
            .tokenizer
            .truncate(&request.input, request.max_source_length);

        let payload = GeneratePayload {
            text: &source,
            min_new_tokens: request.range.min(),
            max_new_tokens: request.range.max(),
            num_beams: self.decoding.num_beams,
            length_penalty: self.decoding.length_penalty,
            no_repeat_ngram_size: self.decoding.no_repeat_ngram_size,
            repetition_penalty: self.decoding.repetition_penalty,
            early_stopping: self.decoding.early_stopping,
            do_sample: false,
        };

        debug!(
            input_chars = source.len(),
            min_new_tokens = payload.min_new_tokens,
            max_new_tokens = payload.max_new_tokens,
            "Requesting generation"
        );

        let url = format!("{}/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .map_err(|e| SummarizeError::generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            error!(%status, body = %text, "Model server returned an error");
            return Err(SummarizeError::generation(format!(
                "model server returned {}: {}",
                status, text
            )));
        }

        let result: GenerateResponse = response
            .json()
            .map_err(|e| SummarizeError::generation(format!("malformed response: {}", e)))?;
        Ok(result.summary.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_configuration() {
        let config = SummarizerConfig {
            model_service_url: "http://localhost:8008/".to_string(),
            model_timeout_secs: 30,
            ..Default::default()
        };
        let loader = RemoteModelLoader::from_config(&config);

        assert_eq!(loader.base_url, "http://localhost:8008");
        assert_eq!(loader.timeout, Duration::from_secs(30));
        assert_eq!(loader.decoding.num_beams, 5);
    }

    #[test]
    fn test_unreachable_server_is_resource_error() {
        let loader = RemoteModelLoader::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(1));
        match loader.load() {
            Err(e) => assert!(e.is_resource_error()),
            Ok(_) => panic!("expected load failure"),
        }
    }

    #[test]
    fn test_payload_shape() {
        let payload = GeneratePayload {
            text: "bài báo",
            min_new_tokens: 100,
            max_new_tokens: 250,
            num_beams: 5,
            length_penalty: 0.7,
            no_repeat_ngram_size: 3,
            repetition_penalty: 1.1,
            early_stopping: true,
            do_sample: false,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["text"], "bài báo");
        assert_eq!(json["max_new_tokens"], 250);
        assert_eq!(json["do_sample"], false);
    }
}
