//! HTTP implementation of [`AspectExtractor`] backed by an ABSA inference
//! runtime.
//!
//! The runtime hosts pretrained aspect-term-extraction checkpoints. An
//! extractor is created once with `POST /v1/extractors`, after which
//! batches go to `POST /v1/extractors/{id}/predict`.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::AnalysisError;

use super::device::DeviceSelection;
use super::record::PredictionRecord;
use super::{AspectExtractor, PredictionRequest};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_CHECKPOINT: &str = "multilingual";
const ERROR_BODY_LIMIT: usize = 160;

/// Configuration for [`HttpAspectExtractor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpExtractorConfig {
    /// Base URL of the inference runtime.
    pub base_url: String,
    /// Pretrained checkpoint to load, e.g. `multilingual`.
    pub checkpoint: String,
    /// Hardware preference forwarded to the runtime.
    pub device: DeviceSelection,
    /// Optional bearer token for the runtime.
    pub api_key: Option<String>,
    /// Optional HTTP timeout. `None` waits for as long as the runtime takes.
    pub timeout: Option<Duration>,
}

impl Default for HttpExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            checkpoint: DEFAULT_CHECKPOINT.to_owned(),
            device: DeviceSelection::Auto,
            api_key: None,
            timeout: None,
        }
    }
}

impl HttpExtractorConfig {
    /// Constructs configuration for the given runtime and checkpoint.
    #[must_use]
    pub fn new(base_url: impl Into<String>, checkpoint: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            checkpoint: checkpoint.into(),
            ..Self::default()
        }
    }

    /// Sets the hardware preference.
    #[must_use]
    pub const fn with_device(mut self, device: DeviceSelection) -> Self {
        self.device = device;
        self
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Sets the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Extractor hosted by a remote inference runtime.
#[derive(Debug, Clone)]
pub struct HttpAspectExtractor {
    client: Client,
    predict_url: Url,
    api_key: Option<String>,
    device: String,
}

impl HttpAspectExtractor {
    /// Asks the runtime to construct an extractor for the configured
    /// checkpoint.
    ///
    /// This may take several seconds while the runtime loads weights.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ModelLoad`] when the base URL is invalid,
    /// the runtime is unreachable, rejects the request, or answers with an
    /// undecodable body.
    pub fn connect(config: &HttpExtractorConfig) -> Result<Self, AnalysisError> {
        let base_url = parse_base_url(config.base_url.as_str())?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| model_load(format!("failed to configure HTTP client: {error}")))?;

        let create_url = join(&base_url, "v1/extractors")?;
        let payload = CreateExtractorRequest {
            checkpoint: config.checkpoint.as_str(),
            auto_device: config.device.prefers_accelerator(),
        };
        let request = authorise(client.post(create_url).json(&payload), config.api_key.as_deref());
        let response = request
            .send()
            .map_err(|error| model_load(format!("inference runtime unreachable: {error}")))?;

        if response.status() != StatusCode::OK {
            let (status, body) = read_failure(response);
            return Err(model_load(format!(
                "checkpoint '{}' rejected with status {status}: {body}",
                config.checkpoint
            )));
        }

        let created: CreateExtractorResponse = response
            .json()
            .map_err(|error| model_load(format!("extractor response decoding failed: {error}")))?;

        let predict_url = join(
            &base_url,
            format!("v1/extractors/{}/predict", created.extractor_id).as_str(),
        )?;

        Ok(Self {
            client,
            predict_url,
            api_key: config.api_key.clone(),
            device: created.device,
        })
    }

    /// Device the runtime placed the model on, as reported at construction.
    #[must_use]
    pub fn device(&self) -> &str {
        self.device.as_str()
    }
}

impl AspectExtractor for HttpAspectExtractor {
    fn predict(&self, request: &PredictionRequest) -> Result<Vec<PredictionRecord>, AnalysisError> {
        let builder = authorise(
            self.client.post(self.predict_url.clone()).json(request),
            self.api_key.as_deref(),
        );
        let response = builder.send().map_err(|error| AnalysisError::Network {
            message: format!("prediction request failed: {error}"),
        })?;

        if response.status() != StatusCode::OK {
            let (status, message) = read_failure(response);
            return Err(AnalysisError::Api { status, message });
        }

        let records: Vec<Value> = response
            .json()
            .map_err(|error| AnalysisError::MalformedRecord {
                message: format!("prediction response is not a list of records: {error}"),
            })?;

        records
            .into_iter()
            .map(PredictionRecord::from_value)
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct CreateExtractorRequest<'a> {
    checkpoint: &'a str,
    auto_device: bool,
}

#[derive(Debug, Deserialize)]
struct CreateExtractorResponse {
    extractor_id: String,
    #[serde(default = "unknown_device")]
    device: String,
}

fn unknown_device() -> String {
    "unknown".to_owned()
}

fn parse_base_url(base_url: &str) -> Result<Url, AnalysisError> {
    // A trailing slash keeps the last path segment when joining.
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(normalised.as_str())
        .map_err(|error| model_load(format!("invalid inference runtime URL '{base_url}': {error}")))
}

fn join(base_url: &Url, path: &str) -> Result<Url, AnalysisError> {
    base_url
        .join(path)
        .map_err(|error| model_load(format!("invalid endpoint path '{path}': {error}")))
}

fn authorise(builder: RequestBuilder, api_key: Option<&str>) -> RequestBuilder {
    match api_key {
        Some(key) => builder.bearer_auth(key),
        None => builder,
    }
}

fn read_failure(response: Response) -> (u16, String) {
    let status = response.status().as_u16();
    let body = response.text().map_or_else(
        |_| "(failed to read error response body)".to_owned(),
        |content| truncate_for_message(content.as_str(), ERROR_BODY_LIMIT),
    );
    (status, body)
}

const fn model_load(message: String) -> AnalysisError {
    AnalysisError::ModelLoad { message }
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
