use crate::prelude::*;
use doclist_core::doctor::{normalize_batch, NormalizedBatch};
use serde_json::Value;

/// Doctor feed served by the campus API mock
pub const DEFAULT_SOURCE_URL: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Where the doctor feed is fetched from
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub source_url: String,
}

impl FeedConfig {
    /// Resolve the feed configuration from the global CLI options
    pub fn from_global(global: &crate::Global) -> Self {
        Self {
            source_url: global
                .source_url
                .clone()
                .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
        }
    }
}

/// Fetch the doctor feed once and normalize it
///
/// Any network failure, non-success status or unparsable body is reported as
/// [`Error::Fetch`]; malformed entries inside a valid feed are skipped instead.
pub async fn fetch_doctors(config: &FeedConfig) -> std::result::Result<NormalizedBatch, Error> {
    let client = reqwest::Client::new();
    let response = client
        .get(&config.source_url)
        .send()
        .await
        .map_err(|e| Error::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Fetch(format!("HTTP error! status: {status}")));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| Error::Fetch(format!("Invalid JSON in doctor feed: {e}")))?;

    Ok(batch_from_body(body))
}

/// Turn a parsed feed body into a batch of doctors
///
/// The feed is expected to be a JSON array. Anything else is not an error: it
/// is logged and treated as a feed with no doctors.
pub fn batch_from_body(body: Value) -> NormalizedBatch {
    let entries = match body {
        Value::Array(entries) => entries,
        other => {
            log::warn!("Fetched data was not an array as expected: {other}");
            Vec::new()
        }
    };

    let batch = normalize_batch(entries);
    for reason in &batch.skipped {
        log::debug!("Skipping feed entry: {reason}");
    }

    batch
}
