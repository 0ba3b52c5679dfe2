//! Read-only client for the CMS query API.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ContentQuery, ContentRecord};
use crate::config::SanityConfig;
use crate::error::FetchError;

/// Anything that can answer a [`ContentQuery`].
///
/// Implemented by [`SanityClient`] for production and by in-memory doubles
/// in tests.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run `query` and return validated records in remote order.
    async fn fetch(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>, FetchError>;
}

#[derive(Deserialize)]
struct QueryResponse {
    result: Vec<serde_json::Value>,
}

/// HTTP client for `GET /v{version}/data/query/{dataset}`.
#[derive(Clone, Debug)]
pub struct SanityClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SanityClient {
    /// Build a client from site configuration.
    pub fn new(config: &SanityConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http(http, config))
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, config: &SanityConfig) -> Self {
        let endpoint = format!(
            "{}/v{}/data/query/{}",
            config.query_host(),
            config.api_version,
            config.dataset
        );
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn fetch(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>, FetchError> {
        let groq = query.to_groq();
        debug!(kind = %query.kind, featured = query.featured_only, "querying content");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("query", groq.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: QueryResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        let records = parsed
            .result
            .into_iter()
            .filter_map(|document| match ContentRecord::from_document(query.kind, document) {
                Ok(record) => Some(record),
                Err(reason) => {
                    warn!(kind = %query.kind, %reason, "skipping invalid document");
                    None
                }
            })
            .collect::<Vec<_>>();

        debug!(kind = %query.kind, count = records.len(), "content query finished");
        Ok(records)
    }
}
