use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::core::config::AwesomeApiConfig;
use crate::core::quote::{QuoteError, QuoteProvider, UpstreamQuote, derived_key};

// AwesomeApiProvider implementation for QuoteProvider
pub struct AwesomeApiProvider {
    base_url: String,
    available_url: String,
    client: reqwest::Client,
}

impl AwesomeApiProvider {
    pub fn new(config: &AwesomeApiConfig) -> Result<Self, QuoteError> {
        let mut builder = reqwest::Client::builder().user_agent("quote-gateway/0.1");
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(AwesomeApiProvider {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            available_url: config.available_url.clone(),
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl QuoteProvider for AwesomeApiProvider {
    #[instrument(name = "AwesomeQuoteFetch", skip(self), fields(pair = %pair))]
    async fn fetch_quote(&self, pair: &str) -> Result<UpstreamQuote, QuoteError> {
        let url = format!("{}/{}", self.base_url, pair);
        debug!("Requesting quote from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(error = %e, "Upstream request failed");
            QuoteError::Transport(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Upstream returned an error status");
            return Err(QuoteError::UpstreamStatus(status.as_u16()));
        }

        let text = response.text().await?;
        let data: Value = serde_json::from_str(&text)?;
        let mut quotes = match data {
            Value::Object(map) => map,
            other => {
                return Err(QuoteError::UnexpectedPayload(format!(
                    "expected a JSON object, got {other}"
                )));
            }
        };

        let key = derived_key(pair);
        match quotes.remove(&key) {
            Some(quote) => Ok(quote),
            None => {
                debug!(key = %key, "Pair missing from upstream payload");
                Err(QuoteError::PairNotFound {
                    available_pairs: quotes.keys().cloned().collect(),
                })
            }
        }
    }

    async fn probe(&self) -> Result<(), QuoteError> {
        debug!("Probing upstream at {}", self.available_url);
        // Status and body are deliberately ignored; the catalog is static.
        let response = self.client.get(&self.available_url).send().await?;
        debug!(status = response.status().as_u16(), "Upstream probe answered");
        Ok(())
    }
}
