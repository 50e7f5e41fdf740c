use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{ResultRecord, SearchQuery},
    error::TransportError,
    protocol::{failure_from_body, parse_results_body},
};
use url::Url;

use crate::config::{ClientSettings, SettingsError};

/// Performs one search round trip. Implementations report every failure as a
/// [`TransportError`]; cancellation is handled by the coordinator, not here.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ResultRecord>, TransportError>;
}

pub struct HttpSearchTransport {
    http: Client,
    endpoint: Url,
}

impl HttpSearchTransport {
    pub fn new(settings: &ClientSettings) -> Result<Self, SettingsError> {
        Ok(Self::with_client(Client::new(), settings.search_endpoint()?))
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SearchTransport for HttpSearchTransport {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ResultRecord>, TransportError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&query.query_pairs())
            .send()
            .await
            .map_err(|err| {
                TransportError::Unparseable(format!("failed to reach search endpoint: {err}"))
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            TransportError::Unparseable(format!("failed to read search response: {err}"))
        })?;

        if status.is_success() {
            parse_results_body(&body)
        } else {
            Err(failure_from_body(status.as_u16(), &body))
        }
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
