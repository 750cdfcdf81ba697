use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;

use super::{
    fetch_collection, normalize_base_url, ExportSink, InvestmentSource, UpstreamResponse,
    INVESTMENTS_SOURCE,
};
use crate::models::Investment;
use crate::{Error, Result};

/// JSON envelope accepted by the export endpoint.
#[derive(Debug, Serialize)]
struct ExportRequest<'a> {
    csv: &'a str,
}

/// Client for the investments service, including its export endpoint.
#[derive(Debug, Clone)]
pub struct InvestmentsServiceClient {
    client: Client,
    base_url: String,
}

impl InvestmentsServiceClient {
    /// Creates a client for the service at `base_url` with a default HTTP client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url),
        }
    }

    /// Replaces the HTTP client, e.g. one built with a request timeout.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn investment_url(&self, id: &str) -> String {
        format!("{}/investments/{}", self.base_url, urlencoding::encode(id))
    }
}

#[async_trait::async_trait]
impl InvestmentSource for InvestmentsServiceClient {
    async fn fetch_investments(&self) -> Result<Vec<Investment>> {
        let url = format!("{}/investments", self.base_url);
        fetch_collection(&self.client, &url, INVESTMENTS_SOURCE).await
    }

    async fn fetch_investment_raw(&self, id: &str) -> Result<UpstreamResponse> {
        let response = self
            .client
            .get(self.investment_url(id))
            .send()
            .await
            .map_err(|e| Error::ProxyUpstreamFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::ProxyUpstreamFailed(e.to_string()))?
            .to_vec();

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}

#[async_trait::async_trait]
impl ExportSink for InvestmentsServiceClient {
    async fn export(&self, csv: &str) -> Result<()> {
        let url = format!("{}/investments/export", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ExportRequest { csv })
            .send()
            .await
            .map_err(|e| Error::ExportForwardingFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ExportForwardingFailed(format!("{status} - {body}")));
        }

        Ok(())
    }
}
