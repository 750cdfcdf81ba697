//! Clients for the upstream investments and companies services.

mod companies;
mod investments;

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::models::{Company, Investment};
use crate::{Error, Result};

pub use companies::CompaniesServiceClient;
pub use investments::InvestmentsServiceClient;

/// Source name reported when the investments collection cannot be fetched.
pub const INVESTMENTS_SOURCE: &str = "investments";
/// Source name reported when the companies collection cannot be fetched.
pub const COMPANIES_SOURCE: &str = "companies";

#[async_trait::async_trait]
pub trait InvestmentSource: Send + Sync {
    /// Fetch every investment record.
    async fn fetch_investments(&self) -> Result<Vec<Investment>>;

    /// Fetch a single investment without decoding it.
    ///
    /// Any upstream status is returned as-is; only transport failures error.
    async fn fetch_investment_raw(&self, id: &str) -> Result<UpstreamResponse>;
}

#[async_trait::async_trait]
pub trait CompanySource: Send + Sync {
    /// Fetch every financial company record.
    async fn fetch_companies(&self) -> Result<Vec<Company>>;
}

/// Destination for rendered reports.
#[async_trait::async_trait]
pub trait ExportSink: Send + Sync {
    async fn export(&self, csv: &str) -> Result<()>;
}

/// An upstream reply relayed without interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Build the HTTP client shared by all upstream clients.
pub fn build_http_client(request_timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(request_timeout)
        .build()
        .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))
}

fn normalize_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}

/// GET a JSON collection, mapping every failure to `SourceUnavailable`.
async fn fetch_collection<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    name: &'static str,
) -> Result<T> {
    let response = client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| Error::source_unavailable(name, e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::source_unavailable(name, format!("{status} - {body}")));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::source_unavailable(name, e))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| Error::source_unavailable(name, format!("invalid payload: {e}")))
}
