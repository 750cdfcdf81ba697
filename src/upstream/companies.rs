use reqwest::Client;

use super::{fetch_collection, normalize_base_url, CompanySource, COMPANIES_SOURCE};
use crate::models::Company;
use crate::Result;

/// Client for the financial companies service.
#[derive(Debug, Clone)]
pub struct CompaniesServiceClient {
    client: Client,
    base_url: String,
}

impl CompaniesServiceClient {
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
}

#[async_trait::async_trait]
impl CompanySource for CompaniesServiceClient {
    async fn fetch_companies(&self) -> Result<Vec<Company>> {
        let url = format!("{}/companies", self.base_url);
        fetch_collection(&self.client, &url, COMPANIES_SOURCE).await
    }
}
