use anyhow::{Context, Result};
use async_trait::async_trait;
use huegrid_core::{ApiConfig, HslQuery};
use reqwest::Client;
use url::Url;

use crate::fetcher::{ColorFetcher, FetchResponse, TransportError};

/// HTTP client for the color naming service's `/id` endpoint.
#[derive(Debug, Clone)]
pub struct ColorApiClient {
    client: Client,
    endpoint: Url,
}

impl ColorApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let endpoint = format!("{}/id", config.base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint)
            .with_context(|| format!("Invalid color API base URL: {}", config.base_url))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ColorFetcher for ColorApiClient {
    async fn fetch(&self, query: HslQuery) -> Result<FetchResponse, TransportError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("hsl", query.to_string())])
            .send()
            .await
            .map_err(|e| TransportError(format!("request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("reading body failed: {}", e)))?;

        Ok(FetchResponse { status, body })
    }
}
