//! Open Brewery DB HTTP client.
//!
//! [`DirectoryService`] is the seam between the view model and the network:
//! the session only ever talks to the trait, and [`BreweryApi`] is the
//! reqwest-backed implementation used by the CLI. Tests swap in stubs.
//!
//! # Examples
//!
//! ```no_run
//! use taproom::{BreweryApi, Config, DirectoryService, FilterCriteria, RequestDescriptor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = BreweryApi::new(&Config::default())?;
//!     let criteria = FilterCriteria::default().with_state("Colorado");
//!     let page = api.fetch_page(&RequestDescriptor::page(&criteria, 1, 50)).await?;
//!     println!("{} breweries on page 1", page.len());
//!     Ok(())
//! }
//! ```

use crate::config::Config;
use crate::error::{Result, TaproomError};
use crate::model::{Brewery, Metadata};
use crate::query::RequestDescriptor;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

/// Fetch collaborator for the directory endpoints.
pub trait DirectoryService {
    /// One page from the browse or search endpoint.
    fn fetch_page(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = Result<Vec<Brewery>>> + Send;

    /// Total-count metadata.
    fn fetch_metadata(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = Result<Metadata>> + Send;

    fn fetch_random(&self) -> impl Future<Output = Result<Brewery>> + Send;

    fn fetch_detail(&self, id: &str) -> impl Future<Output = Result<Brewery>> + Send;
}

/// HTTP client for the Open Brewery DB API.
#[derive(Clone)]
pub struct BreweryApi {
    client: reqwest::Client,
    base_url: String,
}

impl BreweryApi {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(format!("taproom/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, request: &RequestDescriptor) -> Result<T> {
        let url = request.to_url(&self.base_url);
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND
            && let crate::query::Endpoint::Detail(id) = &request.endpoint
        {
            return Err(TaproomError::NotFound(id.clone()));
        }

        if !status.is_success() {
            return Err(TaproomError::HttpStatus { status, url });
        }

        // Shape mismatches are MalformedResponse, not Network.
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for BreweryApi {
    fn default() -> Self {
        Self::new(&Config::default()).expect("Failed to create API client")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Brewery>),
    One(Box<Brewery>),
}

impl DirectoryService for BreweryApi {
    async fn fetch_page(&self, request: &RequestDescriptor) -> Result<Vec<Brewery>> {
        self.get_json(request).await
    }

    async fn fetch_metadata(&self, request: &RequestDescriptor) -> Result<Metadata> {
        self.get_json(request).await
    }

    async fn fetch_random(&self) -> Result<Brewery> {
        let payload: OneOrMany = self.get_json(&RequestDescriptor::random()).await?;
        match payload {
            OneOrMany::One(brewery) => Ok(*brewery),
            OneOrMany::Many(breweries) => breweries
                .into_iter()
                .next()
                .ok_or_else(|| TaproomError::NotFound("random brewery".to_string())),
        }
    }

    async fn fetch_detail(&self, id: &str) -> Result<Brewery> {
        self.get_json(&RequestDescriptor::detail(id)).await
    }
}
