//! The catalog client: throttled, typed access to the catalog service.

use std::sync::Arc;

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::throttle::Throttle;

use super::endpoint::Endpoint;
use super::models::{Category, Item, Listing};
use super::transport::{HttpTransport, ReqwestTransport};

/// Asynchronous client for the catalog service.
///
/// Every request passes through one shared [`Throttle`] before it reaches
/// the transport, so concurrent callers collectively respect the service's
/// rate limits.
pub struct CatalogClient {
    endpoint: Endpoint,
    throttle: Throttle,
    transport: Arc<dyn HttpTransport>,
}

impl CatalogClient {
    /// Create a client backed by the reqwest transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.api)?);
        Self::with_transport(config, transport)
    }

    /// Create a client with a custom transport implementation.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        let endpoint = Endpoint::new(&config.api.base_url)?;
        let throttle = Throttle::new(config.rate_limiting.window_configs()?);

        debug!(
            base_url = %config.api.base_url,
            windows = throttle.window_count(),
            "Catalog client initialized"
        );

        Ok(Self {
            endpoint,
            throttle,
            transport,
        })
    }

    /// Fetch the full list of item ids.
    pub async fn item_ids(&self) -> Result<Vec<u64>> {
        self.fetch(&self.endpoint.items()).await
    }

    /// Fetch a single item.
    pub async fn item(&self, id: u64) -> Result<Item> {
        self.fetch(&self.endpoint.item(id)).await
    }

    /// Fetch a batch of items in one call.
    pub async fn items(&self, ids: &[u64]) -> Result<Vec<Item>> {
        self.fetch(&self.endpoint.items_by_ids(ids)).await
    }

    /// Fetch the category tree.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.fetch(&self.endpoint.categories()).await
    }

    /// Fetch the current listing for an item.
    pub async fn listing(&self, item_id: u64) -> Result<Listing> {
        self.fetch(&self.endpoint.listing(item_id)).await
    }

    /// Fetch listings for several items.
    ///
    /// The service has no batch listing endpoint, so requests are issued
    /// concurrently and the shared throttle paces them against the
    /// configured limits.
    pub async fn listings(&self, item_ids: &[u64]) -> Result<Vec<Listing>> {
        try_join_all(item_ids.iter().map(|&id| self.listing(id))).await
    }

    /// Search items by name.
    pub async fn search_items(&self, query: &str) -> Result<Vec<Item>> {
        self.fetch(&self.endpoint.search(query)).await
    }

    /// Dispatch one throttled GET and decode the JSON body.
    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.throttle.acquire().await;

        debug!(url = %url, "Fetching catalog resource");
        let response = self.transport.get(url).await?;

        if !response.is_success() {
            return Err(ClientError::Status {
                status: response.status,
                url: url.to_string(),
            });
        }

        Ok(serde_json::from_slice(&response.body)?)
    }
}
