//! Endpoint URL assembly for the catalog service.

use reqwest::Url;

use crate::error::{ClientError, Result};

/// Builds URLs for the catalog service endpoints.
#[derive(Debug, Clone)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    /// Create an endpoint builder for the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL {}: {}", base_url, e)))?;
        Ok(Self { base })
    }

    /// URL for the full item id listing.
    pub fn items(&self) -> String {
        self.with_path("v1/items").to_string()
    }

    /// URL for a single item.
    pub fn item(&self, id: u64) -> String {
        self.with_path(&format!("v1/items/{}", id)).to_string()
    }

    /// URL for a batch of items.
    pub fn items_by_ids(&self, ids: &[u64]) -> String {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        // Ids are digits and commas, safe to pass through unencoded.
        let mut url = self.with_path("v1/items");
        url.set_query(Some(&format!("ids={}", joined)));
        url.to_string()
    }

    /// URL for the category tree.
    pub fn categories(&self) -> String {
        self.with_path("v1/categories").to_string()
    }

    /// URL for an item's market listing.
    pub fn listing(&self, item_id: u64) -> String {
        self.with_path(&format!("v1/listings/{}", item_id)).to_string()
    }

    /// URL for a name search. The query value is percent-encoded.
    pub fn search(&self, query: &str) -> String {
        let mut url = self.with_path("v1/items/search");
        url.query_pairs_mut().append_pair("q", query);
        url.to_string()
    }

    fn with_path(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Endpoint {
        Endpoint::new("https://api.example.com").unwrap()
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = Endpoint::new("not a url");
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_item_paths() {
        let endpoint = endpoint();
        assert_eq!(endpoint.items(), "https://api.example.com/v1/items");
        assert_eq!(endpoint.item(68), "https://api.example.com/v1/items/68");
        assert_eq!(endpoint.listing(68), "https://api.example.com/v1/listings/68");
    }

    #[test]
    fn test_batch_ids_are_comma_joined() {
        let endpoint = endpoint();
        assert_eq!(
            endpoint.items_by_ids(&[1, 2, 3]),
            "https://api.example.com/v1/items?ids=1,2,3"
        );
    }

    #[test]
    fn test_search_query_is_encoded() {
        let endpoint = endpoint();
        assert_eq!(
            endpoint.search("iron sword"),
            "https://api.example.com/v1/items/search?q=iron+sword"
        );
    }
}
