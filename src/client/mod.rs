//! Typed, throttled access to the catalog service HTTP API.

mod catalog;
mod endpoint;
mod models;
mod transport;

pub use catalog::CatalogClient;
pub use endpoint::Endpoint;
pub use models::{Category, Item, Listing, Offer, Rarity};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
