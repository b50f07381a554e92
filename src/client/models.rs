//! Typed records returned by the catalog service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Item rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Fine,
    Rare,
    Exotic,
    Legendary,
}

/// A single catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique item identifier
    pub id: u64,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Category this item belongs to
    pub category_id: u64,
    pub rarity: Rarity,
    /// Minimum level required to use the item
    #[serde(default)]
    pub level: u32,
    /// Value when sold to a vendor, in copper
    #[serde(default)]
    pub vendor_value: u64,
    #[serde(default)]
    pub icon: Option<String>,
    /// Last time the record was updated
    pub updated_at: DateTime<Utc>,
}

/// A node in the category tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    /// Parent category, absent for roots
    #[serde(default)]
    pub parent_id: Option<u64>,
}

/// Current buy and sell offers for an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Item these offers are for
    pub item_id: u64,
    /// Standing buy offers, best first
    #[serde(default)]
    pub buys: Vec<Offer>,
    /// Standing sell offers, best first
    #[serde(default)]
    pub sells: Vec<Offer>,
}

/// One price level in a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Number of items offered at this price
    pub quantity: u32,
    /// Price per item, in copper
    pub unit_price: u64,
}
