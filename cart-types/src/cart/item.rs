//! Line item types
//!
//! `SourceItem` is the item exactly as the catalog hands it over, price
//! still a currency-formatted string. `CartItem` is the normalized line
//! the cart stores: price parsed once at the boundary, quantities merged
//! per (location, item) pair. The source item is retained inside the line
//! so merge resolution can reconstruct it under a different location.

use crate::util::now_millis;
use serde::{Deserialize, Serialize};

/// Venue category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationKind {
    #[default]
    Restaurant,
    Grocery,
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationKind::Restaurant => write!(f, "RESTAURANT"),
            LocationKind::Grocery => write!(f, "GROCERY"),
        }
    }
}

/// Location reference - the venue a candidate item is sold from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationRef {
    /// Location ID
    pub id: String,
    /// Display name snapshot
    pub name: String,
    /// Venue category
    pub kind: LocationKind,
}

impl LocationRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: LocationKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

/// Source item - raw catalog input, price still currency-formatted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceItem {
    /// Catalog item ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Currency-formatted price string (e.g. "$12.99")
    pub price: String,
    /// Item description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Dietary tags (e.g. "vegan", "gluten-free")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_tags: Vec<String>,
}

impl SourceItem {
    /// Minimal constructor for the common case (no description/image/tags)
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            description: None,
            image_url: None,
            dietary_tags: Vec::new(),
        }
    }
}

/// Derive the synthetic line ID for a (location, item) pair
///
/// The line ID is the cart-wide uniqueness key: repeat adds of the same
/// pair merge quantities into the existing line instead of appending.
pub fn line_id(location_id: &str, item_id: &str) -> String {
    format!("{}-{}", location_id, item_id)
}

/// Cart line item - one merged quantity of an item at a specific location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Synthetic ID, `"{location_id}-{item_id}"`, unique within the cart
    pub line_id: String,
    /// Display name snapshot
    pub name: String,
    /// Normalized unit price, parsed once at the boundary
    pub unit_price: f64,
    /// Quantity, always >= 1 while the line exists
    pub quantity: i32,
    /// Location ID
    pub location_id: String,
    /// Location name snapshot
    pub location_name: String,
    /// Venue category
    pub location_kind: LocationKind,
    /// Item description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Dietary tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_tags: Vec<String>,
    /// Original catalog item, retained for re-homing during merge
    pub source: SourceItem,
    /// Creation timestamp (Unix milliseconds)
    pub added_at: i64,
}

impl CartItem {
    /// Build a quantity-1 line from a validated source item
    ///
    /// `unit_price` must already be normalized; this constructor never
    /// parses the source's price string.
    pub fn from_source(source: SourceItem, location: &LocationRef, unit_price: f64) -> Self {
        Self {
            line_id: line_id(&location.id, &source.id),
            name: source.name.clone(),
            unit_price,
            quantity: 1,
            location_id: location.id.clone(),
            location_name: location.name.clone(),
            location_kind: location.kind,
            description: source.description.clone(),
            image_url: source.image_url.clone(),
            dietary_tags: source.dietary_tags.clone(),
            source,
            added_at: now_millis(),
        }
    }
}
