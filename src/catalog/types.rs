//! Catalog Data Types
//!
//! The catalog item as stored in the index engine, plus the DTOs returned by the
//! administrative endpoints.

use serde::{Deserialize, Serialize};

/// A single catalog item.
///
/// Owned by the index engine. The gateway only reads items out of query
/// results (and forwards new ones on ingestion); it never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    /// One of an open set of categories. Aggregated as an exact keyword.
    ///
    /// Defaults to empty when reading documents indexed without one; new items
    /// must carry a category (see [`Item::validate`]).
    #[serde(default)]
    pub category: String,
    pub price: f64,
}

impl Item {
    /// Checks the invariants an item must hold before it is sent to the engine.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("item id must not be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("item name must not be empty".to_string());
        }
        if self.category.trim().is_empty() {
            return Err("item category must not be empty".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("item price must be >= 0, got {}", self.price));
        }
        Ok(())
    }
}

/// Response of `POST /seed`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub indexed: usize,
}
