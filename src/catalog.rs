//! Catalog product record as served by the document store.
//!
//! Only the fields the designer reads are modeled; unknown fields in the
//! stored document are ignored on deserialization.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DIMENSION, DEFAULT_DIMENSION_SKU};
use crate::scene::Dimensions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub model_3d_url: Option<String>,
    #[serde(default)]
    pub dim_width: Option<f64>,
    #[serde(default)]
    pub dim_height: Option<f64>,
    #[serde(default)]
    pub dim_depth: Option<f64>,
    #[serde(default)]
    pub dim_sku: Option<String>,
    #[serde(default)]
    pub variation_texture_urls: Vec<String>,
}

impl Product {
    /// The 3D model reference, if the product has a usable one.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model_3d_url.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }

    /// Dimensions with blanks filled by [`DEFAULT_DIMENSION`].
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.dim_width.unwrap_or(DEFAULT_DIMENSION),
            height: self.dim_height.unwrap_or(DEFAULT_DIMENSION),
            depth: self.dim_depth.unwrap_or(DEFAULT_DIMENSION),
        }
    }

    /// Unit label for [`Self::dimensions`], defaulting to meters.
    #[must_use]
    pub fn dimension_sku(&self) -> &str {
        self.dim_sku.as_deref().unwrap_or(DEFAULT_DIMENSION_SKU)
    }

    /// First variation texture, used as the initial surface of a placement.
    #[must_use]
    pub fn default_texture(&self) -> Option<&str> {
        self.variation_texture_urls.first().map(String::as_str)
    }
}
