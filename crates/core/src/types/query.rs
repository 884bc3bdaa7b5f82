//! Catalog query, sort and paging types.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SizeLabel;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{other}' (expected asc or desc)")),
        }
    }
}

/// Product fields the catalog can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortProperty {
    #[default]
    Price,
    Title,
    Sku,
    Installments,
}

/// One sort criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub property: SortProperty,
    pub order: SortOrder,
}

impl Sort {
    #[must_use]
    pub const fn new(property: SortProperty, order: SortOrder) -> Self {
        Self { property, order }
    }

    /// Sort by price in the given direction.
    #[must_use]
    pub const fn price(order: SortOrder) -> Self {
        Self::new(SortProperty::Price, order)
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::price(SortOrder::Desc)
    }
}

/// Paging and ordering for a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number; `None` returns everything from the start.
    pub page: Option<u32>,
    /// Page size; `None` means unlimited.
    pub limit: Option<u32>,
    /// Applied in order, so the last criterion decides the final ordering.
    #[serde(default)]
    pub sort: Vec<Sort>,
}

/// Product filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Match products offering any of these sizes. Empty matches everything.
    #[serde(default)]
    pub sizes: Vec<SizeLabel>,
}
