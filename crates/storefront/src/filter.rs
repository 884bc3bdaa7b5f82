//! Catalog filter selection.
//!
//! The shopper's chosen sizes and sort order outlive a single listing, so
//! they are persisted next to the cart.

use groovy_core::{PageRequest, ProductQuery, SizeLabel, Sort, SortOrder};
use serde::{Deserialize, Serialize};

/// Current size filter and sort selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub sizes: Vec<SizeLabel>,
    #[serde(default = "default_sort")]
    pub sort: Vec<Sort>,
}

fn default_sort() -> Vec<Sort> {
    vec![Sort::default()]
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            sizes: Vec::new(),
            sort: default_sort(),
        }
    }
}

impl FilterState {
    /// Replace the size selection. Duplicates are dropped, first occurrence kept.
    pub fn change_sizes(&mut self, sizes: Vec<SizeLabel>) {
        let mut unique: Vec<SizeLabel> = Vec::with_capacity(sizes.len());
        for size in sizes {
            if !unique.contains(&size) {
                unique.push(size);
            }
        }
        self.sizes = unique;
    }

    /// Replace the sort criteria.
    pub fn change_sort(&mut self, sort: Vec<Sort>) {
        self.sort = sort;
    }

    /// Direction of the leading price sort, as shown by the price toggle.
    #[must_use]
    pub fn price_order(&self) -> SortOrder {
        self.sort.first().map_or(SortOrder::Desc, |s| s.order)
    }

    /// The catalog query and page request for this selection.
    #[must_use]
    pub fn to_query(&self) -> (ProductQuery, PageRequest) {
        (
            ProductQuery {
                sizes: self.sizes.clone(),
            },
            PageRequest {
                sort: self.sort.clone(),
                ..PageRequest::default()
            },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use groovy_core::SortProperty;

    use super::*;

    fn size(s: &str) -> SizeLabel {
        SizeLabel::parse(s).unwrap()
    }

    #[test]
    fn test_default_sorts_price_desc() {
        let filter = FilterState::default();
        assert!(filter.sizes.is_empty());
        assert_eq!(filter.sort, vec![Sort::new(SortProperty::Price, SortOrder::Desc)]);
        assert_eq!(filter.price_order(), SortOrder::Desc);
    }

    #[test]
    fn test_change_sizes_dedups() {
        let mut filter = FilterState::default();
        filter.change_sizes(vec![size("M"), size("xl"), size("m")]);
        assert_eq!(filter.sizes, vec![size("M"), size("XL")]);
    }

    #[test]
    fn test_to_query() {
        let mut filter = FilterState::default();
        filter.change_sizes(vec![size("S")]);
        filter.change_sort(vec![Sort::price(SortOrder::Asc)]);
        let (query, page) = filter.to_query();
        assert_eq!(query.sizes, vec![size("S")]);
        assert_eq!(page.sort, vec![Sort::price(SortOrder::Asc)]);
        assert!(page.limit.is_none());
    }

    #[test]
    fn test_missing_sort_deserializes_to_default() {
        let filter: FilterState = serde_json::from_str(r#"{"sizes":["M"]}"#).unwrap();
        assert_eq!(filter.sort, vec![Sort::default()]);
    }
}
