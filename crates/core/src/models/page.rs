//! Response envelopes.
//!
//! Collection endpoints answer either with a bare JSON array or with a
//! paginated resource envelope (`data` + `meta` + `links`). Single-resource
//! endpoints answer either with the bare object or with `{ "data": ... }`.
//! [`Listing`] and [`Item`] accept every shape.

use serde::{Deserialize, Serialize};

/// Paginated collection envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PageMeta,
    #[serde(default)]
    pub links: PageLinks,
}

/// Pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub total: u64,
    pub per_page: u64,
    /// Index of the first item on this page (absent on empty pages).
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub current_page: u64,
    pub last_page: u64,
    pub path: String,
    pub links: Vec<PageLink>,
}

/// One entry of the pager rendered by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

/// First/last/next/previous page URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLinks {
    pub first: Option<String>,
    pub last: Option<String>,
    pub next: Option<String>,
    pub prev: Option<String>,
}

impl<T> Paginated<T> {
    /// Whether the server has more pages after this one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.meta.current_page < self.meta.last_page
    }
}

/// A collection response in any of the shapes the API emits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Paged(Paginated<T>),
}

impl<T> Listing<T> {
    /// The items, whatever the envelope.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) => items,
            Self::Paged(page) => page.data,
        }
    }
}

/// A single-resource response, bare or wrapped in `data`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Item<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Item<T> {
    /// The resource, whatever the envelope.
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Service;

    fn service_json(id: i64) -> serde_json::Value {
        serde_json::json!({ "id": id, "name": format!("Service {id}"), "price": 10 })
    }

    #[test]
    fn test_listing_accepts_bare_array() {
        let listing: Listing<Service> =
            serde_json::from_value(serde_json::json!([service_json(1), service_json(2)])).unwrap();
        assert_eq!(listing.into_items().len(), 2);
    }

    #[test]
    fn test_listing_accepts_paginated_envelope() {
        let listing: Listing<Service> = serde_json::from_value(serde_json::json!({
            "data": [service_json(1)],
            "meta": {
                "total": 3, "per_page": 1, "from": 1, "to": 1,
                "current_page": 1, "last_page": 3, "path": "/api/services",
                "links": [{ "url": null, "label": "&laquo; Previous", "active": false }]
            },
            "links": { "first": "/api/services?page=1", "last": "/api/services?page=3",
                       "next": "/api/services?page=2", "prev": null }
        }))
        .unwrap();

        let Listing::Paged(page) = listing else {
            panic!("expected a paginated listing");
        };
        assert!(page.has_more());
        assert_eq!(page.links.prev, None);
        assert_eq!(page.data.len(), 1);
    }

    #[test]
    fn test_listing_accepts_data_without_meta() {
        let listing: Listing<Service> =
            serde_json::from_value(serde_json::json!({ "data": [service_json(5)] })).unwrap();
        assert_eq!(listing.into_items()[0].name, "Service 5");
    }

    #[test]
    fn test_item_accepts_both_shapes() {
        let bare: Item<Service> = serde_json::from_value(service_json(1)).unwrap();
        let wrapped: Item<Service> =
            serde_json::from_value(serde_json::json!({ "data": service_json(1) })).unwrap();
        assert_eq!(bare.into_inner(), wrapped.into_inner());
    }
}
