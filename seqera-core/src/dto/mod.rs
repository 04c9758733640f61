//! Data Transfer Objects for the Platform API
//!
//! Request bodies and response envelopes, shaped exactly as the server sends
//! and expects them. Domain entities live in [`crate::domain`]; the types here
//! wrap them (`{"pipelines": [...], "totalSize": 3}`) or describe writes.

pub mod action;
pub mod compute_env;
pub mod credentials;
pub mod data_link;
pub mod dataset;
pub mod label;
pub mod organization;
pub mod pipeline;
pub mod secret;
pub mod team;
pub mod user;
pub mod workflow;
pub mod workspace;

use serde::{Deserialize, Serialize};

/// Paging parameters accepted by list endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub max: Option<u32>,
    pub offset: Option<u32>,
}

impl Page {
    pub fn new(max: u32, offset: u32) -> Self {
        Self {
            max: Some(max),
            offset: Some(offset),
        }
    }

    /// Query parameters for this page; unset values are omitted
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(max) = self.max {
            pairs.push(("max", max.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

/// A page of results together with the server-side total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total_size: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_has_no_query() {
        assert!(Page::default().query_pairs().is_empty());
    }

    #[test]
    fn test_page_query_pairs() {
        let pairs = Page::new(50, 100).query_pairs();
        assert_eq!(
            pairs,
            vec![("max", "50".to_string()), ("offset", "100".to_string())]
        );
    }
}
