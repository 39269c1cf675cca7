//! Library layer: the result-set paginator plus the pieces that let it
//! drive the SailPoint API.
//!
//! Wraps the `sailpoint_api` crate with transport-level retries, exposes
//! one paging adapter per resource, and validates command-line input.

pub mod client;
pub mod error;
pub mod pagination;
pub mod resources;
pub mod validation;

pub use sailpoint_api;
pub use sailpoint_api::types;
pub use sailpoint_api::{
    Configuration, Index, ListQuery, Query, Search, SearchQuery, SortDirection, Sorter,
};

pub use client::{RetryConfig, RetryingClient};
pub use error::SailPointError;
pub use pagination::{
    paginate, paginate_search, paginate_search_after, PageSource, Paginated, Pagination,
    PaginationError, SearchExecutor,
};
pub use resources::{
    ListAccessProfiles, ListAccounts, ListTransforms, ListWorkgroups, SearchApi,
};
