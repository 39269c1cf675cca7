//! Typed HTTP client for the SailPoint identity platform REST API.
//!
//! Only the list and search endpoints needed to walk result sets are
//! covered. Every call returns a single [`types::Page`]; walking a whole
//! result set is left to the paginator in `sailpoint_lib`.

mod client;
mod config;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, ApiVersion};
pub use self::config::Configuration;
pub use self::errors::Error;
pub use self::query::{
    Index, ListQuery, Query, QueryCommon, QueryText, Search, SearchQuery, SortDirection, Sorter,
};
