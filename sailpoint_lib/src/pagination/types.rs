use std::future::Future;

use sailpoint_api::types::{Page, SearchDocument};
use sailpoint_api::Search;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: i64 = 250;

/// Cap applied by [`Pagination::bounded`].
pub const DEFAULT_MAX_ITEMS: i64 = 10_000;

/// Largest `limit` the search endpoint accepts.
pub const SEARCH_MAX_PAGE_SIZE: u64 = 250;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by a paginate call.
#[derive(thiserror::Error, Debug)]
pub enum PaginationError {
    /// A single page request failed. Nothing gathered so far is returned.
    #[error("failed to fetch page at offset {offset} (limit {limit})")]
    PageFetch {
        offset: u64,
        limit: u64,
        #[source]
        source: BoxError,
    },
    /// The search body or page size was rejected before any request.
    #[error("invalid search request: {0}")]
    InvalidSearchRequest(String),
    /// Offset or page size was rejected before any request.
    #[error("invalid pagination parameters: {0}")]
    InvalidPaginationParameters(String),
}

/// Caller-facing pagination parameters.
///
/// Signed so that out-of-range input can be reported instead of being
/// unrepresentable: a non-positive `page_size` or negative `initial_offset`
/// is an error, while a `max_items` of zero or less simply yields nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub initial_offset: i64,
    pub page_size: i64,
    /// Hard cap on items returned across all pages. `None` means no cap.
    pub max_items: Option<i64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            initial_offset: 0,
            page_size: DEFAULT_PAGE_SIZE,
            max_items: None,
        }
    }
}

impl Pagination {
    pub fn new(page_size: i64) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Offset 0, 250 per page, at most 10 000 items.
    pub fn bounded() -> Self {
        Self::default().with_max_items(DEFAULT_MAX_ITEMS)
    }

    pub fn with_max_items(mut self, max_items: i64) -> Self {
        self.max_items = Some(max_items);
        self
    }

    pub fn with_initial_offset(mut self, offset: i64) -> Self {
        self.initial_offset = offset;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), PaginationError> {
        if self.page_size <= 0 {
            return Err(PaginationError::InvalidPaginationParameters(format!(
                "page size must be positive, got {}",
                self.page_size
            )));
        }
        if self.initial_offset < 0 {
            return Err(PaginationError::InvalidPaginationParameters(format!(
                "offset must not be negative, got {}",
                self.initial_offset
            )));
        }
        Ok(())
    }

    /// Resolves the parameters against an endpoint's maximum page size.
    pub(crate) fn window(&self, max_page_size: u64) -> Result<Window, PaginationError> {
        self.validate()?;
        let limit = (self.page_size as u64).min(max_page_size).max(1);
        let cap = self.max_items.map(|cap| cap.max(0) as u64);
        Ok(Window {
            offset: self.initial_offset as u64,
            limit,
            cap,
        })
    }
}

/// Validated, clamped pagination parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Window {
    pub offset: u64,
    pub limit: u64,
    pub cap: Option<u64>,
}

/// One bounded listing request: `(offset, limit) -> page`.
///
/// Implementations must be idempotent with respect to offset/limit and do
/// their own timeouts and retries; the paginator treats any error as final.
pub trait PageSource {
    type Item;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Largest `limit` the endpoint accepts.
    fn max_page_size(&self) -> u64;

    fn fetch_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Page<Self::Item>, Self::Error>> + Send;
}

impl<S: PageSource> PageSource for &S {
    type Item = S::Item;
    type Error = S::Error;

    fn max_page_size(&self) -> u64 {
        (**self).max_page_size()
    }

    fn fetch_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Page<Self::Item>, Self::Error>> + Send {
        (**self).fetch_page(offset, limit)
    }
}

/// One bounded search request: `(search, offset, limit) -> page`.
pub trait SearchExecutor {
    type Error: std::error::Error + Send + Sync + 'static;

    fn max_page_size(&self) -> u64 {
        SEARCH_MAX_PAGE_SIZE
    }

    fn search_page(
        &self,
        search: &Search,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Page<SearchDocument>, Self::Error>> + Send;
}

impl<E: SearchExecutor> SearchExecutor for &E {
    type Error = E::Error;

    fn max_page_size(&self) -> u64 {
        (**self).max_page_size()
    }

    fn search_page(
        &self,
        search: &Search,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Page<SearchDocument>, Self::Error>> + Send {
        (**self).search_page(search, offset, limit)
    }
}

/// [`PageSource`] backed by an async closure. See [`from_fn`].
pub struct FnSource<F> {
    max_page_size: u64,
    f: F,
}

/// Wraps `|offset, limit| async { ... }` as a [`PageSource`].
pub fn from_fn<F, Fut, T, E>(max_page_size: u64, f: F) -> FnSource<F>
where
    F: Fn(u64, u64) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>> + Send,
{
    FnSource { max_page_size, f }
}

impl<F, Fut, T, E> PageSource for FnSource<F>
where
    F: Fn(u64, u64) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>> + Send,
    E: std::error::Error + Send + Sync + 'static,
{
    type Item = T;
    type Error = E;

    fn max_page_size(&self) -> u64 {
        self.max_page_size
    }

    fn fetch_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Page<T>, E>> + Send {
        (self.f)(offset, limit)
    }
}
