//! Offset/limit paginator over list and search endpoints.
//!
//! A [`PageSource`] performs one bounded request. [`Paginated`] walks a
//! source page by page, sequentially, until the backend is exhausted or
//! the caller's cap is reached. The eager entry points ([`paginate`],
//! [`paginate_search`]) drain a cursor into a `Vec`; the lazy ones hand the
//! cursor (or a `Stream` built from it) to the caller.

mod cursor;
mod search;
mod types;

pub use cursor::{paginate, Paginated};
pub use search::{
    paginate_search, paginate_search_after, search_after_pages, search_pages, SearchAfterError,
    SearchAfterPages, SearchPages,
};
pub use types::{
    from_fn, BoxError, FnSource, PageSource, Pagination, PaginationError, SearchExecutor,
    DEFAULT_MAX_ITEMS, DEFAULT_PAGE_SIZE, SEARCH_MAX_PAGE_SIZE,
};
