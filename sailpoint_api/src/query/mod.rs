mod common;
pub use self::common::{Query, QueryCommon, SortDirection, Sorter};

mod list;
pub use self::list::ListQuery;

mod search;
pub use self::search::{Index, QueryText, Search, SearchQuery};
