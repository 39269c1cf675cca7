//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`SortDirection`].

use std::fmt;
use std::str::FromStr;

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for offset/limit pagination.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the zero-based index of the first item to return.
    fn with_offset(mut self, offset: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().offset = offset;
        self
    }

    /// Sets the maximum number of items in one response.
    fn with_limit(mut self, limit: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = Some(limit);
        self
    }

    /// Asks the API to report the total number of matches in `X-Total-Count`.
    fn with_count(mut self, count: bool) -> Self
    where
        Self: Sized,
    {
        self.get_common().count = count;
        self
    }
}

/// Sort order for API results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order. This is the default.
    #[default]
    Asc,
    /// Descending order, sent as a `-` prefix on the field name.
    Desc,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// One sort key, rendered as `field` or `-field`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sorter {
    pub field: String,
    pub direction: SortDirection,
}

impl Sorter {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for Sorter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix('-') {
            Some("") => Err(()),
            Some(field) => Ok(Sorter::desc(field)),
            None if s.is_empty() => Err(()),
            None => Ok(Sorter::asc(s)),
        }
    }
}

impl fmt::Display for Sorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.field),
            SortDirection::Desc => write!(f, "-{}", self.field),
        }
    }
}

/// Fields shared by all query types: offset, limit and the count flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryCommon {
    /// Offset of the first item. Defaults to 0.
    pub offset: u64,
    /// Items per response. `None` uses the API default.
    pub limit: Option<u64>,
    /// Whether to request `X-Total-Count`. Defaults to true.
    pub count: bool,
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            offset: 0,
            limit: None,
            count: true,
        }
    }
}

impl QueryCommon {
    /// Appends the common pagination parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("offset", &self.offset.to_string());
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        };
        if self.count {
            url.query_pairs_mut().append_pair("count", "true");
        };
        url
    }
}
