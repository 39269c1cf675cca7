use std::sync::Mutex;

use sailpoint_api::types::{Page, SearchDocument};
use sailpoint_api::Search;
use serde_json::Value;

use super::cursor::Paginated;
use super::types::{PageSource, Pagination, PaginationError, SearchExecutor};

fn validate(search: &Search, pagination: &Pagination) -> Result<(), PaginationError> {
    if search.indices.is_empty() {
        return Err(PaginationError::InvalidSearchRequest(
            "at least one index is required".to_string(),
        ));
    }
    if pagination.page_size <= 0 {
        return Err(PaginationError::InvalidSearchRequest(format!(
            "page size must be positive, got {}",
            pagination.page_size
        )));
    }
    Ok(())
}

/// Binds a search body to an executor so it can be paged by offset.
pub struct SearchPages<E> {
    executor: E,
    search: Search,
}

impl<E: SearchExecutor> PageSource for SearchPages<E> {
    type Item = SearchDocument;
    type Error = E::Error;

    fn max_page_size(&self) -> u64 {
        self.executor.max_page_size()
    }

    fn fetch_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl std::future::Future<Output = Result<Page<SearchDocument>, E::Error>> + Send {
        self.executor.search_page(&self.search, offset, limit)
    }
}

/// Lazy cursor over a search, paged by offset.
pub fn search_pages<E: SearchExecutor>(
    executor: E,
    search: Search,
    pagination: Pagination,
) -> Result<Paginated<SearchPages<E>>, PaginationError> {
    validate(&search, &pagination)?;
    Paginated::new(SearchPages { executor, search }, pagination)
}

/// Runs `search` across as many pages as needed and returns the hits in
/// backend order, at most `min(total, max_items)` of them.
pub async fn paginate_search<E: SearchExecutor>(
    executor: E,
    search: Search,
    pagination: Pagination,
) -> Result<Vec<SearchDocument>, PaginationError> {
    search_pages(executor, search, pagination)?
        .collect_all()
        .await
}

/// Failure of a key-set search page.
#[derive(thiserror::Error, Debug)]
pub enum SearchAfterError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Backend(E),
    /// The hit a follow-up request would resume from has no usable value
    /// for the sort field.
    #[error("last result has no value for sort field '{0}'")]
    MissingSortValue(String),
}

/// Pages a search by key instead of by offset: each request carries the
/// sort value of the previous page's last hit in `searchAfter`.
///
/// The paginator still advances its offset so that totals and caps work
/// unchanged, but the offset sent to the backend is always 0. The sort
/// value is only read when a follow-up request is actually issued.
pub struct SearchAfterPages<E> {
    executor: E,
    search: Search,
    sort_field: String,
    last_hit: Mutex<Option<SearchDocument>>,
}

impl<E: SearchExecutor> SearchAfterPages<E> {
    async fn fetch(
        &self,
        limit: u64,
    ) -> Result<Page<SearchDocument>, SearchAfterError<E::Error>> {
        let last_hit = self
            .last_hit
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        let mut search = self.search.clone();
        if let Some(last) = last_hit {
            let value = sort_value(&last, &self.sort_field)
                .ok_or_else(|| SearchAfterError::MissingSortValue(self.sort_field.clone()))?;
            search.search_after = Some(vec![value]);
        }

        let page = self
            .executor
            .search_page(&search, 0, limit)
            .await
            .map_err(SearchAfterError::Backend)?;

        if page.items.len() as u64 >= limit {
            *self.last_hit.lock().unwrap_or_else(|e| e.into_inner()) = page.items.last().cloned();
        }
        Ok(page)
    }
}

impl<E: SearchExecutor + Sync> PageSource for SearchAfterPages<E> {
    type Item = SearchDocument;
    type Error = SearchAfterError<E::Error>;

    fn max_page_size(&self) -> u64 {
        self.executor.max_page_size()
    }

    fn fetch_page(
        &self,
        _offset: u64,
        limit: u64,
    ) -> impl std::future::Future<Output = Result<Page<SearchDocument>, Self::Error>> + Send {
        self.fetch(limit)
    }
}

/// Looks up `field` in a hit. Dotted names such as `attributes.department`
/// descend into nested objects.
fn sort_value(doc: &SearchDocument, field: &str) -> Option<String> {
    let value = match doc.get(field) {
        Some(value) => value,
        None => {
            let mut parts = field.split('.');
            let first = doc.get(parts.next()?)?;
            parts.try_fold(first, |value, key| value.get(key))?
        }
    };
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Lazy cursor over a search, paged by key. The search must have exactly
/// one sort key.
pub fn search_after_pages<E: SearchExecutor + Sync>(
    executor: E,
    search: Search,
    pagination: Pagination,
) -> Result<Paginated<SearchAfterPages<E>>, PaginationError> {
    validate(&search, &pagination)?;
    if search.sort.len() != 1 {
        return Err(PaginationError::InvalidSearchRequest(
            "search must include exactly one sort key to page by key".to_string(),
        ));
    }
    if pagination.initial_offset != 0 {
        return Err(PaginationError::InvalidSearchRequest(
            "an initial offset cannot be combined with paging by key".to_string(),
        ));
    }
    let sort_field = search.sort[0].trim_start_matches('-').to_string();
    let source = SearchAfterPages {
        executor,
        search,
        sort_field,
        last_hit: Mutex::new(None),
    };
    Paginated::new(source, pagination)
}

/// Eager form of [`search_after_pages`].
pub async fn paginate_search_after<E: SearchExecutor + Sync>(
    executor: E,
    search: Search,
    pagination: Pagination,
) -> Result<Vec<SearchDocument>, PaginationError> {
    search_after_pages(executor, search, pagination)?
        .collect_all()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> SearchDocument {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn sort_value_reads_scalars() {
        let hit = doc(json!({ "name": "ada", "age": 36, "active": true, "tags": ["x"] }));
        assert_eq!(sort_value(&hit, "name").as_deref(), Some("ada"));
        assert_eq!(sort_value(&hit, "age").as_deref(), Some("36"));
        assert_eq!(sort_value(&hit, "active").as_deref(), Some("true"));
        assert_eq!(sort_value(&hit, "tags"), None);
        assert_eq!(sort_value(&hit, "missing"), None);
    }

    #[test]
    fn sort_value_follows_dotted_path() {
        let hit = doc(json!({
            "attributes": { "department": "Finance", "cost": { "center": 42 } }
        }));
        assert_eq!(
            sort_value(&hit, "attributes.department").as_deref(),
            Some("Finance")
        );
        assert_eq!(sort_value(&hit, "attributes.cost.center").as_deref(), Some("42"));
        assert_eq!(sort_value(&hit, "attributes.title"), None);
    }

    #[test]
    fn sort_value_prefers_literal_dotted_key() {
        let hit = doc(json!({ "source.name": "AD", "source": { "name": "HR" } }));
        assert_eq!(sort_value(&hit, "source.name").as_deref(), Some("AD"));
    }
}
