//! One narrow paging capability per resource.
//!
//! Each adapter binds a [`RetryingClient`] and a [`ListQuery`] to a single
//! endpoint so the paginator can drive it. Offset and limit on the stored
//! query are overwritten per page; filters and sorters are kept.

use sailpoint_api::types::{AccessProfile, Account, Page, SearchDocument, Transform, Workgroup};
use sailpoint_api::{ListQuery, Query, Search, SearchQuery};

use crate::client::RetryingClient;
use crate::error::SailPointError;
use crate::pagination::{PageSource, SearchExecutor, SEARCH_MAX_PAGE_SIZE};

/// Largest `limit` accepted by the v3 collection endpoints.
pub const V3_MAX_PAGE_SIZE: u64 = 250;

/// Largest `limit` accepted by the beta workgroups endpoint.
pub const WORKGROUPS_MAX_PAGE_SIZE: u64 = 50;

fn page_query(query: &ListQuery, offset: u64, limit: u64) -> ListQuery {
    query
        .clone()
        .with_offset(offset)
        .with_limit(limit)
        .with_count(true)
}

pub struct ListAccounts<'a> {
    client: &'a RetryingClient,
    query: ListQuery,
}

impl<'a> ListAccounts<'a> {
    pub fn new(client: &'a RetryingClient, query: ListQuery) -> Self {
        Self { client, query }
    }
}

impl PageSource for ListAccounts<'_> {
    type Item = Account;
    type Error = SailPointError;

    fn max_page_size(&self) -> u64 {
        V3_MAX_PAGE_SIZE
    }

    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<Page<Account>, SailPointError> {
        self.client
            .list_accounts(&page_query(&self.query, offset, limit))
            .await
    }
}

pub struct ListAccessProfiles<'a> {
    client: &'a RetryingClient,
    query: ListQuery,
}

impl<'a> ListAccessProfiles<'a> {
    pub fn new(client: &'a RetryingClient, query: ListQuery) -> Self {
        Self { client, query }
    }
}

impl PageSource for ListAccessProfiles<'_> {
    type Item = AccessProfile;
    type Error = SailPointError;

    fn max_page_size(&self) -> u64 {
        V3_MAX_PAGE_SIZE
    }

    async fn fetch_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Page<AccessProfile>, SailPointError> {
        self.client
            .list_access_profiles(&page_query(&self.query, offset, limit))
            .await
    }
}

pub struct ListTransforms<'a> {
    client: &'a RetryingClient,
    query: ListQuery,
}

impl<'a> ListTransforms<'a> {
    pub fn new(client: &'a RetryingClient, query: ListQuery) -> Self {
        Self { client, query }
    }
}

impl PageSource for ListTransforms<'_> {
    type Item = Transform;
    type Error = SailPointError;

    fn max_page_size(&self) -> u64 {
        V3_MAX_PAGE_SIZE
    }

    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<Page<Transform>, SailPointError> {
        self.client
            .list_transforms(&page_query(&self.query, offset, limit))
            .await
    }
}

pub struct ListWorkgroups<'a> {
    client: &'a RetryingClient,
    query: ListQuery,
}

impl<'a> ListWorkgroups<'a> {
    pub fn new(client: &'a RetryingClient, query: ListQuery) -> Self {
        Self { client, query }
    }
}

impl PageSource for ListWorkgroups<'_> {
    type Item = Workgroup;
    type Error = SailPointError;

    fn max_page_size(&self) -> u64 {
        WORKGROUPS_MAX_PAGE_SIZE
    }

    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<Page<Workgroup>, SailPointError> {
        self.client
            .list_workgroups(&page_query(&self.query, offset, limit))
            .await
    }
}

/// The search endpoint as a [`SearchExecutor`].
pub struct SearchApi<'a> {
    client: &'a RetryingClient,
}

impl<'a> SearchApi<'a> {
    pub fn new(client: &'a RetryingClient) -> Self {
        Self { client }
    }
}

impl SearchExecutor for SearchApi<'_> {
    type Error = SailPointError;

    fn max_page_size(&self) -> u64 {
        SEARCH_MAX_PAGE_SIZE
    }

    async fn search_page(
        &self,
        search: &Search,
        offset: u64,
        limit: u64,
    ) -> Result<Page<SearchDocument>, SailPointError> {
        let query = SearchQuery::new(search.clone())
            .with_offset(offset)
            .with_limit(limit)
            .with_count(true);
        self.client.search_post(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sailpoint_api::Sorter;

    #[test]
    fn page_query_keeps_filters_and_sorters() {
        let base = ListQuery::default()
            .with_filters("disabled eq false")
            .with_sorter(Sorter::desc("created"))
            .with_count(false);
        let q = page_query(&base, 500, 100);
        assert_eq!(q.common.offset, 500);
        assert_eq!(q.common.limit, Some(100));
        assert!(q.common.count);
        assert_eq!(q.filters, base.filters);
        assert_eq!(q.sorters, base.sorters);
    }

    #[test]
    fn endpoint_maximums() {
        let client = RetryingClient::with_base_url("https://example.com").unwrap();
        assert_eq!(
            ListAccounts::new(&client, ListQuery::default()).max_page_size(),
            250
        );
        assert_eq!(
            ListWorkgroups::new(&client, ListQuery::default()).max_page_size(),
            50
        );
        assert_eq!(SearchApi::new(&client).max_page_size(), 250);
    }
}
