use sailpoint_api::{
    Index, ListQuery, Query, QueryCommon, Search, SearchQuery, SortDirection, Sorter,
};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/v3/accounts").unwrap()
}

#[test]
fn list_query_defaults() {
    let url = ListQuery::default().add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("offset=0"));
    assert!(query.contains("count=true"));
    assert!(!query.contains("limit="));
}

#[test]
fn common_fields_are_nameable() {
    let query = ListQuery::default().with_offset(500).with_limit(100);
    let expected = QueryCommon {
        offset: 500,
        limit: Some(100),
        count: true,
    };
    assert_eq!(query.common, expected);
    assert_eq!(SearchQuery::default().common, QueryCommon::default());
}

#[test]
fn list_query_with_offset_and_limit() {
    let url = ListQuery::default()
        .with_offset(900)
        .with_limit(100)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("offset=900"));
    assert!(query.contains("limit=100"));
}

#[test]
fn list_query_sorters_keep_order() {
    let url = ListQuery::default()
        .with_sorters(&[Sorter::asc("sourceId"), Sorter::desc("modified")])
        .add_to_url(&base_url());
    let (_, sorters) = url.query_pairs().find(|(k, _)| k == "sorters").unwrap();
    assert_eq!(sorters, "sourceId,-modified");
}

#[test]
fn sort_direction_from_str() {
    assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
    assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
    assert!("sideways".parse::<SortDirection>().is_err());
}

#[test]
fn search_query_keeps_body_out_of_url() {
    let search = Search::default()
        .with_indices(&[Index::Roles, Index::Entitlements])
        .with_query("name:admin*");
    let query = SearchQuery::new(search.clone()).with_limit(50);
    let url = query.add_to_url(&Url::parse("https://example.com/v3/search").unwrap());
    let q = url.query().unwrap();
    assert!(q.contains("limit=50"));
    assert!(!q.contains("admin"));
    assert_eq!(query.search, search);
}
