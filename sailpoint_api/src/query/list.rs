use url::Url;

use super::{
    common::{QueryCommon, Sorter},
    Query,
};

/// Query for the collection endpoints (`/v3/accounts`, `/beta/workgroups`, ...).
///
/// `filters` is passed through verbatim in the platform's filter syntax,
/// e.g. `sourceId eq "2c9180835d2e5168015d32f890ca1581"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub common: QueryCommon,
    pub filters: Option<String>,
    pub sorters: Vec<Sorter>,
}

impl Query for ListQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(filters) = &self.filters {
            url.query_pairs_mut().append_pair("filters", filters);
        };
        if !self.sorters.is_empty() {
            let joined = self
                .sorters
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(",");
            url.query_pairs_mut().append_pair("sorters", &joined);
        }
        url
    }
}

impl ListQuery {
    pub fn with_filters(mut self, filters: &str) -> Self {
        self.filters = Some(filters.to_string());
        self
    }

    pub fn with_sorter(mut self, sorter: Sorter) -> Self {
        self.sorters.push(sorter);
        self
    }

    pub fn with_sorters(mut self, sorters: &[Sorter]) -> Self {
        self.sorters.extend_from_slice(sorters);
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{ListQuery, Query, Sorter};

    #[test]
    fn test_list_query() {
        let url = Url::parse("https://example.com/v3/accounts").unwrap();

        insta::assert_snapshot!(
            ListQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/v3/accounts?offset=0&count=true"
        );

        insta::assert_snapshot!(
            ListQuery::default()
                .with_offset(500)
                .with_limit(250)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/v3/accounts?offset=500&limit=250&count=true"
        );

        insta::assert_snapshot!(
            ListQuery::default()
                .with_limit(10)
                .with_count(false)
                .with_sorter(Sorter::desc("created"))
                .with_sorter(Sorter::asc("name"))
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/v3/accounts?offset=0&limit=10&sorters=-created%2Cname"
        );
    }

    #[test]
    fn filters_are_form_encoded() {
        let url = Url::parse("https://example.com/v3/accounts").unwrap();
        let url = ListQuery::default()
            .with_filters("sourceId eq \"abc\"")
            .add_to_url(&url);
        let (_, value) = url
            .query_pairs()
            .find(|(k, _)| k == "filters")
            .unwrap();
        assert_eq!(value, "sourceId eq \"abc\"");
    }
}
