use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{common::QueryCommon, Query};

/// Search index names accepted by `POST /v3/search`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Index {
    #[serde(rename = "accessprofiles")]
    AccessProfiles,
    #[serde(rename = "accountactivities")]
    AccountActivities,
    #[serde(rename = "entitlements")]
    Entitlements,
    #[serde(rename = "events")]
    Events,
    #[serde(rename = "identities")]
    Identities,
    #[serde(rename = "roles")]
    Roles,
    /// Every index.
    #[serde(rename = "*")]
    All,
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Index::AccessProfiles => "accessprofiles",
            Index::AccountActivities => "accountactivities",
            Index::Entitlements => "entitlements",
            Index::Events => "events",
            Index::Identities => "identities",
            Index::Roles => "roles",
            Index::All => "*",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Index {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accessprofiles" => Ok(Index::AccessProfiles),
            "accountactivities" => Ok(Index::AccountActivities),
            "entitlements" => Ok(Index::Entitlements),
            "events" => Ok(Index::Events),
            "identities" => Ok(Index::Identities),
            "roles" => Ok(Index::Roles),
            "*" => Ok(Index::All),
            _ => Err(()),
        }
    }
}

/// Free-text query in the search engine's query-string syntax.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryText {
    pub query: String,
}

/// JSON body of a search request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Search {
    pub indices: Vec<Index>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryText>,
    /// Sort keys, `field` or `-field`. Result order is decided by the backend.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<String>,
    /// Key-set cursor: the sort values of the last item already seen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_after: Option<Vec<String>>,
}

impl Search {
    pub fn with_index(mut self, index: Index) -> Self {
        self.indices.push(index);
        self
    }

    pub fn with_indices(mut self, indices: &[Index]) -> Self {
        self.indices.extend_from_slice(indices);
        self
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = Some(QueryText {
            query: query.to_string(),
        });
        self
    }

    pub fn with_sort(mut self, sort: &str) -> Self {
        self.sort.push(sort.to_string());
        self
    }

    pub fn with_search_after(mut self, values: Vec<String>) -> Self {
        self.search_after = Some(values);
        self
    }
}

/// A search body together with the offset/limit sent on the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub common: QueryCommon,
    pub search: Search,
}

impl SearchQuery {
    pub fn new(search: Search) -> Self {
        Self {
            common: QueryCommon::default(),
            search,
        }
    }
}

impl Query for SearchQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_body_shape() {
        let search = Search::default()
            .with_index(Index::Identities)
            .with_query("*")
            .with_sort("-name");
        let json = serde_json::to_value(&search).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "indices": ["identities"],
                "query": { "query": "*" },
                "sort": ["-name"]
            })
        );
    }

    #[test]
    fn search_after_is_camel_case() {
        let search = Search::default()
            .with_index(Index::Roles)
            .with_search_after(vec!["Zed".to_string()]);
        let json = serde_json::to_value(&search).unwrap();
        assert_eq!(json["searchAfter"], serde_json::json!(["Zed"]));
        assert!(json.get("query").is_none());
    }

    #[test]
    fn index_round_trips_through_str() {
        for index in [
            Index::AccessProfiles,
            Index::AccountActivities,
            Index::Entitlements,
            Index::Events,
            Index::Identities,
            Index::Roles,
            Index::All,
        ] {
            assert_eq!(index.to_string().parse::<Index>(), Ok(index));
        }
        assert!("users".parse::<Index>().is_err());
    }

    #[test]
    fn search_query_only_puts_paging_on_url() {
        let url = Url::parse("https://example.com/v3/search").unwrap();
        let query = SearchQuery::new(Search::default().with_index(Index::Identities))
            .with_offset(250)
            .with_limit(250);
        insta::assert_snapshot!(
            query.add_to_url(&url).to_string(),
            @"https://example.com/v3/search?offset=250&limit=250&count=true"
        );
    }
}
