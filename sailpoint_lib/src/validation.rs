use sailpoint_api::{Index, Search, Sorter};

use crate::error::SailPointError;

pub const MAX_QUERY_LENGTH: usize = 1000;
pub const MAX_FILTER_LENGTH: usize = 1000;

/// Strip ASCII control characters, trim whitespace, and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, SailPointError> {
    if input.len() > max_len {
        return Err(SailPointError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(SailPointError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a search query string.
pub fn validate_query_text(input: &str) -> Result<String, SailPointError> {
    sanitize_text(input, MAX_QUERY_LENGTH)
}

/// Validate a list `filters` expression. Only length and control characters
/// are checked; the expression itself is parsed server-side.
pub fn validate_filters(input: &str) -> Result<String, SailPointError> {
    sanitize_text(input, MAX_FILTER_LENGTH)
}

/// Parse a search index name, case-insensitive.
pub fn parse_index(input: &str) -> Result<Index, SailPointError> {
    input
        .trim()
        .to_lowercase()
        .parse::<Index>()
        .map_err(|_| {
            SailPointError::InvalidInput(format!(
                "unknown index '{}'. Valid values: accessprofiles, accountactivities, \
                 entitlements, events, identities, roles, *",
                input
            ))
        })
}

/// Validate a sort key: `field` or `-field`, where the field name is made of
/// ASCII letters, digits, `_` and `.`.
pub fn validate_sort(input: &str) -> Result<Sorter, SailPointError> {
    let sorter: Sorter = input
        .parse()
        .map_err(|_| SailPointError::InvalidInput("sort key is empty".to_string()))?;
    let valid = sorter
        .field
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if !valid {
        return Err(SailPointError::InvalidInput(format!(
            "invalid sort key '{}'. Use a field name, optionally prefixed with '-'",
            input
        )));
    }
    Ok(sorter)
}

/// Assemble a search body from raw command-line values.
pub fn build_search(
    query: &str,
    sort: &[String],
    indices: &[String],
) -> Result<Search, SailPointError> {
    let mut search = Search::default().with_query(&validate_query_text(query)?);
    for key in sort {
        search = search.with_sort(&validate_sort(key)?.to_string());
    }
    for index in indices {
        search = search.with_index(parse_index(index)?);
    }
    Ok(search)
}
