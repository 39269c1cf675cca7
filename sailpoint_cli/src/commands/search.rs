use anyhow::Result;
use clap::Args;
use sailpoint_lib::pagination::{
    paginate_search, paginate_search_after, search_after_pages, search_pages,
    SEARCH_MAX_PAGE_SIZE,
};
use sailpoint_lib::validation;
use sailpoint_lib::{Pagination, RetryingClient, SearchApi};

use super::stream_records;
use crate::output::{print_records, OutputFormat};

#[derive(Args)]
pub struct SearchArgs {
    /// Comma-separated indices: accessprofiles, accountactivities,
    /// entitlements, events, identities, roles or '*'
    #[arg(long, value_delimiter = ',', required = true)]
    pub indices: Vec<String>,

    /// Query text in the search query syntax
    #[arg(long, default_value = "*")]
    pub query: String,

    /// Comma-separated sort keys; prefix with '-' for descending
    #[arg(long, value_delimiter = ',')]
    pub sort: Vec<String>,

    /// Hits per request (clamped to 250)
    #[arg(long, default_value_t = SEARCH_MAX_PAGE_SIZE as i64, allow_negative_numbers = true)]
    pub limit: i64,

    /// Stop after this many hits in total
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Index of the first hit (offset paging only)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub offset: i64,

    /// Page by the last hit's sort value instead of by offset; needs
    /// exactly one --sort key
    #[arg(long)]
    pub search_after: bool,

    /// Print hits as pages arrive instead of after the last page
    #[arg(long)]
    pub stream: bool,
}

pub async fn run(
    args: &SearchArgs,
    client: &RetryingClient,
    format: &OutputFormat,
) -> Result<()> {
    let search = validation::build_search(&args.query, &args.sort, &args.indices)?;
    let mut pagination = Pagination::new(args.limit).with_initial_offset(args.offset);
    if let Some(max) = args.max {
        pagination = pagination.with_max_items(max);
    }
    let executor = SearchApi::new(client);

    match (args.search_after, args.stream) {
        (false, true) => {
            stream_records(search_pages(executor, search, pagination)?, format).await
        }
        (true, true) => {
            stream_records(search_after_pages(executor, search, pagination)?, format).await
        }
        (false, false) => {
            let hits = paginate_search(executor, search, pagination).await?;
            eprintln!("{} results", hits.len());
            print_records(&hits, format)
        }
        (true, false) => {
            let hits = paginate_search_after(executor, search, pagination).await?;
            eprintln!("{} results", hits.len());
            print_records(&hits, format)
        }
    }
}
