use anyhow::Result;
use clap::Args;
use sailpoint_lib::pagination::DEFAULT_PAGE_SIZE;
use sailpoint_lib::validation;
use sailpoint_lib::{
    paginate, ListAccessProfiles, ListAccounts, ListQuery, ListTransforms, ListWorkgroups,
    PageSource, Paginated, Pagination, RetryingClient,
};

use super::stream_records;
use crate::output::{print_records, OutputFormat, Record};

/// Collection endpoints reachable through `sail <resource>`.
#[derive(Clone, Copy, Debug)]
pub enum Resource {
    Accounts,
    AccessProfiles,
    Transforms,
    Workgroups,
}

#[derive(Args)]
pub struct ListArgs {
    /// Items per request (clamped to the endpoint maximum)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, allow_negative_numbers = true)]
    pub limit: i64,

    /// Stop after this many items in total
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Index of the first item to fetch
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub offset: i64,

    /// Filter expression, e.g. 'sourceId eq "2c91..."'
    #[arg(long)]
    pub filters: Option<String>,

    /// Comma-separated sort keys; prefix with '-' for descending
    #[arg(long, value_delimiter = ',')]
    pub sorters: Vec<String>,

    /// Print items as pages arrive instead of after the last page
    #[arg(long)]
    pub stream: bool,
}

impl ListArgs {
    fn query(&self) -> Result<ListQuery> {
        let mut query = ListQuery::default();
        if let Some(ref filters) = self.filters {
            query = query.with_filters(&validation::validate_filters(filters)?);
        }
        for key in &self.sorters {
            query = query.with_sorter(validation::validate_sort(key)?);
        }
        Ok(query)
    }

    fn pagination(&self) -> Pagination {
        let pagination = Pagination::new(self.limit).with_initial_offset(self.offset);
        match self.max {
            Some(max) => pagination.with_max_items(max),
            None => pagination,
        }
    }
}

pub async fn run(
    resource: Resource,
    args: &ListArgs,
    client: &RetryingClient,
    format: &OutputFormat,
) -> Result<()> {
    let query = args.query()?;
    let pagination = args.pagination();

    match resource {
        Resource::Accounts => {
            execute(ListAccounts::new(client, query), pagination, args.stream, format).await
        }
        Resource::AccessProfiles => {
            let source = ListAccessProfiles::new(client, query);
            execute(source, pagination, args.stream, format).await
        }
        Resource::Transforms => {
            execute(ListTransforms::new(client, query), pagination, args.stream, format).await
        }
        Resource::Workgroups => {
            execute(ListWorkgroups::new(client, query), pagination, args.stream, format).await
        }
    }
}

async fn execute<S>(
    source: S,
    pagination: Pagination,
    stream: bool,
    format: &OutputFormat,
) -> Result<()>
where
    S: PageSource,
    S::Item: Record,
{
    if stream {
        return stream_records(Paginated::new(source, pagination)?, format).await;
    }
    let items = paginate(source, pagination).await?;
    eprintln!("{} results", items.len());
    print_records(&items, format)
}
