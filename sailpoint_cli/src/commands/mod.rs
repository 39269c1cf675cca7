//! CLI subcommand implementations.

pub mod list;
pub mod search;

use anyhow::Result;
use futures::StreamExt;
use sailpoint_lib::{PageSource, Paginated};

use crate::output::{OutputFormat, Record, StreamPrinter};

/// Prints items as the cursor yields them, fetching the next page only
/// when the current one has been written out.
pub async fn stream_records<S>(cursor: Paginated<S>, format: &OutputFormat) -> Result<()>
where
    S: PageSource,
    S::Item: Record,
{
    let mut printer = StreamPrinter::new(*format);
    let mut items = std::pin::pin!(cursor.into_stream());
    let mut count = 0u64;
    while let Some(item) = items.next().await {
        printer.write(&item?)?;
        count += 1;
    }
    printer.finish()?;
    eprintln!("{} results", count);
    Ok(())
}
