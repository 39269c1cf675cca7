use std::collections::VecDeque;

use futures::Stream;

use super::types::{PageSource, Pagination, PaginationError, Window};

/// Per-call bookkeeping: where the next request starts and how much of the
/// cap is left.
#[derive(Debug)]
struct Session {
    offset: u64,
    limit: u64,
    remaining: Option<u64>,
    total: Option<u64>,
    yielded: u64,
    requests: u64,
    done: bool,
}

impl Session {
    fn new(window: Window) -> Self {
        Self {
            offset: window.offset,
            limit: window.limit,
            remaining: window.cap,
            total: None,
            yielded: 0,
            requests: 0,
            done: window.cap == Some(0),
        }
    }

    fn next_request(&self) -> Option<(u64, u64)> {
        if self.done {
            None
        } else {
            Some((self.offset, self.limit))
        }
    }

    /// Records a page of `received` items and returns how many of them to keep.
    fn advance(&mut self, received: u64, total: Option<u64>) -> u64 {
        self.requests += 1;
        if total.is_some() {
            self.total = total;
        }

        let keep = match self.remaining {
            Some(remaining) => received.min(remaining),
            None => received,
        };
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= keep;
        }
        self.yielded += keep;
        self.offset += self.limit;

        // A short page is the exhaustion signal even if `total` says otherwise.
        let exhausted = received < self.limit;
        let capped = self.remaining == Some(0);
        let past_total = total.is_some_and(|t| self.offset >= t);
        if exhausted || capped || past_total {
            self.done = true;
        }
        keep
    }
}

/// Lazy, single-use cursor over a paginated source.
///
/// Requests are issued one at a time and only when the caller asks for
/// more than is buffered, so dropping the cursor stops all traffic. The
/// cursor is not restartable: once it has returned `None` or an error it
/// stays finished, and re-walking the result set means building a new one.
pub struct Paginated<S: PageSource> {
    source: S,
    session: Session,
    buffer: VecDeque<S::Item>,
}

impl<S: PageSource> Paginated<S> {
    pub fn new(source: S, pagination: Pagination) -> Result<Self, PaginationError> {
        let window = pagination.window(source.max_page_size())?;
        tracing::debug!(
            offset = window.offset,
            limit = window.limit,
            cap = ?window.cap,
            "starting pagination"
        );
        Ok(Self {
            source,
            session: Session::new(window),
            buffer: VecDeque::new(),
        })
    }

    /// Returns the next non-empty page, or `None` once the source is
    /// exhausted or the cap is reached. Items already pulled through
    /// [`Paginated::next_item`] are not returned again.
    pub async fn next_page(&mut self) -> Result<Option<Vec<S::Item>>, PaginationError> {
        if !self.buffer.is_empty() {
            return Ok(Some(self.buffer.drain(..).collect()));
        }

        let Some((offset, limit)) = self.session.next_request() else {
            return Ok(None);
        };

        tracing::debug!(offset, limit, "fetching page");
        let page = match self.source.fetch_page(offset, limit).await {
            Ok(page) => page,
            Err(e) => {
                self.session.done = true;
                tracing::warn!(offset, limit, error = %e, "page request failed");
                return Err(PaginationError::PageFetch {
                    offset,
                    limit,
                    source: Box::new(e),
                });
            }
        };

        let mut items = page.items;
        let keep = self.session.advance(items.len() as u64, page.total);
        items.truncate(keep as usize);

        if items.is_empty() {
            return Ok(None);
        }
        Ok(Some(items))
    }

    /// Returns the next item, fetching a new page when the buffer runs dry.
    /// After an error has been returned the cursor yields `None`.
    pub async fn next_item(&mut self) -> Option<Result<S::Item, PaginationError>> {
        if self.buffer.is_empty() {
            match self.next_page().await {
                Ok(Some(items)) => self.buffer.extend(items),
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
        self.buffer.pop_front().map(Ok)
    }

    /// Drains every remaining page. Fails without a partial result if any
    /// page request fails.
    pub async fn collect_all(mut self) -> Result<Vec<S::Item>, PaginationError> {
        let mut out: Vec<S::Item> = self.buffer.drain(..).collect();
        while let Some(items) = self.next_page().await? {
            out.extend(items);
        }
        tracing::debug!(
            items = out.len(),
            requests = self.session.requests,
            "pagination complete"
        );
        Ok(out)
    }

    /// Turns the cursor into a `Stream` of items. Consumes the cursor.
    pub fn into_stream(self) -> impl Stream<Item = Result<S::Item, PaginationError>> {
        futures::stream::unfold(self, |mut cursor| async move {
            cursor.next_item().await.map(|item| (item, cursor))
        })
    }

    /// Number of page requests issued so far.
    pub fn requests_made(&self) -> u64 {
        self.session.requests
    }

    /// Number of items handed out or buffered so far, after cap truncation.
    pub fn items_fetched(&self) -> u64 {
        self.session.yielded
    }

    /// Last total reported by the backend, if any.
    pub fn total(&self) -> Option<u64> {
        self.session.total
    }

    pub fn is_done(&self) -> bool {
        self.session.done && self.buffer.is_empty()
    }
}

/// Walks `source` to the end (or the cap) and returns every item in order.
pub async fn paginate<S: PageSource>(
    source: S,
    pagination: Pagination,
) -> Result<Vec<S::Item>, PaginationError> {
    Paginated::new(source, pagination)?.collect_all().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(offset: u64, limit: u64, cap: Option<u64>) -> Session {
        Session::new(Window { offset, limit, cap })
    }

    #[test]
    fn zero_cap_starts_done() {
        let s = session(0, 100, Some(0));
        assert_eq!(s.next_request(), None);
    }

    #[test]
    fn full_page_without_total_continues() {
        let mut s = session(0, 100, None);
        assert_eq!(s.advance(100, None), 100);
        assert_eq!(s.next_request(), Some((100, 100)));
    }

    #[test]
    fn short_page_finishes() {
        let mut s = session(0, 100, None);
        assert_eq!(s.advance(37, Some(1000)), 37);
        assert_eq!(s.next_request(), None);
    }

    #[test]
    fn cap_truncates_final_page() {
        let mut s = session(0, 100, Some(150));
        assert_eq!(s.advance(100, None), 100);
        assert_eq!(s.advance(100, None), 50);
        assert_eq!(s.yielded, 150);
        assert_eq!(s.next_request(), None);
    }

    #[test]
    fn reaching_total_finishes() {
        let mut s = session(0, 100, None);
        s.advance(100, Some(200));
        assert!(!s.done);
        s.advance(100, Some(200));
        assert!(s.done);
    }

    #[test]
    fn initial_offset_counts_against_total() {
        let mut s = session(900, 100, None);
        s.advance(100, Some(1000));
        assert!(s.done);
        assert_eq!(s.offset, 1000);
    }
}
