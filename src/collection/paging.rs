//! Paging Iterator
//!
//! Turns a page source keyed by an opaque continuation token into a lazy,
//! single-consumer sequence of items.
//!
//! Rules:
//! - No page is fetched before the first pull
//! - At most one page fetch is in flight (pulls take `&mut self`)
//! - Items come out in page order, then in-page order
//! - A page with no continuation token ends the sequence
//! - The first fetch error is reported once and ends the sequence

use std::collections::VecDeque;
use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, Stream};

/// One page returned by a page source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in the order the source returned them
    pub items: Vec<T>,
    /// Token for the following page, `None` when this is the last page
    pub next_token: Option<Bytes>,
}

impl<T> Page<T> {
    /// Build a page from a raw wire token. An empty token means "last page".
    pub fn new(items: Vec<T>, next_token: Bytes) -> Self {
        let next_token = if next_token.is_empty() {
            None
        } else {
            Some(next_token)
        };
        Self { items, next_token }
    }

    /// A final page.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    /// Whether another page follows this one.
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}

/// Source of pages for a `PagingIterator`.
///
/// `token` is `None` for the first page and otherwise the verbatim token
/// returned with the previous page.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    /// Error surfaced to the iterator's consumer.
    type Error: From<FetchInterrupted> + Send;

    /// Fetch exactly one page.
    async fn fetch_page(&self, token: Option<Bytes>) -> Result<Page<T>, Self::Error>;
}

/// A pull was dropped while its page fetch was still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchInterrupted;

impl fmt::Display for FetchInterrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page fetch interrupted before completion")
    }
}

impl std::error::Error for FetchInterrupted {}

/// Cursor state of a paging iterator.
enum CursorState<E> {
    /// Next fetch uses this token (`None` = first page)
    Ready(Option<Bytes>),
    /// A fetch was started and has not completed
    Fetching,
    /// Last page consumed from the source
    Exhausted,
    /// Fetch failed; holds the error until it is reported
    Failed(Option<E>),
}

/// Lazy iterator over items of a cursor-paginated source.
///
/// Not restartable: build a new instance to iterate from the start again.
pub struct PagingIterator<T, F: PageFetcher<T>> {
    fetcher: F,
    buffer: VecDeque<T>,
    state: CursorState<F::Error>,
    pages_fetched: usize,
}

impl<T, F> PagingIterator<T, F>
where
    T: Send,
    F: PageFetcher<T>,
{
    /// Wrap a page source. Performs no I/O.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            buffer: VecDeque::new(),
            state: CursorState::Ready(None),
            pages_fetched: 0,
        }
    }

    /// Whether another item (or a pending error) is available.
    ///
    /// Fetches the next page when the buffer is empty and the source has
    /// more pages.
    pub async fn has_next(&mut self) -> bool {
        self.fill().await;
        !self.buffer.is_empty() || matches!(self.state, CursorState::Failed(Some(_)))
    }

    /// Pull the next item.
    ///
    /// Returns `None` once the source is exhausted or after a failure has
    /// been reported.
    pub async fn next(&mut self) -> Option<Result<T, F::Error>> {
        self.fill().await;

        if let Some(item) = self.buffer.pop_front() {
            return Some(Ok(item));
        }

        match &mut self.state {
            CursorState::Failed(pending) => pending.take().map(Err),
            _ => None,
        }
    }

    /// Number of pages requested from the source so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// True when no further item or error will ever be produced.
    pub fn is_terminated(&self) -> bool {
        self.buffer.is_empty()
            && matches!(
                self.state,
                CursorState::Exhausted | CursorState::Failed(None)
            )
    }

    /// Borrow the underlying page source.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Adapt into a `Stream` of results.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, F::Error>> {
        stream::unfold(self, |mut iter| async move {
            let item = iter.next().await?;
            Some((item, iter))
        })
    }

    async fn fill(&mut self) {
        while self.buffer.is_empty() {
            let token = match std::mem::replace(&mut self.state, CursorState::Fetching) {
                CursorState::Ready(token) => token,
                CursorState::Fetching => {
                    // Previous pull was dropped mid-fetch
                    self.state = CursorState::Failed(Some(FetchInterrupted.into()));
                    return;
                }
                terminal => {
                    self.state = terminal;
                    return;
                }
            };

            self.pages_fetched += 1;
            match self.fetcher.fetch_page(token).await {
                Ok(page) => {
                    self.buffer.extend(page.items);
                    self.state = match page.next_token {
                        Some(token) => CursorState::Ready(Some(token)),
                        None => CursorState::Exhausted,
                    };
                }
                Err(err) => {
                    self.state = CursorState::Failed(Some(err));
                }
            }
        }
    }
}

impl<T, F: PageFetcher<T>> fmt::Debug for PagingIterator<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            CursorState::Ready(None) => "ready(first)",
            CursorState::Ready(Some(_)) => "ready",
            CursorState::Fetching => "fetching",
            CursorState::Exhausted => "exhausted",
            CursorState::Failed(_) => "failed",
        };
        f.debug_struct("PagingIterator")
            .field("state", &state)
            .field("buffered", &self.buffer.len())
            .field("pages_fetched", &self.pages_fetched)
            .finish()
    }
}
