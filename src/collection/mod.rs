//! Collection Utilities
//!
//! Domain-independent building blocks shared by remote readers:
//! - `PagingIterator`: lazy item-at-a-time view over a cursor-paginated source
//! - `PageFetcher`: the page source contract the iterator pulls from

mod paging;

pub use paging::{FetchInterrupted, Page, PageFetcher, PagingIterator};
