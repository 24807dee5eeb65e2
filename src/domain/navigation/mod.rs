//! Navigation invariants:
//!
//! 1. A user holds at most one context at a time
//! 2. `0 <= page < max(1, ceil(len / page_size))` after every transition
//! 3. Datasets are snapshots taken when the context is entered
//! 4. An empty dataset is terminal and offers no navigation

pub mod context;
pub mod pager;

pub use context::{
    ContextKind, Direction, NavAction, NavigationContext, NavigationControls,
    HISTORY_PAGE_SIZE, SEARCH_PAGE_SIZE, STATS_PAGE_SIZE,
};
pub use pager::{total_pages, PageView, Pager};
