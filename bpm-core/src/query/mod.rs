//! List-processing engines
//!
//! Every list view runs the same pure pipeline over a freshly fetched
//! collection. The individual stages are exposed for callers that only need
//! one of them.

pub mod filter;
pub mod paginate;
pub mod pipeline;
pub mod sort;

pub use filter::{FilterCondition, FilterOperator, apply_filters};
pub use paginate::{DEFAULT_PAGE_SIZE, apply_pagination};
pub use pipeline::{ALL_VIEW, ListOptions, QueryResult, run_pipeline};
pub use sort::{CaseSensitivity, SortDirection, SortSpec, apply_sort};
