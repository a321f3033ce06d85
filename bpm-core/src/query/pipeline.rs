//! List query pipeline
//!
//! Turns a freshly fetched collection into one page of results:
//! normalize timestamps, apply the free-text query and the view, then the
//! structured filters, sort, and finally slice the requested page. The
//! pipeline keeps no state between calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::{RawRecord, Record};
use crate::domain::resource::ResourceProfile;
use crate::error::QueryError;
use crate::query::filter::{FilterCondition, apply_filters};
use crate::query::paginate::{DEFAULT_PAGE_SIZE, apply_pagination};
use crate::query::sort::{SortSpec, apply_sort};

/// View value that disables status narrowing
pub const ALL_VIEW: &str = "all";

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Options supplied by a list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    /// Free-text search across the resource's searchable fields
    #[serde(default)]
    pub query: Option<String>,

    /// Status bucket; `None` or `"all"` shows every status
    #[serde(default)]
    pub view: Option<String>,

    #[serde(default)]
    pub filters: Vec<FilterCondition>,

    #[serde(default)]
    pub sort: Option<SortSpec>,

    /// Zero-based page index
    #[serde(default)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            query: None,
            view: None,
            filters: Vec::new(),
            sort: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListOptions {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn with_filter(mut self, condition: FilterCondition) -> Self {
        self.filters.push(condition);
        self
    }

    pub fn sorted_by(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_page(mut self, page: i64, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Reject pagination input that can never produce a page
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page < 0 {
            return Err(QueryError::NegativePage(self.page));
        }
        if self.page_size == 0 {
            return Err(QueryError::ZeroPageSize);
        }
        Ok(())
    }
}

/// One page of results plus the pre-pagination match count
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub items: Vec<Record>,
    pub total_count: usize,
}

/// Whether any searchable field contains the query, ignoring case
///
/// An absent or empty query matches every record.
pub fn matches_query(record: &Record, profile: &ResourceProfile, query: Option<&str>) -> bool {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return true;
    };
    let needle = query.to_lowercase();

    profile.searchable_fields.iter().any(|field| {
        record
            .text(field)
            .is_some_and(|value| value.to_lowercase().contains(&needle))
    })
}

/// Whether the record's status equals the view
pub fn matches_view(record: &Record, profile: &ResourceProfile, view: Option<&str>) -> bool {
    let Some(view) = view.filter(|v| *v != ALL_VIEW) else {
        return true;
    };

    match record.raw(profile.status_field) {
        Some(Value::String(status)) => status == view,
        Some(Value::Number(status)) => status.to_string() == view,
        Some(Value::Bool(status)) => status.to_string() == view,
        _ => false,
    }
}

/// Run the full list pipeline over a fetched collection
///
/// # Errors
/// Fails on invalid pagination input or on any record whose timestamps do
/// not parse; no partial result is returned.
pub fn run_pipeline(
    raw: Vec<RawRecord>,
    profile: &ResourceProfile,
    options: &ListOptions,
) -> Result<QueryResult, QueryError> {
    options.validate()?;

    let records = raw
        .into_iter()
        .map(Record::from_raw)
        .collect::<Result<Vec<_>, _>>()?;

    let queried: Vec<Record> = records
        .into_iter()
        .filter(|record| {
            matches_query(record, profile, options.query.as_deref())
                && matches_view(record, profile, options.view.as_deref())
        })
        .collect();

    let filtered = apply_filters(&queried, &options.filters);
    let sorted = apply_sort(&filtered, options.sort.as_ref());
    let items = apply_pagination(&sorted, options.page, options.page_size)?;

    Ok(QueryResult {
        items,
        total_count: filtered.len(),
    })
}
