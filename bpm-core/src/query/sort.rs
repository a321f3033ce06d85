//! Type-aware stable sorting
//!
//! Comparison rules per field type:
//! - numbers compare by numeric value (`f64::total_cmp`)
//! - dates compare chronologically
//! - text compares by Unicode code point, case-sensitive unless the sort
//!   spec asks for [`CaseSensitivity::Insensitive`]
//! - booleans order `false` before `true`
//!
//! Values of different types order by type rank: bool, number, text, date.
//! Records without a comparable value always sort last, whatever the
//! direction, and keep their relative order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::record::{FieldValue, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

/// Field and direction to order by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub case: CaseSensitivity,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
            case: CaseSensitivity::Sensitive,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
            case: CaseSensitivity::Sensitive,
        }
    }

    pub fn ignore_case(mut self) -> Self {
        self.case = CaseSensitivity::Insensitive;
        self
    }
}

fn type_rank(value: &FieldValue<'_>) -> u8 {
    match value {
        FieldValue::Bool(_) => 0,
        FieldValue::Number(_) => 1,
        FieldValue::Text(_) => 2,
        FieldValue::Date(_) => 3,
    }
}

fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>, case: CaseSensitivity) -> Ordering {
    match (a, b) {
        (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
        (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
        (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
        (FieldValue::Text(a), FieldValue::Text(b)) => match case {
            CaseSensitivity::Sensitive => a.cmp(b),
            CaseSensitivity::Insensitive => a.to_lowercase().cmp(&b.to_lowercase()),
        },
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Order records by the given spec
///
/// `None` keeps server-delivery order. The sort is stable.
pub fn apply_sort(records: &[Record], sort: Option<&SortSpec>) -> Vec<Record> {
    let mut sorted = records.to_vec();
    let Some(spec) = sort else {
        return sorted;
    };

    sorted.sort_by(|a, b| match (a.get(&spec.field), b.get(&spec.field)) {
        (Some(a), Some(b)) => {
            let ordering = compare_values(&a, &b, spec.case);
            match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    sorted
}
