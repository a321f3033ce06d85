//! Structured field filters
//!
//! A filter descriptor is an ordered list of conditions that must all hold.
//! Conditions never fail: a missing field or an operator the engine does not
//! understand simply excludes the record.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::{FieldValue, Record, parse_timestamp};

/// Comparison applied by a filter condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Equals,
    NotEqual,
    GreaterThan,
    LessThan,
    IsAfter,
    IsBefore,
    IsBlank,
    IsPresent,
    /// Any operator name the engine does not know; matches nothing
    #[serde(other)]
    Unsupported,
}

impl FromStr for FilterOperator {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_value(Value::String(s.to_string()))
            .unwrap_or(FilterOperator::Unsupported))
    }
}

/// One `{ field, operator, value }` condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: Value,
}

impl FilterCondition {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Whether the record satisfies this condition
    pub fn matches(&self, record: &Record) -> bool {
        let Some(raw) = record.raw(&self.field) else {
            return false;
        };

        match self.operator {
            FilterOperator::IsBlank => is_blank(raw),
            FilterOperator::IsPresent => !is_blank(raw),
            _ => self.compare(record.get(&self.field)),
        }
    }

    fn compare(&self, actual: Option<FieldValue<'_>>) -> bool {
        let Some(actual) = actual else {
            return false;
        };

        match self.operator {
            FilterOperator::Contains => text_pair(actual, &self.value)
                .is_some_and(|(actual, expected)| actual.contains(&expected)),
            FilterOperator::NotContains => text_pair(actual, &self.value)
                .is_some_and(|(actual, expected)| !actual.contains(&expected)),
            FilterOperator::StartsWith => text_pair(actual, &self.value)
                .is_some_and(|(actual, expected)| actual.starts_with(&expected)),
            FilterOperator::EndsWith => text_pair(actual, &self.value)
                .is_some_and(|(actual, expected)| actual.ends_with(&expected)),
            FilterOperator::Equals => values_equal(actual, &self.value),
            FilterOperator::NotEqual => !values_equal(actual, &self.value),
            FilterOperator::GreaterThan => {
                ordered(actual, &self.value) == Some(Ordering::Greater)
            }
            FilterOperator::LessThan => ordered(actual, &self.value) == Some(Ordering::Less),
            FilterOperator::IsAfter => {
                date_ordered(actual, &self.value) == Some(Ordering::Greater)
            }
            FilterOperator::IsBefore => date_ordered(actual, &self.value) == Some(Ordering::Less),
            FilterOperator::IsBlank => false,
            FilterOperator::IsPresent => true,
            FilterOperator::Unsupported => false,
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

/// Lowercased text of the record value and the filter value
fn text_pair(actual: FieldValue<'_>, expected: &Value) -> Option<(String, String)> {
    let actual = match actual {
        FieldValue::Text(text) => text.to_lowercase(),
        FieldValue::Number(number) => number.to_string(),
        FieldValue::Bool(_) | FieldValue::Date(_) => return None,
    };
    let expected = match expected {
        Value::String(text) => text.to_lowercase(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    Some((actual, expected))
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn values_equal(actual: FieldValue<'_>, expected: &Value) -> bool {
    match actual {
        FieldValue::Number(number) => numeric(expected).is_some_and(|other| other == number),
        FieldValue::Date(date) => expected
            .as_str()
            .and_then(parse_timestamp)
            .is_some_and(|other| other == date),
        FieldValue::Bool(flag) => match expected {
            Value::Bool(other) => *other == flag,
            Value::String(text) => text == if flag { "true" } else { "false" },
            _ => false,
        },
        FieldValue::Text(text) => match expected {
            Value::String(other) => text == other,
            Value::Number(number) => text == number.to_string(),
            _ => false,
        },
    }
}

fn ordered(actual: FieldValue<'_>, expected: &Value) -> Option<Ordering> {
    match actual {
        FieldValue::Number(number) => numeric(expected).and_then(|other| number.partial_cmp(&other)),
        FieldValue::Text(text) => {
            let number: f64 = text.trim().parse().ok()?;
            numeric(expected).and_then(|other| number.partial_cmp(&other))
        }
        FieldValue::Date(_) => date_ordered(actual, expected),
        FieldValue::Bool(_) => None,
    }
}

fn date_ordered(actual: FieldValue<'_>, expected: &Value) -> Option<Ordering> {
    let actual = match actual {
        FieldValue::Date(date) => date,
        FieldValue::Text(text) => parse_timestamp(text)?,
        FieldValue::Number(_) | FieldValue::Bool(_) => return None,
    };
    let expected = parse_timestamp(expected.as_str()?)?;
    Some(actual.cmp(&expected))
}

/// Keep the records that satisfy every condition
///
/// An empty descriptor returns the input unchanged. The input is never
/// modified.
pub fn apply_filters(records: &[Record], filters: &[FilterCondition]) -> Vec<Record> {
    if filters.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| filters.iter().all(|condition| condition.matches(record)))
        .cloned()
        .collect()
}
