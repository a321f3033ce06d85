//! Argument parsers shared by CLI commands

use anyhow::{Result, anyhow};
use bpm_core::query::{FilterCondition, FilterOperator};
use serde_json::Value;

/// Interpret a command-line value as JSON when it parses, text otherwise
///
/// `12` becomes a number, `true` a boolean, `null` null; `Review` stays text.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parse a `FIELD:OPERATOR:VALUE` filter
///
/// The value may itself contain colons. It may be omitted for operators
/// that take none (`status:isBlank`).
pub fn parse_filter(s: &str) -> Result<FilterCondition> {
    let mut parts = s.splitn(3, ':');
    let field = parts
        .next()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| anyhow!("invalid FIELD:OPERATOR:VALUE: missing field in `{}`", s))?;
    let operator = parts
        .next()
        .ok_or_else(|| anyhow!("invalid FIELD:OPERATOR:VALUE: missing operator in `{}`", s))?;

    let parsed: FilterOperator = operator.parse()?;
    if parsed == FilterOperator::Unsupported {
        anyhow::bail!("unknown filter operator `{}`", operator);
    }

    let value = parts.next().map(parse_value).unwrap_or(Value::Null);
    Ok(FilterCondition::new(field, parsed, value))
}

/// Parse a single FIELD=value assignment
pub fn parse_assignment(s: &str) -> Result<(String, Value)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow!("invalid FIELD=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), parse_value(&s[pos + 1..])))
}
