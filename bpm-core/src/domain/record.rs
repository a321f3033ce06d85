//! Record domain types
//!
//! A record is one entity (install, lead, customer) as delivered by the BPM
//! backend. Fields are kept as loose JSON except for the two temporal fields,
//! which are parsed eagerly so that sorting and filtering on dates never sees
//! corrupted input.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::QueryError;

/// Record as received over the wire, before normalization
pub type RawRecord = Map<String, Value>;

/// Creation timestamp field
pub const CREATE_DATE: &str = "create_date";

/// Last modification timestamp field
pub const LAST_UPDATED: &str = "last_updated";

/// Offset layouts RFC 3339 rejects: `+hhmm`, hour-only `+hh`, space
/// separator and the basic (undelimited) form
const OFFSET_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y%m%dT%H%M%S%.f%#z",
];

/// Naive layouts accepted after the offset forms fail, interpreted as UTC
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO 8601 timestamp
///
/// Accepts RFC 3339, ISO 8601 offsets written as `+hhmm` or `+hh`, the basic
/// `YYYYMMDDTHHMMSS` form, naive date-times (read as UTC) and bare calendar
/// dates (midnight UTC). Returns `None`
/// for anything else.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(input, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

fn parse_field(fields: &RawRecord, field: &str) -> Result<DateTime<Utc>, QueryError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(QueryError::MissingTimestamp {
            field: field.to_string(),
        }),
        Some(Value::String(text)) => {
            parse_timestamp(text).ok_or_else(|| QueryError::InvalidTimestamp {
                field: field.to_string(),
                value: text.clone(),
            })
        }
        Some(other) => Err(QueryError::InvalidTimestamp {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Typed view of a single record field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
    Date(DateTime<Utc>),
}

impl<'a> FieldValue<'a> {
    /// Map a JSON value to a comparable field value
    ///
    /// `null`, arrays and objects have no comparable value.
    pub fn from_json(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(FieldValue::Text(text)),
            Value::Number(number) => number.as_f64().map(FieldValue::Number),
            Value::Bool(flag) => Some(FieldValue::Bool(*flag)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// A normalized record
///
/// `create_date` and `last_updated` are guaranteed to be valid timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: RawRecord,
    create_date: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl Record {
    /// Normalize a raw record, parsing its temporal fields
    ///
    /// # Errors
    /// Returns an error if either temporal field is absent, null, or not a
    /// recognizable ISO 8601 timestamp.
    pub fn from_raw(fields: RawRecord) -> Result<Self, QueryError> {
        let create_date = parse_field(&fields, CREATE_DATE)?;
        let last_updated = parse_field(&fields, LAST_UPDATED)?;

        Ok(Self {
            fields,
            create_date,
            last_updated,
        })
    }

    /// Server-assigned identifier, if any
    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }

    pub fn create_date(&self) -> DateTime<Utc> {
        self.create_date
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Whether the record carries the field at all (even as `null`)
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Raw JSON value of a field
    pub fn raw(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// String value of a field, if it is a string
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Typed value of a field
    ///
    /// Temporal fields always come back as [`FieldValue::Date`].
    pub fn get(&self, field: &str) -> Option<FieldValue<'_>> {
        match field {
            CREATE_DATE => Some(FieldValue::Date(self.create_date)),
            LAST_UPDATED => Some(FieldValue::Date(self.last_updated)),
            _ => self.fields.get(field).and_then(FieldValue::from_json),
        }
    }

    /// Underlying field map, with temporal fields in their original text
    pub fn fields(&self) -> &RawRecord {
        &self.fields
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            match key.as_str() {
                CREATE_DATE => map.serialize_entry(
                    key,
                    &self.create_date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                )?,
                LAST_UPDATED => map.serialize_entry(
                    key,
                    &self.last_updated.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                )?,
                _ => map.serialize_entry(key, value)?,
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_timestamp("2023-04-05T10:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 4, 5, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_compact_and_hour_only_offsets() {
        let expected = Utc.with_ymd_and_hms(2023, 4, 5, 8, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2023-04-05T10:30:00+0200"), Some(expected));
        assert_eq!(parse_timestamp("2023-04-05T10:30:00+02"), Some(expected));
        assert_eq!(parse_timestamp("2023-04-05 10:30:00+02"), Some(expected));
        assert_eq!(parse_timestamp("2023-04-05 10:30:00.000+02"), Some(expected));
    }

    #[test]
    fn test_parse_basic_format() {
        let expected = Utc.with_ymd_and_hms(2023, 4, 5, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("20230405T103000Z"), Some(expected));
        assert_eq!(parse_timestamp("20230405T123000+0200"), Some(expected));
    }

    #[test]
    fn test_offset_record_parses() {
        let record = Record::from_raw(raw(json!({
            "id": 1,
            "create_date": "2023-04-05 10:30:00+02",
            "last_updated": "2023-04-05T10:30:00+0200",
        })))
        .unwrap();
        assert_eq!(record.create_date(), record.last_updated());
    }

    #[test]
    fn test_parse_zulu_with_fraction() {
        let parsed = parse_timestamp("2023-04-05T10:30:00.250Z").unwrap();
        assert_eq!(parsed.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn test_parse_naive_forms_as_utc() {
        let expected = Utc.with_ymd_and_hms(2023, 4, 5, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2023-04-05T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-04-05 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-04-05T10:30"), Some(expected));
    }

    #[test]
    fn test_parse_bare_date() {
        let parsed = parse_timestamp("2023-04-05").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 4, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2023-13-45"), None);
    }

    #[test]
    fn test_parsing_preserves_iso_order() {
        let mut texts = vec![
            "2022-12-31T23:59:59Z",
            "2021-01-01T00:00:00Z",
            "2022-06-15T12:00:00Z",
            "2022-06-15T11:59:59Z",
        ];
        let mut parsed: Vec<_> = texts.iter().map(|t| parse_timestamp(t).unwrap()).collect();

        texts.sort();
        parsed.sort();

        let reparsed: Vec<_> = texts.iter().map(|t| parse_timestamp(t).unwrap()).collect();
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn test_from_raw_parses_temporal_fields() {
        let record = Record::from_raw(raw(json!({
            "id": 7,
            "name": "Roof array",
            "create_date": "2023-01-01T00:00:00Z",
            "last_updated": "2023-02-01T00:00:00Z",
        })))
        .unwrap();

        assert_eq!(record.id(), Some(&json!(7)));
        assert!(record.create_date() < record.last_updated());
        assert_eq!(
            record.get(CREATE_DATE),
            Some(FieldValue::Date(record.create_date()))
        );
        assert_eq!(record.get("name"), Some(FieldValue::Text("Roof array")));
    }

    #[test]
    fn test_from_raw_rejects_missing_timestamp() {
        let err = Record::from_raw(raw(json!({
            "create_date": "2023-01-01",
        })))
        .unwrap_err();

        assert_eq!(
            err,
            QueryError::MissingTimestamp {
                field: LAST_UPDATED.to_string()
            }
        );
    }

    #[test]
    fn test_from_raw_rejects_unparsable_timestamp() {
        let err = Record::from_raw(raw(json!({
            "create_date": "not a date",
            "last_updated": "2023-01-01",
        })))
        .unwrap_err();

        assert!(matches!(err, QueryError::InvalidTimestamp { field, .. } if field == CREATE_DATE));
    }

    #[test]
    fn test_from_raw_rejects_non_string_timestamp() {
        let err = Record::from_raw(raw(json!({
            "create_date": 1672531200,
            "last_updated": "2023-01-01",
        })))
        .unwrap_err();

        assert!(matches!(err, QueryError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_field_value_mapping() {
        let record = Record::from_raw(raw(json!({
            "create_date": "2023-01-01",
            "last_updated": "2023-01-01",
            "kw": 6.6,
            "paid": true,
            "notes": null,
            "panels": [1, 2],
        })))
        .unwrap();

        assert_eq!(record.get("kw"), Some(FieldValue::Number(6.6)));
        assert_eq!(record.get("paid"), Some(FieldValue::Bool(true)));
        assert_eq!(record.get("notes"), None);
        assert!(record.has_field("notes"));
        assert_eq!(record.get("panels"), None);
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_serialize_normalizes_timestamps() {
        let record = Record::from_raw(raw(json!({
            "id": 1,
            "create_date": "2023-01-01",
            "last_updated": "2023-01-02 08:00:00",
        })))
        .unwrap();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], json!(1));
        assert_eq!(value["create_date"], json!("2023-01-01T00:00:00Z"));
        assert_eq!(value["last_updated"], json!("2023-01-02T08:00:00Z"));
    }
}
