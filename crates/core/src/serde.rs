//! Serde helpers for records coming back from the remote store.
//!
//! Form-backed columns are frequently stored as empty strings instead of
//! `null`, and JSON array columns may be `null` for rows created before the
//! column existed. These helpers normalize both cases.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating blank strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional NaiveDate, treating blank strings as None.
///
/// Accepts `YYYY-MM-DD` and full timestamps (the date part is kept).
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_date(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Deserialize an optional NaiveTime, treating blank strings as None.
/// Accepts formats: HH:MM or HH:MM:SS
pub fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => NaiveTime::parse_from_str(&s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Deserialize `null` as the type's default value.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    // Timestamp columns look like 2025-01-15T10:00:00+00:00; keep the date part.
    let date_part = s.split('T').next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        notes: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        due_date: Option<NaiveDate>,
        #[serde(default, deserialize_with = "deserialize_optional_time")]
        start_time: Option<NaiveTime>,
        #[serde(default, deserialize_with = "deserialize_null_default")]
        tags: Vec<String>,
    }

    #[test]
    fn test_blank_string_is_none() {
        let row: Row = serde_json::from_str(r#"{"notes": "   "}"#).unwrap();
        assert_eq!(row.notes, None);

        let row: Row = serde_json::from_str(r#"{"notes": "paid in cash"}"#).unwrap();
        assert_eq!(row.notes, Some("paid in cash".to_string()));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let row: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(
            row,
            Row {
                notes: None,
                due_date: None,
                start_time: None,
                tags: Vec::new(),
            }
        );
    }

    #[test]
    fn test_date_accepts_plain_and_timestamp() {
        let row: Row = serde_json::from_str(r#"{"due_date": "2025-01-15"}"#).unwrap();
        assert_eq!(row.due_date, NaiveDate::from_ymd_opt(2025, 1, 15));

        let row: Row =
            serde_json::from_str(r#"{"due_date": "2025-01-15T10:00:00+00:00"}"#).unwrap();
        assert_eq!(row.due_date, NaiveDate::from_ymd_opt(2025, 1, 15));

        let row: Row = serde_json::from_str(r#"{"due_date": ""}"#).unwrap();
        assert_eq!(row.due_date, None);
    }

    #[test]
    fn test_invalid_date_is_error() {
        let result: Result<Row, _> = serde_json::from_str(r#"{"due_date": "next friday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_time_accepts_both_formats() {
        let row: Row = serde_json::from_str(r#"{"start_time": "14:30"}"#).unwrap();
        assert_eq!(row.start_time, NaiveTime::from_hms_opt(14, 30, 0));

        let row: Row = serde_json::from_str(r#"{"start_time": "14:30:45"}"#).unwrap();
        assert_eq!(row.start_time, NaiveTime::from_hms_opt(14, 30, 45));
    }

    #[test]
    fn test_null_array_is_empty() {
        let row: Row = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(row.tags.is_empty());

        let row: Row = serde_json::from_str(r#"{"tags": ["travel"]}"#).unwrap();
        assert_eq!(row.tags, vec!["travel".to_string()]);
    }
}
