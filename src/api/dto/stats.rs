//! DTOs for the statistics endpoint.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, de};

/// Successful response of `GET /stats/{code}`.
#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub click_count: u64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Seconds(i64),
    Text(String),
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or Unix seconds, either as
/// a number or a numeric string.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Seconds(secs) => from_unix(secs).map_err(de::Error::custom),
        RawTimestamp::Text(text) => parse_timestamp(&text).map_err(de::Error::custom),
    }
}

fn from_unix(secs: i64) -> Result<DateTime<Utc>, String> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| format!("timestamp out of range: {secs}"))
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, String> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }

    if let Ok(secs) = text.parse::<i64>() {
        return from_unix(secs);
    }

    Err(format!("unrecognized timestamp: '{text}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> Result<StatsResponse, serde_json::Error> {
        serde_json::from_value(json)
    }

    #[test]
    fn test_created_at_rfc3339() {
        let stats = parse(serde_json::json!({
            "short_code": "abc",
            "click_count": 3,
            "created_at": "2024-01-15T10:30:00+02:00"
        }))
        .unwrap();

        assert_eq!(stats.created_at.to_rfc3339(), "2024-01-15T08:30:00+00:00");
        assert_eq!(stats.click_count, 3);
    }

    #[test]
    fn test_created_at_naive() {
        let stats = parse(serde_json::json!({
            "short_code": "abc",
            "click_count": 0,
            "created_at": "2024-01-15 10:30:00"
        }))
        .unwrap();

        assert_eq!(stats.created_at.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_created_at_unix_seconds() {
        let from_number = parse(serde_json::json!({
            "short_code": "abc",
            "click_count": 0,
            "created_at": 1_705_314_600
        }))
        .unwrap();
        let from_string = parse(serde_json::json!({
            "short_code": "abc",
            "click_count": 0,
            "created_at": "1705314600"
        }))
        .unwrap();

        assert_eq!(from_number.created_at, from_string.created_at);
        assert_eq!(from_number.created_at.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_created_at_garbage_is_rejected() {
        assert!(
            parse(serde_json::json!({
                "short_code": "abc",
                "click_count": 0,
                "created_at": "yesterday"
            }))
            .is_err()
        );
    }

    #[test]
    fn test_negative_click_count_is_rejected() {
        assert!(
            parse(serde_json::json!({
                "short_code": "abc",
                "click_count": -1,
                "created_at": "2024-01-15T10:30:00Z"
            }))
            .is_err()
        );
    }
}
