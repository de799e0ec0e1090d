//! Shared validation helpers for inbound HTTP adapters.

use serde::{Deserialize, Deserializer, de};

use crate::domain::{DeliveryTime, Error};

/// Parse a decimal path segment into a raw identifier.
///
/// Only the integer syntax is checked here; positivity is a domain rule
/// enforced by `ProductId::new` and `OrderId::new`.
pub(crate) fn parse_path_id(raw: &str) -> Result<i64, Error> {
    raw.parse::<i64>()
        .map_err(|err| Error::malformed_id(raw, err))
}

/// Deserialise a delivery time from its `YYYY-MM-DDTHH:MM:SSZ` wire form.
pub(crate) fn deserialize_delivery_time<'de, D>(deserializer: D) -> Result<DeliveryTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Timed {
        #[serde(deserialize_with = "deserialize_delivery_time")]
        time: DeliveryTime,
    }

    #[rstest]
    #[case("1", 1)]
    #[case("0", 0)]
    #[case("-12", -12)]
    #[case("9223372036854775807", i64::MAX)]
    fn integer_segments_parse(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_path_id(raw).expect("integer parses"), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    #[case("9223372036854775808")]
    fn non_integer_segments_are_bare_bad_requests(#[case] raw: &str) {
        let err = parse_path_id(raw).expect_err("segment must be rejected");
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert!(err.message().is_empty());
    }

    #[rstest]
    fn delivery_time_deserialises_from_wire_format() {
        let timed: Timed =
            serde_json::from_str(r#"{"time": "2021-11-03T17:45:00Z"}"#).expect("valid payload");
        assert_eq!(timed.time.to_string(), "2021-11-03T17:45:00Z");
    }

    #[rstest]
    #[case(r#"{"time": "2021-11-03 17:45:00"}"#)]
    #[case(r#"{"time": "2021-11-03T17:45:00+01:00"}"#)]
    #[case(r#"{"time": 1636000000}"#)]
    fn malformed_delivery_times_fail_to_deserialise(#[case] payload: &str) {
        assert!(serde_json::from_str::<Timed>(payload).is_err());
    }
}
