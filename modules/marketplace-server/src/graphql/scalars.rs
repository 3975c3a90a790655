use async_graphql::{InputValueError, InputValueResult, Number, Scalar, ScalarType, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

fn from_millis<T: async_graphql::InputType>(
    millis: i64,
    scalar: &str,
) -> Result<DateTime<Utc>, InputValueError<T>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| InputValueError::custom(format!("{scalar} {millis} is out of range")))
}

/// Instant carried over the wire as integer epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub DateTime<Utc>);

#[Scalar(name = "Date")]
impl ScalarType for Date {
    fn parse(value: Value) -> InputValueResult<Self> {
        let Value::Number(n) = &value else {
            return Err(InputValueError::expected_type(value));
        };
        let millis = n
            .as_i64()
            .ok_or_else(|| InputValueError::custom(format!("Date must be an integer, got {n}")))?;
        from_millis(millis, "Date").map(Date)
    }

    fn to_value(&self) -> Value {
        Value::Number(Number::from(self.0.timestamp_millis()))
    }
}

impl From<DateTime<Utc>> for Date {
    fn from(ts: DateTime<Utc>) -> Self {
        Date(ts)
    }
}

impl From<Date> for DateTime<Utc> {
    fn from(date: Date) -> Self {
        date.0
    }
}

/// Instant carried over the wire as an ISO-8601 string.
///
/// Input accepts RFC 3339, an offset-less `YYYY-MM-DDTHH:MM:SS[.fff]` read as
/// UTC, a bare `YYYY-MM-DD` read as midnight UTC, or integer epoch
/// milliseconds. Output is always RFC 3339 in UTC with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    fn parse_str(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Some(ts.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

#[Scalar(name = "DateTime")]
impl ScalarType for Timestamp {
    fn parse(value: Value) -> InputValueResult<Self> {
        match value {
            Value::String(ref s) => Self::parse_str(s.trim()).map(Timestamp).ok_or_else(|| {
                InputValueError::custom(format!("DateTime must be an ISO-8601 string, got {s:?}"))
            }),
            Value::Number(ref n) => {
                let millis = n.as_i64().ok_or_else(|| {
                    InputValueError::custom(format!("DateTime millis must be an integer, got {n}"))
                })?;
                from_millis(millis, "DateTime").map(Timestamp)
            }
            other => Err(InputValueError::expected_type(other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(ts: DateTime<Utc>) -> Self {
        Timestamp(ts)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
