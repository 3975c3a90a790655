use chrono::{DateTime, Utc};
use marketplace_core::{QueryError, QueryResult};

/// Inclusive `[start, end]` timestamp range. Construction rejects inverted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> QueryResult<Self> {
        if start > end {
            return Err(QueryError::invalid(format!(
                "startDate {start} is after endDate {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

/// Single-field sort direction. Ties keep the store's order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

pub fn validate_limit(limit: i64) -> QueryResult<i64> {
    if limit < 0 {
        return Err(QueryError::invalid(format!("limit must be >= 0, got {limit}")));
    }
    Ok(limit)
}

/// Minimum-count thresholds are non-negative counts.
pub fn validate_threshold(name: &str, value: i64) -> QueryResult<usize> {
    usize::try_from(value)
        .map_err(|_| QueryError::invalid(format!("{name} must be >= 0, got {value}")))
}
