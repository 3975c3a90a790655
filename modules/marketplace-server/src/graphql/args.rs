//! Argument validation shared by the query modules.

use std::sync::Arc;

use async_graphql::{Context, Result};
use chrono::{DateTime, Utc};
use marketplace_core::ServerDeps;
use marketplace_domains::shared::{validate_limit, validate_threshold, DateRange};

use super::error::query_error;

/// Reject negative limits, then clamp to `[query] max_limit`.
pub fn bounded_limit(ctx: &Context<'_>, limit: i32) -> Result<i64> {
    let deps = ctx.data_unchecked::<Arc<ServerDeps>>();
    let limit = validate_limit(limit.into()).map_err(query_error)?;
    Ok(deps.clamp_limit(limit))
}

pub fn min_count(name: &str, value: i32) -> Result<usize> {
    validate_threshold(name, value.into()).map_err(query_error)
}

pub fn date_range(
    start: impl Into<DateTime<Utc>>,
    end: impl Into<DateTime<Utc>>,
) -> Result<DateRange> {
    DateRange::new(start.into(), end.into()).map_err(query_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn negative_threshold_is_rejected() {
        assert!(min_count("minFlagCount", -1).is_err());
        assert_eq!(min_count("minFlagCount", 3).unwrap(), 3);
    }

    #[test]
    fn equal_bounds_form_a_range() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let range = date_range(ts, ts).unwrap();
        assert!(range.contains(ts));
    }
}
