//! Sales statistics domain model

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Maximum rows returned by the best-selling items report
pub const TOP_ITEMS_LIMIT: i64 = 20;

/// Date range request shared by all statistics endpoints
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct StatisticsRequest {
    /// ISO-8601 datetime, inclusive
    pub from_date: Option<String>,
    /// ISO-8601 datetime, inclusive
    pub to_date: Option<String>,
}

/// Validated, inclusive time range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Parse an ISO-8601 datetime with or without an offset. Naive values are read as UTC.
pub fn parse_iso_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|naive| naive.and_utc())
}

impl StatisticsRequest {
    /// `None` when a bound is missing, unparseable, or `from` is after `to`
    pub fn range(&self) -> Option<DateRange> {
        let from = parse_iso_datetime(self.from_date.as_deref()?)?;
        let to = parse_iso_datetime(self.to_date.as_deref()?)?;
        (from <= to).then_some(DateRange { from, to })
    }
}

/// Orders placed on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub occurence: i64,
}

/// Income on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DailyIncome {
    pub date: NaiveDate,
    pub income: f64,
}

/// Sales attributed to a named category or item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct NamedCount {
    pub name: String,
    pub occurence: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SalesStatistics {
    pub total: i64,
    pub per_day: Vec<DailyCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IncomeStatistics {
    pub total: f64,
    pub per_day: Vec<DailyIncome>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankingStatistics {
    pub total: i64,
    pub per_day: Vec<NamedCount>,
}
