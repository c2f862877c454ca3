use crate::calendar::model::CalendarEvent;
use crate::domain::{DateWindow, SeasonId, TenantContext, TenantId};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::time::{Duration, Instant};

/// Strongly-typed cache key for one fetched month.
///
/// Keying on the tuple instead of a formatted "yyyy-MM" string keeps
/// the fetch and prefetch call sites from drifting apart; the string
/// form only survives in `Display` for log lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonthKey {
    pub tenant: TenantId,
    pub season: SeasonId,
    /// First day of the month
    pub month_start: NaiveDate,
}

impl MonthKey {
    /// Key for the month containing `date`
    pub fn new(tenant: TenantId, season: SeasonId, date: NaiveDate) -> Self {
        Self {
            tenant,
            season,
            month_start: date.with_day(1).unwrap_or(date),
        }
    }

    /// Key for the month containing `date` in the given tenant scope
    pub fn for_context(ctx: &TenantContext, date: NaiveDate) -> Self {
        Self::new(ctx.tenant_id.clone(), ctx.season_id.clone(), date)
    }

    /// The month immediately after this one, same tenant and season
    pub fn next_month(&self) -> Self {
        Self {
            tenant: self.tenant.clone(),
            season: self.season.clone(),
            month_start: self.window().next_month().start,
        }
    }

    /// The date window this key covers
    pub fn window(&self) -> DateWindow {
        DateWindow::month_of(self.month_start)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.tenant,
            self.season,
            self.month_start.format("%Y-%m")
        )
    }
}

/// One cached month of transformed events
#[derive(Debug, Clone)]
pub struct CachedMonth {
    pub events: Vec<CalendarEvent>,
    pub fetched_at: Instant,
}

impl CachedMonth {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self {
            events,
            fetched_at: Instant::now(),
        }
    }

    /// Whether the entry is still inside the freshness window. Stale
    /// entries simply trigger a refetch, never wrong data.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(month: u32) -> MonthKey {
        MonthKey::new(
            TenantId::new("club-1"),
            SeasonId::new("2024-25"),
            NaiveDate::from_ymd_opt(2025, month, 15).unwrap(),
        )
    }

    #[test]
    fn test_key_normalizes_to_first_of_month() {
        assert_eq!(
            key(3).month_start,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_next_month_key() {
        let next = key(3).next_month();
        assert_eq!(
            next.month_start,
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
        );
        assert_eq!(next.tenant, key(3).tenant);
        assert_eq!(next.season, key(3).season);
    }

    #[test]
    fn test_display_uses_month_format() {
        assert_eq!(key(3).to_string(), "club-1/2024-25/2025-03");
    }

    #[test]
    fn test_same_month_days_collide() {
        let a = MonthKey::new(
            TenantId::new("club-1"),
            SeasonId::new("2024-25"),
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
        );
        assert_eq!(a, key(3));
    }

    #[test]
    fn test_freshness() {
        let entry = CachedMonth::new(Vec::new());
        assert!(entry.is_fresh(Duration::from_secs(60)));
        assert!(!entry.is_fresh(Duration::ZERO));
    }
}
