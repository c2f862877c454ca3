use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a tenant organization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub String);

/// Identifier of a season within a tenant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonId(pub String);

/// Identifier of a team
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TenantId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }
}

impl SeasonId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }
}

impl TeamId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A team reference as delivered by the data-access layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Display color, "#RRGGBB"
    pub color: Option<String>,
    pub age_group: Option<String>,
    pub gender: Option<String>,
    pub skill_level: Option<String>,
}

impl Team {
    /// Minimal team with only an id and a name
    pub fn named<S: Into<String>>(id: S, name: S) -> Self {
        Self {
            id: TeamId::new(id),
            name: name.into(),
            color: None,
            age_group: None,
            gender: None,
            skill_level: None,
        }
    }
}

/// Which side of a game is played by the tenant's own team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSide {
    Home,
    Away,
}

/// A game record owned by the external data layer.
///
/// Date and time fields arrive as raw strings and are only parsed
/// during event transformation, so a malformed record can degrade to a
/// placeholder instead of failing the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    /// ISO date, "YYYY-MM-DD"
    pub date: String,
    /// Wall-clock start, "HH:mm"
    pub start_time: String,
    /// Wall-clock end, "HH:mm"; missing means the default game duration applies
    pub end_time: Option<String>,
    pub home_team: Team,
    pub away_team: Team,
    /// Side played by the tenant's team, when the view can tell
    pub tenant_side: Option<GameSide>,
    pub location: Option<String>,
    /// Packed competition type, "Name#RRGGBB"
    pub competition_type: Option<String>,
}

/// A training record owned by the external data layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Training {
    pub id: String,
    /// ISO date, "YYYY-MM-DD"
    pub date: String,
    /// Wall-clock start, "HH:mm"
    pub start_time: String,
    /// Wall-clock end, "HH:mm"; missing means the default training duration applies
    pub end_time: Option<String>,
    pub team: Team,
    pub location: Option<String>,
}

/// Tenant and season scope passed explicitly into the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantContext {
    pub tenant_id: TenantId,
    pub season_id: SeasonId,
    /// Display name shown for the tenant's own team in game titles
    pub display_name: Option<String>,
}

/// A half-open date window: `start` inclusive, `end` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start + Months::new(1);
        Self { start, end }
    }

    /// The month window immediately after this one
    pub fn next_month(&self) -> Self {
        Self::month_of(self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_window() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        let window = DateWindow::month_of(date);

        assert_eq!(window.start, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert!(window.contains(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
        assert!(window.contains(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
        assert!(!window.contains(window.end));
    }

    #[test]
    fn test_next_month_crosses_year_boundary() {
        let december = DateWindow::month_of(NaiveDate::from_ymd_opt(2025, 12, 24).unwrap());
        let january = december.next_month();

        assert_eq!(january.start, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(january.end, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }
}
