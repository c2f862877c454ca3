use crate::calendar::model::{CalendarEvent, EventKind, EventSource};
use crate::domain::{GameSide, TeamId};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Event-type toggles; both on by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeFilter {
    pub games: bool,
    pub trainings: bool,
}

impl Default for EventTypeFilter {
    fn default() -> Self {
        Self {
            games: true,
            trainings: true,
        }
    }
}

/// Team allow-lists, evaluated independently for the tenant's own
/// side and the opponent side. An empty list means "no team filter",
/// never "show nothing".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamFilter {
    pub tenant_teams: Vec<TeamId>,
    pub opponent_teams: Vec<TeamId>,
}

/// Date-range presets. `Custom` bounds are inclusive; a single set
/// bound filters on that bound alone, none set passes everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "preset", rename_all = "kebab-case")]
pub enum DateRangeFilter {
    Today,
    ThisWeek,
    ThisMonth,
    Upcoming,
    Past,
    Custom {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

/// Declarative description of which events should be visible.
///
/// Held in UI state by the embedding screen; the default spec shows
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub event_types: EventTypeFilter,
    pub teams: TeamFilter,
    pub date_range: Option<DateRangeFilter>,
}

/// A filter dimension that is currently non-default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterDimension {
    EventType,
    Teams,
    DateRange,
}

/// Counts and active dimensions, used purely for UI badges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub total: usize,
    pub filtered_out: usize,
    pub active: Vec<FilterDimension>,
}

/// The reduced event list plus its summary
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub events: Vec<CalendarEvent>,
    pub summary: FilterSummary,
}

/// Apply a filter spec to a list of events.
///
/// Filtering order: event-type toggle, then team allow-lists, then the
/// date-range preset. The input order is preserved and events are only
/// removed, never reordered, so applying the same spec twice yields an
/// identical list. `today` is passed explicitly to keep the relative
/// presets testable.
pub fn apply(events: &[CalendarEvent], spec: &FilterSpec, today: NaiveDate) -> FilterOutcome {
    let filtered: Vec<CalendarEvent> = events
        .iter()
        .filter(|event| passes_type(event, &spec.event_types))
        .filter(|event| passes_teams(event, &spec.teams))
        .filter(|event| {
            spec.date_range
                .map_or(true, |range| passes_date(event, range, today))
        })
        .cloned()
        .collect();

    let summary = FilterSummary {
        total: events.len(),
        filtered_out: events.len() - filtered.len(),
        active: active_dimensions(spec),
    };

    FilterOutcome {
        events: filtered,
        summary,
    }
}

/// Rebuild a previously filtered subset against the latest event list.
///
/// Events are matched by id and returned as a fresh array in the order
/// of `latest`; nothing mutates a shared list in place, so renders on
/// both sides keep their own immutable arrays.
pub fn reconcile(latest: &[CalendarEvent], previous: &[CalendarEvent]) -> Vec<CalendarEvent> {
    let keep: HashSet<&str> = previous.iter().map(|event| event.id.as_str()).collect();
    latest
        .iter()
        .filter(|event| keep.contains(event.id.as_str()))
        .cloned()
        .collect()
}

fn passes_type(event: &CalendarEvent, types: &EventTypeFilter) -> bool {
    match event.kind() {
        EventKind::Game => types.games,
        EventKind::Training => types.trainings,
    }
}

fn passes_teams(event: &CalendarEvent, teams: &TeamFilter) -> bool {
    match &event.source {
        EventSource::Game(game) => {
            let (own, opponent) = match game.tenant_side {
                Some(GameSide::Away) => (&game.away_team, &game.home_team),
                _ => (&game.home_team, &game.away_team),
            };
            allowed(&teams.tenant_teams, &own.id) && allowed(&teams.opponent_teams, &opponent.id)
        }
        // Trainings have no opponent; the opponent list never excludes them
        EventSource::Training(training) => allowed(&teams.tenant_teams, &training.team.id),
    }
}

fn allowed(list: &[TeamId], id: &TeamId) -> bool {
    list.is_empty() || list.contains(id)
}

fn passes_date(event: &CalendarEvent, range: DateRangeFilter, today: NaiveDate) -> bool {
    let date = event.start.date();
    match range {
        DateRangeFilter::Today => date == today,
        DateRangeFilter::ThisWeek => {
            let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
            date >= monday && date <= monday + Duration::days(6)
        }
        DateRangeFilter::ThisMonth => date.year() == today.year() && date.month() == today.month(),
        // Upcoming includes events starting exactly today
        DateRangeFilter::Upcoming => date >= today,
        // Past excludes today
        DateRangeFilter::Past => date < today,
        DateRangeFilter::Custom { from, to } => {
            from.map_or(true, |from| date >= from) && to.map_or(true, |to| date <= to)
        }
    }
}

fn active_dimensions(spec: &FilterSpec) -> Vec<FilterDimension> {
    let mut active = Vec::new();
    if !(spec.event_types.games && spec.event_types.trainings) {
        active.push(FilterDimension::EventType);
    }
    if !spec.teams.tenant_teams.is_empty() || !spec.teams.opponent_teams.is_empty() {
        active.push(FilterDimension::Teams);
    }
    if spec.date_range.is_some() {
        active.push(FilterDimension::DateRange);
    }
    active
}
