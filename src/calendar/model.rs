use crate::domain::{Game, Team, Training};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Separator between the optional group description parts
pub const GROUP_SEPARATOR: &str = " · ";

/// Discriminant for the two kinds of calendar events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Game,
    Training,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Game => "game",
            EventKind::Training => "training",
        }
    }

    /// Sort rank at equal start time: games precede trainings
    pub(crate) fn sort_rank(&self) -> u8 {
        match self {
            EventKind::Game => 0,
            EventKind::Training => 1,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The domain record a calendar event was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "record")]
pub enum EventSource {
    Game(Game),
    Training(Training),
}

impl EventSource {
    pub fn kind(&self) -> EventKind {
        match self {
            EventSource::Game(_) => EventKind::Game,
            EventSource::Training(_) => EventKind::Training,
        }
    }

    /// The raw id of the underlying record
    pub fn record_id(&self) -> &str {
        match self {
            EventSource::Game(game) => &game.id,
            EventSource::Training(training) => &training.id,
        }
    }
}

/// Name and color of a team as shown on an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBadge {
    pub name: String,
    pub color: Option<String>,
}

impl From<&Team> for TeamBadge {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            color: team.color.clone(),
        }
    }
}

/// Competition type unpacked from its "Name#RRGGBB" wire form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionType {
    pub name: String,
    /// Display color including the leading '#'
    pub color: String,
}

impl CompetitionType {
    /// Parse a packed "Name#RRGGBB" competition-type string.
    ///
    /// Upstream sometimes writes a doubled separator ("Name##RRGGBB");
    /// those values are repaired by dropping the empty segment and
    /// re-joining the rest, so both forms parse to the same result. The
    /// repair is logged to keep the bad writes visible.
    pub fn parse(raw: &str) -> Option<Self> {
        let segments: Vec<&str> = raw.split('#').collect();
        if segments.len() < 2 {
            return None;
        }

        let repaired = segments.iter().skip(1).any(|segment| segment.is_empty());
        let parts: Vec<&str> = segments
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect();

        // The name itself may contain '#'; the color is always the last segment
        let (color, name_parts) = parts.split_last()?;
        if name_parts.is_empty() {
            return None;
        }

        if repaired {
            warn!("Repaired doubled separator in competition type {:?}", raw);
        }

        Some(Self {
            name: name_parts.join("#"),
            color: format!("#{}", color),
        })
    }

    /// Re-format into the packed wire form
    pub fn packed(&self) -> String {
        format!("{}#{}", self.name, self.color.trim_start_matches('#'))
    }
}

/// Derived, non-authoritative annotations used purely for rendering.
///
/// Computed once per transform and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayDetails {
    pub home_team: Option<TeamBadge>,
    pub away_team: Option<TeamBadge>,
    /// Formatted group description of the relevant team
    pub group: Option<String>,
    pub competition: Option<CompetitionType>,
    pub location: Option<String>,
}

/// The uniform, display-ready event shape derived from a domain record.
///
/// Invariant: `start <= end`. Events are created fresh on every fetch
/// and treated as immutable per render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Globally unique within one fetch window, prefixed by kind ("game-42")
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub color: Option<String>,
    pub details: Option<DisplayDetails>,
    pub source: EventSource,
}

impl CalendarEvent {
    pub fn kind(&self) -> EventKind {
        self.source.kind()
    }

    /// Build the prefixed event id for a record
    pub fn event_id(kind: EventKind, record_id: &str) -> String {
        format!("{}-{}", kind.as_str(), record_id)
    }
}

/// Format the optional age group, gender, and skill level of a team
/// into a single description, joining only the parts that are present.
pub fn group_description(team: &Team) -> Option<String> {
    let parts: Vec<&str> = [
        team.age_group.as_deref(),
        team.gender.as_deref(),
        team.skill_level.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(GROUP_SEPARATOR))
    }
}
