use crate::calendar::model::{
    group_description, CalendarEvent, CompetitionType, DisplayDetails, EventKind, EventSource,
    TeamBadge,
};
use crate::calendar::time::{combine, default_end, parse_time};
use crate::config::Config;
use crate::domain::{Game, GameSide, TenantContext, Training};
use crate::error::{transform_error, CalResult};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::error;

/// Title of a training whose team has no group description
pub const GENERIC_TRAINING_TITLE: &str = "Training";

/// Title of a placeholder event substituted for an untransformable record
pub const PLACEHOLDER_TITLE: &str = "Unavailable entry";

/// Transform all records of a fetch window into calendar events.
///
/// Output order follows input order: all games first, then all
/// trainings. Use [`sort_events`] for display order.
pub fn transform(
    games: &[Game],
    trainings: &[Training],
    ctx: &TenantContext,
    config: &Config,
) -> Vec<CalendarEvent> {
    let mut events = events_from_games(games, ctx, config);
    events.extend(events_from_trainings(trainings, ctx, config));
    events
}

/// Transform game records into calendar events.
///
/// A record that fails to transform degrades to an error-flagged
/// placeholder instead of aborting the batch, so the output always has
/// the same length as the input.
pub fn events_from_games(
    games: &[Game],
    ctx: &TenantContext,
    config: &Config,
) -> Vec<CalendarEvent> {
    games
        .iter()
        .map(|game| {
            game_event(game, ctx, config)
                .unwrap_or_else(|e| placeholder_event(EventSource::Game(game.clone()), config, &e))
        })
        .collect()
}

/// Transform training records into calendar events, degrading failed
/// records to placeholders the same way as [`events_from_games`].
pub fn events_from_trainings(
    trainings: &[Training],
    _ctx: &TenantContext,
    config: &Config,
) -> Vec<CalendarEvent> {
    trainings
        .iter()
        .map(|training| {
            training_event(training, config).unwrap_or_else(|e| {
                placeholder_event(EventSource::Training(training.clone()), config, &e)
            })
        })
        .collect()
}

/// Sort events for display: by start time, games before trainings at
/// equal start. Stable, so input order breaks remaining ties.
pub fn sort_events(events: &mut [CalendarEvent]) {
    events.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.kind().sort_rank().cmp(&b.kind().sort_rank()))
    });
}

fn game_event(game: &Game, ctx: &TenantContext, config: &Config) -> CalResult<CalendarEvent> {
    let date = parse_record_date(&game.date)?;
    let start = combine(date, &game.start_time);
    let end = event_end(date, start, game.end_time.as_deref(), EventKind::Game, config);

    let competition = game
        .competition_type
        .as_deref()
        .and_then(CompetitionType::parse);

    // Group description follows the tenant's own team when the view
    // knows which side that is
    let own_team = match game.tenant_side {
        Some(GameSide::Away) => &game.away_team,
        _ => &game.home_team,
    };

    let color = competition
        .as_ref()
        .map(|c| c.color.clone())
        .or_else(|| own_team.color.clone());

    let details = DisplayDetails {
        home_team: Some(TeamBadge::from(&game.home_team)),
        away_team: Some(TeamBadge::from(&game.away_team)),
        group: group_description(own_team),
        competition,
        location: game.location.clone(),
    };

    Ok(CalendarEvent {
        id: CalendarEvent::event_id(EventKind::Game, &game.id),
        title: game_title(game, ctx, config),
        start,
        end,
        all_day: false,
        color,
        details: Some(details),
        source: EventSource::Game(game.clone()),
    })
}

fn training_event(training: &Training, config: &Config) -> CalResult<CalendarEvent> {
    let date = parse_record_date(&training.date)?;
    let start = combine(date, &training.start_time);
    let end = event_end(
        date,
        start,
        training.end_time.as_deref(),
        EventKind::Training,
        config,
    );

    let group = group_description(&training.team);
    let title = match &group {
        Some(group) => format!("{} {}", GENERIC_TRAINING_TITLE, group),
        None => GENERIC_TRAINING_TITLE.to_string(),
    };

    let details = DisplayDetails {
        home_team: None,
        away_team: None,
        group,
        competition: None,
        location: training.location.clone(),
    };

    Ok(CalendarEvent {
        id: CalendarEvent::event_id(EventKind::Training, &training.id),
        title,
        start,
        end,
        all_day: false,
        color: training.team.color.clone(),
        details: Some(details),
        source: EventSource::Training(training.clone()),
    })
}

/// Title for a game: tenant display name versus opponent when the
/// tenant side is known and the display name is configured, otherwise
/// home versus away.
fn game_title(game: &Game, ctx: &TenantContext, config: &Config) -> String {
    if config.use_tenant_display_name {
        if let (Some(display_name), Some(side)) = (&ctx.display_name, game.tenant_side) {
            return match side {
                GameSide::Home => format!("{} vs. {}", display_name, game.away_team.name),
                GameSide::Away => format!("{} vs. {}", game.home_team.name, display_name),
            };
        }
    }
    format!("{} vs. {}", game.home_team.name, game.away_team.name)
}

fn parse_record_date(raw: &str) -> CalResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| transform_error(&format!("Unparseable record date {:?}: {}", raw, e)))
}

/// End timestamp for a record: the explicit end time when it parses
/// and keeps `start <= end`, the kind's default duration otherwise.
fn event_end(
    date: NaiveDate,
    start: NaiveDateTime,
    end_time: Option<&str>,
    kind: EventKind,
    config: &Config,
) -> NaiveDateTime {
    end_time
        .and_then(parse_time)
        .and_then(|(hour, minute)| date.and_hms_opt(hour, minute, 0))
        .filter(|end| *end >= start)
        .unwrap_or_else(|| default_end(start, kind, config))
}

fn placeholder_event(source: EventSource, config: &Config, err: &crate::error::Error) -> CalendarEvent {
    let kind = source.kind();
    error!(
        "Failed to transform {} record {}: {}",
        kind,
        source.record_id(),
        err
    );

    // Placeholder pins to the epoch; the record's own date is what
    // failed to parse
    let start = NaiveDateTime::default();
    CalendarEvent {
        id: CalendarEvent::event_id(kind, source.record_id()),
        title: PLACEHOLDER_TITLE.to_string(),
        start,
        end: start,
        all_day: true,
        color: Some(config.error_color.clone()),
        details: None,
        source,
    }
}
