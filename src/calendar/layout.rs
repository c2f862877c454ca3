use crate::calendar::model::CalendarEvent;
use crate::calendar::transform::sort_events;
use crate::domain::DateWindow;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;

/// Measured cell geometry driving the per-cell visible cap.
///
/// Layout is a pure function of the latest measurement: on viewport
/// resize the embedding screen re-measures and recomputes the grid,
/// and the most recent measurement wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub cell_height_px: u32,
    pub event_row_px: u32,
    pub header_px: u32,
}

impl CellMetrics {
    /// How many event rows fit below the day-number header
    pub fn visible_rows(&self) -> usize {
        if self.event_row_px == 0 {
            return 0;
        }
        (self.cell_height_px.saturating_sub(self.header_px) / self.event_row_px) as usize
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_height_px: 120,
            event_row_px: 22,
            header_px: 24,
        }
    }
}

/// One day cell of the month grid
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days padding the grid to full weeks
    pub in_window: bool,
    pub visible: Vec<CalendarEvent>,
    /// Count behind the "+N more" affordance; zero when everything fits
    pub hidden: usize,
}

/// A month window laid out as Monday-first weeks of seven day cells
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub window: DateWindow,
    pub weeks: Vec<Vec<DayCell>>,
}

/// Chronological event list for the day view
#[derive(Debug, Clone, PartialEq)]
pub struct DayAgenda {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

/// Lay out already-filtered events onto a month grid.
///
/// Each cell shows at most the number of rows the measured height
/// allows; when events overflow, the last row is given to the
/// "+N more" affordance and `hidden` carries N.
pub fn month_grid(
    window: &DateWindow,
    events: &[CalendarEvent],
    metrics: &CellMetrics,
) -> MonthGrid {
    let mut buckets: HashMap<NaiveDate, Vec<CalendarEvent>> = HashMap::new();
    for event in events {
        buckets
            .entry(event.start.date())
            .or_default()
            .push(event.clone());
    }

    let grid_start = monday_on_or_before(window.start);
    let last_day = window.end - Duration::days(1);
    let grid_end = monday_on_or_before(last_day) + Duration::days(6);

    let rows = metrics.visible_rows();
    let mut weeks = Vec::new();
    let mut week = Vec::with_capacity(7);
    let mut date = grid_start;
    while date <= grid_end {
        let bucket = buckets.remove(&date).unwrap_or_default();
        week.push(day_cell(date, window.contains(date), bucket, rows));

        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
        date += Duration::days(1);
    }

    MonthGrid {
        window: *window,
        weeks,
    }
}

/// Events of a single day, sorted for the day view
pub fn day_agenda(date: NaiveDate, events: &[CalendarEvent]) -> DayAgenda {
    let mut day_events: Vec<CalendarEvent> = events
        .iter()
        .filter(|event| event.start.date() == date)
        .cloned()
        .collect();
    sort_events(&mut day_events);

    DayAgenda {
        date,
        events: day_events,
    }
}

fn day_cell(date: NaiveDate, in_window: bool, bucket: Vec<CalendarEvent>, rows: usize) -> DayCell {
    if bucket.len() <= rows {
        return DayCell {
            date,
            in_window,
            visible: bucket,
            hidden: 0,
        };
    }

    // The "+N more" row takes one of the available slots
    let shown = rows.saturating_sub(1);
    let hidden = bucket.len() - shown;
    let mut visible = bucket;
    visible.truncate(shown);

    DayCell {
        date,
        in_window,
        visible,
        hidden,
    }
}

fn monday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::transform::events_from_trainings;
    use crate::config::Config;
    use crate::domain::{SeasonId, Team, TenantContext, TenantId, Training};

    fn ctx() -> TenantContext {
        TenantContext {
            tenant_id: TenantId::new("club-1"),
            season_id: SeasonId::new("2024-25"),
            display_name: None,
        }
    }

    fn training(id: &str, date: &str, start_time: &str) -> Training {
        Training {
            id: id.to_string(),
            date: date.to_string(),
            start_time: start_time.to_string(),
            end_time: None,
            team: Team::named("u15", "U15"),
            location: None,
        }
    }

    fn events_on(date: &str, count: usize) -> Vec<CalendarEvent> {
        let trainings: Vec<Training> = (0..count)
            .map(|i| training(&format!("t{}", i), date, &format!("{:02}:00", 8 + i)))
            .collect();
        events_from_trainings(&trainings, &ctx(), &Config::default())
    }

    #[test]
    fn test_march_2025_grid_shape() {
        let window = DateWindow::month_of(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let grid = month_grid(&window, &[], &CellMetrics::default());

        // March 2025 runs Saturday to Monday: six Monday-first weeks
        assert_eq!(grid.weeks.len(), 6);
        assert!(grid.weeks.iter().all(|week| week.len() == 7));

        let first = &grid.weeks[0][0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 2, 24).unwrap());
        assert!(!first.in_window);

        let last = grid.weeks.last().unwrap().last().unwrap();
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2025, 4, 6).unwrap());
        assert!(!last.in_window);
    }

    #[test]
    fn test_events_land_in_their_cell() {
        let window = DateWindow::month_of(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let events = events_on("2025-03-05", 2);
        let grid = month_grid(&window, &events, &CellMetrics::default());

        let cell = grid
            .weeks
            .iter()
            .flatten()
            .find(|c| c.date == NaiveDate::from_ymd_opt(2025, 3, 5).unwrap())
            .unwrap();
        assert!(cell.in_window);
        assert_eq!(cell.visible.len(), 2);
        assert_eq!(cell.hidden, 0);
    }

    #[test]
    fn test_overflow_yields_more_affordance() {
        let window = DateWindow::month_of(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let events = events_on("2025-03-05", 6);
        // 120px cell, 24px header, 22px rows: four rows fit
        let metrics = CellMetrics::default();
        assert_eq!(metrics.visible_rows(), 4);

        let grid = month_grid(&window, &events, &metrics);
        let cell = grid
            .weeks
            .iter()
            .flatten()
            .find(|c| c.date == NaiveDate::from_ymd_opt(2025, 3, 5).unwrap())
            .unwrap();

        // Three events plus a "+3 more" row
        assert_eq!(cell.visible.len(), 3);
        assert_eq!(cell.hidden, 3);
    }

    #[test]
    fn test_latest_measurement_wins() {
        let window = DateWindow::month_of(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let events = events_on("2025-03-05", 6);

        let tall = CellMetrics {
            cell_height_px: 300,
            ..CellMetrics::default()
        };
        let grid = month_grid(&window, &events, &tall);
        let cell = grid
            .weeks
            .iter()
            .flatten()
            .find(|c| c.date == NaiveDate::from_ymd_opt(2025, 3, 5).unwrap())
            .unwrap();

        // Recomputing with the new measurement lifts the cap
        assert_eq!(cell.visible.len(), 6);
        assert_eq!(cell.hidden, 0);
    }

    #[test]
    fn test_zero_height_hides_everything() {
        let metrics = CellMetrics {
            cell_height_px: 0,
            event_row_px: 22,
            header_px: 24,
        };
        assert_eq!(metrics.visible_rows(), 0);

        let window = DateWindow::month_of(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let events = events_on("2025-03-05", 2);
        let grid = month_grid(&window, &events, &metrics);
        let cell = grid
            .weeks
            .iter()
            .flatten()
            .find(|c| c.date == NaiveDate::from_ymd_opt(2025, 3, 5).unwrap())
            .unwrap();

        assert!(cell.visible.is_empty());
        assert_eq!(cell.hidden, 2);
    }

    #[test]
    fn test_day_agenda_is_chronological() {
        let mut events = events_on("2025-03-05", 1);
        events.extend(events_on("2025-03-06", 1));
        let mut late = events_on("2025-03-05", 1);
        late[0].start = NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let early = events_on("2025-03-05", 1);

        let mut all = Vec::new();
        all.extend(late.clone());
        all.extend(events);
        all.extend(early);

        let agenda = day_agenda(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(), &all);
        assert_eq!(agenda.events.len(), 3);
        assert!(agenda
            .events
            .windows(2)
            .all(|pair| pair[0].start <= pair[1].start));
    }
}
