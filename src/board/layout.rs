//! Placement of schedules on the day timeline and the week grid.

use std::time::{Duration, Instant};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use super::geometry::TimeScale;
use crate::api::{Company, CompanyId, Schedule};

pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - chrono::Duration::days(days_from_monday as i64)
}

/// Monday through Sunday of the week containing `date`
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = week_start(date);
    std::array::from_fn(|i| monday + chrono::Duration::days(i as i64))
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayBlock<'a> {
    pub schedule: &'a Schedule,
    pub left_px: f32,
    pub width_px: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayRow<'a> {
    pub company: &'a Company,
    pub blocks: Vec<DayBlock<'a>>,
}

/// One row per company, in directory order, holding that company's schedules on `date`
pub fn day_rows<'a>(
    scale: &TimeScale,
    companies: &'a [Company],
    schedules: &'a [Schedule],
    date: NaiveDate,
) -> Vec<DayRow<'a>> {
    companies
        .iter()
        .map(|company| {
            let mut blocks: Vec<DayBlock<'a>> = schedules
                .iter()
                .filter(|s| s.date == date && s.company_id == company.id)
                .map(|s| DayBlock {
                    schedule: s,
                    left_px: scale.left_px(s.time_start),
                    width_px: scale.width_px(s.time_start, s.time_end),
                })
                .collect();
            blocks.sort_by_key(|b| (b.schedule.time_start, b.schedule.id));
            DayRow { company, blocks }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekCell<'a> {
    pub date: NaiveDate,
    pub company_id: CompanyId,
    /// Stacked top to bottom, earliest first
    pub schedules: Vec<&'a Schedule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekRow<'a> {
    pub company: &'a Company,
    pub cells: Vec<WeekCell<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid<'a> {
    pub dates: [NaiveDate; 7],
    pub rows: Vec<WeekRow<'a>>,
}

pub fn week_grid<'a>(companies: &'a [Company], schedules: &'a [Schedule], date: NaiveDate) -> WeekGrid<'a> {
    let dates = week_dates(date);
    let rows = companies
        .iter()
        .map(|company| WeekRow {
            company,
            cells: dates
                .iter()
                .map(|&day| {
                    let mut in_cell: Vec<&Schedule> = schedules
                        .iter()
                        .filter(|s| s.date == day && s.company_id == company.id)
                        .collect();
                    in_cell.sort_by_key(|s| (s.time_start, s.id));
                    WeekCell {
                        date: day,
                        company_id: company.id,
                        schedules: in_cell,
                    }
                })
                .collect(),
        })
        .collect();

    WeekGrid { dates, rows }
}

/// Horizontal position of the "now" line, if it belongs on this day's timeline
pub fn now_offset(scale: &TimeScale, selected: NaiveDate, now: NaiveDateTime) -> Option<f32> {
    if now.date() != selected {
        return None;
    }
    let hour = now.hour() as i32;
    if hour < scale.start_hour || hour > scale.end_hour {
        return None;
    }
    let minutes = (hour - scale.start_hour) * 60 + now.minute() as i32;
    Some(scale.minutes_to_offset_px(minutes))
}

/// Recomputes the now-line on a coarse interval instead of every frame
#[derive(Debug)]
pub struct NowTicker {
    interval: Duration,
    last: Option<(Instant, NaiveDate)>,
    offset: Option<f32>,
}

impl NowTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
            offset: None,
        }
    }

    /// Cached offset, refreshed through `compute` once the interval has passed
    /// or the viewed date changed
    pub fn poll(
        &mut self,
        at: Instant,
        viewed: NaiveDate,
        compute: impl FnOnce() -> Option<f32>,
    ) -> Option<f32> {
        let stale = match self.last {
            Some((when, date)) => date != viewed || at.duration_since(when) >= self.interval,
            None => true,
        };
        if stale {
            self.offset = compute();
            self.last = Some((at, viewed));
        }
        self.offset
    }

    /// Time until the next refresh is due, for scheduling a repaint
    pub fn due_in(&self, at: Instant) -> Duration {
        match self.last {
            Some((when, _)) => self.interval.saturating_sub(at.duration_since(when)),
            None => Duration::ZERO,
        }
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
