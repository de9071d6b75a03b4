//! Pixel <-> minute conversion for the day timeline.
//!
//! Minutes here are always relative to the start of the visible range, so
//! `0` is `start_hour:00`.

use crate::api::ClockTime;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub start_hour: i32,
    pub end_hour: i32,
    /// Pixels per hour
    pub hour_width: f32,
    pub snap_minutes: i32,
    pub min_duration: i32,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 20,
            hour_width: 64.0,
            snap_minutes: 15,
            min_duration: 30,
        }
    }
}

impl TimeScale {
    pub fn minutes_to_offset_px(&self, minutes: i32) -> f32 {
        (minutes as f64 / 60.0 * self.hour_width as f64) as f32
    }

    /// Nearest multiple of the snap step, halves rounded away from zero
    pub fn px_to_minutes(&self, px: f32) -> i32 {
        let raw = px as f64 / self.hour_width as f64 * 60.0;
        // f32 pixel offsets carry noise in the last few bits
        let raw = (raw * 1000.0).round() / 1000.0;
        let snap = self.snap_minutes as f64;
        ((raw / snap).round() * snap) as i32
    }

    /// `HH:MM` for a relative minute offset. Does not clamp.
    pub fn minutes_to_clock(&self, minutes: i32) -> String {
        format!(
            "{:02}:{:02}",
            self.start_hour + minutes.div_euclid(60),
            minutes.rem_euclid(60)
        )
    }

    /// Wall-clock time for a relative offset; callers clamp to the range first.
    pub fn clock_at(&self, minutes: i32) -> ClockTime {
        let absolute = (self.start_hour * 60 + minutes).clamp(0, u16::MAX as i32);
        ClockTime::from_minutes(absolute as u16)
    }

    pub fn offset_minutes(&self, clock: ClockTime) -> i32 {
        clock.minutes() - self.start_hour * 60
    }

    /// The range runs one hour past `end_hour` so the last labelled hour has a full column
    pub fn max_minutes(&self) -> i32 {
        (self.end_hour - self.start_hour + 1) * 60
    }

    pub fn max_offset_px(&self) -> f32 {
        self.minutes_to_offset_px(self.max_minutes())
    }

    pub fn min_width_px(&self) -> f32 {
        self.minutes_to_offset_px(self.min_duration)
    }

    pub fn left_px(&self, start: ClockTime) -> f32 {
        self.minutes_to_offset_px(self.offset_minutes(start))
    }

    pub fn width_px(&self, start: ClockTime, end: ClockTime) -> f32 {
        self.minutes_to_offset_px(end.minutes() - start.minutes())
    }

    /// Labelled hours, both ends inclusive
    pub fn hours(&self) -> impl Iterator<Item = i32> {
        self.start_hour..=self.end_hour
    }
}

/// Screen position, independent of any rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_min_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Point::new(x, y),
            max: Point::new(x + width, y + height),
        }
    }

    /// Inclusive on every edge
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Overlap of two rects, `None` when they share no area
    pub fn intersect(&self, other: Rect) -> Option<Rect> {
        let min = Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        (min.x < max.x && min.y < max.y).then_some(Rect { min, max })
    }
}
