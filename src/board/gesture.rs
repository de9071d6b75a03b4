//! Pointer gesture tracking for schedule blocks.
//!
//! One [`GestureEngine`] lives in the board view. A pointer-down on a block
//! calls [`GestureEngine::begin`]; every later pointer sample goes through
//! [`GestureEngine::handle`] until the release yields a [`GestureOutcome`].
//! Nothing in here does I/O, so it is safe to feed every input event.

use tracing::debug;

use super::drop::{DropKey, DropRegistry};
use super::geometry::{Point, Rect, TimeScale};
use crate::api::{ClockTime, Schedule, ScheduleId};

/// Pointer travel (px) below which a release counts as a tap
pub const DRAG_THRESHOLD_PX: f32 = 5.0;

/// Width of the resize handles inside each end of a timeline block
pub const EDGE_HANDLE_PX: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    ResizeStart,
    ResizeEnd,
}

impl GestureKind {
    /// Which gesture a pointer-down at `pos` on a timeline block starts
    pub fn classify(block: Rect, pos: Point) -> Self {
        if pos.x <= block.min.x + EDGE_HANDLE_PX {
            GestureKind::ResizeStart
        } else if pos.x >= block.max.x - EDGE_HANDLE_PX {
            GestureKind::ResizeEnd
        } else {
            GestureKind::Move
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Mouse and touch input, reduced to one shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pos: Point,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(pos: Point, phase: PointerPhase) -> Self {
        Self { pos, phase }
    }
}

/// The view a gesture started on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Day timeline: time and company can change
    Day,
    /// Week grid: date and company can change
    Week,
}

impl Surface {
    fn origin(self, schedule: &Schedule) -> DropKey {
        match self {
            Surface::Day => DropKey::Row(schedule.company_id),
            Surface::Week => DropKey::Cell(schedule.date, schedule.company_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleMutation {
    pub before: Schedule,
    pub after: Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    None,
    Tap(Schedule),
    Commit(ScheduleMutation),
}

/// What the view should draw for the block under manipulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preview {
    pub schedule_id: ScheduleId,
    pub kind: GestureKind,
    /// Pointer travel since pointer-down
    pub offset: Point,
    /// Block edges relative to the range start; only resizes move them
    pub left_px: f32,
    pub width_px: f32,
    /// Times the schedule would take if released now
    pub time_start: ClockTime,
    pub time_end: ClockTime,
}

#[derive(Debug, Clone)]
struct Session {
    surface: Surface,
    kind: GestureKind,
    schedule: Schedule,
    origin: DropKey,
    anchor: Point,
    latest: Point,
    moved: bool,
    target: Option<DropKey>,
}

impl Session {
    fn delta_x(&self) -> f32 {
        self.latest.x - self.anchor.x
    }

    fn track(&mut self, pos: Point, targets: &DropRegistry) {
        self.latest = pos;
        let dx = (pos.x - self.anchor.x).abs();
        let dy = (pos.y - self.anchor.y).abs();
        let past_threshold = match self.surface {
            Surface::Day => dx > DRAG_THRESHOLD_PX,
            Surface::Week => dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX,
        };
        self.moved |= past_threshold;

        if self.kind == GestureKind::Move {
            let target = targets.resolve(pos);
            if target != self.target {
                debug!(schedule = self.schedule.id, ?target, "drop target changed");
                self.target = target;
            }
        }
    }

    /// A day-view move onto another row counts even without horizontal travel
    fn counts_as_drag(&self) -> bool {
        match (self.surface, self.kind) {
            (Surface::Day, GestureKind::Move) => {
                self.moved || self.target.is_some_and(|t| t != self.origin)
            }
            _ => self.moved,
        }
    }

    fn base_edges(&self, scale: &TimeScale) -> (f32, f32) {
        let s = &self.schedule;
        (scale.left_px(s.time_start), scale.width_px(s.time_start, s.time_end))
    }

    /// Current (left, width) in px with the resize clamps applied
    fn resized_edges(&self, scale: &TimeScale) -> (f32, f32) {
        let (base_left, base_width) = self.base_edges(scale);
        let min_width = scale.min_width_px();
        let mut delta = self.delta_x();

        match self.kind {
            GestureKind::ResizeStart => {
                if base_left + delta < 0.0 {
                    delta = -base_left;
                }
                if base_width - delta < min_width {
                    delta = base_width - min_width;
                }
                (base_left + delta, base_width - delta)
            }
            GestureKind::ResizeEnd => {
                let max_right = scale.max_offset_px();
                if base_left + base_width + delta > max_right {
                    delta = max_right - base_left - base_width;
                }
                if base_width + delta < min_width {
                    delta = min_width - base_width;
                }
                (base_left, base_width + delta)
            }
            GestureKind::Move => (base_left, base_width),
        }
    }

    /// Snapped (start, end) minutes for a resize, stretched back out to the
    /// minimum duration if snapping ate into it
    fn resized_minutes(&self, scale: &TimeScale) -> (i32, i32) {
        let (left, width) = self.resized_edges(scale);
        let floor = scale.min_duration.max(1);
        let step = scale.snap_minutes.max(1);
        let mut start = scale.offset_minutes(self.schedule.time_start);
        let mut end = scale.offset_minutes(self.schedule.time_end);

        match self.kind {
            GestureKind::ResizeStart => {
                start = scale.px_to_minutes(left);
                while end - start < floor {
                    start -= step;
                }
            }
            GestureKind::ResizeEnd => {
                end = scale.px_to_minutes(left + width);
                while end - start < floor {
                    end += step;
                }
            }
            GestureKind::Move => {}
        }
        (start, end)
    }

    /// Day-view move: duration kept, start clamped into the visible range
    fn moved_minutes(&self, scale: &TimeScale) -> (i32, i32) {
        let duration = self.schedule.duration_minutes();
        let start = scale.offset_minutes(self.schedule.time_start) + scale.px_to_minutes(self.delta_x());
        let start = start.max(0).min(scale.max_minutes() - duration);
        (start, start + duration)
    }

    fn committed(&self, scale: &TimeScale) -> Option<Schedule> {
        let mut after = self.schedule.clone();

        match (self.surface, self.kind) {
            (Surface::Week, _) => {
                let DropKey::Cell(date, company_id) = self.target? else {
                    return None;
                };
                after.date = date;
                after.company_id = company_id;
            }
            (Surface::Day, GestureKind::Move) => {
                let (start, end) = self.moved_minutes(scale);
                after.time_start = scale.clock_at(start);
                after.time_end = scale.clock_at(end);
                if let Some(target) = self.target.filter(|t| *t != self.origin) {
                    after.company_id = target.company_id();
                }
            }
            (Surface::Day, GestureKind::ResizeStart) => {
                let (start, _) = self.resized_minutes(scale);
                if start < 0 {
                    debug!(schedule = self.schedule.id, start, "resize start out of range, dropped");
                    return None;
                }
                after.time_start = scale.clock_at(start);
            }
            (Surface::Day, GestureKind::ResizeEnd) => {
                let (_, end) = self.resized_minutes(scale);
                if end > scale.max_minutes() {
                    debug!(schedule = self.schedule.id, end, "resize end out of range, dropped");
                    return None;
                }
                after.time_end = scale.clock_at(end);
            }
        }

        (after != self.schedule).then_some(after)
    }

    fn preview(&self, scale: &TimeScale) -> Preview {
        let (left_px, width_px) = self.resized_edges(scale);
        let (time_start, time_end) = match (self.surface, self.kind) {
            (Surface::Week, _) => (self.schedule.time_start, self.schedule.time_end),
            (Surface::Day, GestureKind::Move) => {
                let (start, end) = self.moved_minutes(scale);
                (scale.clock_at(start), scale.clock_at(end))
            }
            (Surface::Day, _) => {
                let (start, end) = self.resized_minutes(scale);
                (scale.clock_at(start), scale.clock_at(end))
            }
        };

        Preview {
            schedule_id: self.schedule.id,
            kind: self.kind,
            offset: Point::new(self.latest.x - self.anchor.x, self.latest.y - self.anchor.y),
            left_px,
            width_px,
            time_start,
            time_end,
        }
    }
}

/// Idle when `session` is `None`
#[derive(Debug, Default)]
pub struct GestureEngine {
    session: Option<Session>,
}

impl GestureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a pointer-down on `schedule`. Any gesture already in
    /// flight is dropped without a mutation.
    pub fn begin(&mut self, surface: Surface, schedule: &Schedule, kind: GestureKind, at: Point) {
        // Week chips have no edge handles
        let kind = match surface {
            Surface::Week => GestureKind::Move,
            Surface::Day => kind,
        };
        let origin = surface.origin(schedule);
        debug!(schedule = schedule.id, ?kind, ?surface, "gesture started");

        self.session = Some(Session {
            surface,
            kind,
            schedule: schedule.clone(),
            origin,
            anchor: at,
            latest: at,
            moved: false,
            target: Some(origin),
        });
    }

    pub fn handle(&mut self, event: PointerEvent, scale: &TimeScale, targets: &DropRegistry) -> GestureOutcome {
        match event.phase {
            PointerPhase::Down => GestureOutcome::None,
            PointerPhase::Move => {
                if let Some(session) = self.session.as_mut() {
                    session.track(event.pos, targets);
                }
                GestureOutcome::None
            }
            PointerPhase::Up => {
                let Some(mut session) = self.session.take() else {
                    return GestureOutcome::None;
                };
                session.track(event.pos, targets);
                Self::release(session, scale)
            }
            PointerPhase::Cancel => {
                self.cancel();
                GestureOutcome::None
            }
        }
    }

    fn release(session: Session, scale: &TimeScale) -> GestureOutcome {
        if !session.counts_as_drag() {
            return GestureOutcome::Tap(session.schedule);
        }

        match session.committed(scale) {
            Some(after) => {
                debug!(
                    schedule = after.id,
                    company = after.company_id,
                    date = %after.date,
                    start = %after.time_start,
                    end = %after.time_end,
                    "gesture committed"
                );
                GestureOutcome::Commit(ScheduleMutation {
                    before: session.schedule,
                    after,
                })
            }
            None => {
                debug!(schedule = session.schedule.id, "gesture released without change");
                GestureOutcome::None
            }
        }
    }

    /// Forced release. Returns whether a gesture was in flight.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                debug!(schedule = session.schedule.id, "gesture cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Schedule being moved, for dimming its resting block
    pub fn dragging_id(&self) -> Option<ScheduleId> {
        self.session
            .as_ref()
            .filter(|s| s.kind == GestureKind::Move && s.moved)
            .map(|s| s.schedule.id)
    }

    /// Drop target worth highlighting: only one that differs from where the schedule started
    pub fn highlighted_target(&self) -> Option<DropKey> {
        let session = self.session.as_ref()?;
        session.target.filter(|t| *t != session.origin)
    }

    pub fn preview(&self, scale: &TimeScale) -> Option<Preview> {
        self.session.as_ref().map(|s| s.preview(scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::api::WorkType;

    const ROW_HEIGHT: f32 = 48.0;
    const CELL_WIDTH: f32 = 100.0;
    const CELL_HEIGHT: f32 = 60.0;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    fn schedule(start: (u16, u16), end: (u16, u16)) -> Schedule {
        Schedule {
            id: 1,
            company_id: 1,
            site_id: 1,
            date: date(9),
            time_start: ClockTime::from_hm(start.0, start.1),
            time_end: ClockTime::from_hm(end.0, end.1),
            work_type: WorkType::Garbage,
        }
    }

    fn rows() -> DropRegistry {
        let mut registry = DropRegistry::new();
        for company in 1..=3 {
            let top = (company - 1) as f32 * ROW_HEIGHT;
            registry.register(DropKey::Row(company), Rect::from_min_size(0.0, top, 960.0, ROW_HEIGHT));
        }
        registry
    }

    /// Mon 2025-12-08 .. Sun 2025-12-14 across, companies 1..=3 down
    fn cells() -> DropRegistry {
        let mut registry = DropRegistry::new();
        for company in 1..=3 {
            for day in 0..7 {
                let key = DropKey::Cell(date(8 + day), company);
                let rect = Rect::from_min_size(
                    day as f32 * CELL_WIDTH,
                    (company - 1) as f32 * CELL_HEIGHT,
                    CELL_WIDTH,
                    CELL_HEIGHT,
                );
                registry.register(key, rect);
            }
        }
        registry
    }

    fn drag(
        engine: &mut GestureEngine,
        targets: &DropRegistry,
        path: &[(f32, f32)],
    ) -> GestureOutcome {
        let scale = TimeScale::default();
        let (last, moves) = path.split_last().unwrap();
        for &(x, y) in moves {
            engine.handle(PointerEvent::new(Point::new(x, y), PointerPhase::Move), &scale, targets);
        }
        engine.handle(PointerEvent::new(Point::new(last.0, last.1), PointerPhase::Up), &scale, targets)
    }

    fn committed(outcome: GestureOutcome) -> ScheduleMutation {
        match outcome {
            GestureOutcome::Commit(mutation) => mutation,
            other => panic!("expected a commit, got {other:?}"),
        }
    }

    #[test]
    fn classify_edges() {
        let block = Rect::from_min_size(192.0, 0.0, 192.0, 40.0);
        assert_eq!(GestureKind::classify(block, Point::new(195.0, 10.0)), GestureKind::ResizeStart);
        assert_eq!(GestureKind::classify(block, Point::new(380.0, 10.0)), GestureKind::ResizeEnd);
        assert_eq!(GestureKind::classify(block, Point::new(290.0, 10.0)), GestureKind::Move);
    }

    #[test]
    fn small_wiggle_is_a_tap() {
        let s = schedule((9, 0), (12, 0));
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::Move, Point::new(250.0, 20.0));
        let outcome = drag(&mut engine, &rows(), &[(253.0, 21.0), (245.0, 20.0)]);
        assert_eq!(outcome, GestureOutcome::Tap(s));
        assert!(!engine.is_active());
    }

    #[test]
    fn tap_outside_any_row() {
        let s = schedule((9, 0), (12, 0));
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::Move, Point::new(250.0, 20.0));
        let outcome = drag(&mut engine, &DropRegistry::new(), &[(254.0, 20.0)]);
        assert_eq!(outcome, GestureOutcome::Tap(s));
    }

    #[test]
    fn move_snaps_and_keeps_duration() {
        let s = schedule((9, 0), (12, 0));
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::Move, Point::new(250.0, 20.0));
        let mutation = committed(drag(&mut engine, &rows(), &[(300.0, 20.0), (380.0, 20.0)]));
        assert_eq!(mutation.before, s);
        assert_eq!(mutation.after.time_start.to_string(), "11:15");
        assert_eq!(mutation.after.time_end.to_string(), "14:15");
        assert_eq!(mutation.after.duration_minutes(), 180);
        assert_eq!(mutation.after.company_id, 1);
    }

    #[test]
    fn move_clamps_into_range() {
        let s = schedule((18, 0), (20, 0));
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::Move, Point::new(800.0, 20.0));
        let mutation = committed(drag(&mut engine, &rows(), &[(1400.0, 20.0)]));
        assert_eq!(mutation.after.time_start.to_string(), "19:00");
        assert_eq!(mutation.after.time_end.to_string(), "21:00");

        engine.begin(Surface::Day, &s, GestureKind::Move, Point::new(800.0, 20.0));
        let mutation = committed(drag(&mut engine, &rows(), &[(-900.0, 20.0)]));
        assert_eq!(mutation.after.time_start.to_string(), "06:00");
        assert_eq!(mutation.after.time_end.to_string(), "08:00");
    }

    #[test]
    fn vertical_move_reassigns_company() {
        let s = schedule((9, 0), (12, 0));
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::Move, Point::new(250.0, 20.0));

        let scale = TimeScale::default();
        let targets = rows();
        engine.handle(PointerEvent::new(Point::new(252.0, 120.0), PointerPhase::Move), &scale, &targets);
        assert_eq!(engine.highlighted_target(), Some(DropKey::Row(3)));

        let mutation = committed(engine.handle(
            PointerEvent::new(Point::new(252.0, 120.0), PointerPhase::Up),
            &scale,
            &targets,
        ));
        assert_eq!(mutation.after.company_id, 3);
        assert_eq!(mutation.after.time_start, s.time_start);
        assert_eq!(mutation.after.time_end, s.time_end);
    }

    #[test]
    fn move_back_to_start_emits_nothing() {
        let s = schedule((9, 0), (12, 0));
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::Move, Point::new(250.0, 20.0));
        // travelled past the threshold but snaps back to zero minutes
        let outcome = drag(&mut engine, &rows(), &[(300.0, 70.0), (255.5, 20.0)]);
        assert_eq!(outcome, GestureOutcome::None);
        assert!(!engine.is_active());
    }

    #[test]
    fn week_drop_changes_date_and_company_only() {
        let s = schedule((9, 0), (12, 0));
        let mut engine = GestureEngine::new();
        // Tue 12-09 is the second column
        engine.begin(Surface::Week, &s, GestureKind::Move, Point::new(150.0, 30.0));
        let mutation = committed(drag(&mut engine, &cells(), &[(250.0, 90.0), (350.0, 150.0)]));
        assert_eq!(mutation.after.date, date(11));
        assert_eq!(mutation.after.company_id, 3);
        assert_eq!(mutation.after.time_start, s.time_start);
        assert_eq!(mutation.after.time_end, s.time_end);
        assert_eq!(mutation.after.site_id, s.site_id);
        assert_eq!(mutation.after.work_type, s.work_type);
    }

    #[test]
    fn week_drop_off_grid_is_ignored() {
        let s = schedule((9, 0), (12, 0));
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Week, &s, GestureKind::Move, Point::new(150.0, 30.0));
        assert_eq!(drag(&mut engine, &cells(), &[(900.0, 30.0)]), GestureOutcome::None);

        engine.begin(Surface::Week, &s, GestureKind::Move, Point::new(150.0, 30.0));
        assert_eq!(drag(&mut engine, &cells(), &[(152.0, 33.0)]), GestureOutcome::Tap(s));
    }

    #[test]
    fn week_vertical_drag_counts() {
        let s = schedule((9, 0), (12, 0));
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Week, &s, GestureKind::ResizeEnd, Point::new(150.0, 30.0));
        let mutation = committed(drag(&mut engine, &cells(), &[(150.0, 90.0)]));
        assert_eq!(mutation.after.company_id, 2);
        assert_eq!(mutation.after.date, s.date);
    }

    #[test]
    fn resize_start_clamps_at_range_start() {
        let s = schedule((9, 0), (12, 0));
        let scale = TimeScale::default();
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::ResizeStart, Point::new(195.0, 20.0));
        engine.handle(PointerEvent::new(Point::new(-2000.0, 20.0), PointerPhase::Move), &scale, &rows());

        let preview = engine.preview(&scale).unwrap();
        assert_eq!(preview.left_px, 0.0);
        assert_eq!(preview.width_px, 384.0);
        assert_eq!(preview.time_start.to_string(), "06:00");

        let mutation = committed(drag(&mut engine, &rows(), &[(-2000.0, 20.0)]));
        assert_eq!(mutation.after.time_start.to_string(), "06:00");
        assert_eq!(mutation.after.time_end, s.time_end);
    }

    #[test]
    fn resize_start_stops_at_minimum_duration() {
        let s = schedule((9, 0), (12, 0));
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::ResizeStart, Point::new(195.0, 20.0));
        let mutation = committed(drag(&mut engine, &rows(), &[(900.0, 20.0)]));
        assert_eq!(mutation.after.time_start.to_string(), "11:30");
        assert_eq!(mutation.after.duration_minutes(), 30);
    }

    #[test]
    fn resize_start_snapping_never_undercuts_minimum() {
        // end is off the snap grid
        let s = schedule((9, 0), (10, 10));
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::ResizeStart, Point::new(195.0, 20.0));
        let mutation = committed(drag(&mut engine, &rows(), &[(600.0, 20.0)]));
        assert_eq!(mutation.after.time_start.to_string(), "09:30");
        assert!(mutation.after.duration_minutes() >= 30);
    }

    #[test]
    fn resize_end_clamps_at_range_end() {
        let s = schedule((9, 0), (12, 0));
        let scale = TimeScale::default();
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::ResizeEnd, Point::new(380.0, 20.0));
        let mutation = committed(drag(&mut engine, &rows(), &[(3000.0, 20.0)]));
        assert_eq!(mutation.after.time_end.to_string(), "21:00");
        assert!(scale.offset_minutes(mutation.after.time_end) <= scale.max_minutes());
    }

    #[test]
    fn resize_end_on_latest_range_stops_at_midnight() {
        let s = schedule((20, 0), (22, 0));
        let scale = TimeScale { end_hour: 23, ..TimeScale::default() };
        let targets = rows();
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::ResizeEnd, Point::new(1020.0, 20.0));
        engine.handle(PointerEvent::new(Point::new(5000.0, 20.0), PointerPhase::Move), &scale, &targets);
        let outcome = engine.handle(PointerEvent::new(Point::new(5000.0, 20.0), PointerPhase::Up), &scale, &targets);
        let mutation = committed(outcome);
        assert_eq!(mutation.after.time_end.to_string(), "24:00");
        assert!(mutation.after.time_end.to_string().parse::<ClockTime>().is_ok());
    }

    #[test]
    fn resize_end_stops_at_minimum_duration() {
        let s = schedule((9, 0), (12, 0));
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::ResizeEnd, Point::new(380.0, 20.0));
        let mutation = committed(drag(&mut engine, &rows(), &[(-500.0, 20.0)]));
        assert_eq!(mutation.after.time_end.to_string(), "09:30");
        assert_eq!(mutation.after.time_start, s.time_start);
    }

    #[test]
    fn resize_ignores_rows() {
        let s = schedule((9, 0), (12, 0));
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::ResizeEnd, Point::new(380.0, 20.0));
        let mutation = committed(drag(&mut engine, &rows(), &[(444.0, 120.0)]));
        assert_eq!(mutation.after.company_id, 1);
        assert_eq!(mutation.after.time_end.to_string(), "13:00");
        assert_eq!(engine.dragging_id(), None);
    }

    #[test]
    fn cancel_discards_gesture() {
        let s = schedule((9, 0), (12, 0));
        let scale = TimeScale::default();
        let targets = rows();
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::Move, Point::new(250.0, 20.0));
        engine.handle(PointerEvent::new(Point::new(400.0, 120.0), PointerPhase::Move), &scale, &targets);
        assert_eq!(engine.dragging_id(), Some(1));

        let outcome = engine.handle(PointerEvent::new(Point::new(400.0, 120.0), PointerPhase::Cancel), &scale, &targets);
        assert_eq!(outcome, GestureOutcome::None);
        assert!(!engine.is_active());
        assert_eq!(engine.dragging_id(), None);

        let after = engine.handle(PointerEvent::new(Point::new(400.0, 120.0), PointerPhase::Up), &scale, &targets);
        assert_eq!(after, GestureOutcome::None);
        assert!(!engine.cancel());
    }

    #[test]
    fn move_preview_shows_prospective_times() {
        let s = schedule((9, 0), (12, 0));
        let scale = TimeScale::default();
        let mut engine = GestureEngine::new();
        engine.begin(Surface::Day, &s, GestureKind::Move, Point::new(250.0, 20.0));
        engine.handle(PointerEvent::new(Point::new(380.0, 30.0), PointerPhase::Move), &scale, &rows());
        let preview = engine.preview(&scale).unwrap();
        assert_eq!(preview.offset, Point::new(130.0, 10.0));
        assert_eq!(preview.time_start.to_string(), "11:15");
        assert_eq!(preview.time_end.to_string(), "14:15");
        assert_eq!(engine.highlighted_target(), None);
    }
}
