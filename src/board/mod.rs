//! Board core: geometry, gestures, drop targets and layout. No UI types in here.

mod book;
mod directory;
mod drop;
mod geometry;
mod gesture;
mod layout;

pub use book::{ScheduleBook, Ticket};
pub use directory::{count_for_site_on, next_schedule_for_site, Directory, UNKNOWN_LABEL};
pub use drop::{DropKey, DropRegistry};
pub use geometry::{Point, Rect, TimeScale};
pub use gesture::{
    GestureEngine, GestureKind, GestureOutcome, PointerEvent, PointerPhase, Preview, ScheduleMutation, Surface,
    EDGE_HANDLE_PX,
};
pub use layout::{day_rows, is_weekend, now_offset, week_dates, week_grid, week_start, NowTicker};
