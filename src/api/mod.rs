mod types;
mod client;
mod store;
mod time;

pub use types::*;
pub use client::RestStore;
pub use store::{MemoryStore, ScheduleStore};
pub use time::{format_day_heading, format_week_range, parse_date, ClockTime};
