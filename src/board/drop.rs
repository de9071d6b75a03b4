use chrono::NaiveDate;

use super::geometry::{Point, Rect};
use crate::api::CompanyId;

/// Where a moved schedule can land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropKey {
    /// A company row on the day timeline
    Row(CompanyId),
    /// A day x company cell on the week grid
    Cell(NaiveDate, CompanyId),
}

impl DropKey {
    pub fn company_id(self) -> CompanyId {
        match self {
            DropKey::Row(company_id) | DropKey::Cell(_, company_id) => company_id,
        }
    }
}

/// Live rectangles of every drop target currently on screen.
///
/// The view re-registers each target every frame it paints, so a lookup always
/// sees post-scroll positions. When rectangles overlap the earliest registration
/// wins.
#[derive(Debug, Default)]
pub struct DropRegistry {
    targets: Vec<(DropKey, Rect)>,
}

impl DropRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or move a target; an existing key keeps its place in the order
    pub fn register(&mut self, key: DropKey, rect: Rect) {
        match self.targets.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = rect,
            None => self.targets.push((key, rect)),
        }
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    /// Register only the part of `rect` inside `visible`; a target scrolled
    /// fully out of view is dropped
    pub fn register_visible(&mut self, key: DropKey, rect: Rect, visible: Rect) {
        match rect.intersect(visible) {
            Some(shown) => self.register(key, shown),
            None => self.targets.retain(|(k, _)| *k != key),
        }
    }

    pub fn resolve(&self, p: Point) -> Option<DropKey> {
        self.targets
            .iter()
            .find(|(_, rect)| rect.contains(p))
            .map(|(key, _)| *key)
    }
}
