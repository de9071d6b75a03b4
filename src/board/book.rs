use std::collections::HashMap;

use tracing::{debug, warn};

use super::gesture::ScheduleMutation;
use crate::api::{Schedule, ScheduleId};

/// Handle for one optimistic write, used to settle it once the store answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub id: ScheduleId,
    seq: u64,
}

#[derive(Debug, Clone)]
struct Pending {
    seq: u64,
    before: Schedule,
}

/// The board's copy of every schedule.
///
/// Gestures write here first; the store write follows. Only the most recent
/// write per schedule can roll back, so a slow failure never undoes a newer edit.
#[derive(Debug, Default)]
pub struct ScheduleBook {
    schedules: Vec<Schedule>,
    pending: HashMap<ScheduleId, Pending>,
    next_seq: u64,
}

impl ScheduleBook {
    pub fn new(schedules: Vec<Schedule>) -> Self {
        Self {
            schedules,
            ..Self::default()
        }
    }

    pub fn all(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn get(&self, id: ScheduleId) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id == id)
    }

    /// A write for this schedule is still waiting on the store
    pub fn is_pending(&self, id: ScheduleId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Show the mutation immediately and remember what it replaced
    pub fn apply(&mut self, mutation: &ScheduleMutation) -> Ticket {
        let id = mutation.after.id;
        let before = match self.schedules.iter_mut().find(|s| s.id == id) {
            Some(slot) => std::mem::replace(slot, mutation.after.clone()),
            None => {
                self.schedules.push(mutation.after.clone());
                mutation.before.clone()
            }
        };

        self.next_seq += 1;
        let seq = self.next_seq;
        self.pending.insert(id, Pending { seq, before });
        debug!(schedule = id, seq, "optimistic update applied");
        Ticket { id, seq }
    }

    /// The store accepted the write
    pub fn confirm(&mut self, ticket: Ticket) {
        if self.pending.get(&ticket.id).is_some_and(|p| p.seq == ticket.seq) {
            self.pending.remove(&ticket.id);
        }
    }

    /// The store refused the write. Returns whether anything was restored.
    pub fn rollback(&mut self, ticket: Ticket) -> bool {
        let Some(pending) = self.pending.get(&ticket.id) else {
            return false;
        };
        if pending.seq != ticket.seq {
            debug!(schedule = ticket.id, "stale failure, newer edit kept");
            return false;
        }

        let Some(pending) = self.pending.remove(&ticket.id) else {
            return false;
        };
        match self.schedules.iter_mut().find(|s| s.id == ticket.id) {
            Some(slot) => *slot = pending.before,
            None => self.schedules.push(pending.before),
        }
        warn!(schedule = ticket.id, "update rolled back");
        true
    }

    /// Reconcile with a fresh listing from the store
    pub fn replace_all(&mut self, schedules: Vec<Schedule>) {
        self.schedules = schedules;
        self.pending.clear();
    }

    pub fn insert(&mut self, schedule: Schedule) {
        match self.schedules.iter_mut().find(|s| s.id == schedule.id) {
            Some(slot) => *slot = schedule,
            None => self.schedules.push(schedule),
        }
    }

    pub fn remove(&mut self, id: ScheduleId) -> Option<Schedule> {
        self.pending.remove(&id);
        let index = self.schedules.iter().position(|s| s.id == id)?;
        Some(self.schedules.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::api::{ClockTime, WorkType};

    fn schedule(id: i64, company_id: i64, start: u16) -> Schedule {
        Schedule {
            id,
            company_id,
            site_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 12, 9).unwrap(),
            time_start: ClockTime::from_hm(start, 0),
            time_end: ClockTime::from_hm(start + 3, 0),
            work_type: WorkType::Garbage,
        }
    }

    fn mutation(before: &Schedule, company_id: i64, start: u16) -> ScheduleMutation {
        let mut after = before.clone();
        after.company_id = company_id;
        after.time_start = ClockTime::from_hm(start, 0);
        after.time_end = ClockTime::from_hm(start + 3, 0);
        ScheduleMutation { before: before.clone(), after }
    }

    #[test]
    fn apply_then_confirm() {
        let original = schedule(1, 1, 9);
        let mut book = ScheduleBook::new(vec![original.clone(), schedule(2, 2, 10)]);
        let ticket = book.apply(&mutation(&original, 3, 11));
        assert_eq!(book.get(1).unwrap().company_id, 3);
        assert!(book.is_pending(1));

        book.confirm(ticket);
        assert!(!book.is_pending(1));
        assert!(!book.rollback(ticket));
        assert_eq!(book.get(1).unwrap().company_id, 3);
    }

    #[test]
    fn rollback_restores_previous_value() {
        let original = schedule(1, 1, 9);
        let mut book = ScheduleBook::new(vec![original.clone()]);
        let ticket = book.apply(&mutation(&original, 3, 11));
        assert!(book.rollback(ticket));
        assert_eq!(book.get(1), Some(&original));
        assert!(!book.is_pending(1));
    }

    #[test]
    fn stale_failure_keeps_newer_edit() {
        let original = schedule(1, 1, 9);
        let mut book = ScheduleBook::new(vec![original.clone()]);
        let first = book.apply(&mutation(&original, 2, 10));
        let moved = book.get(1).unwrap().clone();
        let second = book.apply(&mutation(&moved, 3, 12));

        assert!(!book.rollback(first));
        assert_eq!(book.get(1).unwrap().company_id, 3);

        assert!(book.rollback(second));
        assert_eq!(book.get(1), Some(&moved));
    }

    #[test]
    fn replace_all_drops_pending() {
        let original = schedule(1, 1, 9);
        let mut book = ScheduleBook::new(vec![original.clone()]);
        let ticket = book.apply(&mutation(&original, 2, 10));
        book.replace_all(vec![original.clone(), schedule(5, 1, 14)]);
        assert!(!book.rollback(ticket));
        assert_eq!(book.all().len(), 2);
        assert!(!book.is_pending(1));
        assert_eq!(book.get(1), Some(&original));
    }

    #[test]
    fn insert_and_remove() {
        let mut book = ScheduleBook::default();
        assert!(book.all().is_empty());
        book.insert(schedule(7, 1, 9));
        book.insert(schedule(7, 2, 9));
        assert_eq!(book.all().len(), 1);
        assert_eq!(book.get(7).unwrap().company_id, 2);
        assert!(book.remove(7).is_some());
        assert!(book.remove(7).is_none());
    }
}
