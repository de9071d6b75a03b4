//! The persistence seam: anything that can list, create, update and delete schedules.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::time::ClockTime;
use super::types::{Company, NewSchedule, Schedule, ScheduleId, Site, WorkType};
use crate::error::StoreError;

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// All schedules, in any order
    async fn list(&self) -> Result<Vec<Schedule>, StoreError>;

    /// Persist a new schedule and return it with its assigned id
    async fn create(&self, schedule: &NewSchedule) -> Result<Schedule, StoreError>;

    /// Replace the stored schedule with the same id
    async fn update(&self, schedule: &Schedule) -> Result<(), StoreError>;

    async fn delete(&self, id: ScheduleId) -> Result<(), StoreError>;

    async fn list_companies(&self) -> Result<Vec<Company>, StoreError>;

    async fn list_sites(&self) -> Result<Vec<Site>, StoreError>;
}

/// In-process store with the same contract as the REST one.
/// Backs the sample-data mode.
pub struct MemoryStore {
    inner: Mutex<MemoryData>,
}

struct MemoryData {
    companies: Vec<Company>,
    sites: Vec<Site>,
    schedules: Vec<Schedule>,
    next_id: ScheduleId,
}

impl MemoryStore {
    pub fn new(companies: Vec<Company>, sites: Vec<Site>, schedules: Vec<Schedule>) -> Self {
        let next_id = schedules.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(MemoryData {
                companies,
                sites,
                schedules,
                next_id,
            }),
        }
    }

    /// Five contractors, four sites and a busy day on `date`
    pub fn with_sample_data(date: NaiveDate) -> Self {
        let company = |id, name: &str, work_type| Company { id, name: name.to_string(), work_type };
        let site = |id, name: &str, address: &str| Site {
            id,
            name: name.to_string(),
            address: address.to_string(),
        };
        let schedule = |id, company_id, site_id, start: (u16, u16), end: (u16, u16), work_type| Schedule {
            id,
            company_id,
            site_id,
            date,
            time_start: ClockTime::from_hm(start.0, start.1),
            time_end: ClockTime::from_hm(end.0, end.1),
            work_type,
        };

        Self::new(
            vec![
                company(1, "TEKO", WorkType::Garbage),
                company(2, "Tiger Management", WorkType::Management),
                company(3, "Misoji Industries", WorkType::Interior),
                company(4, "S-TEC", WorkType::Demolition),
                company(5, "Kamishiro Electric", WorkType::Electrical),
            ],
            vec![
                site(1, "Utsunomiya SoftBank", "Utsunomiya"),
                site(2, "Crepe stand", "Tokyo"),
                site(3, "Akabane izakaya", "Kita, Tokyo"),
                site(4, "Machiya", "Arakawa, Tokyo"),
            ],
            vec![
                schedule(1, 1, 1, (9, 0), (12, 0), WorkType::Garbage),
                schedule(2, 1, 4, (14, 0), (17, 0), WorkType::Garbage),
                schedule(3, 2, 1, (9, 0), (18, 0), WorkType::Management),
                schedule(4, 3, 3, (13, 0), (20, 0), WorkType::Interior),
                schedule(5, 4, 4, (8, 0), (15, 0), WorkType::Demolition),
                schedule(6, 5, 4, (14, 0), (18, 0), WorkType::Electrical),
            ],
        )
    }

    fn data(&self) -> MutexGuard<'_, MemoryData> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MemoryData {
    fn check_refs(&self, company_id: i64, site_id: i64) -> Result<(), StoreError> {
        if !self.companies.iter().any(|c| c.id == company_id) {
            return Err(StoreError::Rejected(format!("unknown company {}", company_id)));
        }
        if !self.sites.iter().any(|s| s.id == site_id) {
            return Err(StoreError::Rejected(format!("unknown site {}", site_id)));
        }
        Ok(())
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Schedule>, StoreError> {
        Ok(self.data().schedules.clone())
    }

    async fn create(&self, schedule: &NewSchedule) -> Result<Schedule, StoreError> {
        let mut data = self.data();
        data.check_refs(schedule.company_id, schedule.site_id)?;
        let created = schedule.clone().with_id(data.next_id);
        data.next_id += 1;
        data.schedules.push(created.clone());
        Ok(created)
    }

    async fn update(&self, schedule: &Schedule) -> Result<(), StoreError> {
        let mut data = self.data();
        data.check_refs(schedule.company_id, schedule.site_id)?;
        let slot = data
            .schedules
            .iter_mut()
            .find(|s| s.id == schedule.id)
            .ok_or(StoreError::NotFound(schedule.id))?;
        *slot = schedule.clone();
        Ok(())
    }

    async fn delete(&self, id: ScheduleId) -> Result<(), StoreError> {
        let mut data = self.data();
        let before = data.schedules.len();
        data.schedules.retain(|s| s.id != id);
        if data.schedules.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        Ok(self.data().companies.clone())
    }

    async fn list_sites(&self) -> Result<Vec<Site>, StoreError> {
        Ok(self.data().sites.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 9).unwrap()
    }

    fn new_schedule(company_id: i64) -> NewSchedule {
        NewSchedule {
            company_id,
            site_id: 2,
            date: date(),
            time_start: ClockTime::from_hm(10, 0),
            time_end: ClockTime::from_hm(11, 0),
            work_type: WorkType::Interior,
        }
    }

    #[tokio::test]
    async fn create_assigns_next_id() {
        let store = MemoryStore::with_sample_data(date());
        let created = store.create(&new_schedule(3)).await.unwrap();
        assert_eq!(created.id, 7);
        assert_eq!(store.list().await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn create_with_unknown_company_is_rejected() {
        let store = MemoryStore::with_sample_data(date());
        let err = store.create(&new_schedule(99)).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert_eq!(store.list().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn update_replaces_by_id() {
        let store = MemoryStore::with_sample_data(date());
        let mut s = store.list().await.unwrap()[0].clone();
        s.company_id = 3;
        s.time_start = ClockTime::from_hm(11, 15);
        store.update(&s).await.unwrap();
        let stored = store.list().await.unwrap().into_iter().find(|x| x.id == s.id).unwrap();
        assert_eq!(stored, s);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = MemoryStore::with_sample_data(date());
        let ghost = new_schedule(1).with_id(404);
        assert!(matches!(store.update(&ghost).await, Err(StoreError::NotFound(404))));
        assert!(matches!(store.delete(404).await, Err(StoreError::NotFound(404))));
        store.delete(1).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn directory_lists() {
        let store = MemoryStore::with_sample_data(date());
        assert_eq!(store.list_companies().await.unwrap().len(), 5);
        assert_eq!(store.list_sites().await.unwrap()[3].name, "Machiya");
    }
}
