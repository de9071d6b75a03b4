use chrono::NaiveDate;

use crate::api::{Company, CompanyId, Schedule, Site, SiteId, WorkType};
use crate::error::NotFoundError;

/// Label shown wherever a schedule points at a company or site we don't have
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Companies and sites as last fetched from the store
#[derive(Debug, Clone, Default)]
pub struct Directory {
    companies: Vec<Company>,
    sites: Vec<Site>,
}

impl Directory {
    pub fn new(companies: Vec<Company>, sites: Vec<Site>) -> Self {
        Self { companies, sites }
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn company(&self, id: CompanyId) -> Result<&Company, NotFoundError> {
        self.companies
            .iter()
            .find(|c| c.id == id)
            .ok_or(NotFoundError { kind: "company", id })
    }

    pub fn site(&self, id: SiteId) -> Result<&Site, NotFoundError> {
        self.sites
            .iter()
            .find(|s| s.id == id)
            .ok_or(NotFoundError { kind: "site", id })
    }

    pub fn company_name(&self, id: CompanyId) -> &str {
        self.company(id).map(|c| c.name.as_str()).unwrap_or(UNKNOWN_LABEL)
    }

    pub fn site_name(&self, id: SiteId) -> &str {
        self.site(id).map(|s| s.name.as_str()).unwrap_or(UNKNOWN_LABEL)
    }

    pub fn site_address(&self, id: SiteId) -> &str {
        self.site(id).map(|s| s.address.as_str()).unwrap_or(UNKNOWN_LABEL)
    }

    /// Case-insensitive match on name or address
    pub fn filter_sites(&self, query: &str) -> Vec<&Site> {
        let query = query.trim().to_lowercase();
        self.sites
            .iter()
            .filter(|s| {
                query.is_empty()
                    || s.name.to_lowercase().contains(&query)
                    || s.address.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn filter_companies(&self, query: &str, work_type: Option<WorkType>) -> Vec<&Company> {
        let query = query.trim().to_lowercase();
        self.companies
            .iter()
            .filter(|c| work_type.map_or(true, |t| c.work_type == t))
            .filter(|c| query.is_empty() || c.name.to_lowercase().contains(&query))
            .collect()
    }
}

/// Earliest schedule at `site_id` on or after `today`
pub fn next_schedule_for_site(schedules: &[Schedule], site_id: SiteId, today: NaiveDate) -> Option<&Schedule> {
    schedules
        .iter()
        .filter(|s| s.site_id == site_id && s.date >= today)
        .min_by_key(|s| (s.date, s.time_start))
}

pub fn count_for_site_on(schedules: &[Schedule], site_id: SiteId, date: NaiveDate) -> usize {
    schedules
        .iter()
        .filter(|s| s.site_id == site_id && s.date == date)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClockTime;

    fn directory() -> Directory {
        Directory::new(
            vec![
                Company { id: 1, name: "TEKO".into(), work_type: WorkType::Garbage },
                Company { id: 2, name: "Tiger Management".into(), work_type: WorkType::Management },
                Company { id: 5, name: "Kamishiro Electric".into(), work_type: WorkType::Electrical },
            ],
            vec![
                Site { id: 1, name: "Utsunomiya SoftBank".into(), address: "Utsunomiya".into() },
                Site { id: 2, name: "Crepe stand".into(), address: "Tokyo".into() },
                Site { id: 3, name: "Akabane izakaya".into(), address: "Kita, Tokyo".into() },
            ],
        )
    }

    fn at(id: i64, site_id: i64, day: u32, hour: u16) -> Schedule {
        Schedule {
            id,
            company_id: 1,
            site_id,
            date: NaiveDate::from_ymd_opt(2025, 12, day).unwrap(),
            time_start: ClockTime::from_hm(hour, 0),
            time_end: ClockTime::from_hm(hour + 1, 0),
            work_type: WorkType::Garbage,
        }
    }

    #[test]
    fn dangling_references_get_placeholder() {
        let dir = directory();
        assert_eq!(dir.company_name(2), "Tiger Management");
        assert_eq!(dir.company_name(42), UNKNOWN_LABEL);
        assert_eq!(dir.site_name(9), UNKNOWN_LABEL);
        assert_eq!(dir.site(9).unwrap_err().to_string(), "site 9 not found");
    }

    #[test]
    fn site_search_covers_address() {
        let dir = directory();
        let names: Vec<&str> = dir.filter_sites("tokyo").iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Crepe stand", "Akabane izakaya"]);
        assert_eq!(dir.filter_sites("  ").len(), 3);
        assert!(dir.filter_sites("osaka").is_empty());
    }

    #[test]
    fn contact_filters_combine() {
        let dir = directory();
        assert_eq!(dir.filter_companies("", None).len(), 3);
        assert_eq!(dir.filter_companies("", Some(WorkType::Electrical))[0].id, 5);
        assert_eq!(dir.filter_companies("tiger", None)[0].id, 2);
        assert!(dir.filter_companies("tiger", Some(WorkType::Garbage)).is_empty());
    }

    #[test]
    fn next_schedule_skips_past_days() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 9).unwrap();
        let schedules = vec![at(1, 1, 8, 9), at(2, 1, 10, 9), at(3, 1, 9, 14), at(4, 1, 9, 8), at(5, 2, 9, 7)];
        assert_eq!(next_schedule_for_site(&schedules, 1, today).map(|s| s.id), Some(4));
        assert_eq!(next_schedule_for_site(&schedules, 3, today), None);
        assert_eq!(count_for_site_on(&schedules, 1, today), 2);
    }
}
