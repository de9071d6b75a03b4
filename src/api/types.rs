use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::time::{parse_date, ClockTime};
use crate::error::ValidationError;

pub type ScheduleId = i64;
pub type CompanyId = i64;
pub type SiteId = i64;

/// Kind of work a schedule (or a company, by default) is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Garbage,
    Management,
    Interior,
    Demolition,
    Electrical,
}

impl WorkType {
    pub const ALL: [WorkType; 5] = [
        WorkType::Garbage,
        WorkType::Management,
        WorkType::Interior,
        WorkType::Demolition,
        WorkType::Electrical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkType::Garbage => "Waste collection",
            WorkType::Management => "Site management",
            WorkType::Interior => "Interior work",
            WorkType::Demolition => "Demolition",
            WorkType::Electrical => "Electrical work",
        }
    }

    /// Display colour as RGB
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            WorkType::Garbage => (0x3b, 0x82, 0xf6),     // blue
            WorkType::Management => (0x22, 0xc5, 0x5e),  // green
            WorkType::Interior => (0xf9, 0x73, 0x16),    // orange
            WorkType::Demolition => (0xef, 0x44, 0x44),  // red
            WorkType::Electrical => (0xea, 0xb3, 0x08),  // yellow
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    #[serde(rename = "type")]
    pub work_type: WorkType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
}

/// A time-boxed assignment of a company to a site.
///
/// `company_id` and `site_id` are weak references: the store enforces them,
/// the board renders a placeholder when they dangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub company_id: CompanyId,
    pub site_id: SiteId,
    pub date: NaiveDate,
    pub time_start: ClockTime,
    pub time_end: ClockTime,
    pub work_type: WorkType,
}

impl Schedule {
    pub fn duration_minutes(&self) -> i32 {
        self.time_end.minutes() - self.time_start.minutes()
    }

    pub fn validate(&self, min_duration: i32) -> Result<(), ValidationError> {
        check_range(self.time_start, self.time_end, min_duration)
    }
}

/// A schedule before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSchedule {
    pub company_id: CompanyId,
    pub site_id: SiteId,
    pub date: NaiveDate,
    pub time_start: ClockTime,
    pub time_end: ClockTime,
    pub work_type: WorkType,
}

impl NewSchedule {
    pub fn validate(&self, min_duration: i32) -> Result<(), ValidationError> {
        check_range(self.time_start, self.time_end, min_duration)
    }

    pub fn with_id(self, id: ScheduleId) -> Schedule {
        Schedule {
            id,
            company_id: self.company_id,
            site_id: self.site_id,
            date: self.date,
            time_start: self.time_start,
            time_end: self.time_end,
            work_type: self.work_type,
        }
    }
}

fn check_range(start: ClockTime, end: ClockTime, min_duration: i32) -> Result<(), ValidationError> {
    if start >= end {
        return Err(ValidationError::InvertedRange { start, end });
    }
    let minutes = end.minutes() - start.minutes();
    if minutes < min_duration {
        return Err(ValidationError::TooShort { minutes, min: min_duration });
    }
    Ok(())
}

/// Raw form input for the create dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub company_id: Option<CompanyId>,
    pub site_id: Option<SiteId>,
    pub date: String,
    pub time_start: String,
    pub time_end: String,
    pub work_type: WorkType,
}

impl ScheduleDraft {
    /// Blank form: first company and site preselected, 09:00-17:00
    pub fn new(companies: &[Company], sites: &[Site], date: NaiveDate) -> Self {
        Self {
            company_id: companies.first().map(|c| c.id),
            site_id: sites.first().map(|s| s.id),
            date: date.format("%Y-%m-%d").to_string(),
            time_start: "09:00".to_string(),
            time_end: "17:00".to_string(),
            work_type: WorkType::Garbage,
        }
    }

    pub fn build(&self, min_duration: i32) -> Result<NewSchedule, ValidationError> {
        let company_id = self.company_id.ok_or(ValidationError::MissingCompany)?;
        let site_id = self.site_id.ok_or(ValidationError::MissingSite)?;
        let date = parse_date(&self.date)?;
        let time_start: ClockTime = self.time_start.parse()?;
        let time_end: ClockTime = self.time_end.parse()?;

        let schedule = NewSchedule {
            company_id,
            site_id,
            date,
            time_start,
            time_end,
            work_type: self.work_type,
        };
        schedule.validate(min_duration)?;
        Ok(schedule)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ScheduleDraft {
        ScheduleDraft {
            company_id: Some(1),
            site_id: Some(2),
            date: "2025-12-09".to_string(),
            time_start: "09:00".to_string(),
            time_end: "12:00".to_string(),
            work_type: WorkType::Interior,
        }
    }

    #[test]
    fn reads_store_rows() {
        let json = r#"{
            "id": 7, "company_id": 1, "site_id": 4, "date": "2025-12-09",
            "time_start": "09:00:00", "time_end": "12:00:00", "work_type": "garbage",
            "created_at": "2025-12-01T00:00:00Z", "updated_at": "2025-12-01T00:00:00Z"
        }"#;
        let s: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, 7);
        assert_eq!(s.time_start.to_string(), "09:00");
        assert_eq!(s.duration_minutes(), 180);
        assert_eq!(s.work_type, WorkType::Garbage);
    }

    #[test]
    fn site_address_may_be_null() {
        let site: Site = serde_json::from_str(r#"{"id":1,"name":"Depot","address":null}"#).unwrap();
        assert_eq!(site.address, "");
        let company: Company = serde_json::from_str(r#"{"id":3,"name":"S-TEC","type":"demolition"}"#).unwrap();
        assert_eq!(company.work_type, WorkType::Demolition);
    }

    #[test]
    fn draft_builds_valid_schedule() {
        let s = draft().build(30).unwrap();
        assert_eq!(s.company_id, 1);
        assert_eq!(s.time_end.to_string(), "12:00");
    }

    #[test]
    fn draft_reports_first_problem() {
        let mut d = draft();
        d.company_id = None;
        assert_eq!(d.build(30), Err(ValidationError::MissingCompany));

        let mut d = draft();
        d.site_id = None;
        assert_eq!(d.build(30), Err(ValidationError::MissingSite));

        let mut d = draft();
        d.time_end = "08:00".to_string();
        assert!(matches!(d.build(30), Err(ValidationError::InvertedRange { .. })));

        let mut d = draft();
        d.time_end = "09:15".to_string();
        assert_eq!(d.build(30), Err(ValidationError::TooShort { minutes: 15, min: 30 }));

        let mut d = draft();
        d.date = "tomorrow".to_string();
        assert!(matches!(d.build(30), Err(ValidationError::BadDate(_))));
    }

    #[test]
    fn draft_rejects_hours_past_midnight() {
        let mut d = draft();
        d.time_end = "47:30".to_string();
        assert_eq!(d.build(30), Err(ValidationError::BadClock("47:30".to_string())));

        let mut d = draft();
        d.time_start = "22:00".to_string();
        d.time_end = "24:00".to_string();
        assert_eq!(d.build(30).unwrap().time_end.to_string(), "24:00");
    }

    #[test]
    fn blank_draft_picks_first_entries() {
        let companies = vec![Company { id: 5, name: "TEKO".into(), work_type: WorkType::Garbage }];
        let d = ScheduleDraft::new(&companies, &[], NaiveDate::from_ymd_opt(2025, 12, 9).unwrap());
        assert_eq!(d.company_id, Some(5));
        assert_eq!(d.site_id, None);
        assert_eq!(d.date, "2025-12-09");
        assert_eq!(d.time_start, "09:00");
    }
}
