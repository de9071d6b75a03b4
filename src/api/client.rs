use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, info};

use super::store::ScheduleStore;
use super::time::ClockTime;
use super::types::*;
use crate::config::Config;
use crate::error::StoreError;

/// PostgREST-style HTTP store (`/rest/v1/{table}`)
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Body of an update: every editable column plus the modification stamp
#[derive(Debug, Serialize)]
struct SchedulePatch {
    company_id: CompanyId,
    site_id: SiteId,
    date: NaiveDate,
    time_start: ClockTime,
    time_end: ClockTime,
    work_type: WorkType,
    updated_at: String,
}

impl SchedulePatch {
    fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            company_id: schedule.company_id,
            site_id: schedule.site_id,
            date: schedule.date,
            time_start: schedule.time_start,
            time_end: schedule.time_end,
            work_type: schedule.work_type,
            updated_at: Local::now().to_rfc3339(),
        }
    }
}

impl RestStore {
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let api_key = config.api_key.clone().ok_or(StoreError::NotConfigured)?;
        if config.store_url.trim().is_empty() {
            return Err(StoreError::NotConfigured);
        }

        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.rest_url(),
            api_key,
        })
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        self.client
            .request(method, &url)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::ACCEPT, "application/json")
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T, StoreError> {
        let response = self.request(Method::GET, endpoint).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send a body and ask for the affected rows back
    async fn send_returning<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Vec<Schedule>, StoreError> {
        let mut request = self
            .request(method, endpoint)
            .header("Prefer", "return=representation");
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .json(body);
        }

        let response = check_status(request.send().await?).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, body))
}

/// Constraint violations come back as 400/409/422; everything else is a plain status failure
fn status_error(status: StatusCode, body: String) -> StoreError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            StoreError::Rejected(body)
        }
        _ => StoreError::Status {
            status: status.as_u16(),
            body,
        },
    }
}

fn by_id(id: ScheduleId) -> String {
    format!("/schedules?id=eq.{}", id)
}

#[async_trait]
impl ScheduleStore for RestStore {
    async fn list(&self) -> Result<Vec<Schedule>, StoreError> {
        let schedules: Vec<Schedule> = self
            .get("/schedules?select=*&order=date.asc,time_start.asc")
            .await?;
        info!("loaded {} schedules", schedules.len());
        Ok(schedules)
    }

    async fn create(&self, schedule: &NewSchedule) -> Result<Schedule, StoreError> {
        let rows = self
            .send_returning(Method::POST, "/schedules", Some(schedule))
            .await?;
        let created = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Rejected("insert returned no row".to_string()))?;
        info!("created schedule {}", created.id);
        Ok(created)
    }

    async fn update(&self, schedule: &Schedule) -> Result<(), StoreError> {
        let patch = SchedulePatch::from_schedule(schedule);
        let rows = self
            .send_returning(Method::PATCH, &by_id(schedule.id), Some(&patch))
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(schedule.id));
        }
        debug!("updated schedule {}", schedule.id);
        Ok(())
    }

    async fn delete(&self, id: ScheduleId) -> Result<(), StoreError> {
        let rows = self
            .send_returning::<()>(Method::DELETE, &by_id(id), None)
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(id));
        }
        info!("deleted schedule {}", id);
        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        self.get("/companies?select=*&order=id.asc").await
    }

    async fn list_sites(&self) -> Result<Vec<Site>, StoreError> {
        self.get("/sites?select=*&order=id.asc").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Config {
        Config {
            store_url: "demo.supabase.co".to_string(),
            api_key: Some("anon".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn needs_url_and_key() {
        assert!(matches!(RestStore::new(&Config::default()), Err(StoreError::NotConfigured)));
        let store = RestStore::new(&configured()).unwrap();
        assert_eq!(store.base_url, "https://demo.supabase.co/rest/v1");
    }

    #[test]
    fn constraint_statuses_are_rejections() {
        assert!(matches!(
            status_error(StatusCode::CONFLICT, "fk".into()),
            StoreError::Rejected(_)
        ));
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()),
            StoreError::Status { status: 500, .. }
        ));
    }

    #[test]
    fn patch_carries_all_editable_columns() {
        let schedule = Schedule {
            id: 3,
            company_id: 2,
            site_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 12, 11).unwrap(),
            time_start: ClockTime::from_hm(9, 0),
            time_end: ClockTime::from_hm(18, 0),
            work_type: WorkType::Management,
        };
        let json = serde_json::to_value(SchedulePatch::from_schedule(&schedule)).unwrap();
        assert_eq!(json["company_id"], 2);
        assert_eq!(json["date"], "2025-12-11");
        assert_eq!(json["time_end"], "18:00");
        assert_eq!(json["work_type"], "management");
        assert!(json.get("id").is_none());
        assert_eq!(by_id(3), "/schedules?id=eq.3");
    }
}
