use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BookingConfig;
use crate::error::BookingError;
use crate::models::session::{LoginSession, ScheduledSession};
use crate::service::provider::ProviderApi;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    data: LoginData,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    #[serde(default)]
    data: Vec<ScheduleItem>,
}

#[derive(Debug, Deserialize)]
struct ScheduleItem {
    id: u64,
    time: String,
    box_category_fk: u32,
    box_categories: BoxCategory,
}

#[derive(Debug, Deserialize)]
struct BoxCategory {
    name: String,
}

#[derive(Debug, Deserialize)]
struct MembershipResponse {
    #[serde(default)]
    data: Vec<MembershipRecord>,
}

#[derive(Debug, Deserialize)]
struct MembershipRecord {
    id: u64,
}

#[derive(Debug, Serialize)]
struct RegisterRequest {
    schedule_id: u64,
    membership_user_id: u64,
    extras: Option<serde_json::Value>,
}

/// HTTP client for the Arbox booking API. Uses reqwest's default verified
/// TLS; the mobile-app headers the API expects are sent on every request,
/// with the user-agent taken from configuration.
pub struct ArboxClient {
    http: reqwest::Client,
    base_url: String,
    locations_box_id: u32,
    boxes_id: u32,
}

impl ArboxClient {
    pub fn new(config: &BookingConfig) -> Result<Self, BookingError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(HeaderName::from_static("version"), HeaderValue::from_static("11"));
        headers.insert(HeaderName::from_static("referername"), HeaderValue::from_static("app"));
        headers.insert(
            HeaderName::from_static("whitelabel"),
            HeaderValue::from_static("HYPR-training"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|_| {
                BookingError::Configuration(format!("invalid USER_AGENT: {}", config.user_agent))
            })?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            locations_box_id: config.locations_box_id,
            boxes_id: config.boxes_id,
        })
    }
}

#[async_trait]
impl ProviderApi for ArboxClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginSession, BookingError> {
        let url = format!("{}/api/v2/user/login", self.base_url);
        let payload = LoginRequest { email, password };

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| BookingError::Authentication(format!("login request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BookingError::Authentication(format!("login response unreadable: {}", e)))?;

        if !status.is_success() {
            return Err(BookingError::Authentication(format!(
                "login failed with status {}",
                status
            )));
        }

        let parsed: LoginResponse = serde_json::from_str(&text).map_err(|e| {
            BookingError::Authentication(format!("malformed login response: {}", e))
        })?;

        Ok(LoginSession {
            token: parsed.data.token,
            user_id: parsed.data.id,
        })
    }

    async fn sessions_on(
        &self,
        token: &str,
        target: NaiveDateTime,
    ) -> Result<Vec<ScheduledSession>, BookingError> {
        let url = format!("{}/api/v2/schedule/betweenDates", self.base_url);
        let date_str = target.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let locations_box_id = self.locations_box_id.to_string();
        let boxes_id = self.boxes_id.to_string();

        let response = self
            .http
            .post(&url)
            .query(&[
                ("from", date_str.as_str()),
                ("to", date_str.as_str()),
                ("locations_box_id", locations_box_id.as_str()),
                ("boxes_id", boxes_id.as_str()),
            ])
            .header("accesstoken", token)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(BookingError::Provider(format!(
                "schedule query failed with status {}",
                status
            )));
        }

        let parsed: ScheduleResponse = serde_json::from_str(&text).map_err(|e| {
            BookingError::Provider(format!("malformed schedule response: {}", e))
        })?;

        debug!("schedule query returned {} sessions", parsed.data.len());
        Ok(parsed
            .data
            .into_iter()
            .map(|item| ScheduledSession {
                id: item.id,
                time: item.time,
                category_id: item.box_category_fk,
                class_name: item.box_categories.name,
            })
            .collect())
    }

    async fn memberships(&self, token: &str) -> Result<Vec<u64>, BookingError> {
        let url = format!("{}/api/v2/boxes/{}/memberships/1", self.base_url, self.boxes_id);

        let response = self
            .http
            .get(&url)
            .header("accesstoken", token)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(BookingError::Provider(format!(
                "membership query failed with status {}",
                status
            )));
        }

        let parsed: MembershipResponse = serde_json::from_str(&text).map_err(|e| {
            BookingError::Provider(format!("malformed membership response: {}", e))
        })?;

        Ok(parsed.data.into_iter().map(|record| record.id).collect())
    }

    async fn register(
        &self,
        token: &str,
        session_id: u64,
        membership_id: u64,
    ) -> Result<(), BookingError> {
        let url = format!("{}/api/v2/scheduleUser/insert", self.base_url);
        let payload = RegisterRequest {
            schedule_id: session_id,
            membership_user_id: membership_id,
            extras: None,
        };

        let response = self
            .http
            .post(&url)
            .header("accesstoken", token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BookingError::Provider(format!(
                "registration failed with status {}: {}",
                status, text
            )));
        }

        Ok(())
    }
}
