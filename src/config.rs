use std::collections::HashMap;
use std::env;
use std::fs;

use chrono_tz::Tz;

use crate::error::BookingError;
use crate::models::schedule::{ClassTypeTable, ScheduleRule, WeekdayOffsets};

const DEFAULT_API_ENDPOINT: &str = "https://apiappv2.arboxapp.com";
const DEFAULT_LOCATIONS_BOX_ID: u32 = 48;
const DEFAULT_BOXES_ID: u32 = 59;
const DEFAULT_TARGET_HOUR: u32 = 18; // 6 p.m.
const DEFAULT_TIMEZONE: &str = "Asia/Jerusalem";
const DEFAULT_USER_AGENT: &str = "HYPRtraining/4000531 CFNetwork/1492.0.1 Darwin/23.3.0";

/// Raw KEY=VALUE configuration, read from an optional config file with
/// process environment variables as fallback.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(format!("Invalid config line {}: {}", idx + 1, line));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if (value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\''))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn prop(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| env::var(key).ok())
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Everything one booking run needs, resolved once at startup and passed
/// down explicitly. Nothing else reads the environment after this.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    pub credentials: Credentials,
    pub api_endpoint: String,
    pub locations_box_id: u32,
    pub boxes_id: u32,
    pub target_hour: u32,
    pub timezone: Tz,
    pub schedule_rule: ScheduleRule,
    pub class_table: ClassTypeTable,
    pub day_offsets: WeekdayOffsets,
    pub user_agent: String,
    pub notify_topic_url: String,
    pub notify_token: Option<String>,
}

impl BookingConfig {
    pub fn load(config: &AppConfig) -> Result<Self, BookingError> {
        let required = |key: &str| {
            config
                .prop(key)
                .ok_or_else(|| BookingError::Configuration(format!("{} must be set", key)))
        };

        let target_hour = match config.prop("TARGET_HOUR") {
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                BookingError::Configuration(format!("TARGET_HOUR is not a valid hour: {}", raw))
            })?,
            None => DEFAULT_TARGET_HOUR,
        };
        if target_hour > 23 {
            return Err(BookingError::Configuration(format!(
                "TARGET_HOUR out of range: {}",
                target_hour
            )));
        }

        let schedule_rule = match config.prop("SCHEDULE_CONFIG") {
            Some(raw) => ScheduleRule::from_json(&raw)?,
            None => ScheduleRule::default(),
        };

        let day_offsets = match config.prop("DAY_OFFSETS") {
            Some(raw) => WeekdayOffsets::from_json(&raw, 2)?,
            None => WeekdayOffsets::default(),
        };

        let timezone = config
            .prop("TIMEZONE")
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string())
            .parse::<Tz>()
            .map_err(|e| BookingError::Configuration(format!("invalid TIMEZONE: {}", e)))?;

        let parse_id = |key: &str, default: u32| match config.prop(key) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| BookingError::Configuration(format!("{} is not numeric: {}", key, raw))),
            None => Ok(default),
        };

        Ok(Self {
            credentials: Credentials {
                email: required("USER_EMAIL")?,
                password: required("USER_PASSWORD")?,
            },
            api_endpoint: config
                .prop("API_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            locations_box_id: parse_id("LOCATIONS_BOX_ID", DEFAULT_LOCATIONS_BOX_ID)?,
            boxes_id: parse_id("BOXES_ID", DEFAULT_BOXES_ID)?,
            target_hour,
            timezone,
            schedule_rule,
            class_table: ClassTypeTable::default(),
            day_offsets,
            user_agent: config
                .prop("USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            notify_topic_url: required("NOTIFY_TOPIC_URL")?,
            notify_token: config.prop("NOTIFY_TOKEN"),
        })
    }
}
