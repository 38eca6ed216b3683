use std::collections::HashMap;

use chrono::Weekday;

use crate::error::BookingError;

/// Weekday → class-type name, keyed by `Weekday::num_days_from_monday`
/// (Monday = 0 .. Sunday = 6). Configured as a JSON object with string
/// keys, e.g. `{"6": "GAIN", "1": "WOD", "3": "WOD"}`.
#[derive(Debug, Clone)]
pub struct ScheduleRule {
    by_weekday: HashMap<u8, String>,
}

impl ScheduleRule {
    pub fn new(by_weekday: HashMap<u8, String>) -> Self {
        Self { by_weekday }
    }

    pub fn from_json(raw: &str) -> Result<Self, BookingError> {
        let parsed: HashMap<String, String> = serde_json::from_str(raw)
            .map_err(|e| BookingError::Configuration(format!("invalid schedule config: {}", e)))?;
        let mut by_weekday = HashMap::new();
        for (key, name) in parsed {
            let weekday: u8 = key.parse().map_err(|_| {
                BookingError::Configuration(format!("invalid weekday key in schedule config: {}", key))
            })?;
            if weekday > 6 {
                return Err(BookingError::Configuration(format!(
                    "weekday key out of range in schedule config: {}",
                    weekday
                )));
            }
            by_weekday.insert(weekday, name);
        }
        Ok(Self { by_weekday })
    }

    pub fn class_for(&self, weekday: Weekday) -> Option<&str> {
        self.by_weekday
            .get(&(weekday.num_days_from_monday() as u8))
            .map(String::as_str)
    }
}

impl Default for ScheduleRule {
    fn default() -> Self {
        let mut by_weekday = HashMap::new();
        by_weekday.insert(6, "GAIN".to_string());
        by_weekday.insert(1, "WOD".to_string());
        by_weekday.insert(3, "WOD".to_string());
        Self { by_weekday }
    }
}

/// Class-type name → provider category identifiers.
#[derive(Debug, Clone)]
pub struct ClassTypeTable {
    by_name: HashMap<String, Vec<u32>>,
}

impl ClassTypeTable {
    pub fn new(by_name: HashMap<String, Vec<u32>>) -> Self {
        Self { by_name }
    }

    /// Identifiers for the named class type; empty when the name is unknown.
    pub fn ids_for(&self, name: &str) -> Vec<u32> {
        self.by_name.get(name).cloned().unwrap_or_default()
    }
}

impl Default for ClassTypeTable {
    fn default() -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("WOD".to_string(), vec![40066, 40067]);
        by_name.insert("Weightlifting".to_string(), vec![40069]);
        by_name.insert("GAIN".to_string(), vec![50223, 40072]);
        by_name.insert("Endurance".to_string(), vec![40068]);
        by_name.insert("MOBILITY".to_string(), vec![50226]);
        by_name.insert("Gymnastics".to_string(), vec![40070]);
        Self { by_name }
    }
}

/// Weekday → days-ahead projection used by the time resolver. Weekdays
/// without an explicit entry fall back to `default_days`.
#[derive(Debug, Clone)]
pub struct WeekdayOffsets {
    by_weekday: HashMap<u8, i64>,
    default_days: i64,
}

impl WeekdayOffsets {
    pub fn new(by_weekday: HashMap<u8, i64>, default_days: i64) -> Self {
        Self {
            by_weekday,
            default_days,
        }
    }

    pub fn from_json(raw: &str, default_days: i64) -> Result<Self, BookingError> {
        let parsed: HashMap<String, i64> = serde_json::from_str(raw)
            .map_err(|e| BookingError::Configuration(format!("invalid day offsets: {}", e)))?;
        let mut by_weekday = HashMap::new();
        for (key, days) in parsed {
            let weekday: u8 = key.parse().map_err(|_| {
                BookingError::Configuration(format!("invalid weekday key in day offsets: {}", key))
            })?;
            if weekday > 6 {
                return Err(BookingError::Configuration(format!(
                    "weekday key out of range in day offsets: {}",
                    weekday
                )));
            }
            by_weekday.insert(weekday, days);
        }
        Ok(Self {
            by_weekday,
            default_days,
        })
    }

    pub fn days_ahead(&self, weekday: Weekday) -> i64 {
        self.by_weekday
            .get(&(weekday.num_days_from_monday() as u8))
            .copied()
            .unwrap_or(self.default_days)
    }
}

impl Default for WeekdayOffsets {
    // Sunday -> Tuesday, Tuesday -> Thursday, Thursday -> Sunday
    fn default() -> Self {
        let mut by_weekday = HashMap::new();
        by_weekday.insert(6, 2);
        by_weekday.insert(1, 2);
        by_weekday.insert(3, 3);
        Self {
            by_weekday,
            default_days: 2,
        }
    }
}
