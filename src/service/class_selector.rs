use chrono::Weekday;
use tracing::debug;

use crate::models::schedule::{ClassTypeTable, ScheduleRule};

/// Outcome of mapping the target weekday to provider category identifiers.
/// `ids` is empty when the weekday has no configured class or the class
/// name is missing from the table; the caller treats that as fatal.
#[derive(Debug, Clone)]
pub struct ClassSelection {
    pub class_name: Option<String>,
    pub ids: Vec<u32>,
}

pub fn select(weekday: Weekday, rule: &ScheduleRule, table: &ClassTypeTable) -> ClassSelection {
    let class_name = rule.class_for(weekday).map(str::to_string);
    let ids = class_name
        .as_deref()
        .map(|name| table.ids_for(name))
        .unwrap_or_default();
    debug!(?class_name, ?ids, "selected class for weekday {}", weekday);
    ClassSelection { class_name, ids }
}
