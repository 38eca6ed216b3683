use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::models::session::SessionDescriptor;
use crate::service::provider::ProviderApi;

/// Find the session to register for: the first one, in provider order,
/// whose category id is acceptable and whose time-of-day string equals the
/// target's "HH:MM" exactly. Transport and parse failures are deliberately
/// swallowed here and reported as "no match".
pub async fn find_session(
    provider: &dyn ProviderApi,
    token: &str,
    target: NaiveDateTime,
    class_ids: &[u32],
) -> Option<SessionDescriptor> {
    let target_time = target.format("%H:%M").to_string();

    let sessions = match provider.sessions_on(token, target).await {
        Ok(sessions) => sessions,
        Err(err) => {
            warn!("failed to query schedule: {}", err);
            return None;
        }
    };

    for session in sessions {
        debug!(
            "checking session {} ({} at {})",
            session.id, session.class_name, session.time
        );
        if class_ids.contains(&session.category_id) && session.time == target_time {
            debug!(
                "found matching session {} for category {}",
                session.id, session.category_id
            );
            return Some(SessionDescriptor {
                id: session.id,
                time: session.time,
                class_name: session.class_name,
            });
        }
    }
    None
}
