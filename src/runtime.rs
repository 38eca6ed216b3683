use chrono::{DateTime, Datelike, Utc};
use tracing::{error, info};

use crate::config::BookingConfig;
use crate::error::BookingError;
use crate::service::notifier::{publish_quietly, Notifier};
use crate::service::provider::ProviderApi;
use crate::service::{class_selector, membership, registrar, schedule_lookup, time_service};

/// Structured result of one run, mirroring what the external scheduler sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub status_code: u16,
    pub body: String,
}

/// Execute one booking run against the current wall clock.
pub async fn run_booking(
    config: &BookingConfig,
    provider: &dyn ProviderApi,
    notifier: &dyn Notifier,
) -> RunOutcome {
    book_at(config, provider, notifier, Utc::now()).await
}

/// Execute one booking run for a given "now". Fatal errors from any step
/// are caught exactly once here: they produce a single failure notification
/// and a 500 outcome. Registration failures never reach this handler; the
/// registrar notifies for itself and the run still counts as complete.
pub async fn book_at(
    config: &BookingConfig,
    provider: &dyn ProviderApi,
    notifier: &dyn Notifier,
    utc_now: DateTime<Utc>,
) -> RunOutcome {
    match try_book(config, provider, notifier, utc_now).await {
        Ok(body) => RunOutcome {
            status_code: 200,
            body,
        },
        Err(err) => {
            error!("registration process failed: {}", err);
            publish_quietly(
                notifier,
                "Registration Failed",
                &format!("Failed to register for class: {}", err),
            )
            .await;
            RunOutcome {
                status_code: 500,
                body: format!("Failed to register for the class: {}", err),
            }
        }
    }
}

async fn try_book(
    config: &BookingConfig,
    provider: &dyn ProviderApi,
    notifier: &dyn Notifier,
    utc_now: DateTime<Utc>,
) -> Result<String, BookingError> {
    let session = provider
        .login(&config.credentials.email, &config.credentials.password)
        .await?;
    info!("logged in successfully, user id: {}", session.user_id);

    let local_now = time_service::local_now(config.timezone, utc_now);
    info!("current local time: {}", local_now);

    let target = time_service::target_moment(local_now, &config.day_offsets, config.target_hour)?;

    let selection =
        class_selector::select(target.weekday(), &config.schedule_rule, &config.class_table);
    if selection.ids.is_empty() {
        return Err(BookingError::Configuration(format!(
            "no class ids found for the specified class: {:?}",
            selection.class_name
        )));
    }

    let matched = schedule_lookup::find_session(provider, &session.token, target, &selection.ids)
        .await
        .ok_or_else(|| {
            BookingError::LookupMiss(format!("no session found for {}", target))
        })?;

    let membership_id = membership::resolve_membership(provider, &session.token)
        .await
        .ok_or_else(|| {
            BookingError::MembershipMiss("no membership id found for registration".to_string())
        })?;

    registrar::register_session(provider, notifier, &session.token, membership_id, &matched).await;

    Ok("Successfully registered for the class.".to_string())
}
