use tracing::{info, warn};

use crate::models::session::SessionDescriptor;
use crate::service::notifier::{publish_quietly, Notifier};
use crate::service::provider::ProviderApi;

/// Submit the registration and report the outcome through the notifier.
/// This step is self-contained: a failed registration is notified and
/// logged but never signalled to the caller.
pub async fn register_session(
    provider: &dyn ProviderApi,
    notifier: &dyn Notifier,
    token: &str,
    membership_id: u64,
    session: &SessionDescriptor,
) {
    match provider.register(token, session.id, membership_id).await {
        Ok(()) => {
            publish_quietly(
                notifier,
                "Registration Successful",
                &format!(
                    "Successfully registered for class with session ID: {}\nDetails: {}\tat\t{}",
                    session.id, session.time, session.class_name
                ),
            )
            .await;
            info!("registered successfully for session {}", session.id);
        }
        Err(err) => {
            publish_quietly(
                notifier,
                "Registration Failed",
                &format!(
                    "Failed to register to class: {} at time: {}\n{}",
                    session.class_name, session.time, err
                ),
            )
            .await;
            warn!("failed to register for session {}: {}", session.id, err);
        }
    }
}
