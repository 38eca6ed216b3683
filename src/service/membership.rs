use tracing::{info, warn};

use crate::service::provider::ProviderApi;

/// First membership record for the configured organization, or `None` when
/// the list is empty or the call fails. Errors at this boundary are
/// swallowed, not propagated.
pub async fn resolve_membership(provider: &dyn ProviderApi, token: &str) -> Option<u64> {
    match provider.memberships(token).await {
        Ok(memberships) => {
            let membership_id = memberships.first().copied();
            info!("retrieved membership id: {:?}", membership_id);
            membership_id
        }
        Err(err) => {
            warn!("failed to get membership id: {}", err);
            None
        }
    }
}
