use thiserror::Error;

/// Fatal and boundary errors for a single booking run.
///
/// Only the first four variants ever abort a run; `Provider` and `Transport`
/// are swallowed at the fail-soft boundaries (schedule lookup, membership
/// resolution, registration) and surface as `LookupMiss`/`MembershipMiss`
/// from the orchestrator instead.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("no matching session: {0}")]
    LookupMiss(String),

    #[error("no membership found: {0}")]
    MembershipMiss(String),

    #[error("provider api error: {0}")]
    Provider(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
