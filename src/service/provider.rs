use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::BookingError;
use crate::models::session::{LoginSession, ScheduledSession};

/// Seam over the booking provider's REST API. The production implementation
/// is [`crate::clients::arbox::ArboxClient`]; tests script this trait with
/// fakes instead of standing up a server.
#[async_trait]
pub trait ProviderApi: Send + Sync {
    /// Exchange credentials for a session token. Any failure, transport or
    /// otherwise, is an authentication failure and fatal for the run.
    async fn login(&self, email: &str, password: &str) -> Result<LoginSession, BookingError>;

    /// All sessions scheduled on the target moment's date, in provider order.
    async fn sessions_on(
        &self,
        token: &str,
        target: NaiveDateTime,
    ) -> Result<Vec<ScheduledSession>, BookingError>;

    /// Membership record ids for the configured organization, in provider order.
    async fn memberships(&self, token: &str) -> Result<Vec<u64>, BookingError>;

    /// Register the membership for the given session.
    async fn register(
        &self,
        token: &str,
        session_id: u64,
        membership_id: u64,
    ) -> Result<(), BookingError>;
}
