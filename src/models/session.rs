/// Token and user id handed back by the provider's login endpoint. The
/// token is only valid for the current run; there is no refresh handling.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: String,
    pub user_id: u64,
}

/// One scheduled class occurrence as returned by the provider calendar.
#[derive(Debug, Clone)]
pub struct ScheduledSession {
    pub id: u64,
    /// Zero-padded "HH:MM" local time-of-day, no timezone.
    pub time: String,
    pub category_id: u32,
    pub class_name: String,
}

/// The session picked for registration.
#[derive(Debug, Clone)]
pub struct SessionDescriptor {
    pub id: u64,
    pub time: String,
    pub class_name: String,
}
