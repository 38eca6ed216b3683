use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Asia::Jerusalem;

use gym_booker::config::{BookingConfig, Credentials};
use gym_booker::error::BookingError;
use gym_booker::models::schedule::{ClassTypeTable, ScheduleRule, WeekdayOffsets};
use gym_booker::models::session::{LoginSession, ScheduledSession};
use gym_booker::runtime::book_at;
use gym_booker::service::notifier::Notifier;
use gym_booker::service::provider::ProviderApi;

struct ScriptedProvider {
    login: Result<LoginSession, String>,
    sessions: Result<Vec<ScheduledSession>, String>,
    memberships: Result<Vec<u64>, String>,
    register: Result<(), String>,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedProvider {
    fn happy_path(sessions: Vec<ScheduledSession>) -> Self {
        Self {
            login: Ok(LoginSession {
                token: "token-abc".to_string(),
                user_id: 12,
            }),
            sessions: Ok(sessions),
            memberships: Ok(vec![4411]),
            register: Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn called(&self, name: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| *c == name)
    }
}

#[async_trait]
impl ProviderApi for ScriptedProvider {
    async fn login(&self, _email: &str, _password: &str) -> Result<LoginSession, BookingError> {
        self.calls.lock().unwrap().push("login");
        match &self.login {
            Ok(session) => Ok(session.clone()),
            Err(err) => Err(BookingError::Authentication(err.clone())),
        }
    }

    async fn sessions_on(
        &self,
        _token: &str,
        _target: NaiveDateTime,
    ) -> Result<Vec<ScheduledSession>, BookingError> {
        self.calls.lock().unwrap().push("sessions_on");
        match &self.sessions {
            Ok(sessions) => Ok(sessions.clone()),
            Err(err) => Err(BookingError::Provider(err.clone())),
        }
    }

    async fn memberships(&self, _token: &str) -> Result<Vec<u64>, BookingError> {
        self.calls.lock().unwrap().push("memberships");
        match &self.memberships {
            Ok(ids) => Ok(ids.clone()),
            Err(err) => Err(BookingError::Provider(err.clone())),
        }
    }

    async fn register(
        &self,
        _token: &str,
        session_id: u64,
        membership_id: u64,
    ) -> Result<(), BookingError> {
        self.calls.lock().unwrap().push("register");
        assert_eq!(session_id, 777, "registered the wrong session");
        assert_eq!(membership_id, 4411, "registered the wrong membership");
        match &self.register {
            Ok(()) => Ok(()),
            Err(err) => Err(BookingError::Provider(err.clone())),
        }
    }
}

struct CapturingNotifier {
    published: Mutex<Vec<(String, String)>>,
}

impl CapturingNotifier {
    fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
        }
    }

    fn subjects(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(subject, _)| subject.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for CapturingNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), String> {
        self.published
            .lock()
            .unwrap()
            .push((subject.to_string(), message.to_string()));
        Ok(())
    }
}

fn config_with_rule(rule_json: &str) -> BookingConfig {
    BookingConfig {
        credentials: Credentials {
            email: "member@example.com".to_string(),
            password: "hunter2".to_string(),
        },
        api_endpoint: "https://provider.test".to_string(),
        locations_box_id: 48,
        boxes_id: 59,
        target_hour: 18,
        timezone: Jerusalem,
        schedule_rule: ScheduleRule::from_json(rule_json).unwrap(),
        class_table: ClassTypeTable::default(),
        day_offsets: WeekdayOffsets::default(),
        user_agent: "test-agent".to_string(),
        notify_topic_url: "https://notify.test/topic".to_string(),
        notify_token: None,
    }
}

// Sunday morning in Israel (winter, UTC+2): local 2026-01-04 08:30, so the
// default two-day jump targets Tuesday 2026-01-06 at 18:00.
fn sunday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 4, 6, 30, 0).unwrap()
}

fn session(id: u64, time: &str, category_id: u32, name: &str) -> ScheduledSession {
    ScheduledSession {
        id,
        time: time.to_string(),
        category_id,
        class_name: name.to_string(),
    }
}

#[tokio::test]
async fn books_the_first_matching_gain_session() {
    let config = config_with_rule(r#"{"1": "GAIN"}"#);
    let provider = ScriptedProvider::happy_path(vec![
        session(1, "17:00", 50223, "GAIN"),
        session(2, "18:00", 99999, "Open Gym"),
        session(777, "18:00", 50223, "GAIN"),
    ]);
    let notifier = CapturingNotifier::new();

    let outcome = book_at(&config, &provider, &notifier, sunday_morning()).await;

    assert_eq!(outcome.status_code, 200);
    assert!(provider.called("register"));
    assert_eq!(notifier.subjects(), vec!["Registration Successful"]);
    let published = notifier.published.lock().unwrap();
    assert!(published[0].1.contains("777"));
}

#[tokio::test]
async fn unknown_class_name_fails_before_any_schedule_query() {
    let config = config_with_rule(r#"{"1": "Pilates"}"#);
    let provider = ScriptedProvider::happy_path(vec![]);
    let notifier = CapturingNotifier::new();

    let outcome = book_at(&config, &provider, &notifier, sunday_morning()).await;

    assert_eq!(outcome.status_code, 500);
    assert!(!provider.called("sessions_on"));
    assert!(!provider.called("register"));
    assert_eq!(notifier.subjects(), vec!["Registration Failed"]);
}

#[tokio::test]
async fn unmapped_weekday_fails_the_same_way() {
    // Rule only covers Thursday; the Tuesday target has no class.
    let config = config_with_rule(r#"{"3": "WOD"}"#);
    let provider = ScriptedProvider::happy_path(vec![]);
    let notifier = CapturingNotifier::new();

    let outcome = book_at(&config, &provider, &notifier, sunday_morning()).await;

    assert_eq!(outcome.status_code, 500);
    assert!(!provider.called("sessions_on"));
}

#[tokio::test]
async fn login_failure_aborts_with_one_notification() {
    let config = config_with_rule(r#"{"1": "GAIN"}"#);
    let mut provider = ScriptedProvider::happy_path(vec![]);
    provider.login = Err("login failed with status 401 Unauthorized".to_string());
    let notifier = CapturingNotifier::new();

    let outcome = book_at(&config, &provider, &notifier, sunday_morning()).await;

    assert_eq!(outcome.status_code, 500);
    assert!(outcome.body.contains("authentication failed"));
    assert!(!provider.called("sessions_on"));
    assert_eq!(notifier.subjects(), vec!["Registration Failed"]);
}

#[tokio::test]
async fn no_time_match_is_a_lookup_miss() {
    let config = config_with_rule(r#"{"1": "GAIN"}"#);
    // Right category, wrong time-of-day.
    let provider = ScriptedProvider::happy_path(vec![
        session(1, "19:00", 50223, "GAIN"),
        session(2, "20:00", 40072, "GAIN"),
    ]);
    let notifier = CapturingNotifier::new();

    let outcome = book_at(&config, &provider, &notifier, sunday_morning()).await;

    assert_eq!(outcome.status_code, 500);
    assert!(outcome.body.contains("no matching session"));
    assert!(!provider.called("register"));
    assert_eq!(notifier.subjects(), vec!["Registration Failed"]);
}

#[tokio::test]
async fn empty_membership_list_is_fatal() {
    let config = config_with_rule(r#"{"1": "GAIN"}"#);
    let mut provider = ScriptedProvider::happy_path(vec![session(777, "18:00", 50223, "GAIN")]);
    provider.memberships = Ok(vec![]);
    let notifier = CapturingNotifier::new();

    let outcome = book_at(&config, &provider, &notifier, sunday_morning()).await;

    assert_eq!(outcome.status_code, 500);
    assert!(outcome.body.contains("no membership found"));
    assert!(!provider.called("register"));
    assert_eq!(notifier.subjects(), vec!["Registration Failed"]);
}

#[tokio::test]
async fn registration_failure_stays_self_contained() {
    let config = config_with_rule(r#"{"1": "GAIN"}"#);
    let mut provider = ScriptedProvider::happy_path(vec![session(777, "18:00", 50223, "GAIN")]);
    provider.register = Err("503 Service Unavailable".to_string());
    let notifier = CapturingNotifier::new();

    let outcome = book_at(&config, &provider, &notifier, sunday_morning()).await;

    // The registrar swallows its own failure: the run completes through the
    // success path with exactly one failure notification, sent by the
    // registrar rather than the top-level handler.
    assert_eq!(outcome.status_code, 200);
    assert_eq!(notifier.subjects(), vec!["Registration Failed"]);
}
