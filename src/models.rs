//! Domain Models
//!
//! Payloads owned by the Bichance backend. Everything is optional and
//! defaulted: the backend is the source of truth and the client only reads
//! what it needs to render.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A scheduled dinner a member can opt into
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dinner {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
}

impl Dinner {
    /// "Wednesday, Jul 9" or "Dinner" when the date is missing
    pub fn display_date(&self) -> String {
        self.date
            .as_deref()
            .and_then(format_dinner_date)
            .unwrap_or_else(|| "Dinner".to_string())
    }

    /// Start time, defaulting to the usual 8 PM slot
    pub fn display_time(&self) -> &str {
        self.time.as_deref().unwrap_or("8:00 PM")
    }
}

/// Group assignment attached to an opted-in dinner once matching ran
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DinnerGroupInfo {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub match_score: Option<f64>,
}

/// A dinner the member already reserved a seat at
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptedInDinner {
    #[serde(default)]
    pub dinner_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matched: bool,
    #[serde(default)]
    pub group: Option<DinnerGroupInfo>,
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[serde(default)]
    pub restaurant_address: Option<String>,
    #[serde(default)]
    pub table_name: Option<String>,
}

impl OptedInDinner {
    /// The backend uses either key for the dinner reference.
    pub fn matches(&self, dinner_id: &str) -> bool {
        self.dinner_id.as_deref() == Some(dinner_id) || self.id.as_deref() == Some(dinner_id)
    }

    /// Identifier usable for a follow-up opt-in call
    pub fn reference(&self) -> Option<&str> {
        self.dinner_id.as_deref().or(self.id.as_deref())
    }

    pub fn display_date(&self) -> String {
        self.date
            .as_deref()
            .and_then(format_dinner_date)
            .unwrap_or_default()
    }

    /// Group and restaurant cards only show up after matching.
    pub fn has_group(&self) -> bool {
        self.matched && self.group.is_some()
    }

    pub fn restaurant_name(&self) -> &str {
        self.restaurant_name.as_deref().unwrap_or("The Chatter House")
    }

    pub fn restaurant_address(&self) -> &str {
        self.restaurant_address.as_deref().unwrap_or(
            "58 1st & 2nd Floor, Khan Market, Rabindra Nagar, New Delhi, Delhi 110003, India",
        )
    }

    pub fn table_name(&self) -> &str {
        self.table_name.as_deref().unwrap_or("AMAN")
    }

    /// Treat this reservation as a dinner, for re-selecting it in the wizard
    pub fn as_dinner(&self) -> Option<Dinner> {
        Some(Dinner {
            id: self.reference()?.to_string(),
            date: self.date.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            ..Default::default()
        })
    }
}

/// Whether a dinner is among the member's reservations
pub fn is_opted_in(opted_in: &[OptedInDinner], dinner_id: &str) -> bool {
    opted_in.iter().any(|o| o.matches(dinner_id))
}

/// A booking row from the member's booking history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Booking {
    pub fn display_date(&self) -> String {
        self.date
            .as_deref()
            .and_then(format_dinner_date)
            .unwrap_or_else(|| "Dinner".to_string())
    }

    pub fn display_status(&self) -> &str {
        self.status.as_deref().unwrap_or("confirmed")
    }

    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("N/A")
    }
}

/// One stored answer to a personality question. Older profiles store the
/// bare answer string instead of the question/answer pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredAnswer")]
pub struct PersonalityAnswer {
    pub question: Option<String>,
    pub answer: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAnswer {
    Text(String),
    Pair {
        #[serde(default)]
        question: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        answer: String,
    },
}

impl From<StoredAnswer> for PersonalityAnswer {
    fn from(stored: StoredAnswer) -> Self {
        match stored {
            StoredAnswer::Text(answer) => Self {
                question: None,
                answer,
            },
            StoredAnswer::Pair { question, answer } => Self { question, answer },
        }
    }
}

/// The signed-in member's profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub current_city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub current_country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub current_state: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub relationship_status: Option<String>,
    #[serde(default)]
    pub children: Option<bool>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub personality_answers: Option<Vec<Option<PersonalityAnswer>>>,
    #[serde(default)]
    pub subscription_status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub onboarding_complete: bool,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserProfile {
    pub fn has_active_subscription(&self) -> bool {
        self.subscription_status.as_deref() == Some("active")
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    pub fn display_city(&self) -> Option<&str> {
        non_empty(self.city.as_deref()).or_else(|| non_empty(self.current_city.as_deref()))
    }

    pub fn display_country(&self) -> Option<&str> {
        non_empty(self.country.as_deref()).or_else(|| non_empty(self.current_country.as_deref()))
    }

    pub fn display_state(&self) -> Option<&str> {
        non_empty(self.state.as_deref()).or_else(|| non_empty(self.current_state.as_deref()))
    }

    /// Answer at a personality question index, if recorded
    pub fn personality_answer(&self, index: usize) -> Option<&PersonalityAnswer> {
        self.personality_answers
            .as_ref()
            .and_then(|answers| answers.get(index))
            .and_then(|a| a.as_ref())
    }
}

/// Explicit `null` reads as the type's default, same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Tokens issued by a successful OTP verification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Payment-processor checkout session
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub session_url: Option<String>,
}

impl CheckoutSession {
    pub fn redirect_url(&self) -> Option<&str> {
        self.checkout_url
            .as_deref()
            .or(self.session_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Subscription state reported after checkout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub id: String,
    pub status: String,
    /// Unix seconds
    #[serde(default)]
    pub current_period_end: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionSessionInfo {
    pub subscription: SubscriptionStatus,
}

impl SubscriptionSessionInfo {
    pub fn is_active(&self) -> bool {
        self.subscription.status == "active"
    }

    pub fn period_end(&self) -> Option<String> {
        self.subscription
            .current_period_end
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
    }
}

/// Admin login result. The backend returns either a token pair or a bare
/// message, so both are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdminSession {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Admin request to schedule a dinner for a city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDinner {
    pub date: String,
    pub city: String,
    pub country: String,
}

/// Parse the date formats the backend emits: RFC 3339, naive datetimes
/// and bare dates.
pub fn parse_dinner_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Long weekday, short month, numeric day
pub fn format_dinner_date(raw: &str) -> Option<String> {
    parse_dinner_date(raw).map(|dt| dt.format("%A, %b %-d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dinner_accepts_mongo_id() {
        let dinner: Dinner =
            serde_json::from_str(r#"{"_id":"abc","date":"2025-07-09T20:00:00","city":"Delhi"}"#)
                .unwrap();
        assert_eq!(dinner.id, "abc");
        assert_eq!(dinner.display_date(), "Wednesday, Jul 9");
        assert_eq!(dinner.display_time(), "8:00 PM");
    }

    #[test]
    fn test_opted_in_matches_either_key() {
        let by_dinner_id = OptedInDinner {
            dinner_id: Some("d1".into()),
            ..Default::default()
        };
        let by_id = OptedInDinner {
            id: Some("d2".into()),
            ..Default::default()
        };
        let list = vec![by_dinner_id, by_id];
        assert!(is_opted_in(&list, "d1"));
        assert!(is_opted_in(&list, "d2"));
        assert!(!is_opted_in(&list, "d3"));
    }

    #[test]
    fn test_profile_prefers_city_over_current_city() {
        let profile = UserProfile {
            city: Some(String::new()),
            current_city: Some("Mumbai".into()),
            subscription_status: Some("active".into()),
            ..Default::default()
        };
        assert_eq!(profile.display_city(), Some("Mumbai"));
        assert!(profile.has_active_subscription());
        assert!(!UserProfile::default().has_active_subscription());
    }

    #[test]
    fn test_profile_tolerates_null_answers() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"email":"a@b.c","personality_answers":[null,{"question":"Q","answer":"1"}]}"#,
        )
        .unwrap();
        assert!(profile.personality_answer(0).is_none());
        assert_eq!(profile.personality_answer(1).unwrap().answer, "1");
    }

    #[test]
    fn test_profile_null_fields_read_as_defaults() {
        let envelope: crate::envelope::ApiEnvelope<UserProfile> = serde_json::from_str(
            r#"{"data":{"email":"a@b.co","onboarding_complete":null}}"#,
        )
        .unwrap();
        let profile = envelope.data.unwrap();
        assert_eq!(profile.email, "a@b.co");
        assert!(!profile.onboarding_complete);

        let profile: UserProfile = serde_json::from_str(r#"{"email":null}"#).unwrap();
        assert_eq!(profile.email, "");
    }

    #[test]
    fn test_profile_accepts_plain_string_answers() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"email":"a@b.co","personality_answers":["1","0",null]}"#,
        )
        .unwrap();
        assert_eq!(profile.personality_answer(0).unwrap().answer, "1");
        assert_eq!(profile.personality_answer(1).unwrap().answer, "0");
        assert!(profile.personality_answer(1).unwrap().question.is_none());
        assert!(profile.personality_answer(2).is_none());
    }

    #[test]
    fn test_opted_in_null_matched_is_unmatched() {
        let list: Vec<OptedInDinner> =
            serde_json::from_str(r#"[{"dinner_id":"d1","matched":null}]"#).unwrap();
        assert!(!list[0].matched);
        assert!(!list[0].has_group());
        assert!(is_opted_in(&list, "d1"));
    }

    #[test]
    fn test_checkout_redirect_prefers_checkout_url() {
        let session = CheckoutSession {
            checkout_url: None,
            session_url: Some("https://pay.example/s".into()),
        };
        assert_eq!(session.redirect_url(), Some("https://pay.example/s"));
        assert_eq!(CheckoutSession::default().redirect_url(), None);
    }

    #[test]
    fn test_booking_defaults() {
        let booking = Booking::default();
        assert_eq!(booking.display_status(), "confirmed");
        assert_eq!(booking.display_id(), "N/A");
        assert_eq!(booking.display_date(), "Dinner");
    }

    #[test]
    fn test_parse_rfc3339_and_bare_date() {
        assert!(parse_dinner_date("2025-07-09T20:00:00Z").is_some());
        assert!(parse_dinner_date("2025-07-09").is_some());
        assert!(parse_dinner_date("not a date").is_none());
    }
}
