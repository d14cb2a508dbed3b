//! Booking Orchestration
//!
//! Runs the backend side of the dashboard: wizard opt-in commands, the
//! refresh that follows them, checkout, profile saves and the onboarding
//! journey. Generic over [`DinnerApi`] so it can run against the real
//! client or a test double.

use async_trait::async_trait;
use futures_util::future::try_join_all;
use serde_json::Value;

use crate::client::{BichanceClient, ClientError, ClientResult};
use crate::envelope::ApiEnvelope;
use crate::models::{Booking, CheckoutSession, Dinner, OptedInDinner, UserProfile};
use crate::plans::{PlanError, PlanKey, PriceIds};
use crate::profile::{self, Journey, JourneyAnswer};
use crate::wizard::{
    BookingWizard, Feedback, MealPreference, Notice, OptInRequest, Rejection, WizardOutcome,
};

/// The backend calls booking needs
#[async_trait]
pub trait DinnerApi: Send + Sync {
    async fn opt_in(&self, request: &OptInRequest) -> ClientResult<()>;
    async fn opted_in_dinners(&self) -> ClientResult<Vec<OptedInDinner>>;
    async fn my_bookings(&self) -> ClientResult<Vec<Booking>>;
    async fn create_checkout_session(&self, price_id: &str) -> ClientResult<CheckoutSession>;
    async fn save_journey(&self, answer: &JourneyAnswer) -> ClientResult<()>;
    async fn submit_journey(&self) -> ClientResult<()>;
}

#[async_trait]
impl DinnerApi for BichanceClient {
    async fn opt_in(&self, request: &OptInRequest) -> ClientResult<()> {
        let _: ApiEnvelope<Value> = BichanceClient::opt_in(self, request).await?;
        Ok(())
    }

    async fn opted_in_dinners(&self) -> ClientResult<Vec<OptedInDinner>> {
        BichanceClient::opted_in_dinners(self).await
    }

    async fn my_bookings(&self) -> ClientResult<Vec<Booking>> {
        BichanceClient::my_bookings(self).await
    }

    async fn create_checkout_session(&self, price_id: &str) -> ClientResult<CheckoutSession> {
        BichanceClient::create_checkout_session(self, price_id).await
    }

    async fn save_journey(&self, answer: &JourneyAnswer) -> ClientResult<()> {
        BichanceClient::save_journey(self, answer).await
    }

    async fn submit_journey(&self) -> ClientResult<()> {
        BichanceClient::submit_journey(self).await.map(|_| ())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{0}")]
    Rejected(Rejection),

    #[error("{0}")]
    Plan(#[from] PlanError),

    #[error("No checkout URL returned.")]
    NoCheckoutUrl,

    #[error("An active membership is required to book directly. Choose a plan first.")]
    SubscriptionRequired,

    #[error("Not all personality questions are answered")]
    IncompleteJourney,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Reservations and booking history fetched together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Refreshed {
    pub opted_in: Vec<OptedInDinner>,
    pub bookings: Vec<Booking>,
}

/// Result of running an opt-in command
#[derive(Debug, Clone, PartialEq)]
pub struct BookingReport {
    pub feedback: Feedback,
    /// Present when the opt-in went through and the refresh succeeded
    pub refreshed: Option<Refreshed>,
}

impl BookingReport {
    pub fn succeeded(&self) -> bool {
        !self.feedback.notice.is_error()
    }
}

pub struct BookingService<A> {
    api: A,
    price_ids: PriceIds,
}

impl<A: DinnerApi> BookingService<A> {
    pub fn new(api: A, price_ids: PriceIds) -> Self {
        Self { api, price_ids }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Reservations and bookings, fetched concurrently
    pub async fn refresh(&self) -> ClientResult<Refreshed> {
        let (opted_in, bookings) =
            tokio::join!(self.api.opted_in_dinners(), self.api.my_bookings());
        Ok(Refreshed {
            opted_in: opted_in?,
            bookings: bookings?,
        })
    }

    /// Run an opt-in the wizard asked for and feed the result back into it
    pub async fn execute(&self, wizard: &mut BookingWizard, request: OptInRequest) -> BookingReport {
        match self.api.opt_in(&request).await {
            Ok(()) => {
                tracing::info!(dinner_id = %request.dinner_id, "dinner booked");
                let feedback = wizard.opt_in_succeeded();
                let refreshed = match self.refresh().await {
                    Ok(refreshed) => {
                        wizard.opted_in = refreshed.opted_in.clone();
                        Some(refreshed)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "refresh after booking failed");
                        None
                    }
                };
                BookingReport {
                    feedback,
                    refreshed,
                }
            }
            Err(e) => {
                tracing::warn!(dinner_id = %request.dinner_id, error = %e, "opt-in failed");
                BookingReport {
                    feedback: wizard.opt_in_failed(&e.message()),
                    refreshed: None,
                }
            }
        }
    }

    /// Book a dinner for a subscriber in one go: load reservations, walk
    /// the wizard through dinner and meal, run the opt-in. A dinner that is
    /// already reserved never reaches the backend.
    pub async fn book(
        &self,
        dinner: Dinner,
        meal: MealPreference,
        has_active_subscription: bool,
    ) -> Result<BookingReport, BookingError> {
        let mut wizard = BookingWizard::new(has_active_subscription);
        wizard.opted_in = self.api.opted_in_dinners().await?;

        if let WizardOutcome::Rejected(reason) = wizard.select_dinner(dinner) {
            return Err(BookingError::Rejected(reason));
        }
        wizard.choose_meal(meal);

        match wizard.submit_meal() {
            WizardOutcome::Command(request) => Ok(self.execute(&mut wizard, request).await),
            WizardOutcome::Rejected(reason) => Err(BookingError::Rejected(reason)),
            _ => Err(BookingError::SubscriptionRequired),
        }
    }

    /// Create a checkout session for a plan and return where to send the
    /// member.
    pub async fn start_checkout(&self, plan: PlanKey) -> Result<String, BookingError> {
        let price_id = self.price_ids.resolve(plan)?;
        let session = self.api.create_checkout_session(price_id).await?;
        session
            .redirect_url()
            .map(str::to_string)
            .ok_or(BookingError::NoCheckoutUrl)
    }

    /// Save every changed profile field concurrently
    pub async fn save_profile(&self, original: &UserProfile, edited: &UserProfile) -> Notice {
        let answers = profile::diff(original, edited);
        let saves = answers.iter().map(|answer| self.api.save_journey(answer));
        match try_join_all(saves).await {
            Ok(_) => Notice::Success("Profile updated successfully!".to_string()),
            Err(e) => Notice::Error(format!("Failed to update profile: {}", e.message())),
        }
    }

    /// City first, then country
    pub async fn update_location(&self, city: &str, country: &str) -> Notice {
        for answer in profile::location_update(city, country) {
            if let Err(e) = self.api.save_journey(&answer).await {
                return Notice::Error(format!("Failed to update location: {}", e.message()));
            }
        }
        Notice::Success("Location updated!".to_string())
    }

    /// Save all onboarding answers, then submit the journey
    pub async fn submit_journey(&self, journey: &Journey) -> Result<(), BookingError> {
        if !journey.is_complete() {
            return Err(BookingError::IncompleteJourney);
        }
        let answers = journey.answers();
        try_join_all(answers.iter().map(|answer| self.api.save_journey(answer))).await?;
        self.api.submit_journey().await?;
        tracing::info!(answers = answers.len(), "journey submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{BookingStep, DashboardTab};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        opted_in: Vec<OptedInDinner>,
        opt_in_error: Option<String>,
        checkout: CheckoutSession,
        failing_key: Option<&'static str>,
        opt_in_calls: Mutex<Vec<OptInRequest>>,
        saved: Mutex<Vec<String>>,
        submitted: Mutex<bool>,
    }

    #[async_trait]
    impl DinnerApi for FakeApi {
        async fn opt_in(&self, request: &OptInRequest) -> ClientResult<()> {
            self.opt_in_calls.lock().unwrap().push(request.clone());
            match &self.opt_in_error {
                Some(message) => Err(ClientError::Api {
                    status: 400,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }

        async fn opted_in_dinners(&self) -> ClientResult<Vec<OptedInDinner>> {
            Ok(self.opted_in.clone())
        }

        async fn my_bookings(&self) -> ClientResult<Vec<Booking>> {
            Ok(vec![Booking {
                id: Some("b1".into()),
                ..Default::default()
            }])
        }

        async fn create_checkout_session(&self, _price_id: &str) -> ClientResult<CheckoutSession> {
            Ok(self.checkout.clone())
        }

        async fn save_journey(&self, answer: &JourneyAnswer) -> ClientResult<()> {
            if self.failing_key == Some(answer.question_key.as_str()) {
                return Err(ClientError::Api {
                    status: 400,
                    message: answer.failure_message(Some("Unknown question_key")),
                });
            }
            self.saved.lock().unwrap().push(answer.question_key.clone());
            Ok(())
        }

        async fn submit_journey(&self) -> ClientResult<()> {
            *self.submitted.lock().unwrap() = true;
            Ok(())
        }
    }

    fn dinner(id: &str) -> Dinner {
        Dinner {
            id: id.into(),
            ..Default::default()
        }
    }

    fn service(api: FakeApi) -> BookingService<FakeApi> {
        BookingService::new(api, PriceIds::default())
    }

    #[tokio::test]
    async fn test_book_subscriber_opts_in_and_refreshes() {
        let svc = service(FakeApi::default());
        let report = svc
            .book(dinner("d1"), MealPreference::Veg, true)
            .await
            .unwrap();

        assert!(report.succeeded());
        assert_eq!(report.feedback.notice.message(), "Dinner booked successfully!");
        assert_eq!(report.refreshed.unwrap().bookings.len(), 1);

        let calls = svc.api().opt_in_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].dietary_category, "veg");
        assert_eq!(calls[0].budget_category, "standard");
    }

    #[tokio::test]
    async fn test_already_opted_in_never_hits_backend() {
        let svc = service(FakeApi {
            opted_in: vec![OptedInDinner {
                id: Some("d1".into()),
                ..Default::default()
            }],
            ..Default::default()
        });

        let result = svc.book(dinner("d1"), MealPreference::Veg, true).await;
        assert!(matches!(
            result,
            Err(BookingError::Rejected(Rejection::AlreadyBooked))
        ));
        assert!(svc.api().opt_in_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_subscriber_cannot_book_directly() {
        let svc = service(FakeApi::default());
        let result = svc.book(dinner("d1"), MealPreference::NonVeg, false).await;
        assert!(matches!(result, Err(BookingError::SubscriptionRequired)));
    }

    #[tokio::test]
    async fn test_backend_duplicate_is_reported_as_already_booked() {
        let svc = service(FakeApi {
            opt_in_error: Some("Already opted in".into()),
            ..Default::default()
        });
        let mut wizard = BookingWizard::new(true);
        wizard.select_dinner(dinner("d1"));
        wizard.choose_meal(MealPreference::Veg);
        let WizardOutcome::Command(request) = wizard.submit_meal() else {
            panic!("expected opt-in command");
        };

        let report = svc.execute(&mut wizard, request).await;
        assert!(!report.succeeded());
        assert_eq!(report.feedback.switch_to, Some(DashboardTab::Bookings));
        assert_eq!(wizard.step, BookingStep::Success);
        assert!(report.refreshed.is_none());
    }

    #[tokio::test]
    async fn test_checkout_redirect() {
        let svc = service(FakeApi {
            checkout: CheckoutSession {
                checkout_url: None,
                session_url: Some("https://pay.example/s/1".into()),
            },
            ..Default::default()
        });
        assert_eq!(
            svc.start_checkout(PlanKey::Monthly).await.unwrap(),
            "https://pay.example/s/1"
        );

        let svc = service(FakeApi::default());
        let err = svc.start_checkout(PlanKey::Monthly).await.unwrap_err();
        assert_eq!(err.to_string(), "No checkout URL returned.");
    }

    #[tokio::test]
    async fn test_save_profile_messages() {
        let original = UserProfile::default();
        let edited = UserProfile {
            gender: Some("male".into()),
            profession: Some("engineer".into()),
            ..Default::default()
        };

        let svc = service(FakeApi::default());
        let notice = svc.save_profile(&original, &edited).await;
        assert_eq!(notice, Notice::Success("Profile updated successfully!".into()));
        assert_eq!(svc.api().saved.lock().unwrap().len(), 2);

        let svc = service(FakeApi {
            failing_key: Some("profession"),
            ..Default::default()
        });
        let notice = svc.save_profile(&original, &edited).await;
        assert_eq!(
            notice.message(),
            "Failed to update profile: Failed to update profession: Unknown question_key"
        );
    }

    #[tokio::test]
    async fn test_update_location_saves_city_then_country() {
        let svc = service(FakeApi::default());
        let notice = svc.update_location("Mumbai", "India").await;
        assert_eq!(notice.message(), "Location updated!");
        assert_eq!(
            *svc.api().saved.lock().unwrap(),
            vec!["current_city".to_string(), "current_country".to_string()]
        );
    }

    #[tokio::test]
    async fn test_submit_journey_requires_all_answers() {
        let svc = service(FakeApi::default());
        let mut journey = Journey {
            city: "Delhi".into(),
            country: "India".into(),
            ..Default::default()
        };
        assert!(matches!(
            svc.submit_journey(&journey).await,
            Err(BookingError::IncompleteJourney)
        ));

        for idx in 0..15 {
            journey.set_personality(idx, true);
        }
        svc.submit_journey(&journey).await.unwrap();
        assert!(*svc.api().submitted.lock().unwrap());
        assert_eq!(svc.api().saved.lock().unwrap().len(), 17);
    }
}
