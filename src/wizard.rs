//! Booking Wizard
//!
//! Dashboard booking flow as a plain state machine. Transitions never touch
//! the network: anything that needs the backend comes back as a
//! [`WizardOutcome::Command`] and the caller reports the result through
//! [`BookingWizard::opt_in_succeeded`] / [`BookingWizard::opt_in_failed`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{is_opted_in, Dinner, OptedInDinner};
use crate::plans::{PlanError, PlanKey, PriceIds};

/// Budget category sent with every opt-in
pub const DEFAULT_BUDGET: &str = "standard";

/// How long the success screen stays before moving to Manage
pub const SUCCESS_SCREEN_MS: u32 = 1500;

/// Backend error message for a duplicate opt-in
const ALREADY_OPTED_IN: &str = "Already opted in";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStep {
    Dinner,
    Plan,
    Meal,
    Membership,
    Payment,
    Success,
    Manage,
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardTab {
    Home,
    Bookings,
    Notifications,
    Profile,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 4] = [
        DashboardTab::Home,
        DashboardTab::Bookings,
        DashboardTab::Notifications,
        DashboardTab::Profile,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Home => "Home",
            DashboardTab::Bookings => "Bookings",
            DashboardTab::Notifications => "Notifications",
            DashboardTab::Profile => "Profile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealPreference {
    #[serde(rename = "Veg")]
    Veg,
    #[serde(rename = "Non-Veg")]
    NonVeg,
}

impl MealPreference {
    pub fn label(&self) -> &'static str {
        match self {
            MealPreference::Veg => "Veg",
            MealPreference::NonVeg => "Non-Veg",
        }
    }

    /// Value the backend expects as `dietary_category`
    pub fn dietary_category(&self) -> &'static str {
        match self {
            MealPreference::Veg => "veg",
            MealPreference::NonVeg => "non-veg",
        }
    }
}

impl fmt::Display for MealPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MealPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "veg" => Ok(MealPreference::Veg),
            "non-veg" | "nonveg" | "non_veg" => Ok(MealPreference::NonVeg),
            other => Err(format!("Unknown meal preference: {}", other)),
        }
    }
}

/// Body of `POST /dinner/opt-in`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptInRequest {
    pub dinner_id: String,
    pub budget_category: String,
    pub dietary_category: String,
}

impl OptInRequest {
    pub fn new(dinner_id: impl Into<String>, meal: MealPreference) -> Self {
        Self {
            dinner_id: dinner_id.into(),
            budget_category: DEFAULT_BUDGET.to_string(),
            dietary_category: meal.dietary_category().to_string(),
        }
    }
}

/// Checkout to start for a plan purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutIntent {
    pub price_id: String,
    /// Stored as `pending_dinner_id` before leaving for the payment page
    pub dinner_id: String,
}

/// Card form. Never sent anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub name: String,
}

impl CardDraft {
    pub fn is_complete(&self) -> bool {
        [&self.number, &self.expiry, &self.cvv, &self.name]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    AlreadyBooked,
    NoDinnerSelected,
    NoPlanSelected,
    NoMembershipSelected,
    IncompleteCard,
    Busy,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Rejection::AlreadyBooked => "You have already booked this dinner.",
            Rejection::NoDinnerSelected => "Please select a dinner first.",
            Rejection::NoPlanSelected => "Please select a plan.",
            Rejection::NoMembershipSelected => "Please choose a membership.",
            Rejection::IncompleteCard => "Please fill in all card details.",
            Rejection::Busy => "Please wait for the current request to finish.",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// The wizard is now at this step
    Moved(BookingStep),
    /// Run this opt-in, then report back
    Command(OptInRequest),
    /// Not allowed; state unchanged
    Rejected(Rejection),
    /// Nothing to do (e.g. no meal chosen yet)
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// What the dashboard shows after an opt-in finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub notice: Notice,
    pub switch_to: Option<DashboardTab>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingWizard {
    pub step: BookingStep,
    pub selected_dinner: Option<Dinner>,
    pub meal: Option<MealPreference>,
    pub selected_plan: Option<PlanKey>,
    pub selected_membership: Option<PlanKey>,
    pub card: CardDraft,
    pub processing: bool,
    pub opting_in: bool,
    pub has_active_subscription: bool,
    pub opted_in: Vec<OptedInDinner>,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new(false)
    }
}

impl BookingWizard {
    pub fn new(has_active_subscription: bool) -> Self {
        Self {
            step: BookingStep::Dinner,
            selected_dinner: None,
            meal: None,
            selected_plan: Some(PlanKey::Monthly),
            selected_membership: None,
            card: CardDraft::default(),
            processing: false,
            opting_in: false,
            has_active_subscription,
            opted_in: Vec::new(),
        }
    }

    /// Back to the dinner list. Subscription flag and reservations survive.
    pub fn reset(&mut self) {
        let opted_in = std::mem::take(&mut self.opted_in);
        *self = Self {
            opted_in,
            ..Self::new(self.has_active_subscription)
        };
    }

    pub fn set_active_subscription(&mut self, active: bool) {
        self.has_active_subscription = active;
    }

    pub fn is_opted_in(&self, dinner_id: &str) -> bool {
        is_opted_in(&self.opted_in, dinner_id)
    }

    /// Replace the known reservations. An existing reservation jumps
    /// straight to Manage.
    pub fn load_opted_in(&mut self, list: Vec<OptedInDinner>) {
        let first = list.first().and_then(OptedInDinner::as_dinner);
        self.opted_in = list;
        if let Some(dinner) = first {
            self.selected_dinner = Some(dinner);
            self.step = BookingStep::Manage;
        }
    }

    pub fn select_dinner(&mut self, dinner: Dinner) -> WizardOutcome {
        if self.is_opted_in(&dinner.id) {
            return WizardOutcome::Rejected(Rejection::AlreadyBooked);
        }
        self.selected_dinner = Some(dinner);
        self.step = if self.has_active_subscription {
            BookingStep::Meal
        } else {
            BookingStep::Plan
        };
        WizardOutcome::Moved(self.step)
    }

    pub fn choose_plan(&mut self, key: PlanKey) {
        self.selected_plan = Some(key);
    }

    /// Resolve what checkout needs for the selected plan and dinner
    pub fn begin_checkout(&self, price_ids: &PriceIds) -> Result<CheckoutIntent, CheckoutBlock> {
        let plan = self.selected_plan.ok_or(CheckoutBlock::Rejected(Rejection::NoPlanSelected))?;
        let dinner = self
            .selected_dinner
            .as_ref()
            .ok_or(CheckoutBlock::Rejected(Rejection::NoDinnerSelected))?;
        let price_id = price_ids.resolve(plan).map_err(CheckoutBlock::Plan)?;
        Ok(CheckoutIntent {
            price_id: price_id.to_string(),
            dinner_id: dinner.id.clone(),
        })
    }

    pub fn choose_meal(&mut self, meal: MealPreference) {
        self.meal = Some(meal);
    }

    /// "Next" on the meal step. Subscribers book directly; everyone else
    /// picks a membership first.
    pub fn submit_meal(&mut self) -> WizardOutcome {
        let Some(meal) = self.meal else {
            return WizardOutcome::Ignored;
        };
        if self.opting_in {
            return WizardOutcome::Rejected(Rejection::Busy);
        }
        if !self.has_active_subscription {
            self.step = BookingStep::Membership;
            return WizardOutcome::Moved(self.step);
        }
        self.opt_in_command(meal)
    }

    fn opt_in_command(&mut self, meal: MealPreference) -> WizardOutcome {
        let Some(dinner) = self.selected_dinner.as_ref() else {
            return WizardOutcome::Rejected(Rejection::NoDinnerSelected);
        };
        if self.is_opted_in(&dinner.id) {
            return WizardOutcome::Rejected(Rejection::AlreadyBooked);
        }
        let request = OptInRequest::new(dinner.id.clone(), meal);
        self.opting_in = true;
        WizardOutcome::Command(request)
    }

    pub fn opt_in_succeeded(&mut self) -> Feedback {
        self.opting_in = false;
        if self.step == BookingStep::Confirmed {
            self.reset();
            Feedback {
                notice: Notice::Success("Dinner booking confirmed!".to_string()),
                switch_to: Some(DashboardTab::Bookings),
            }
        } else {
            self.step = BookingStep::Success;
            Feedback {
                notice: Notice::Success("Dinner booked successfully!".to_string()),
                switch_to: None,
            }
        }
    }

    pub fn opt_in_failed(&mut self, message: &str) -> Feedback {
        self.opting_in = false;
        if message == ALREADY_OPTED_IN && self.step != BookingStep::Confirmed {
            self.step = BookingStep::Success;
            return Feedback {
                notice: Notice::Error(Rejection::AlreadyBooked.to_string()),
                switch_to: Some(DashboardTab::Bookings),
            };
        }
        Feedback {
            notice: Notice::Error(format!("Failed to book dinner: {}", message)),
            switch_to: None,
        }
    }

    pub fn choose_membership(&mut self, key: PlanKey) {
        self.selected_membership = Some(key);
    }

    pub fn to_payment(&mut self) -> WizardOutcome {
        if self.selected_membership.is_none() {
            return WizardOutcome::Rejected(Rejection::NoMembershipSelected);
        }
        self.step = BookingStep::Payment;
        WizardOutcome::Moved(self.step)
    }

    /// Simulated payment: validates the form and moves on
    pub fn pay(&mut self) -> WizardOutcome {
        if !self.card.is_complete() {
            return WizardOutcome::Rejected(Rejection::IncompleteCard);
        }
        self.processing = false;
        self.step = BookingStep::Success;
        WizardOutcome::Moved(self.step)
    }

    /// Success screen timer fired
    pub fn success_elapsed(&mut self) -> WizardOutcome {
        if self.step != BookingStep::Success {
            return WizardOutcome::Ignored;
        }
        self.step = BookingStep::Manage;
        WizardOutcome::Moved(self.step)
    }

    pub fn confirm_presence(&mut self) -> WizardOutcome {
        if self.step != BookingStep::Manage {
            return WizardOutcome::Ignored;
        }
        self.step = BookingStep::Confirmed;
        WizardOutcome::Moved(self.step)
    }

    pub fn return_to_dashboard(&mut self) -> WizardOutcome {
        self.reset();
        WizardOutcome::Moved(self.step)
    }

    /// "Next step" on the confirmed screen re-submits the opt-in
    pub fn confirm_booking(&mut self) -> WizardOutcome {
        if self.opting_in {
            return WizardOutcome::Rejected(Rejection::Busy);
        }
        let Some(dinner) = self.selected_dinner.as_ref() else {
            return WizardOutcome::Ignored;
        };
        let request = OptInRequest::new(dinner.id.clone(), self.meal.unwrap_or(MealPreference::Veg));
        self.opting_in = true;
        WizardOutcome::Command(request)
    }

    /// Header back arrow
    pub fn back(&mut self) -> WizardOutcome {
        if matches!(self.step, BookingStep::Dinner | BookingStep::Manage) {
            return WizardOutcome::Ignored;
        }
        self.step = BookingStep::Dinner;
        self.selected_plan = None;
        self.selected_dinner = None;
        WizardOutcome::Moved(self.step)
    }

    /// Per-step back button
    pub fn step_back(&mut self) -> WizardOutcome {
        match self.step {
            BookingStep::Meal => self.step = BookingStep::Dinner,
            BookingStep::Membership => self.step = BookingStep::Meal,
            BookingStep::Payment => self.step = BookingStep::Membership,
            BookingStep::Success => self.reset(),
            _ => return WizardOutcome::Ignored,
        }
        WizardOutcome::Moved(self.step)
    }

    /// Switching dashboard tabs. Leaving Home drops wizard progress.
    pub fn tab_changed(&mut self, tab: DashboardTab) {
        if tab != DashboardTab::Home {
            self.reset();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutBlock {
    Rejected(Rejection),
    Plan(PlanError),
}

impl fmt::Display for CheckoutBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutBlock::Rejected(r) => r.fmt(f),
            CheckoutBlock::Plan(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for CheckoutBlock {}

#[cfg(test)]
mod tests {
    use super::*;

    fn dinner(id: &str) -> Dinner {
        Dinner {
            id: id.to_string(),
            date: Some("2025-07-09T20:00:00".into()),
            ..Default::default()
        }
    }

    fn reserved(id: &str) -> OptedInDinner {
        OptedInDinner {
            dinner_id: Some(id.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_select_without_subscription_goes_to_plan() {
        let mut wizard = BookingWizard::new(false);
        assert_eq!(
            wizard.select_dinner(dinner("d1")),
            WizardOutcome::Moved(BookingStep::Plan)
        );
        assert_eq!(wizard.selected_plan, Some(PlanKey::Monthly));
    }

    #[test]
    fn test_select_with_subscription_goes_to_meal() {
        let mut wizard = BookingWizard::new(true);
        assert_eq!(
            wizard.select_dinner(dinner("d1")),
            WizardOutcome::Moved(BookingStep::Meal)
        );
    }

    #[test]
    fn test_already_opted_in_dinner_is_rejected_without_state_change() {
        let mut wizard = BookingWizard::new(true);
        wizard.opted_in = vec![reserved("d1")];
        let before = wizard.clone();
        assert_eq!(
            wizard.select_dinner(dinner("d1")),
            WizardOutcome::Rejected(Rejection::AlreadyBooked)
        );
        assert_eq!(wizard, before);
    }

    #[test]
    fn test_load_opted_in_jumps_to_manage() {
        let mut wizard = BookingWizard::new(true);
        wizard.load_opted_in(vec![reserved("d9")]);
        assert_eq!(wizard.step, BookingStep::Manage);
        assert_eq!(wizard.selected_dinner.as_ref().map(|d| d.id.as_str()), Some("d9"));

        let mut empty = BookingWizard::new(true);
        empty.load_opted_in(Vec::new());
        assert_eq!(empty.step, BookingStep::Dinner);
    }

    #[test]
    fn test_subscriber_meal_submit_emits_opt_in() {
        let mut wizard = BookingWizard::new(true);
        wizard.select_dinner(dinner("d1"));
        assert_eq!(wizard.submit_meal(), WizardOutcome::Ignored);

        wizard.choose_meal(MealPreference::NonVeg);
        let outcome = wizard.submit_meal();
        assert_eq!(
            outcome,
            WizardOutcome::Command(OptInRequest {
                dinner_id: "d1".into(),
                budget_category: "standard".into(),
                dietary_category: "non-veg".into(),
            })
        );
        assert!(wizard.opting_in);

        let feedback = wizard.opt_in_succeeded();
        assert_eq!(wizard.step, BookingStep::Success);
        assert_eq!(feedback.notice.message(), "Dinner booked successfully!");
    }

    #[test]
    fn test_non_subscriber_meal_submit_goes_to_membership() {
        let mut wizard = BookingWizard::new(false);
        wizard.select_dinner(dinner("d1"));
        wizard.choose_meal(MealPreference::Veg);
        assert_eq!(
            wizard.submit_meal(),
            WizardOutcome::Moved(BookingStep::Membership)
        );
        assert_eq!(
            wizard.to_payment(),
            WizardOutcome::Rejected(Rejection::NoMembershipSelected)
        );
        wizard.choose_membership(PlanKey::Quarterly);
        assert_eq!(wizard.to_payment(), WizardOutcome::Moved(BookingStep::Payment));
    }

    #[test]
    fn test_already_opted_in_error_moves_to_success_and_bookings() {
        let mut wizard = BookingWizard::new(true);
        wizard.select_dinner(dinner("d1"));
        wizard.choose_meal(MealPreference::Veg);
        wizard.submit_meal();
        let feedback = wizard.opt_in_failed("Already opted in");
        assert_eq!(wizard.step, BookingStep::Success);
        assert_eq!(feedback.switch_to, Some(DashboardTab::Bookings));
        assert_eq!(
            feedback.notice,
            Notice::Error("You have already booked this dinner.".into())
        );
    }

    #[test]
    fn test_other_opt_in_error_keeps_step() {
        let mut wizard = BookingWizard::new(true);
        wizard.select_dinner(dinner("d1"));
        wizard.choose_meal(MealPreference::Veg);
        wizard.submit_meal();
        let feedback = wizard.opt_in_failed("Subscription required");
        assert_eq!(wizard.step, BookingStep::Meal);
        assert_eq!(
            feedback.notice.message(),
            "Failed to book dinner: Subscription required"
        );
        assert!(!wizard.opting_in);
    }

    #[test]
    fn test_checkout_needs_plan_and_dinner() {
        let ids = PriceIds::default();
        let mut wizard = BookingWizard::new(false);
        assert_eq!(
            wizard.begin_checkout(&ids),
            Err(CheckoutBlock::Rejected(Rejection::NoDinnerSelected))
        );
        wizard.select_dinner(dinner("d1"));
        wizard.choose_plan(PlanKey::Yearly);
        let intent = wizard.begin_checkout(&ids).unwrap();
        assert_eq!(intent.dinner_id, "d1");
        assert_eq!(intent.price_id, ids.yearly);
    }

    #[test]
    fn test_payment_requires_complete_card() {
        let mut wizard = BookingWizard::new(false);
        wizard.step = BookingStep::Payment;
        wizard.card.number = "4242".into();
        assert_eq!(wizard.pay(), WizardOutcome::Rejected(Rejection::IncompleteCard));

        wizard.card = CardDraft {
            number: "4242".into(),
            expiry: "12/30".into(),
            cvv: "123".into(),
            name: "A Member".into(),
        };
        assert_eq!(wizard.pay(), WizardOutcome::Moved(BookingStep::Success));
        assert_eq!(wizard.success_elapsed(), WizardOutcome::Moved(BookingStep::Manage));
    }

    #[test]
    fn test_success_timer_after_leaving_success_is_ignored() {
        let mut wizard = BookingWizard::new(false);
        wizard.step = BookingStep::Success;
        assert_eq!(wizard.back(), WizardOutcome::Moved(BookingStep::Dinner));
        assert_eq!(wizard.success_elapsed(), WizardOutcome::Ignored);
        assert_eq!(wizard.step, BookingStep::Dinner);
    }

    #[test]
    fn test_manage_confirm_and_booking_confirmation() {
        let mut wizard = BookingWizard::new(true);
        wizard.load_opted_in(vec![reserved("d1")]);
        assert_eq!(wizard.confirm_presence(), WizardOutcome::Moved(BookingStep::Confirmed));

        match wizard.confirm_booking() {
            WizardOutcome::Command(req) => assert_eq!(req.dinner_id, "d1"),
            other => panic!("expected command, got {:?}", other),
        }
        let feedback = wizard.opt_in_succeeded();
        assert_eq!(feedback.notice.message(), "Dinner booking confirmed!");
        assert_eq!(feedback.switch_to, Some(DashboardTab::Bookings));
        assert_eq!(wizard.step, BookingStep::Dinner);
        assert_eq!(wizard.opted_in.len(), 1);
    }

    #[test]
    fn test_back_navigation() {
        let mut wizard = BookingWizard::new(false);
        wizard.select_dinner(dinner("d1"));
        assert_eq!(wizard.back(), WizardOutcome::Moved(BookingStep::Dinner));
        assert!(wizard.selected_dinner.is_none());
        assert!(wizard.selected_plan.is_none());

        wizard.step = BookingStep::Payment;
        assert_eq!(wizard.step_back(), WizardOutcome::Moved(BookingStep::Membership));
        assert_eq!(wizard.step_back(), WizardOutcome::Moved(BookingStep::Meal));
        assert_eq!(wizard.step_back(), WizardOutcome::Moved(BookingStep::Dinner));
        assert_eq!(wizard.step_back(), WizardOutcome::Ignored);

        wizard.step = BookingStep::Manage;
        assert_eq!(wizard.back(), WizardOutcome::Ignored);
    }

    #[test]
    fn test_leaving_home_tab_resets() {
        let mut wizard = BookingWizard::new(true);
        wizard.select_dinner(dinner("d1"));
        wizard.tab_changed(DashboardTab::Home);
        assert_eq!(wizard.step, BookingStep::Meal);
        wizard.tab_changed(DashboardTab::Profile);
        assert_eq!(wizard.step, BookingStep::Dinner);
        assert!(wizard.has_active_subscription);
    }

    #[test]
    fn test_meal_parsing() {
        assert_eq!("Non-Veg".parse::<MealPreference>().unwrap(), MealPreference::NonVeg);
        assert_eq!("veg".parse::<MealPreference>().unwrap(), MealPreference::Veg);
        assert!("vegan".parse::<MealPreference>().is_err());
    }
}
