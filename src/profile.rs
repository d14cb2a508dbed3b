//! Profile Edits and Onboarding Journey
//!
//! Profile changes are saved one field at a time through the journey
//! endpoint. This module turns an edited profile into those per-field
//! answers and holds the onboarding questionnaire.

use serde::{Deserialize, Serialize};

use crate::models::{PersonalityAnswer, UserProfile};

/// Image used when a city has no dedicated hero image
pub const DEFAULT_CITY_IMAGE: &str = "/l1.png";

const CITY_IMAGES: &[(&str, &str)] = &[
    ("delhi", "/4.jpg"),
    ("mumbai", "/5.jpg"),
    ("bangalore", "/6.webp"),
    ("london", "/hero.jpg"),
];

/// Statements answered with agree ("1") or disagree ("0"). The index is
/// the journey key suffix (`q0`..`q14`).
pub const PERSONALITY_QUESTIONS: [&str; 15] = [
    "I enjoy discussing politics and current news.",
    "I prefer small gatherings over large parties.",
    "I like to plan ahead and stay organized.",
    "I often go with the flow rather than planning.",
    "I enjoy debating different ideas.",
    "I like trying new restaurants and cuisines.",
    "I feel energized when I'm around other people.",
    "I enjoy listening more than talking.",
    "I enjoy philosophical or deep conversations.",
    "I prefer familiar foods over exotic dishes.",
    "I enjoy meeting new and different types of people.",
    "I like organizing events and gatherings.",
    "I prefer quiet environments.",
    "I am comfortable sharing personal stories.",
    "I like helping others feel included in a group.",
];

/// Body of `POST /journey/save`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyAnswer {
    pub question_key: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl JourneyAnswer {
    /// Normalizes the answer the way the backend stores it: `dob` keeps
    /// only the date part.
    pub fn new(key: impl Into<String>, answer: impl Into<String>) -> Self {
        let question_key = key.into();
        let mut answer = answer.into();
        if question_key == "dob" {
            answer = answer.chars().take(10).collect();
        }
        Self {
            question_key,
            answer,
            question: None,
        }
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    pub fn personality(index: usize, answer: impl Into<String>, question: Option<String>) -> Self {
        let question = question.or_else(|| PERSONALITY_QUESTIONS.get(index).map(|q| q.to_string()));
        Self {
            question_key: format!("q{}", index),
            answer: answer.into(),
            question,
        }
    }

    /// Error text for a failed save, optionally with the backend detail
    pub fn failure_message(&self, detail: Option<&str>) -> String {
        match detail.filter(|d| !d.is_empty()) {
            Some(detail) => format!("Failed to update {}: {}", self.question_key, detail),
            None => format!("Failed to update {}", self.question_key),
        }
    }
}

/// Editable profile fields that the backend persists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    City,
    Country,
    Dob,
    Gender,
    RelationshipStatus,
    Profession,
    Children,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::City,
        ProfileField::Country,
        ProfileField::Dob,
        ProfileField::Gender,
        ProfileField::RelationshipStatus,
        ProfileField::Profession,
        ProfileField::Children,
    ];

    pub fn journey_key(&self) -> &'static str {
        match self {
            ProfileField::City => "current_city",
            ProfileField::Country => "current_country",
            ProfileField::Dob => "dob",
            ProfileField::Gender => "gender",
            ProfileField::RelationshipStatus => "relationship_status",
            ProfileField::Profession => "profession",
            ProfileField::Children => "children",
        }
    }

    /// Current value as the journey answer string
    fn value(&self, profile: &UserProfile) -> Option<String> {
        match self {
            ProfileField::City => profile.city.clone(),
            ProfileField::Country => profile.country.clone(),
            ProfileField::Dob => profile.dob.clone(),
            ProfileField::Gender => profile.gender.clone(),
            ProfileField::RelationshipStatus => profile.relationship_status.clone(),
            ProfileField::Profession => profile.profession.clone(),
            ProfileField::Children => profile.children.map(|c| c.to_string()),
        }
    }
}

/// Journey answers needed to turn `original` into `edited`. `name` and
/// `mobile` are not backed by the journey endpoint and never appear.
pub fn diff(original: &UserProfile, edited: &UserProfile) -> Vec<JourneyAnswer> {
    let mut answers: Vec<JourneyAnswer> = ProfileField::ALL
        .iter()
        .filter_map(|field| {
            let new = field.value(edited)?;
            if field.value(original).as_deref() == Some(new.as_str()) {
                return None;
            }
            Some(JourneyAnswer::new(field.journey_key(), new))
        })
        .collect();

    if let Some(edited_answers) = &edited.personality_answers {
        for (idx, answer) in edited_answers.iter().enumerate() {
            let Some(answer) = answer else { continue };
            let unchanged = original
                .personality_answer(idx)
                .map(|prev| prev.answer == answer.answer)
                .unwrap_or(false);
            if !unchanged {
                answers.push(JourneyAnswer::personality(
                    idx,
                    answer.answer.clone(),
                    answer.question.clone(),
                ));
            }
        }
    }

    answers
}

/// The two saves behind "Change location", in order
pub fn location_update(city: &str, country: &str) -> [JourneyAnswer; 2] {
    [
        JourneyAnswer::new("current_city", city.trim()).with_question("Current City"),
        JourneyAnswer::new("current_country", country.trim()).with_question("Current Country"),
    ]
}

/// Apply a saved location to the local profile copy
pub fn apply_location(profile: &mut UserProfile, city: &str, country: &str) {
    let city = city.trim().to_string();
    let country = country.trim().to_string();
    profile.city = Some(city.clone());
    profile.current_city = Some(city);
    profile.country = Some(country.clone());
    profile.current_country = Some(country);
}

/// Hero image for a city, case-insensitive
pub fn city_image(city: Option<&str>) -> &'static str {
    let Some(city) = city else {
        return DEFAULT_CITY_IMAGE;
    };
    let key = city.trim().to_lowercase();
    CITY_IMAGES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, image)| *image)
        .unwrap_or(DEFAULT_CITY_IMAGE)
}

/// "STATE, COUNTRY" when both are known, else "COUNTRY"
pub fn location_label(profile: &UserProfile) -> String {
    match (profile.display_state(), profile.display_country()) {
        (Some(state), Some(country)) => {
            format!("{}, {}", state.to_uppercase(), country.to_uppercase())
        }
        (_, country) => country.unwrap_or("COUNTRY").to_uppercase(),
    }
}

/// Onboarding questionnaire progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Journey {
    pub city: String,
    pub country: String,
    pub dob: String,
    pub gender: String,
    pub relationship_status: String,
    pub profession: String,
    pub children: Option<bool>,
    pub personality: [Option<bool>; 15],
}

impl Journey {
    pub fn set_personality(&mut self, index: usize, agree: bool) {
        if let Some(slot) = self.personality.get_mut(index) {
            *slot = Some(agree);
        }
    }

    pub fn unanswered(&self) -> usize {
        self.personality.iter().filter(|a| a.is_none()).count()
    }

    /// The backend refuses to submit until every personality statement has
    /// an answer.
    pub fn is_complete(&self) -> bool {
        self.unanswered() == 0 && !self.city.trim().is_empty() && !self.country.trim().is_empty()
    }

    /// Every non-empty answer as a journey save, location first
    pub fn answers(&self) -> Vec<JourneyAnswer> {
        let identity = [
            ("current_city", self.city.as_str()),
            ("current_country", self.country.as_str()),
            ("dob", self.dob.as_str()),
            ("gender", self.gender.as_str()),
            ("relationship_status", self.relationship_status.as_str()),
            ("profession", self.profession.as_str()),
        ];

        let mut answers: Vec<JourneyAnswer> = identity
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| JourneyAnswer::new(*key, value.trim()))
            .collect();

        if let Some(children) = self.children {
            answers.push(JourneyAnswer::new("children", children.to_string()));
        }

        for (idx, answer) in self.personality.iter().enumerate() {
            if let Some(agree) = answer {
                let value = if *agree { "1" } else { "0" };
                answers.push(JourneyAnswer::personality(idx, value, None));
            }
        }

        answers
    }
}

/// Personality answers in the shape the profile stores them
pub fn personality_answers(journey: &Journey) -> Vec<Option<PersonalityAnswer>> {
    journey
        .personality
        .iter()
        .enumerate()
        .map(|(idx, answer)| {
            answer.map(|agree| PersonalityAnswer {
                question: Some(PERSONALITY_QUESTIONS[idx].to_string()),
                answer: if agree { "1".into() } else { "0".into() },
            })
        })
        .collect()
}
