use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A story is classified as "event forming" once this many neighbors have
/// asked to hear it.
pub const EVENT_FORMING_THRESHOLD: u32 = 5;

/// Input-surface caps, matching the page's field limits.
pub const TITLE_MAX_CHARS: usize = 100;
pub const TEASER_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Text,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Text => "text",
        }
    }

    /// Case-insensitive parse of user input; anything outside the two
    /// options is rejected.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "email" => Some(ContactMethod::Email),
            "text" => Some(ContactMethod::Text),
            _ => None,
        }
    }
}

/// Preset gathering spots around the Outer Sunset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Venue {
    OceanBeachFirepit,
    MoragaSteps,
    JudahStreetParklet,
    SunsetBranchLibrary,
    CornerMarket,
}

impl Venue {
    pub const ALL: [Venue; 5] = [
        Venue::OceanBeachFirepit,
        Venue::MoragaSteps,
        Venue::JudahStreetParklet,
        Venue::SunsetBranchLibrary,
        Venue::CornerMarket,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Venue::OceanBeachFirepit => "ocean_beach_firepit",
            Venue::MoragaSteps => "moraga_steps",
            Venue::JudahStreetParklet => "judah_street_parklet",
            Venue::SunsetBranchLibrary => "sunset_branch_library",
            Venue::CornerMarket => "corner_market",
        }
    }

    /// Human label used on the page and in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Venue::OceanBeachFirepit => "Ocean Beach firepit",
            Venue::MoragaSteps => "Moraga Steps",
            Venue::JudahStreetParklet => "Judah Street parklet",
            Venue::SunsetBranchLibrary => "Sunset branch library",
            Venue::CornerMarket => "the corner market",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Venue::ALL.iter().copied().find(|v| v.as_str() == normalized)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Story {
    pub id: i64,
    pub title: String,
    pub teaser: String,
    pub contact_method: Option<String>,
    pub name: Option<String>,
    pub open_to_sharing: bool,
    pub venue: Option<Venue>,
    pub interest_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Story {
    /// Derived display classification, never stored.
    pub fn is_forming_event(&self) -> bool {
        self.interest_count >= EVENT_FORMING_THRESHOLD
    }
}

/// Normalized submission fields, produced only by a successful
/// `SubmissionForm::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStoryInput {
    pub title: String,
    pub teaser: String,
    pub contact_method: Option<String>,
    pub name: Option<String>,
    pub open_to_sharing: bool,
    pub venue: Option<Venue>,
}

/// Ephemeral alert signup. Handed to the notification sink and discarded;
/// never attached to a story.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterestAlertRequest {
    pub contact_method: ContactMethod,
    pub contact: String,
}
