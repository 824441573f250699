//! Session input model: everything the user tells us about a planned surf.

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};

/// Direction the tide is moving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TideDirection {
    #[default]
    Rising,
    Falling,
}

impl TideDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
        }
    }

    /// Collapse free text into a tide direction.
    ///
    /// Anything containing "rising" (any case) is rising; everything else,
    /// including empty or absent input, is falling.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.to_lowercase().contains("rising") => Self::Rising,
            _ => Self::Falling,
        }
    }
}

impl std::fmt::Display for TideDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Surfer ability.
///
/// Serializes as the capitalized name. Parsing ignores case and surrounding
/// whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl<'de> Deserialize<'de> for SkillLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        const VARIANTS: &[&str] = &["Beginner", "Intermediate", "Advanced"];

        let raw = String::deserialize(deserializer)?;
        [Self::Beginner, Self::Intermediate, Self::Advanced]
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| serde::de::Error::unknown_variant(&raw, VARIANTS))
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Form state for one planned session.
///
/// Numeric-looking fields are kept as raw text and passed through to the
/// prompt unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionInput {
    /// Local session time, `YYYY-MM-DDTHH:MM`.
    pub session_date_time: String,
    /// One or more spot names, free text.
    pub spots: String,
    pub swell_height: String,
    pub swell_period: String,
    pub swell_direction: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub tide_height: String,
    pub tide_direction: TideDirection,
    pub skill_level: SkillLevel,
    pub body_weight: String,
    /// Boards the surfer owns, free text.
    pub user_boards: String,
}

impl Default for SessionInput {
    fn default() -> Self {
        Self {
            session_date_time: Local::now().format("%Y-%m-%dT%H:%M").to_string(),
            spots: String::new(),
            swell_height: String::new(),
            swell_period: String::new(),
            swell_direction: String::new(),
            wind_speed: String::new(),
            wind_direction: String::new(),
            tide_height: String::new(),
            tide_direction: TideDirection::Rising,
            skill_level: SkillLevel::Intermediate,
            body_weight: String::new(),
            user_boards: String::new(),
        }
    }
}
