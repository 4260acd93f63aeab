use std::{fmt, str::FromStr};

use async_graphql::Enum;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Difficulty classification of a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Ok(Tier::Easy),
            "medium" => Ok(Tier::Medium),
            "hard" => Ok(Tier::Hard),
            other => Err(AppError::ValidationError(format!(
                "Unknown difficulty '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Hard).unwrap(), "\"hard\"");
        let parsed: Tier = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(parsed, Tier::Easy);
    }

    #[test]
    fn tier_parses_case_insensitively() {
        assert_eq!(" Medium ".parse::<Tier>().unwrap(), Tier::Medium);
        assert!("expert".parse::<Tier>().is_err());
    }

    #[test]
    fn default_tier_is_medium() {
        assert_eq!(Tier::default(), Tier::Medium);
    }
}
