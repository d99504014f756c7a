//! TriageCategory - Clinical urgency bucket used to partition casualties.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Triage category assigned at the casualty collection point.
///
/// Prioritization only ever compares patients inside one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageCategory {
    /// T1 / red.
    Immediate,
    /// T2 / yellow.
    Delayed,
    /// T3 / green.
    Minimal,
    /// T4 / black.
    Expectant,
}

impl TriageCategory {
    /// Returns all categories in order of urgency.
    pub fn all() -> &'static [TriageCategory] {
        &[
            TriageCategory::Immediate,
            TriageCategory::Delayed,
            TriageCategory::Minimal,
            TriageCategory::Expectant,
        ]
    }

    /// Returns the short triage code (T1..T4).
    pub fn code(&self) -> &'static str {
        match self {
            TriageCategory::Immediate => "T1",
            TriageCategory::Delayed => "T2",
            TriageCategory::Minimal => "T3",
            TriageCategory::Expectant => "T4",
        }
    }

    /// Returns the lowercase canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageCategory::Immediate => "immediate",
            TriageCategory::Delayed => "delayed",
            TriageCategory::Minimal => "minimal",
            TriageCategory::Expectant => "expectant",
        }
    }
}

impl fmt::Display for TriageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TriageCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "immediate" | "t1" | "p1" | "red" => Ok(TriageCategory::Immediate),
            "delayed" | "t2" | "p2" | "yellow" => Ok(TriageCategory::Delayed),
            "minimal" | "t3" | "p3" | "green" => Ok(TriageCategory::Minimal),
            "expectant" | "t4" | "p4" | "black" => Ok(TriageCategory::Expectant),
            other => Err(ValidationError::invalid_format(
                "triage_category",
                format!("unknown category '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_codes_and_colours() {
        assert_eq!("Immediate".parse::<TriageCategory>().unwrap(), TriageCategory::Immediate);
        assert_eq!("t2".parse::<TriageCategory>().unwrap(), TriageCategory::Delayed);
        assert_eq!("P3".parse::<TriageCategory>().unwrap(), TriageCategory::Minimal);
        assert_eq!(" black ".parse::<TriageCategory>().unwrap(), TriageCategory::Expectant);
    }

    #[test]
    fn rejects_unknown_category() {
        assert!("T9".parse::<TriageCategory>().is_err());
        assert!("".parse::<TriageCategory>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&TriageCategory::Delayed).unwrap();
        assert_eq!(json, "\"delayed\"");
    }

    #[test]
    fn codes_follow_urgency_order() {
        let codes: Vec<_> = TriageCategory::all().iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec!["T1", "T2", "T3", "T4"]);
    }
}
