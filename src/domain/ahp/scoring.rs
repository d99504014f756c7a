//! Scoring Registry - Maps leaf criterion ids to patient scoring rules.
//!
//! Each rule turns one patient record into a risk score in [0, 1] where
//! 0 is the best clinical state and 1 the worst. A rule that cannot find
//! its input yields `None` and the rule's unknown score is used instead.
//!
//! # Example
//!
//! ```
//! use casualty_triage::domain::ahp::{ScoringContext, ScoringRegistry, ScoringRule};
//! use casualty_triage::domain::foundation::PatientId;
//! use casualty_triage::domain::patient::PatientRecord;
//!
//! let mut registry = ScoringRegistry::standard();
//! registry.register(
//!     "pain",
//!     ScoringRule::new("Pain score", |_record, _ctx| None),
//! );
//!
//! let record = PatientRecord::new(PatientId::new("p-1").unwrap());
//! let score = registry.score(&record, "pain", &ScoringContext::default()).unwrap();
//! assert_eq!(score, 0.2);
//! ```

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::rules;
use super::ConfigurationError;
use crate::domain::patient::PatientRecord;

/// Score used when a rule's input is not documented.
pub const UNKNOWN_SCORE: f64 = 0.2;

/// Inputs a rule may need besides the record itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringContext {
    /// Date used to turn a date of birth into an age.
    pub reference_date: Option<NaiveDate>,
}

impl ScoringContext {
    /// Creates a context anchored at the given date.
    pub fn as_of(reference_date: NaiveDate) -> Self {
        Self {
            reference_date: Some(reference_date),
        }
    }
}

/// Scoring function signature shared by all rules.
pub type ScoreFn = Arc<dyn Fn(&PatientRecord, &ScoringContext) -> Option<f64> + Send + Sync>;

/// A pure scoring rule for one leaf criterion.
#[derive(Clone)]
pub struct ScoringRule {
    label: String,
    unknown_score: f64,
    evaluate: ScoreFn,
}

impl ScoringRule {
    /// Creates a rule using the default unknown score.
    pub fn new<F>(label: impl Into<String>, evaluate: F) -> Self
    where
        F: Fn(&PatientRecord, &ScoringContext) -> Option<f64> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            unknown_score: UNKNOWN_SCORE,
            evaluate: Arc::new(evaluate),
        }
    }

    /// Overrides the score used when the input is absent.
    pub fn with_unknown_score(mut self, score: f64) -> Self {
        self.unknown_score = score.clamp(0.0, 1.0);
        self
    }

    /// Human-readable name of the rule.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Score used when the input is absent.
    pub fn unknown_score(&self) -> f64 {
        self.unknown_score
    }

    /// Evaluates the rule, applying the unknown fallback and clamping to [0, 1].
    pub fn score(&self, record: &PatientRecord, ctx: &ScoringContext) -> f64 {
        match (self.evaluate)(record, ctx) {
            Some(value) if value.is_finite() => value.clamp(0.0, 1.0),
            _ => self.unknown_score,
        }
    }
}

impl fmt::Debug for ScoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringRule")
            .field("label", &self.label)
            .field("unknown_score", &self.unknown_score)
            .finish_non_exhaustive()
    }
}

static STANDARD_REGISTRY: Lazy<ScoringRegistry> = Lazy::new(|| {
    let mut registry = ScoringRegistry::new();
    registry.register(rules::AIRWAY, ScoringRule::new("Airway", rules::airway));
    registry.register(
        rules::RESPIRATORY_RATE,
        ScoringRule::new("Respiratory rate", rules::respiratory_rate),
    );
    registry.register(
        rules::OXYGEN_SATURATION,
        ScoringRule::new("Oxygen saturation", rules::oxygen_saturation),
    );
    registry.register(rules::PULSE_RATE, ScoringRule::new("Pulse rate", rules::pulse_rate));
    registry.register(
        rules::SYSTOLIC_BP,
        ScoringRule::new("Systolic blood pressure", rules::systolic_bp),
    );
    registry.register(
        rules::CAPILLARY_REFILL,
        ScoringRule::new("Capillary refill", rules::capillary_refill),
    );
    registry.register(
        rules::CONSCIOUSNESS,
        ScoringRule::new("Level of consciousness (GCS)", rules::consciousness),
    );
    registry.register(
        rules::INJURY_SEVERITY,
        ScoringRule::new("Injury severity", rules::injury_severity),
    );
    registry.register(rules::AGE, ScoringRule::new("Age vulnerability", rules::age));
    registry
});

/// Registry of scoring rules keyed by leaf criterion id.
#[derive(Debug, Clone, Default)]
pub struct ScoringRegistry {
    rules: HashMap<String, ScoringRule>,
}

impl ScoringRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in clinical rules.
    pub fn standard() -> Self {
        STANDARD_REGISTRY.clone()
    }

    /// Registers a rule, returning the rule it replaced.
    pub fn register(&mut self, criterion_id: impl Into<String>, rule: ScoringRule) -> Option<ScoringRule> {
        self.rules.insert(criterion_id.into(), rule)
    }

    /// Returns true if a rule exists for the criterion.
    pub fn contains(&self, criterion_id: &str) -> bool {
        self.rules.contains_key(criterion_id)
    }

    /// Looks up the rule for a criterion.
    pub fn get(&self, criterion_id: &str) -> Option<&ScoringRule> {
        self.rules.get(criterion_id)
    }

    /// Registered criterion ids, sorted.
    pub fn criterion_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.rules.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Scores one record against one leaf criterion.
    ///
    /// # Errors
    ///
    /// `MissingScoringRule` if no rule is registered for `criterion_id`.
    pub fn score(
        &self,
        record: &PatientRecord,
        criterion_id: &str,
        ctx: &ScoringContext,
    ) -> Result<f64, ConfigurationError> {
        self.rules
            .get(criterion_id)
            .map(|rule| rule.score(record, ctx))
            .ok_or_else(|| ConfigurationError::MissingScoringRule {
                criterion_id: criterion_id.to_string(),
            })
    }

    /// Verifies that every listed leaf criterion has a rule.
    pub fn ensure_covers<'a>(
        &self,
        criterion_ids: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ConfigurationError> {
        match criterion_ids.into_iter().find(|id| !self.contains(id)) {
            Some(missing) => Err(ConfigurationError::MissingScoringRule {
                criterion_id: missing.to_string(),
            }),
            None => Ok(()),
        }
    }
}
