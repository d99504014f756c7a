//! Built-in hierarchy used when no hierarchy file is configured.

use super::rules;
use super::{CriterionConfig, HierarchyConfig};

impl HierarchyConfig {
    /// The standard casualty hierarchy.
    ///
    /// | Criterion | Weight | Sub-criteria |
    /// |-----------|--------|--------------|
    /// | Airway & Breathing | 1/3 | airway 1/2, SpO2 1/3, resp. rate 1/6 |
    /// | Circulation | 1/4 | systolic BP 1/2, pulse 1/4, cap. refill 1/4 |
    /// | Consciousness | 1/6 | |
    /// | Injury severity | 1/6 | |
    /// | Age | 1/12 | |
    ///
    /// Every matrix is perfectly consistent (CR = 0).
    pub fn standard() -> Self {
        Self {
            criteria: vec![
                CriterionConfig::parent(
                    "airway_breathing",
                    "Airway & Breathing",
                    vec![
                        CriterionConfig::leaf(rules::AIRWAY, "Airway"),
                        CriterionConfig::leaf(rules::OXYGEN_SATURATION, "Oxygen saturation"),
                        CriterionConfig::leaf(rules::RESPIRATORY_RATE, "Respiratory rate"),
                    ],
                    ratio_rows(&[3.0, 2.0, 1.0]),
                ),
                CriterionConfig::parent(
                    "circulation",
                    "Circulation",
                    vec![
                        CriterionConfig::leaf(rules::SYSTOLIC_BP, "Systolic blood pressure"),
                        CriterionConfig::leaf(rules::PULSE_RATE, "Pulse rate"),
                        CriterionConfig::leaf(rules::CAPILLARY_REFILL, "Capillary refill"),
                    ],
                    ratio_rows(&[2.0, 1.0, 1.0]),
                ),
                CriterionConfig::leaf(rules::CONSCIOUSNESS, "Level of consciousness"),
                CriterionConfig::leaf(rules::INJURY_SEVERITY, "Injury severity"),
                CriterionConfig::leaf(rules::AGE, "Age vulnerability"),
            ],
            comparisons: ratio_rows(&[4.0, 3.0, 2.0, 2.0, 1.0]),
        }
    }
}

/// Comparison rows where `m[i][j] = importance[i] / importance[j]`.
fn ratio_rows(importance: &[f64]) -> Vec<Vec<f64>> {
    importance
        .iter()
        .map(|a| importance.iter().map(|b| a / b).collect())
        .collect()
}
