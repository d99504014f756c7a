//! Built-in clinical scoring rules.
//!
//! Each rule reads one part of the casualty record and maps it through
//! ordered threshold bands to a score in [0, 1] (1 = worst). `None` means
//! the input was not documented.

use crate::domain::patient::{resolve_age, AirwayStatus, PatientRecord};

use super::ScoringContext;

pub const AIRWAY: &str = "airway";
pub const RESPIRATORY_RATE: &str = "respiratory_rate";
pub const OXYGEN_SATURATION: &str = "oxygen_saturation";
pub const PULSE_RATE: &str = "pulse_rate";
pub const SYSTOLIC_BP: &str = "systolic_bp";
pub const CAPILLARY_REFILL: &str = "capillary_refill";
pub const CONSCIOUSNESS: &str = "consciousness";
pub const INJURY_SEVERITY: &str = "injury_severity";
pub const AGE: &str = "age";

/// An injury keyword and its severity contribution.
struct InjuryKeyword {
    stem: &'static str,
    weight: f64,
    /// Match only the exact word instead of any word starting with `stem`.
    whole_word: bool,
}

impl InjuryKeyword {
    const fn prefix(stem: &'static str, weight: f64) -> Self {
        Self { stem, weight, whole_word: false }
    }

    const fn word(stem: &'static str, weight: f64) -> Self {
        Self { stem, weight, whole_word: true }
    }

    fn matches(&self, word: &str) -> bool {
        if self.whole_word {
            word == self.stem
        } else {
            word.starts_with(self.stem)
        }
    }
}

/// Severity keywords. Each keyword counts once per record.
const INJURY_KEYWORDS: &[InjuryKeyword] = &[
    InjuryKeyword::prefix("amputat", 0.6),
    InjuryKeyword::prefix("gunshot", 0.5),
    InjuryKeyword::word("gsw", 0.5),
    InjuryKeyword::prefix("blast", 0.5),
    InjuryKeyword::prefix("penetrat", 0.5),
    InjuryKeyword::prefix("haemorrhag", 0.5),
    InjuryKeyword::prefix("hemorrhag", 0.5),
    InjuryKeyword::word("stab", 0.4),
    InjuryKeyword::prefix("stabb", 0.4),
    InjuryKeyword::prefix("bleed", 0.4),
    InjuryKeyword::prefix("crush", 0.4),
    InjuryKeyword::prefix("pelvi", 0.4),
    InjuryKeyword::prefix("spinal", 0.4),
    InjuryKeyword::prefix("spine", 0.4),
    InjuryKeyword::word("head", 0.3),
    InjuryKeyword::prefix("skull", 0.3),
    InjuryKeyword::prefix("chest", 0.3),
    InjuryKeyword::prefix("thora", 0.3),
    InjuryKeyword::prefix("abdom", 0.3),
    InjuryKeyword::prefix("burn", 0.3),
    InjuryKeyword::prefix("fractur", 0.2),
    InjuryKeyword::prefix("laceration", 0.1),
    InjuryKeyword::prefix("bruis", 0.05),
    InjuryKeyword::prefix("abrasion", 0.05),
];

/// First band whose exclusive upper bound exceeds `value` wins.
fn band_below(value: f64, bands: &[(f64, f64)], otherwise: f64) -> f64 {
    bands
        .iter()
        .find(|(bound, _)| value < *bound)
        .map(|(_, score)| *score)
        .unwrap_or(otherwise)
}

pub fn airway(record: &PatientRecord, _ctx: &ScoringContext) -> Option<f64> {
    let score = match record.airway? {
        AirwayStatus::Clear => 0.0,
        AirwayStatus::Adjunct => 0.4,
        AirwayStatus::Intubated => 0.6,
        AirwayStatus::Compromised => 0.8,
        AirwayStatus::Obstructed => 1.0,
    };
    Some(score)
}

pub fn respiratory_rate(record: &PatientRecord, _ctx: &ScoringContext) -> Option<f64> {
    let score = match record.respiratory_rate? {
        0 => 1.0,
        1..=9 => 0.8,
        10..=20 => 0.0,
        21..=24 => 0.3,
        25..=29 => 0.6,
        _ => 0.9,
    };
    Some(score)
}

pub fn oxygen_saturation(record: &PatientRecord, _ctx: &ScoringContext) -> Option<f64> {
    let spo2 = record.oxygen_saturation?;
    Some(band_below(spo2, &[(85.0, 1.0), (90.0, 0.7), (94.0, 0.3)], 0.0))
}

pub fn pulse_rate(record: &PatientRecord, _ctx: &ScoringContext) -> Option<f64> {
    let score = match record.pulse_rate? {
        0 => 1.0,
        1..=39 => 0.9,
        40..=49 => 0.6,
        50..=100 => 0.0,
        101..=120 => 0.3,
        121..=140 => 0.6,
        _ => 0.9,
    };
    Some(score)
}

pub fn systolic_bp(record: &PatientRecord, _ctx: &ScoringContext) -> Option<f64> {
    let systolic = record.systolic_bp()? as f64;
    Some(band_below(systolic, &[(50.0, 1.0), (76.0, 0.8), (90.0, 0.5)], 0.0))
}

pub fn capillary_refill(record: &PatientRecord, _ctx: &ScoringContext) -> Option<f64> {
    let secs = record.capillary_refill_secs?;
    let score = if secs <= 2.0 {
        0.0
    } else if secs <= 3.0 {
        0.4
    } else if secs <= 4.0 {
        0.7
    } else {
        1.0
    };
    Some(score)
}

pub fn consciousness(record: &PatientRecord, _ctx: &ScoringContext) -> Option<f64> {
    let score = match record.gcs.total()? {
        0..=8 => 1.0,
        9..=12 => 0.6,
        13..=14 => 0.3,
        _ => 0.0,
    };
    Some(score)
}

/// Keyword-weighted severity over free text and structured injury descriptors.
///
/// Documented injuries with no matching keyword score 0; no injury
/// documentation at all is unknown.
pub fn injury_severity(record: &PatientRecord, _ctx: &ScoringContext) -> Option<f64> {
    let mut text = record
        .injury_description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    for injury in &record.injuries {
        text.push(' ');
        text.push_str(&injury.to_lowercase());
    }

    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return None;
    }

    let total: f64 = INJURY_KEYWORDS
        .iter()
        .filter(|keyword| words.iter().any(|w| keyword.matches(w)))
        .map(|keyword| keyword.weight)
        .sum();

    Some(total.min(1.0))
}

pub fn age(record: &PatientRecord, ctx: &ScoringContext) -> Option<f64> {
    let score = match resolve_age(record, ctx.reference_date)? {
        0 => 0.8,
        1..=4 => 0.6,
        5..=15 => 0.3,
        16..=64 => 0.0,
        65..=79 => 0.5,
        _ => 0.8,
    };
    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PatientId;
    use crate::domain::patient::PatientRecordBuilder;
    use chrono::NaiveDate;

    fn record() -> PatientRecordBuilder {
        PatientRecord::builder(PatientId::new("p").unwrap())
    }

    fn ctx() -> ScoringContext {
        ScoringContext::default()
    }

    fn spo2(value: f64) -> f64 {
        oxygen_saturation(&record().oxygen_saturation(value).build(), &ctx()).unwrap()
    }

    #[test]
    fn oxygen_saturation_bands() {
        assert_eq!(spo2(80.0), 1.0);
        assert_eq!(spo2(85.0), 0.7);
        assert_eq!(spo2(92.0), 0.3);
        assert_eq!(spo2(94.0), 0.0);
        assert_eq!(spo2(97.0), 0.0);
    }

    #[test]
    fn oxygen_saturation_is_non_increasing() {
        let mut previous = f64::INFINITY;
        for tenth in 500..=1000 {
            let score = spo2(tenth as f64 / 10.0);
            assert!(score <= previous, "score rose at {}", tenth as f64 / 10.0);
            previous = score;
        }
    }

    #[test]
    fn airway_severity_ordering() {
        let s = |a| airway(&record().airway(a).build(), &ctx()).unwrap();
        assert!(s(AirwayStatus::Clear) < s(AirwayStatus::Adjunct));
        assert!(s(AirwayStatus::Compromised) < s(AirwayStatus::Obstructed));
        assert_eq!(s(AirwayStatus::Obstructed), 1.0);
    }

    #[test]
    fn respiratory_rate_penalises_both_extremes() {
        let s = |r| respiratory_rate(&record().respiratory_rate(r).build(), &ctx()).unwrap();
        assert_eq!(s(0), 1.0);
        assert_eq!(s(16), 0.0);
        assert!(s(8) > s(22));
        assert!(s(35) > s(26));
    }

    #[test]
    fn pulse_rate_bands() {
        let s = |r| pulse_rate(&record().pulse_rate(r).build(), &ctx()).unwrap();
        assert_eq!(s(0), 1.0);
        assert_eq!(s(72), 0.0);
        assert_eq!(s(130), 0.6);
        assert_eq!(s(160), 0.9);
    }

    #[test]
    fn systolic_bp_bands() {
        let s = |sbp| systolic_bp(&record().blood_pressure(sbp, 40).build(), &ctx()).unwrap();
        assert_eq!(s(0), 1.0);
        assert_eq!(s(60), 0.8);
        assert_eq!(s(85), 0.5);
        assert_eq!(s(120), 0.0);
    }

    #[test]
    fn capillary_refill_bands() {
        let s = |c| capillary_refill(&record().capillary_refill(c).build(), &ctx()).unwrap();
        assert_eq!(s(1.5), 0.0);
        assert_eq!(s(2.5), 0.4);
        assert_eq!(s(4.0), 0.7);
        assert_eq!(s(6.0), 1.0);
    }

    #[test]
    fn consciousness_uses_gcs_total() {
        let s = |e, v, m| consciousness(&record().gcs(e, v, m).build(), &ctx());
        assert_eq!(s(1, 1, 1), Some(1.0));
        assert_eq!(s(3, 4, 5), Some(0.6));
        assert_eq!(s(4, 5, 6), Some(0.0));
        assert_eq!(consciousness(&record().build(), &ctx()), None);
    }

    #[test]
    fn injury_keywords_accumulate_and_cap() {
        let s = |text: &str| injury_severity(&record().injury_description(text).build(), &ctx());
        assert_eq!(s("minor graze on knee"), Some(0.0));
        assert_eq!(s("Fractured left femur"), Some(0.2));
        assert!((s("GSW to chest").unwrap() - 0.8).abs() < 1e-9);
        assert_eq!(
            s("blast injury, traumatic amputation, pelvic fracture, haemorrhage"),
            Some(1.0)
        );
    }

    #[test]
    fn injury_structured_descriptors_count() {
        let r = record().injury("Penetrating abdominal").build();
        assert!((injury_severity(&r, &ctx()).unwrap() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn whole_word_keywords_do_not_match_longer_words() {
        let s = |text: &str| injury_severity(&record().injury_description(text).build(), &ctx());
        assert_eq!(s("stable, headache only"), Some(0.0));
        assert!((s("stab wound to head").unwrap() - 0.7).abs() < 1e-9);
        assert!((s("stabbed twice").unwrap() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn keyword_counted_once() {
        let s = injury_severity(&record().injury_description("burn burn burns").build(), &ctx());
        assert!((s.unwrap() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn undocumented_injury_is_unknown() {
        assert_eq!(injury_severity(&record().build(), &ctx()), None);
        assert_eq!(
            injury_severity(&record().injury_description("   ").build(), &ctx()),
            None
        );
    }

    #[test]
    fn age_bands_and_date_of_birth() {
        let s = |a| age(&record().age(a).build(), &ctx()).unwrap();
        assert_eq!(s(0), 0.8);
        assert_eq!(s(30), 0.0);
        assert_eq!(s(70), 0.5);
        assert_eq!(s(90), 0.8);

        let dob = NaiveDate::from_ymd_opt(1940, 3, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let r = record().date_of_birth(dob).build();
        assert_eq!(age(&r, &ScoringContext::as_of(today)), Some(0.8));
        assert_eq!(age(&r, &ctx()), None);
    }
}
