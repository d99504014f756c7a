//! PatientRecord - The casualty card as seen by the prioritization engine.
//!
//! Every clinical field is optional. Field documentation is partial in the
//! normal case, and scoring rules decide what an absent value means.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PatientId, TriageCategory, ValidationError};

/// Airway assessment recorded on the casualty card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirwayStatus {
    /// Patent without intervention.
    Clear,
    /// Patent with an adjunct in place (OPA/NPA, positioning).
    Adjunct,
    /// Partially obstructed, noisy or threatened.
    Compromised,
    /// Fully obstructed.
    Obstructed,
    /// Definitive airway (ETT, supraglottic, surgical).
    Intubated,
}

/// Recorded blood pressure in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u32,
    #[serde(default)]
    pub diastolic: Option<u32>,
}

/// Glasgow Coma Scale components, each optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcsComponents {
    #[serde(default)]
    pub eye: Option<u8>,
    #[serde(default)]
    pub verbal: Option<u8>,
    #[serde(default)]
    pub motor: Option<u8>,
}

impl GcsComponents {
    /// Creates a fully documented GCS, validating each component range.
    pub fn new(eye: u8, verbal: u8, motor: u8) -> Result<Self, ValidationError> {
        let gcs = Self {
            eye: Some(eye),
            verbal: Some(verbal),
            motor: Some(motor),
        };
        gcs.validate()?;
        Ok(gcs)
    }

    /// Checks every present component against its scale.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_component("gcs.eye", self.eye, 4)?;
        check_component("gcs.verbal", self.verbal, 5)?;
        check_component("gcs.motor", self.motor, 6)?;
        Ok(())
    }

    /// Returns the total (3-15) when all three components are present and valid.
    pub fn total(&self) -> Option<u8> {
        if self.validate().is_err() {
            return None;
        }
        Some(self.eye? + self.verbal? + self.motor?)
    }
}

fn check_component(field: &str, value: Option<u8>, max: u8) -> Result<(), ValidationError> {
    match value {
        Some(v) if v < 1 || v > max => Err(ValidationError::out_of_range(
            field,
            1,
            max as i32,
            v as i32,
        )),
        _ => Ok(()),
    }
}

/// Upper bounds beyond which a recorded vital is a data-entry error.
const MAX_RESPIRATORY_RATE: u32 = 80;
const MAX_PULSE_RATE: u32 = 300;
const MAX_SYSTOLIC_BP: u32 = 300;
const MAX_DIASTOLIC_BP: u32 = 250;
const MAX_AGE_YEARS: u32 = 130;

fn check_upper(field: &str, value: Option<u32>, max: u32) -> Result<(), ValidationError> {
    match value {
        Some(v) if v > max => Err(ValidationError::out_of_range(
            field,
            0,
            max as i32,
            i32::try_from(v).unwrap_or(i32::MAX),
        )),
        _ => Ok(()),
    }
}

/// A casualty record exposing the clinical fields used for prioritization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Generated when a submitted record carries no id.
    #[serde(default = "PatientId::generate")]
    pub id: PatientId,
    /// Display-safe identifier printed on the casualty card.
    #[serde(default)]
    pub card_id: Option<String>,
    #[serde(default)]
    pub triage_category: Option<TriageCategory>,
    #[serde(default)]
    pub airway: Option<AirwayStatus>,
    /// Breaths per minute.
    #[serde(default)]
    pub respiratory_rate: Option<u32>,
    /// SpO2 in percent.
    #[serde(default)]
    pub oxygen_saturation: Option<f64>,
    /// Beats per minute.
    #[serde(default)]
    pub pulse_rate: Option<u32>,
    #[serde(default)]
    pub blood_pressure: Option<BloodPressure>,
    #[serde(default)]
    pub capillary_refill_secs: Option<f64>,
    #[serde(default)]
    pub gcs: GcsComponents,
    /// Free-text injury detail as typed by the clinician.
    #[serde(default)]
    pub injury_description: Option<String>,
    /// Structured injury descriptors selected from the form lists.
    #[serde(default)]
    pub injuries: Vec<String>,
    #[serde(default)]
    pub age_years: Option<u32>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl PatientRecord {
    /// Creates a record with only an identifier; all clinical fields unknown.
    pub fn new(id: PatientId) -> Self {
        Self {
            id,
            card_id: None,
            triage_category: None,
            airway: None,
            respiratory_rate: None,
            oxygen_saturation: None,
            pulse_rate: None,
            blood_pressure: None,
            capillary_refill_secs: None,
            gcs: GcsComponents::default(),
            injury_description: None,
            injuries: Vec::new(),
            age_years: None,
            date_of_birth: None,
        }
    }

    /// Creates a builder for constructing a record.
    pub fn builder(id: PatientId) -> PatientRecordBuilder {
        PatientRecordBuilder {
            record: Self::new(id),
        }
    }

    /// Returns true if the record belongs to the given category.
    pub fn is_in_category(&self, category: TriageCategory) -> bool {
        self.triage_category == Some(category)
    }

    /// Systolic pressure, if recorded.
    pub fn systolic_bp(&self) -> Option<u32> {
        self.blood_pressure.map(|bp| bp.systolic)
    }

    /// Validates ranges of the structured fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.gcs.validate()?;
        check_upper("respiratory_rate", self.respiratory_rate, MAX_RESPIRATORY_RATE)?;
        check_upper("pulse_rate", self.pulse_rate, MAX_PULSE_RATE)?;
        if let Some(bp) = self.blood_pressure {
            check_upper("blood_pressure.systolic", Some(bp.systolic), MAX_SYSTOLIC_BP)?;
            check_upper("blood_pressure.diastolic", bp.diastolic, MAX_DIASTOLIC_BP)?;
        }
        check_upper("age_years", self.age_years, MAX_AGE_YEARS)?;
        if let Some(spo2) = self.oxygen_saturation {
            if !(0.0..=100.0).contains(&spo2) {
                return Err(ValidationError::out_of_range(
                    "oxygen_saturation",
                    0,
                    100,
                    spo2.round() as i32,
                ));
            }
        }
        if let Some(crt) = self.capillary_refill_secs {
            if !crt.is_finite() || crt < 0.0 {
                return Err(ValidationError::invalid_format(
                    "capillary_refill_secs",
                    "must be a non-negative number of seconds",
                ));
            }
        }
        Ok(())
    }
}

/// Builder for constructing PatientRecord instances.
#[derive(Debug)]
pub struct PatientRecordBuilder {
    record: PatientRecord,
}

impl PatientRecordBuilder {
    pub fn card_id(mut self, card_id: impl Into<String>) -> Self {
        self.record.card_id = Some(card_id.into());
        self
    }

    pub fn category(mut self, category: TriageCategory) -> Self {
        self.record.triage_category = Some(category);
        self
    }

    pub fn airway(mut self, airway: AirwayStatus) -> Self {
        self.record.airway = Some(airway);
        self
    }

    pub fn respiratory_rate(mut self, rate: u32) -> Self {
        self.record.respiratory_rate = Some(rate);
        self
    }

    pub fn oxygen_saturation(mut self, spo2: f64) -> Self {
        self.record.oxygen_saturation = Some(spo2);
        self
    }

    pub fn pulse_rate(mut self, rate: u32) -> Self {
        self.record.pulse_rate = Some(rate);
        self
    }

    pub fn blood_pressure(mut self, systolic: u32, diastolic: u32) -> Self {
        self.record.blood_pressure = Some(BloodPressure {
            systolic,
            diastolic: Some(diastolic),
        });
        self
    }

    pub fn capillary_refill(mut self, secs: f64) -> Self {
        self.record.capillary_refill_secs = Some(secs);
        self
    }

    pub fn gcs(mut self, eye: u8, verbal: u8, motor: u8) -> Self {
        self.record.gcs = GcsComponents {
            eye: Some(eye),
            verbal: Some(verbal),
            motor: Some(motor),
        };
        self
    }

    pub fn injury_description(mut self, text: impl Into<String>) -> Self {
        self.record.injury_description = Some(text.into());
        self
    }

    pub fn injury(mut self, descriptor: impl Into<String>) -> Self {
        self.record.injuries.push(descriptor.into());
        self
    }

    pub fn age(mut self, years: u32) -> Self {
        self.record.age_years = Some(years);
        self
    }

    pub fn date_of_birth(mut self, dob: NaiveDate) -> Self {
        self.record.date_of_birth = Some(dob);
        self
    }

    pub fn build(self) -> PatientRecord {
        self.record
    }
}
