use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::bmi::{self, Verdict};
use crate::error::{FieldError, ValidationError};

/// Exclusive upper bound on `age`.
pub const MAX_AGE: i64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Others => "others",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "others" => Ok(Gender::Others),
            other => Err(format!(
                "'{other}' is not one of male, female, others"
            )),
        }
    }
}

/// Unvalidated record fields as they arrive from a client or from disk.
///
/// Every field is optional so that validation can report all missing and
/// invalid fields at once instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PatientDraft {
    #[serde(alias = "patient_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl PatientDraft {
    /// Validate every field including `id`.
    pub fn into_patient(self) -> Result<Patient, ValidationError> {
        let mut errors = Vec::new();
        let id = required_text("id", self.id.as_deref(), &mut errors);
        let attributes = self.check_attributes(&mut errors);

        match (id, attributes) {
            (Some(id), Some(attributes)) if errors.is_empty() => Ok(Patient { id, attributes }),
            _ => Err(ValidationError { errors }),
        }
    }

    /// Validate everything except `id`, which is ignored.
    pub fn into_attributes(self) -> Result<PatientAttributes, ValidationError> {
        let mut errors = Vec::new();
        match self.check_attributes(&mut errors) {
            Some(attributes) if errors.is_empty() => Ok(attributes),
            _ => Err(ValidationError { errors }),
        }
    }

    fn check_attributes(&self, errors: &mut Vec<FieldError>) -> Option<PatientAttributes> {
        let name = required_text("name", self.name.as_deref(), errors);
        let city = required_text("city", self.city.as_deref(), errors);

        let age = required("age", self.age, errors).and_then(|age| {
            if age > 0 && age < MAX_AGE {
                Some(age as u32)
            } else {
                errors.push(FieldError::new(
                    "age",
                    format!("must be greater than 0 and less than {MAX_AGE}, got {age}"),
                ));
                None
            }
        });

        let gender = match self.gender.as_deref() {
            None => {
                errors.push(FieldError::new("gender", "field required"));
                None
            }
            Some(raw) => match raw.parse::<Gender>() {
                Ok(gender) => Some(gender),
                Err(message) => {
                    errors.push(FieldError::new("gender", message));
                    None
                }
            },
        };

        let height = positive("height", self.height, errors);
        let weight = positive("weight", self.weight, errors);

        let (Some(name), Some(city), Some(age), Some(gender), Some(height), Some(weight)) =
            (name, city, age, gender, height, weight)
        else {
            return None;
        };

        let attributes = PatientAttributes::derive(name, city, age, gender, height, weight);
        if !attributes.bmi.is_finite() {
            let message = format!(
                "height {height} and weight {weight} do not give a finite bmi"
            );
            errors.push(FieldError::new("height", message.clone()));
            errors.push(FieldError::new("weight", message));
            return None;
        }
        Some(attributes)
    }
}

fn required<T>(field: &str, value: Option<T>, errors: &mut Vec<FieldError>) -> Option<T> {
    if value.is_none() {
        errors.push(FieldError::new(field, "field required"));
    }
    value
}

fn required_text(field: &str, value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    match required(field, value, errors).map(str::trim) {
        None => None,
        Some("") => {
            errors.push(FieldError::new(field, "must not be empty"));
            None
        }
        Some(text) => Some(text.to_string()),
    }
}

fn positive(field: &str, value: Option<f64>, errors: &mut Vec<FieldError>) -> Option<f64> {
    let value = required(field, value, errors)?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        errors.push(FieldError::new(
            field,
            format!("must be a positive number, got {value}"),
        ));
        None
    }
}

/// A validated record without its id, as held in the store.
///
/// `bmi` and `verdict` are recomputed from `height` and `weight` whenever a
/// value is built, including on deserialization, so persisted copies of them
/// are never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatientDraft")]
pub struct PatientAttributes {
    name: String,
    city: String,
    age: u32,
    gender: Gender,
    height: f64,
    weight: f64,
    bmi: f64,
    verdict: Verdict,
}

impl PatientAttributes {
    fn derive(
        name: String,
        city: String,
        age: u32,
        gender: Gender,
        height: f64,
        weight: f64,
    ) -> Self {
        let bmi = bmi::compute_bmi(height, weight);
        Self {
            name,
            city,
            age,
            gender,
            height,
            weight,
            bmi,
            verdict: bmi::classify(bmi),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Meters.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Kilograms.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// The raw fields, ready to be overlaid by an update and re-validated.
    pub fn to_draft(&self) -> PatientDraft {
        PatientDraft {
            id: None,
            name: Some(self.name.clone()),
            city: Some(self.city.clone()),
            age: Some(i64::from(self.age)),
            gender: Some(self.gender.as_str().to_string()),
            height: Some(self.height),
            weight: Some(self.weight),
        }
    }
}

impl TryFrom<PatientDraft> for PatientAttributes {
    type Error = ValidationError;

    fn try_from(draft: PatientDraft) -> Result<Self, Self::Error> {
        draft.into_attributes()
    }
}

/// A record together with its id. Serializes as one flat object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatientDraft")]
pub struct Patient {
    pub id: String,
    #[serde(flatten)]
    pub attributes: PatientAttributes,
}

impl TryFrom<PatientDraft> for Patient {
    type Error = ValidationError;

    fn try_from(draft: PatientDraft) -> Result<Self, Self::Error> {
        draft.into_patient()
    }
}

/// Partial replacement of a stored record. Absent fields are left untouched.
///
/// An explicit `null` is kept apart from an absent field: it clears the value,
/// which then fails validation as a missing required field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PatientUpdate {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub age: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub height: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub weight: Option<Option<f64>>,
}

/// Only called when the key is present, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PatientUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.city.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.height.is_none()
            && self.weight.is_none()
    }

    /// Overlay the present fields on `existing` and run full validation on
    /// the merged result.
    pub fn apply(self, existing: &PatientAttributes) -> Result<PatientAttributes, ValidationError> {
        let mut draft = existing.to_draft();
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(city) = self.city {
            draft.city = city;
        }
        if let Some(age) = self.age {
            draft.age = age;
        }
        if let Some(gender) = self.gender {
            draft.gender = gender;
        }
        if let Some(height) = self.height {
            draft.height = height;
        }
        if let Some(weight) = self.weight {
            draft.weight = weight;
        }
        draft.into_attributes()
    }
}
