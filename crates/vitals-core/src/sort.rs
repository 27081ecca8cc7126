use std::str::FromStr;

use thiserror::Error;

use crate::models::patient::{Patient, PatientAttributes};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("invalid field '{0}', select from height, weight, bmi")]
    UnknownField(String),

    #[error("invalid order '{0}', select from asc, desc")]
    UnknownOrder(String),
}

/// Numeric attribute a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    pub fn key(&self, attributes: &PatientAttributes) -> f64 {
        match self {
            SortField::Height => attributes.height(),
            SortField::Weight => attributes.weight(),
            SortField::Bmi => attributes.bmi(),
        }
    }
}

impl FromStr for SortField {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            other => Err(SortError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(SortError::UnknownOrder(other.to_string())),
        }
    }
}

/// Stable sort: records with equal keys keep their relative order in both
/// directions.
pub fn sort_patients(patients: &mut [Patient], field: SortField, order: SortOrder) {
    patients.sort_by(|a, b| {
        let ordering = field.key(&a.attributes).total_cmp(&field.key(&b.attributes));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
