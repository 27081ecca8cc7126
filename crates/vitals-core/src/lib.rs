//! vitals-core
//!
//! Pure domain types for patient records: validation, derived BMI and
//! verdict, and the ordered id-keyed collection. No I/O.

pub mod bmi;
pub mod error;
pub mod models;
pub mod sort;
