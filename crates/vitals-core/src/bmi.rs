use serde::{Deserialize, Serialize};

/// Categorical label derived from a BMI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Underweight,
    Normal,
    Obese,
}

/// Upper bounds (exclusive) of each band, ascending. Anything at or above the
/// last bound is `Obese`.
///
/// There is no overweight band: 25 ≤ bmi < 30 classifies as `Normal`.
pub const BMI_BANDS: &[(f64, Verdict)] = &[(18.5, Verdict::Underweight), (30.0, Verdict::Normal)];

/// `weight / height²`, rounded to two decimal places with ties to even.
pub fn compute_bmi(height_m: f64, weight_kg: f64) -> f64 {
    round2(weight_kg / (height_m * height_m))
}

pub fn classify(bmi: f64) -> Verdict {
    BMI_BANDS
        .iter()
        .find(|(upper, _)| bmi < *upper)
        .map(|(_, verdict)| *verdict)
        .unwrap_or(Verdict::Obese)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underweight => "Underweight",
            Verdict::Normal => "Normal",
            Verdict::Obese => "Obese",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
