//! Body Mass Index from free-text weight and height.

use std::fmt::{self, Display};
use thiserror::Error;

#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field was empty after trimming.
    #[error("missing input")]
    MissingInput,

    /// A field was not a finite floating-point number.
    #[error("invalid number")]
    InvalidNumber,

    /// Weight or height was zero or negative.
    #[error("non-positive value")]
    NonPositive,
}

impl ValidationError {
    /// Short message suitable for a transient notice.
    pub fn notice(&self) -> &'static str {
        match self {
            ValidationError::MissingInput => "Enter both weight and height",
            ValidationError::InvalidNumber => "Invalid number format",
            ValidationError::NonPositive => "Values must be greater than zero",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BmiReading {
    pub bmi: f64,
    pub category: BmiCategory,
}

impl Display for BmiReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} ({})", self.bmi, self.category)
    }
}

/// Computes BMI from weight in kilograms and height in centimeters.
pub fn calculate(weight_kg: &str, height_cm: &str) -> Result<BmiReading, ValidationError> {
    let weight_kg = weight_kg.trim();
    let height_cm = height_cm.trim();
    if weight_kg.is_empty() || height_cm.is_empty() {
        return Err(ValidationError::MissingInput);
    }

    let weight = parse_number(weight_kg)?;
    let height_m = parse_number(height_cm)? / 100.0;
    if weight <= 0.0 || height_m <= 0.0 {
        return Err(ValidationError::NonPositive);
    }

    let bmi = weight / (height_m * height_m);
    Ok(BmiReading {
        bmi,
        category: BmiCategory::from_bmi(bmi),
    })
}

fn parse_number(input: &str) -> Result<f64, ValidationError> {
    input
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(ValidationError::InvalidNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_weight() {
        let reading = calculate("70", "175").unwrap();
        assert!((reading.bmi - 22.857).abs() < 0.01);
        assert_eq!(reading.category, BmiCategory::Normal);
        assert_eq!(reading.to_string(), "22.9 (Normal)");
    }

    #[test]
    fn underweight() {
        let reading = calculate("45", "180").unwrap();
        assert_eq!(reading.category, BmiCategory::Underweight);
        assert_eq!(reading.to_string(), "13.9 (Underweight)");
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(
            calculate("  90.5 ", "\t180\n").unwrap().category,
            BmiCategory::Overweight
        );
    }

    #[test]
    fn category_thresholds() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn missing_input() {
        assert_eq!(calculate("", "175"), Err(ValidationError::MissingInput));
        assert_eq!(calculate("70", "   "), Err(ValidationError::MissingInput));
        assert_eq!(
            ValidationError::MissingInput.to_string(),
            "missing input"
        );
    }

    #[test]
    fn invalid_number() {
        assert_eq!(calculate("abc", "175"), Err(ValidationError::InvalidNumber));
        assert_eq!(calculate("70", "1,75"), Err(ValidationError::InvalidNumber));
        assert_eq!(calculate("NaN", "175"), Err(ValidationError::InvalidNumber));
        assert_eq!(calculate("70", "inf"), Err(ValidationError::InvalidNumber));
        assert_eq!(
            ValidationError::InvalidNumber.to_string(),
            "invalid number"
        );
    }

    #[test]
    fn non_positive_value() {
        assert_eq!(calculate("70", "0"), Err(ValidationError::NonPositive));
        assert_eq!(calculate("-3", "175"), Err(ValidationError::NonPositive));
        assert_eq!(
            ValidationError::NonPositive.to_string(),
            "non-positive value"
        );
    }

    #[test]
    // Empty input wins over unparseable input in the other field.
    fn checks_run_in_order() {
        assert_eq!(calculate("abc", ""), Err(ValidationError::MissingInput));
        assert_eq!(calculate("-1", "abc"), Err(ValidationError::InvalidNumber));
    }
}
