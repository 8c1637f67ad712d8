//! Failure probabilities with an explicit "no result" value

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::core::error::{AssemblyError, ErrorCode};
use crate::core::tolerance::{is_negligible_difference, tolerant_cmp};

/// A probability of failure in [0, 1], or undefined when no result is available
///
/// Equality and ordering are tolerant: two defined probabilities that differ
/// by a negligible amount compare equal. `Undefined` never equals a defined
/// probability and has no ordering relative to one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "Option<f64>", into = "Option<f64>")]
pub enum Probability {
    /// A known probability, always within [0, 1]
    Defined(f64),
    /// No result available
    Undefined,
}

impl Probability {
    /// Probability of zero (never fails)
    pub const ZERO: Probability = Probability::Defined(0.0);

    /// Probability of one (certain failure)
    pub const ONE: Probability = Probability::Defined(1.0);

    /// Create a probability from a raw value
    ///
    /// NaN maps to [`Probability::Undefined`]; values outside [0, 1] are rejected.
    pub fn new(value: f64) -> Result<Self, AssemblyError> {
        if value.is_nan() {
            return Ok(Probability::Undefined);
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(AssemblyError::new(ErrorCode::ProbabilityOutOfRange, "probability"));
        }
        Ok(Probability::Defined(value))
    }

    /// Check that a defined probability lies in [0, 1]
    ///
    /// The variants are public, so values built without [`Probability::new`]
    /// are re-checked before they are assembled. Undefined is always valid.
    pub fn is_valid(&self) -> bool {
        match self {
            Probability::Defined(p) => (0.0..=1.0).contains(p),
            Probability::Undefined => true,
        }
    }

    /// Create a probability from a return period (1 / probability)
    pub fn from_return_period(return_period: f64) -> Result<Self, AssemblyError> {
        if return_period.is_nan() {
            return Err(AssemblyError::new(ErrorCode::ValueMayNotBeNull, "return_period"));
        }
        if return_period < 1.0 {
            return Err(AssemblyError::new(ErrorCode::ProbabilityOutOfRange, "return_period"));
        }
        Ok(Probability::Defined(1.0 / return_period))
    }

    /// The raw value, if defined
    pub fn value(&self) -> Option<f64> {
        match self {
            Probability::Defined(p) => Some(*p),
            Probability::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Probability::Defined(_))
    }

    /// Return period (1 / p); infinite for a zero probability
    pub fn return_period(&self) -> Option<f64> {
        self.value().map(|p| 1.0 / p)
    }

    /// Probability of the complementary event (1 - p)
    pub fn complement(&self) -> Probability {
        match self {
            Probability::Defined(p) => Probability::Defined(1.0 - p),
            Probability::Undefined => Probability::Undefined,
        }
    }

    /// Check whether two probabilities differ by a negligible amount
    ///
    /// Undefined is never negligibly different from a defined probability.
    pub fn is_negligible_difference(&self, other: &Probability) -> bool {
        match (self, other) {
            (Probability::Defined(a), Probability::Defined(b)) => is_negligible_difference(*a, *b),
            (Probability::Undefined, Probability::Undefined) => true,
            _ => false,
        }
    }
}

impl Default for Probability {
    fn default() -> Self {
        Probability::Undefined
    }
}

impl PartialEq for Probability {
    fn eq(&self, other: &Self) -> bool {
        self.is_negligible_difference(other)
    }
}

impl PartialOrd for Probability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Probability::Defined(a), Probability::Defined(b)) => tolerant_cmp(*a, *b),
            (Probability::Undefined, Probability::Undefined) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl TryFrom<Option<f64>> for Probability {
    type Error = AssemblyError;

    /// `None` and NaN are undefined; other values must lie in [0, 1]
    fn try_from(value: Option<f64>) -> Result<Self, Self::Error> {
        match value {
            Some(p) => Probability::new(p),
            None => Ok(Probability::Undefined),
        }
    }
}

impl From<Probability> for Option<f64> {
    fn from(probability: Probability) -> Self {
        probability.value()
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probability::Defined(p) if *p > 0.0 => write!(f, "1/{:.0}", 1.0 / p),
            Probability::Defined(_) => write!(f, "0"),
            Probability::Undefined => write!(f, "undefined"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_range() {
        assert_eq!(Probability::new(0.5).unwrap(), Probability::Defined(0.5));
        assert_eq!(Probability::new(0.0).unwrap(), Probability::ZERO);
        assert_eq!(Probability::new(1.0).unwrap(), Probability::ONE);

        let err = Probability::new(1.5).unwrap_err();
        assert!(err.has_code(ErrorCode::ProbabilityOutOfRange));
        let err = Probability::new(-0.1).unwrap_err();
        assert!(err.has_code(ErrorCode::ProbabilityOutOfRange));
    }

    #[test]
    fn test_nan_is_undefined() {
        let p = Probability::new(f64::NAN).unwrap();
        assert!(!p.is_defined());
        assert_eq!(p.value(), None);
    }

    #[test]
    fn test_return_period() {
        let p = Probability::from_return_period(230.0).unwrap();
        assert!((p.value().unwrap() - 1.0 / 230.0).abs() < 1e-15);
        assert!((p.return_period().unwrap() - 230.0).abs() < 1e-9);
        assert_eq!(Probability::Undefined.return_period(), None);

        let err = Probability::from_return_period(0.5).unwrap_err();
        assert!(err.has_code(ErrorCode::ProbabilityOutOfRange));
    }

    #[test]
    fn test_tolerant_equality() {
        let a = Probability::Defined(0.001);
        let b = Probability::Defined(0.001 + 1e-14);
        assert_eq!(a, b);
        assert_ne!(a, Probability::Defined(0.0011));
    }

    #[test]
    fn test_undefined_never_equals_defined() {
        assert_ne!(Probability::Undefined, Probability::ZERO);
        assert_ne!(Probability::ONE, Probability::Undefined);
        assert!(!Probability::Undefined.is_negligible_difference(&Probability::ZERO));
        assert_eq!(Probability::Undefined.partial_cmp(&Probability::ZERO), None);
    }

    #[test]
    fn test_tolerant_ordering() {
        assert!(Probability::Defined(0.001) < Probability::Defined(0.002));
        assert_eq!(
            Probability::Defined(0.1).partial_cmp(&Probability::Defined(0.1 + 1e-12)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_complement() {
        assert_eq!(Probability::Defined(0.25).complement(), Probability::Defined(0.75));
        assert!(!Probability::Undefined.complement().is_defined());
    }

    #[test]
    fn test_display() {
        assert_eq!(Probability::Defined(0.001).to_string(), "1/1000");
        assert_eq!(Probability::ZERO.to_string(), "0");
        assert_eq!(Probability::Undefined.to_string(), "undefined");
    }

    #[test]
    fn test_serializes_as_optional_number() {
        let json = serde_json::to_string(&vec![Probability::Defined(0.5), Probability::Undefined])
            .unwrap();
        assert_eq!(json, "[0.5,null]");

        let parsed: Vec<Probability> = serde_json::from_str("[0.25,null]").unwrap();
        assert_eq!(parsed, vec![Probability::Defined(0.25), Probability::Undefined]);
    }

    #[test]
    fn test_deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<Vec<Probability>>("[1.5]").is_err());
        assert!(serde_json::from_str::<Vec<Probability>>("[-0.2]").is_err());
        assert!(serde_yml::from_str::<Probability>("1.5").is_err());
        assert_eq!(
            serde_json::from_str::<Probability>("1.0").unwrap(),
            Probability::ONE
        );
    }

    #[test]
    fn test_is_valid() {
        assert!(Probability::Defined(0.3).is_valid());
        assert!(Probability::Undefined.is_valid());
        assert!(!Probability::Defined(1.5).is_valid());
        assert!(!Probability::Defined(-0.2).is_valid());
        assert!(!Probability::Defined(f64::NAN).is_valid());
    }
}
