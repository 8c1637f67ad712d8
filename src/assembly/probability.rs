//! Failure mechanism probability - combining per-section probabilities
//!
//! Section probabilities of one failure mechanism are combined under two
//! models:
//!
//! - **Correlated**: sections fail together; the mechanism probability is
//!   the largest section probability scaled by the length-effect factor,
//!   capped at 1.
//! - **Uncorrelated**: sections fail independently; `1 - Π(1 - p_i)`.
//!
//! The smaller of the two is reported. A single contributing section is
//! always reported as uncorrelated.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

use crate::core::error::{AssemblyError, ErrorCode, Violations};
use crate::core::probability::Probability;
use crate::core::tolerance::tolerant_cmp;

/// Model used to combine section probabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssemblyMethod {
    /// Fully dependent sections
    Correlated,
    /// Statistically independent sections
    Uncorrelated,
}

impl fmt::Display for AssemblyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyMethod::Correlated => write!(f, "correlated"),
            AssemblyMethod::Uncorrelated => write!(f, "uncorrelated"),
        }
    }
}

/// Assembled probability of one failure mechanism
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FailureMechanismAssemblyResult {
    probability: Probability,
    method: AssemblyMethod,
}

impl FailureMechanismAssemblyResult {
    pub fn new(probability: Probability, method: AssemblyMethod) -> Self {
        Self {
            probability,
            method,
        }
    }

    pub fn probability(&self) -> Probability {
        self.probability
    }

    pub fn method(&self) -> AssemblyMethod {
        self.method
    }
}

impl fmt::Display for FailureMechanismAssemblyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.probability, self.method)
    }
}

/// Assessment result of one section including its length effect
///
/// `profile_probability` holds for a single cross-section; `section_probability`
/// already includes the length effect of the section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProbabilityResult<C> {
    pub profile_probability: Probability,
    pub section_probability: Probability,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<C>,
}

impl<C> SectionProbabilityResult<C> {
    pub fn new(
        profile_probability: Probability,
        section_probability: Probability,
        category: Option<C>,
    ) -> Self {
        Self {
            profile_probability,
            section_probability,
            category,
        }
    }

    /// Ratio of section to profile probability
    ///
    /// `None` when either probability is undefined or the profile probability is zero.
    pub fn length_effect(&self) -> Option<f64> {
        match (self.profile_probability.value(), self.section_probability.value()) {
            (Some(profile), Some(section)) if profile > 0.0 => Some(section / profile),
            _ => None,
        }
    }
}

/// Assemble the probability of a failure mechanism from its section probabilities
///
/// With `partial` set, sections without a result are ignored; if none
/// remain the result is a zero probability. Without `partial` every section
/// must have a result.
pub fn assemble_mechanism_probability(
    length_effect_factor: f64,
    section_probabilities: &[Probability],
    partial: bool,
) -> Result<FailureMechanismAssemblyResult, AssemblyError> {
    assemble(
        length_effect_factor,
        section_probabilities,
        "section_probabilities",
        partial,
    )
}

/// Assemble the probability of a failure mechanism from full section results
///
/// Only the `section_probability` of each result enters the combination; it
/// already carries the length effect within the section. `profile_probability`
/// and `category` are carried for reporting through
/// [`SectionProbabilityResult::length_effect`] and do not change the outcome.
/// Agrees with [`assemble_mechanism_probability`] on the same section
/// probabilities.
pub fn assemble_mechanism_probability_with_length_effect<C>(
    length_effect_factor: f64,
    section_results: &[SectionProbabilityResult<C>],
    partial: bool,
) -> Result<FailureMechanismAssemblyResult, AssemblyError> {
    let section_probabilities: Vec<Probability> = section_results
        .iter()
        .map(|result| result.section_probability)
        .collect();

    assemble(
        length_effect_factor,
        &section_probabilities,
        "section_results",
        partial,
    )
}

fn assemble(
    length_effect_factor: f64,
    probabilities: &[Probability],
    parameter: &str,
    partial: bool,
) -> Result<FailureMechanismAssemblyResult, AssemblyError> {
    let mut violations = Violations::new();

    if probabilities.is_empty() {
        violations.push(ErrorCode::EmptyResultsList, parameter);
    }

    if !length_effect_factor.is_finite() || length_effect_factor < 1.0 {
        violations.push(ErrorCode::LengthEffectFactorOutOfRange, "length_effect_factor");
    }

    for (index, probability) in probabilities.iter().enumerate() {
        if !probability.is_valid() {
            violations.push(
                ErrorCode::ProbabilityOutOfRange,
                format!("{}[{}]", parameter, index),
            );
        }
    }

    if !partial {
        if let Some(index) = probabilities.iter().position(|p| !p.is_defined()) {
            violations.push(
                ErrorCode::EncounteredOneOrMoreSectionsWithoutResult,
                format!("{}[{}]", parameter, index),
            );
        }
    }

    violations.into_result()?;

    let defined: Vec<f64> = probabilities.iter().filter_map(Probability::value).collect();
    let result = select_model(length_effect_factor, &defined);

    debug!(
        sections = probabilities.len(),
        contributing = defined.len(),
        length_effect_factor,
        method = %result.method(),
        partial,
        "assembled failure mechanism probability"
    );

    Ok(result)
}

/// Pick the smaller of the correlated and uncorrelated probability
fn select_model(
    length_effect_factor: f64,
    probabilities: &[f64],
) -> FailureMechanismAssemblyResult {
    match probabilities {
        [] => FailureMechanismAssemblyResult::new(Probability::ZERO, AssemblyMethod::Correlated),
        [single] => FailureMechanismAssemblyResult::new(
            Probability::Defined(*single),
            AssemblyMethod::Uncorrelated,
        ),
        _ => {
            let max = probabilities.iter().copied().fold(0.0, f64::max);
            let correlated = (length_effect_factor * max).min(1.0);
            let uncorrelated = 1.0 - probabilities.iter().map(|p| 1.0 - p).product::<f64>();

            match tolerant_cmp(uncorrelated, correlated) {
                Some(Ordering::Less) => FailureMechanismAssemblyResult::new(
                    Probability::Defined(uncorrelated),
                    AssemblyMethod::Uncorrelated,
                ),
                _ => FailureMechanismAssemblyResult::new(
                    Probability::Defined(correlated),
                    AssemblyMethod::Correlated,
                ),
            }
        }
    }
}
