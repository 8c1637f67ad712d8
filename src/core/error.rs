//! Assembly errors with machine-checkable codes
//!
//! Every fallible operation in the kernel returns [`AssemblyError`], which
//! bundles one or more [`ErrorMessage`]s. Violations found in the same
//! validation pass are reported together so callers can fix their input in
//! one go.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Machine-checkable error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A required value is absent or undefined (NaN)
    ValueMayNotBeNull,
    /// A required collection is empty
    EmptyResultsList,
    /// Total length is zero or negative
    SectionLengthOutOfRange,
    /// Section lengths of a list do not add up to the declared total length
    SectionLengthInvalid,
    /// Projected and common sections disagree in length or cannot be aligned
    CommonSectionsInvalid,
    /// A section that must carry a category does not
    SectionsWithoutCategory,
    /// No categories available to combine
    NoCategoryValues,
    /// Lists to combine differ in section count
    UnequalSectionCount,
    /// Lists to combine differ in section boundaries
    SectionsNotEqual,
    /// Length-effect factor is below 1.0
    LengthEffectFactorOutOfRange,
    /// Undefined probability present while a full assembly was requested
    EncounteredOneOrMoreSectionsWithoutResult,
    /// Sections of a list leave a gap, overlap, or do not start at zero
    SectionsNotConsecutive,
    /// Section end does not lie after its start
    SectionStartEndInvalid,
    /// Probability outside [0, 1]
    ProbabilityOutOfRange,
}

impl ErrorCode {
    /// Get the string representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValueMayNotBeNull => "value_may_not_be_null",
            ErrorCode::EmptyResultsList => "empty_results_list",
            ErrorCode::SectionLengthOutOfRange => "section_length_out_of_range",
            ErrorCode::SectionLengthInvalid => "section_length_invalid",
            ErrorCode::CommonSectionsInvalid => "common_sections_invalid",
            ErrorCode::SectionsWithoutCategory => "sections_without_category",
            ErrorCode::NoCategoryValues => "no_category_values",
            ErrorCode::UnequalSectionCount => "unequal_section_count",
            ErrorCode::SectionsNotEqual => "sections_not_equal",
            ErrorCode::LengthEffectFactorOutOfRange => "length_effect_factor_out_of_range",
            ErrorCode::EncounteredOneOrMoreSectionsWithoutResult => {
                "encountered_one_or_more_sections_without_result"
            }
            ErrorCode::SectionsNotConsecutive => "sections_not_consecutive",
            ErrorCode::SectionStartEndInvalid => "section_start_end_invalid",
            ErrorCode::ProbabilityOutOfRange => "probability_out_of_range",
        }
    }

    /// Human readable description of what went wrong
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::ValueMayNotBeNull => "value may not be undefined",
            ErrorCode::EmptyResultsList => "list of results may not be empty",
            ErrorCode::SectionLengthOutOfRange => "section length must be larger than zero",
            ErrorCode::SectionLengthInvalid => {
                "section lengths do not add up to the assessment section length"
            }
            ErrorCode::CommonSectionsInvalid => {
                "sections cannot be aligned with the common sections"
            }
            ErrorCode::SectionsWithoutCategory => "one or more sections carry no category",
            ErrorCode::NoCategoryValues => "no category values to combine",
            ErrorCode::UnequalSectionCount => "section lists differ in number of sections",
            ErrorCode::SectionsNotEqual => "section lists differ in section boundaries",
            ErrorCode::LengthEffectFactorOutOfRange => "length-effect factor must be at least 1",
            ErrorCode::EncounteredOneOrMoreSectionsWithoutResult => {
                "one or more sections have no result"
            }
            ErrorCode::SectionsNotConsecutive => "sections are not consecutive",
            ErrorCode::SectionStartEndInvalid => "section end must lie after section start",
            ErrorCode::ProbabilityOutOfRange => "probability must lie between 0 and 1",
        }
    }

    /// Suggestion for fixing the input
    fn help(&self) -> Option<&'static str> {
        match self {
            ErrorCode::SectionLengthInvalid | ErrorCode::CommonSectionsInvalid => Some(
                "All section lists must cover the same assessment section from 0 to its total length.",
            ),
            ErrorCode::EncounteredOneOrMoreSectionsWithoutResult => {
                Some("Provide a result for every section, or request a partial assembly.")
            }
            ErrorCode::SectionsWithoutCategory => {
                Some("Every section must be categorized before it can be assembled.")
            }
            ErrorCode::UnequalSectionCount | ErrorCode::SectionsNotEqual => Some(
                "Project every failure mechanism onto the common sections before combining them.",
            ),
            ErrorCode::LengthEffectFactorOutOfRange => {
                Some("A length-effect factor of 1 means no length effect.")
            }
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single violation: error code plus the offending parameter
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{parameter}: {}", .code.description())]
pub struct ErrorMessage {
    /// What went wrong
    pub code: ErrorCode,

    /// Name of the offending parameter, list or element
    pub parameter: String,
}

impl ErrorMessage {
    pub fn new(code: ErrorCode, parameter: impl Into<String>) -> Self {
        Self {
            code,
            parameter: parameter.into(),
        }
    }
}

impl Diagnostic for ErrorMessage {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("assembly_kernel::{}", self.code)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .help()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }
}

/// Error returned by every assembly operation
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("Assembly failed: {summary}")]
#[diagnostic(code(assembly_kernel::assembly_failed))]
pub struct AssemblyError {
    summary: String,

    #[related]
    messages: Vec<ErrorMessage>,
}

impl AssemblyError {
    /// Create an error with a single violation
    pub fn new(code: ErrorCode, parameter: impl Into<String>) -> Self {
        Self::from_messages(vec![ErrorMessage::new(code, parameter)])
    }

    /// Create an error from a set of violations
    pub fn from_messages(messages: Vec<ErrorMessage>) -> Self {
        let summary = match messages.as_slice() {
            [single] => single.to_string(),
            _ => format!("{} errors", messages.len()),
        };
        Self { summary, messages }
    }

    /// All violations carried by this error
    pub fn messages(&self) -> &[ErrorMessage] {
        &self.messages
    }

    /// Check whether any violation carries the given code
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.messages.iter().any(|m| m.code == code)
    }

    /// Codes of all violations, in the order they were found
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.messages.iter().map(|m| m.code).collect()
    }
}

/// Collects violations during one validation pass
#[derive(Debug, Default)]
pub(crate) struct Violations {
    messages: Vec<ErrorMessage>,
}

impl Violations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, code: ErrorCode, parameter: impl Into<String>) {
        self.messages.push(ErrorMessage::new(code, parameter));
    }

    pub(crate) fn absorb(&mut self, error: AssemblyError) {
        self.messages.extend(error.messages);
    }

    /// `Ok(())` when nothing was collected, otherwise the combined error
    pub(crate) fn into_result(self) -> Result<(), AssemblyError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(AssemblyError::from_messages(self.messages))
        }
    }
}
