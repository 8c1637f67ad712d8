//! Assembly module - turning per-section results into comparable results
//!
//! - [`find_common_sections`] / [`project_onto_common_sections`] - align
//!   independently segmented mechanisms on shared boundaries
//! - [`combine_across_mechanisms`] - most severe category per common section
//! - [`assemble_mechanism_probability`] - one probability per mechanism
//! - [`assemble_mechanism_category`] - one category per mechanism

pub mod combined;
pub mod common_sections;
pub mod mechanism;
pub mod probability;

pub use combined::{combine_across_mechanisms, COMBINED_SECTIONS_LABEL};
pub use common_sections::{
    assemble_common_sections, find_common_sections, project_onto_common_sections,
    CommonSectionAssemblyResult, COMMON_SECTIONS_LABEL,
};
pub use mechanism::assemble_mechanism_category;
pub use probability::{
    assemble_mechanism_probability, assemble_mechanism_probability_with_length_effect,
    AssemblyMethod, FailureMechanismAssemblyResult, SectionProbabilityResult,
};
