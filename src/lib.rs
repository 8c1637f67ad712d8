//! Flood Assembly Kernel
//!
//! Assembles per-section safety assessment results of flood-defense failure
//! mechanisms into section-aligned, comparable results and into a single
//! failure probability per mechanism.
//!
//! All operations are pure functions over immutable values and can be called
//! concurrently on independent inputs.

pub mod assembly;
pub mod core;

pub use crate::assembly::{
    assemble_common_sections, assemble_mechanism_category, assemble_mechanism_probability,
    assemble_mechanism_probability_with_length_effect, combine_across_mechanisms,
    find_common_sections, project_onto_common_sections, AssemblyMethod,
    CommonSectionAssemblyResult, FailureMechanismAssemblyResult, SectionProbabilityResult,
};
pub use crate::core::{
    AsSection, AssemblyError, CategorizedSection, CategoryOrder, ErrorCode, ErrorMessage,
    Probability, RankedCategoryOrder, Section, SectionList,
};
