//! Common sections - aligning failure mechanisms on shared boundaries
//!
//! Every failure mechanism divides the assessment section into its own
//! sections. To compare mechanisms, their boundaries are merged into one set
//! of common sections, and each mechanism's results are re-expressed on them.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::assembly::combined::combine_across_mechanisms;
use crate::core::category::CategoryOrder;
use crate::core::error::{AssemblyError, ErrorCode, Violations};
use crate::core::section::{AsSection, CategorizedSection, Section, SectionList};
use crate::core::tolerance::boundaries_coincide;

/// Label of the list produced by [`find_common_sections`]
pub const COMMON_SECTIONS_LABEL: &str = "common";

/// Results of all failure mechanisms aligned on common sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C: Serialize",
    deserialize = "C: Deserialize<'de>"
))]
pub struct CommonSectionAssemblyResult<C> {
    /// Each mechanism's results re-expressed on the common sections
    pub per_mechanism: Vec<SectionList<CategorizedSection<C>>>,

    /// Most severe category per common section across all mechanisms
    pub combined: SectionList<CategorizedSection<C>>,
}

/// Merge the sections of several lists into the coarsest common refinement
///
/// All boundaries of all lists are sorted and boundaries within tolerance of
/// each other collapse onto the first one, so independent roundoff never
/// produces near-zero sections.
pub fn find_common_sections<S: AsSection>(
    lists: &[SectionList<S>],
    total_length: f64,
) -> Result<SectionList<Section>, AssemblyError> {
    let mut violations = Violations::new();

    if lists.is_empty() {
        violations.push(ErrorCode::EmptyResultsList, "lists");
    }

    if total_length.is_nan() {
        violations.push(ErrorCode::ValueMayNotBeNull, "total_length");
    } else if !total_length.is_finite() || total_length <= 0.0 {
        violations.push(ErrorCode::SectionLengthOutOfRange, "total_length");
    } else {
        for list in lists {
            if !boundaries_coincide(list.summed_length(), total_length) {
                violations.push(ErrorCode::SectionLengthInvalid, list.mechanism());
            }
        }
    }

    violations.into_result()?;

    let mut boundaries: Vec<f64> = lists
        .iter()
        .flat_map(|list| list.boundaries().flat_map(|s| [s.start(), s.end()]))
        .collect();
    boundaries.sort_by(f64::total_cmp);

    let mut merged: Vec<f64> = Vec::with_capacity(boundaries.len());
    for boundary in boundaries {
        match merged.last() {
            Some(&canonical) if boundaries_coincide(canonical, boundary) => {}
            _ => merged.push(boundary),
        }
    }

    let sections = merged
        .windows(2)
        .map(|pair| Section::new(pair[0], pair[1]))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        lists = lists.len(),
        common_sections = sections.len(),
        total_length,
        "found common sections"
    );

    SectionList::new(COMMON_SECTIONS_LABEL, sections)
}

/// Re-express a mechanism's categorized sections on the common sections
///
/// Each common section takes the result of the single source section that
/// contains it. `common` must be a refinement of `source`.
pub fn project_onto_common_sections<C: Clone, S: AsSection>(
    source: &SectionList<CategorizedSection<C>>,
    common: &SectionList<S>,
) -> Result<SectionList<CategorizedSection<C>>, AssemblyError> {
    let mut violations = Violations::new();

    if !boundaries_coincide(source.total_length(), common.total_length()) {
        violations.push(ErrorCode::CommonSectionsInvalid, source.mechanism());
    }

    for (index, section) in source.sections().iter().enumerate() {
        if section.category().is_none() {
            violations.push(
                ErrorCode::SectionsWithoutCategory,
                format!("{}[{}]", source.mechanism(), index),
            );
        }
    }

    violations.into_result()?;

    let sources = source.sections();
    let mut projected = Vec::with_capacity(common.len());

    for (index, target) in common.boundaries().enumerate() {
        // First source section that does not end before the target does
        let first = sources.partition_point(|s| {
            let end = s.section().end();
            end < target.end() && !boundaries_coincide(end, target.end())
        });

        let mut containing = sources[first..]
            .iter()
            .take(2)
            .filter(|s| s.section().contains(target));

        match (containing.next(), containing.next()) {
            (Some(found), None) => {
                trace!(
                    mechanism = source.mechanism(),
                    start = target.start(),
                    end = target.end(),
                    "projected section"
                );
                projected.push(found.with_section(*target));
            }
            _ => {
                return Err(AssemblyError::new(
                    ErrorCode::CommonSectionsInvalid,
                    format!("{}[{}]", common.mechanism(), index),
                ));
            }
        }
    }

    SectionList::new(source.mechanism(), projected)
}

/// Align all mechanisms on common sections and combine them per section
///
/// Runs [`find_common_sections`], projects every mechanism with
/// [`project_onto_common_sections`], then selects the most severe category
/// per common section with [`combine_across_mechanisms`].
pub fn assemble_common_sections<C, O>(
    results: &[SectionList<CategorizedSection<C>>],
    total_length: f64,
    order: &O,
    partial: bool,
) -> Result<CommonSectionAssemblyResult<C>, AssemblyError>
where
    C: Clone,
    O: CategoryOrder<C> + ?Sized,
{
    let common = find_common_sections(results, total_length)?;

    let mut violations = Violations::new();
    let mut per_mechanism = Vec::with_capacity(results.len());
    for result in results {
        match project_onto_common_sections(result, &common) {
            Ok(projected) => per_mechanism.push(projected),
            Err(err) => violations.absorb(err),
        }
    }
    violations.into_result()?;

    let combined = combine_across_mechanisms(&per_mechanism, order, partial)?;

    debug!(
        mechanisms = per_mechanism.len(),
        common_sections = combined.len(),
        partial,
        "assembled common sections"
    );

    Ok(CommonSectionAssemblyResult {
        per_mechanism,
        combined,
    })
}
