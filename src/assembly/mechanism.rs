//! Failure mechanism category - the most severe category over all sections

use tracing::debug;

use crate::assembly::combined::select_most_severe;
use crate::core::category::CategoryOrder;
use crate::core::error::{AssemblyError, ErrorCode, Violations};
use crate::core::section::CategorizedSection;

/// Assemble the category of a failure mechanism from its categorized sections
///
/// Works for direct and indirect category enumerations alike. In a partial
/// assembly uncategorized sections and no-result categories are skipped and
/// the not-relevant category is returned when nothing remains.
pub fn assemble_mechanism_category<C, O>(
    sections: &[CategorizedSection<C>],
    order: &O,
    partial: bool,
) -> Result<C, AssemblyError>
where
    C: Clone,
    O: CategoryOrder<C> + ?Sized,
{
    let mut violations = Violations::new();

    if sections.is_empty() {
        violations.push(ErrorCode::EmptyResultsList, "sections");
    }

    if !partial {
        for (index, section) in sections.iter().enumerate() {
            if section.category().is_none() {
                violations.push(ErrorCode::SectionsWithoutCategory, format!("sections[{}]", index));
            }
        }
    }

    violations.into_result()?;

    let category = select_most_severe(
        sections.iter().filter_map(|s| s.category()),
        order,
        partial,
    );

    debug!(sections = sections.len(), partial, "assembled failure mechanism category");

    Ok(category)
}
