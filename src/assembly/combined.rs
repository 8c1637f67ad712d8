//! Combined result per common section across failure mechanisms

use tracing::debug;

use crate::core::category::CategoryOrder;
use crate::core::error::{AssemblyError, ErrorCode, Violations};
use crate::core::section::{AsSection, CategorizedSection, SectionList};

/// Label of the list produced by [`combine_across_mechanisms`]
pub const COMBINED_SECTIONS_LABEL: &str = "combined";

/// Select the most severe category per common section
///
/// All lists must already be aligned on identical boundaries (see
/// [`project_onto_common_sections`](crate::assembly::project_onto_common_sections)).
/// In a partial assembly, categories the order marks as "no result" are
/// ignored; a section left without any category becomes not relevant.
pub fn combine_across_mechanisms<C, O>(
    lists: &[SectionList<CategorizedSection<C>>],
    order: &O,
    partial: bool,
) -> Result<SectionList<CategorizedSection<C>>, AssemblyError>
where
    C: Clone,
    O: CategoryOrder<C> + ?Sized,
{
    let Some(reference) = lists.first() else {
        return Err(AssemblyError::new(ErrorCode::NoCategoryValues, "lists"));
    };

    let mut violations = Violations::new();
    for list in lists {
        if list.is_empty() {
            violations.push(ErrorCode::NoCategoryValues, list.mechanism());
            continue;
        }

        for (index, section) in list.sections().iter().enumerate() {
            if section.category().is_none() {
                violations.push(
                    ErrorCode::NoCategoryValues,
                    format!("{}[{}]", list.mechanism(), index),
                );
            }
        }

        if list.len() != reference.len() {
            violations.push(ErrorCode::UnequalSectionCount, list.mechanism());
        } else if list
            .boundaries()
            .zip(reference.boundaries())
            .any(|(a, b)| !a.has_same_boundaries(b))
        {
            violations.push(ErrorCode::SectionsNotEqual, list.mechanism());
        }
    }
    violations.into_result()?;

    let combined = reference
        .sections()
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let categories = lists
                .iter()
                .filter_map(|list| list.sections()[index].category());
            let category = select_most_severe(categories, order, partial);
            CategorizedSection::new(*section.section(), category)
        })
        .collect();

    debug!(
        mechanisms = lists.len(),
        sections = reference.len(),
        partial,
        "combined results across mechanisms"
    );

    SectionList::new(COMBINED_SECTIONS_LABEL, combined)
}

/// Most severe category under `order`
///
/// Partial assemblies skip no-result categories. Falls back to the
/// not-relevant category when nothing remains.
pub(crate) fn select_most_severe<'a, C, O>(
    categories: impl Iterator<Item = &'a C>,
    order: &O,
    partial: bool,
) -> C
where
    C: Clone + 'a,
    O: CategoryOrder<C> + ?Sized,
{
    categories
        .filter(|category| !(partial && order.is_no_result(category)))
        .reduce(|worst, category| order.most_severe(worst, category))
        .cloned()
        .unwrap_or_else(|| order.not_relevant())
}
