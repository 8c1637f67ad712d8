//! Sections along the reference line of an assessment section
//!
//! A [`Section`] is a half-open interval `[start, end)` measured along the
//! assessment section. A [`SectionList`] is a gap-free sequence of sections
//! starting at zero, owned by one failure mechanism.

use serde::{Deserialize, Serialize};

use crate::core::error::{AssemblyError, ErrorCode, Violations};
use crate::core::probability::Probability;
use crate::core::tolerance::boundaries_coincide;

/// A half-open interval `[start, end)` along the reference line
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "SectionBounds")]
pub struct Section {
    start: f64,
    end: f64,
}

/// Unvalidated section bounds as read from input
#[derive(Deserialize)]
struct SectionBounds {
    start: f64,
    end: f64,
}

impl TryFrom<SectionBounds> for Section {
    type Error = AssemblyError;

    fn try_from(bounds: SectionBounds) -> Result<Self, Self::Error> {
        Section::new(bounds.start, bounds.end)
    }
}

impl Section {
    /// Create a section, rejecting non-finite bounds and `end <= start`
    pub fn new(start: f64, end: f64) -> Result<Self, AssemblyError> {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(AssemblyError::new(ErrorCode::SectionStartEndInvalid, "section"));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Check whether `next` starts where this section ends
    pub fn is_adjacent_to(&self, next: &Section) -> bool {
        boundaries_coincide(self.end, next.start)
    }

    /// Check whether both boundaries match within tolerance
    pub fn has_same_boundaries(&self, other: &Section) -> bool {
        boundaries_coincide(self.start, other.start) && boundaries_coincide(self.end, other.end)
    }

    /// Check whether `inner` lies within this section, allowing boundary roundoff
    pub fn contains(&self, inner: &Section) -> bool {
        let start_inside = inner.start > self.start || boundaries_coincide(inner.start, self.start);
        let end_inside = inner.end < self.end || boundaries_coincide(inner.end, self.end);
        start_inside && end_inside
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.has_same_boundaries(other)
    }
}

/// Anything that occupies a section of the reference line
pub trait AsSection {
    fn section(&self) -> &Section;
}

impl AsSection for Section {
    fn section(&self) -> &Section {
        self
    }
}

/// A section with the assessment result of one failure mechanism
///
/// `C` is the category enumeration of the assessment (direct or indirect).
/// A section may carry a probability next to its category; sections judged
/// without a probability carry [`Probability::Undefined`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedSection<C> {
    section: Section,

    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<C>,

    #[serde(default)]
    probability: Probability,
}

impl<C> CategorizedSection<C> {
    /// Section with a direct or indirect category
    pub fn new(section: Section, category: C) -> Self {
        Self {
            section,
            category: Some(category),
            probability: Probability::Undefined,
        }
    }

    /// Section with a category and the probability it was derived from
    pub fn with_probability(section: Section, category: C, probability: Probability) -> Self {
        Self {
            section,
            category: Some(category),
            probability,
        }
    }

    /// Section that has not been categorized yet
    pub fn uncategorized(section: Section) -> Self {
        Self {
            section,
            category: None,
            probability: Probability::Undefined,
        }
    }

    pub fn category(&self) -> Option<&C> {
        self.category.as_ref()
    }

    pub fn probability(&self) -> Probability {
        self.probability
    }

    /// Same result, placed on different boundaries
    pub fn with_section(&self, section: Section) -> Self
    where
        C: Clone,
    {
        Self {
            section,
            category: self.category.clone(),
            probability: self.probability,
        }
    }
}

impl<C> AsSection for CategorizedSection<C> {
    fn section(&self) -> &Section {
        &self.section
    }
}

/// Consecutive sections of one failure mechanism, covering `[0, total_length)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "SectionListData<S>",
    bound(deserialize = "S: AsSection + Deserialize<'de>")
)]
pub struct SectionList<S> {
    /// Label of the owning failure mechanism
    mechanism: String,

    sections: Vec<S>,
}

/// Unvalidated section list as read from input
#[derive(Deserialize)]
struct SectionListData<S> {
    mechanism: String,
    sections: Vec<S>,
}

impl<S: AsSection> TryFrom<SectionListData<S>> for SectionList<S> {
    type Error = AssemblyError;

    fn try_from(data: SectionListData<S>) -> Result<Self, Self::Error> {
        SectionList::new(data.mechanism, data.sections)
    }
}

impl<S: AsSection> SectionList<S> {
    /// Create a list, checking that sections start at zero and leave no gaps or overlaps
    pub fn new(mechanism: impl Into<String>, sections: Vec<S>) -> Result<Self, AssemblyError> {
        let mechanism = mechanism.into();
        let mut violations = Violations::new();

        match sections.first() {
            None => violations.push(ErrorCode::EmptyResultsList, mechanism.as_str()),
            Some(first) => {
                if !boundaries_coincide(first.section().start(), 0.0) {
                    violations.push(ErrorCode::SectionsNotConsecutive, mechanism.as_str());
                }
            }
        }

        for (index, pair) in sections.windows(2).enumerate() {
            if !pair[0].section().is_adjacent_to(pair[1].section()) {
                violations.push(
                    ErrorCode::SectionsNotConsecutive,
                    format!("{}[{}]", mechanism, index + 1),
                );
            }
        }

        violations.into_result()?;
        Ok(Self {
            mechanism,
            sections,
        })
    }

    /// End of the last section
    pub fn total_length(&self) -> f64 {
        self.sections
            .last()
            .map(|s| s.section().end())
            .unwrap_or(0.0)
    }

    /// Sum of the lengths of all sections
    pub fn summed_length(&self) -> f64 {
        self.sections.iter().map(|s| s.section().length()).sum()
    }

    /// Iterate over the section boundaries of this list
    pub fn boundaries(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().map(|s| s.section())
    }
}

impl<S> SectionList<S> {
    pub fn mechanism(&self) -> &str {
        &self.mechanism
    }

    pub fn sections(&self) -> &[S] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn into_sections(self) -> Vec<S> {
        self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(start: f64, end: f64) -> Section {
        Section::new(start, end).unwrap()
    }

    #[test]
    fn test_section_requires_end_after_start() {
        assert!(Section::new(0.0, 10.0).is_ok());

        let err = Section::new(10.0, 10.0).unwrap_err();
        assert!(err.has_code(ErrorCode::SectionStartEndInvalid));
        assert!(Section::new(10.0, 5.0).is_err());
        assert!(Section::new(f64::NAN, 5.0).is_err());
        assert!(Section::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_section_length() {
        assert!((section(5.0, 20.0).length() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_adjacency_tolerates_roundoff() {
        let a = section(0.0, 0.1 + 0.2);
        let b = section(0.3, 1.0);
        assert!(a.is_adjacent_to(&b));
        assert!(!section(0.0, 0.29).is_adjacent_to(&b));
    }

    #[test]
    fn test_short_section_far_along_is_distinct() {
        let long = section(0.0, 1e5);
        let short = section(1e5, 1e5 + 0.05);
        let rest = section(1e5 + 0.05, 2e5);

        assert!(long.is_adjacent_to(&short));
        assert!(short.is_adjacent_to(&rest));
        assert!(!long.is_adjacent_to(&rest));
        assert!(!short.has_same_boundaries(&section(1e5, 1e5 + 0.1)));
        assert!(!long.contains(&short));
        assert!(!rest.contains(&short));
    }

    #[test]
    fn test_contains() {
        let outer = section(5.0, 20.0);
        assert!(outer.contains(&section(5.0, 10.0)));
        assert!(outer.contains(&section(10.0, 20.0 + 1e-9)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&section(0.0, 10.0)));
        assert!(!outer.contains(&section(15.0, 25.0)));
    }

    #[test]
    fn test_section_list_valid() {
        let list = SectionList::new(
            "overtopping",
            vec![section(0.0, 10.0), section(10.0, 20.0), section(20.0, 30.0)],
        )
        .unwrap();

        assert_eq!(list.mechanism(), "overtopping");
        assert_eq!(list.len(), 3);
        assert!((list.total_length() - 30.0).abs() < 1e-12);
        assert!((list.summed_length() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_section_list_rejects_empty() {
        let err = SectionList::<Section>::new("piping", vec![]).unwrap_err();
        assert!(err.has_code(ErrorCode::EmptyResultsList));
    }

    #[test]
    fn test_section_list_rejects_gap_and_bad_start() {
        let err = SectionList::new(
            "piping",
            vec![section(1.0, 10.0), section(12.0, 20.0)],
        )
        .unwrap_err();

        assert_eq!(
            err.codes(),
            vec![
                ErrorCode::SectionsNotConsecutive,
                ErrorCode::SectionsNotConsecutive
            ]
        );
        assert_eq!(err.messages()[1].parameter, "piping[1]");
    }

    #[test]
    fn test_categorized_section_with_section() {
        let original = CategorizedSection::with_probability(
            section(0.0, 10.0),
            "IIv",
            Probability::Defined(0.001),
        );
        let moved = original.with_section(section(0.0, 5.0));

        assert_eq!(moved.category(), Some(&"IIv"));
        assert_eq!(moved.probability(), Probability::Defined(0.001));
        assert!((moved.section().end() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_deserialization_validates() {
        let list: SectionList<Section> = serde_json::from_str(
            r#"{"mechanism":"piping",
                "sections":[{"start":0.0,"end":5.0},{"start":5.0,"end":8.0}]}"#,
        )
        .unwrap();
        assert_eq!(list.len(), 2);

        let reversed = serde_json::from_str::<Section>(r#"{"start":5.0,"end":1.0}"#);
        assert!(reversed.is_err());

        let gap = serde_json::from_str::<SectionList<Section>>(
            r#"{"mechanism":"piping",
                "sections":[{"start":0.0,"end":5.0},{"start":6.0,"end":8.0}]}"#,
        );
        assert!(gap.is_err());
    }

    #[test]
    fn test_uncategorized_section() {
        let s: CategorizedSection<&str> = CategorizedSection::uncategorized(section(0.0, 1.0));
        assert!(s.category().is_none());
        assert!(!s.probability().is_defined());
    }
}
