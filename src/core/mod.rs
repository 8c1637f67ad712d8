//! Core module - numeric primitives shared by every assembly step

pub mod category;
pub mod error;
pub mod probability;
pub mod section;
pub mod tolerance;

pub use category::{CategoryOrder, RankedCategoryOrder};
pub use error::{AssemblyError, ErrorCode, ErrorMessage};
pub use probability::Probability;
pub use section::{AsSection, CategorizedSection, Section, SectionList};
pub use tolerance::{
    boundaries_coincide, is_negligible_difference, ABSOLUTE_TOLERANCE, RELATIVE_TOLERANCE,
    SECTION_BOUNDARY_TOLERANCE,
};
