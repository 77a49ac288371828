use crate::artifacts::core::error::{DiffSetError, DiffSetResult};
use crate::artifacts::revision::endpoint::RevisionEndpoint;
use crate::artifacts::revision::revision::Revision;

/// Strategy of a build, decided once from the two endpoints.
///
/// "Head" in the variant names stands for any repository revision, `HEAD` or numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    /// Live working copy against its pristine copy.
    LocalVsBase,
    /// Live working copy against a repository revision.
    LocalVsHead,
    /// Pristine copy against a repository revision.
    BaseVsHead,
    /// Two repository revisions; answered from whole-tree queries.
    ArbitraryVsArbitrary,
    /// Both endpoints are the same side, nothing can differ.
    Identical,
}

impl ComparisonMode {
    pub fn of(left: &RevisionEndpoint, right: &RevisionEndpoint) -> DiffSetResult<Self> {
        if left.is_same_side(right) {
            return Ok(ComparisonMode::Identical);
        }

        let mode = match (left.revision(), right.revision()) {
            (Revision::Working, Revision::Base) | (Revision::Base, Revision::Working) => {
                ComparisonMode::LocalVsBase
            }
            (Revision::Working, Revision::Head | Revision::Number(_))
            | (Revision::Head | Revision::Number(_), Revision::Working) => {
                ComparisonMode::LocalVsHead
            }
            (Revision::Base, Revision::Head | Revision::Number(_))
            | (Revision::Head | Revision::Number(_), Revision::Base) => ComparisonMode::BaseVsHead,
            (Revision::Head | Revision::Number(_), Revision::Head | Revision::Number(_)) => {
                ComparisonMode::ArbitraryVsArbitrary
            }
            (Revision::Working, Revision::Working) | (Revision::Base, Revision::Base) => {
                return Err(DiffSetError::InvalidEndpoint(format!(
                    "cannot compare {left} with {right}: both sides are local state of one working copy"
                )));
            }
        };

        Ok(mode)
    }

    /// Whether local paths are enumerated one by one instead of querying whole trees.
    pub fn is_per_path(&self) -> bool {
        matches!(
            self,
            ComparisonMode::LocalVsBase | ComparisonMode::LocalVsHead | ComparisonMode::BaseVsHead
        )
    }

    pub fn involves_working_copy(&self) -> bool {
        matches!(self, ComparisonMode::LocalVsBase | ComparisonMode::LocalVsHead)
    }
}
