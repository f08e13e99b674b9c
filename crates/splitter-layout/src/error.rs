use splitter_core::PanelId;
use thiserror::Error;

/// Configuration and resize failures of a panel group.
///
/// Configuration variants are raised eagerly when a group is built or its
/// children change; the group is never left half-updated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Explicit shares were supplied for a different number of children.
    #[error("children ratio has {actual} entries but the group has {expected} children")]
    ShareCountMismatch { expected: usize, actual: usize },

    /// Explicit shares do not add up to 100 (within the 99..=101 band).
    #[error("sum of children ratio is not close to 100 ({sum})")]
    ShareSumInvalid { sum: f32 },

    /// A share is negative or not a finite number.
    #[error("share at index {index} must be a non-negative number (got {value})")]
    NegativeShare { index: usize, value: f32 },

    /// Two children of the same group carry the same id.
    #[error("panel id {0} appears more than once in the group")]
    DuplicatePanelId(PanelId),

    #[error("no panel with id {0} in this group")]
    UnknownPanel(PanelId),

    /// A resize named two panels that are not separated by a single divider.
    #[error("panels {left} and {right} are not adjacent")]
    NotAdjacent { left: PanelId, right: PanelId },
}
