use splitter_core::PanelId;
use splitter_input::DragError;
use splitter_layout::LayoutError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    /// Invalid children or shares; the tree is not rendered.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Drag(#[from] DragError),

    /// A path did not lead to a nested panel group.
    #[error("no panel group at path {0:?}")]
    UnknownGroup(Vec<PanelId>),
}
