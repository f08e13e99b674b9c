// Panel container host
// Measures every group against the viewport, lays out panels and dividers,
// and wires divider presses to the shared drag coordinator.

mod container;
mod error;
pub mod geometry;
pub mod settings;
pub mod theme;
mod tests;

pub use container::{
    GroupNode, GroupPath, HostLayout, PanelContainer, PanelNode, PlacedDivider, PlacedPanel,
    ResizeRequest,
};
pub use error::HostError;
pub use geometry::{ContainerContext, GeometryProvider};
pub use settings::Settings;

pub use splitter_core::{CursorHint, Orientation, PanelId, PointerEvent, Rect, Renderer, Size, Vec2};
pub use splitter_input::DragIndicator;
pub use splitter_layout::{LayoutError, PanelChild};
