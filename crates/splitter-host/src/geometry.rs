// Geometry provider: content length and divider thickness for each group.

use splitter_core::{Orientation, Rect};

use crate::theme::DEFAULT_DIVIDER_THICKNESS;

/// Supplies the measurements a panel group needs to turn shares into pixels.
pub trait GeometryProvider {
    /// Thickness of every divider in the tree, in pixels.
    fn divider_thickness(&self) -> f32;

    /// Extent of `area` along `orientation`, minus the space taken by the
    /// dividers between `slot_count` panels.
    fn content_length(&self, area: Rect, orientation: Orientation, slot_count: usize) -> f32 {
        content_length(orientation.extent(area), slot_count, self.divider_thickness())
    }
}

/// Settings shared by every group under one container. Passed down
/// explicitly to each nested group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerContext {
    divider_thickness: f32,
}

impl ContainerContext {
    pub fn new(divider_thickness: f32) -> Self {
        let divider_thickness = if divider_thickness.is_finite() && divider_thickness >= 0.0 {
            divider_thickness
        } else {
            log::warn!(
                "invalid divider thickness {}, using {}",
                divider_thickness,
                DEFAULT_DIVIDER_THICKNESS
            );
            DEFAULT_DIVIDER_THICKNESS
        };
        Self { divider_thickness }
    }
}

impl Default for ContainerContext {
    fn default() -> Self {
        Self::new(DEFAULT_DIVIDER_THICKNESS)
    }
}

impl GeometryProvider for ContainerContext {
    fn divider_thickness(&self) -> f32 {
        self.divider_thickness
    }
}

/// `extent - (n - 1) * thickness`, never negative. With no panels the whole
/// extent is content.
pub fn content_length(extent: f32, slot_count: usize, divider_thickness: f32) -> f32 {
    let dividers = slot_count.saturating_sub(1) as f32;
    let length = extent - dividers * divider_thickness;
    if length.is_finite() {
        length.max(0.0)
    } else {
        0.0
    }
}
