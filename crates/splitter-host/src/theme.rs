// Chrome defaults: divider strip and drag indicator.

use splitter_core::Color;

// Layout
pub const DEFAULT_DIVIDER_THICKNESS: f32 = 10.0; // px between adjacent panels
pub const DEFAULT_TRANSITION_MS: u64 = 250; // size transition hint for panels

// Colors
pub const DIVIDER_COLOR: Color = Color::new(0.18, 0.18, 0.24, 1.0);
pub const INDICATOR_COLOR: Color = Color::new(0.35, 0.58, 1.0, 0.7); // translucent accent
