// Panel group layout engine
// Owns the ordered slots of one group and their percentage shares:
// validation, rebalancing on child changes, size computation and drag commits.

mod error;
mod reconcile;

use splitter_core::{Orientation, PanelId, Rect};

pub use error::LayoutError;
pub use reconcile::reconcile;

// ──────────────────────────────────────────────
// Constants
// ──────────────────────────────────────────────

/// Nominal sum of all shares in a group.
pub const SHARE_TOTAL: f32 = 100.0;

/// Accepted band for the sum of shares. Absorbs floating-point drift.
pub const SHARE_SUM_MIN: f32 = 99.0;
pub const SHARE_SUM_MAX: f32 = 101.0;

/// Rounding noise tolerated when a drag empties one side of a divider.
const SHARE_EPSILON: f32 = 1e-3;

// ──────────────────────────────────────────────
// Children and slots
// ──────────────────────────────────────────────

/// A child handed to a group by the embedding application.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelChild<T> {
    pub id: PanelId,
    pub content: T,
}

impl<T> PanelChild<T> {
    pub fn new(id: PanelId, content: T) -> Self {
        Self { id, content }
    }
}

/// One region of a group: identity, share of the content length, and the
/// caller's payload (never inspected here).
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<T> {
    pub(crate) id: PanelId,
    pub(crate) share: f32,
    pub(crate) content: T,
}

impl<T> Slot<T> {
    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn share(&self) -> f32 {
        self.share
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut T {
        &mut self.content
    }
}

/// A divider between two adjacent slots, as positioned by [`PanelGroup::compute_rects`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divider {
    pub left: PanelId,
    pub right: PanelId,
    pub rect: Rect,
}

/// Result of laying a group out inside a rectangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupRects {
    pub panels: Vec<(PanelId, Rect)>,
    pub dividers: Vec<Divider>,
}

// ──────────────────────────────────────────────
// PanelGroup
// ──────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PanelGroup<T> {
    orientation: Orientation,
    slots: Vec<Slot<T>>,
}

impl<T> PanelGroup<T> {
    /// Build a group from its initial children.
    ///
    /// With `shares`, every entry must be non-negative, there must be one per
    /// child and they must add up to 100 (±1). Without, children split the
    /// space equally.
    pub fn new(
        orientation: Orientation,
        children: Vec<PanelChild<T>>,
        shares: Option<&[f32]>,
    ) -> Result<Self, LayoutError> {
        reconcile::ensure_unique_ids(&children)?;

        let shares = match shares {
            Some(shares) => {
                validate_shares(shares, children.len())?;
                shares.to_vec()
            }
            None => equal_shares(children.len()),
        };

        let slots = children
            .into_iter()
            .zip(shares)
            .map(|(child, share)| Slot {
                id: child.id,
                share,
                content: child.content,
            })
            .collect();

        Ok(Self { orientation, slots })
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot<T>> {
        self.slots.iter()
    }

    /// Panel ids in layout order.
    pub fn ids(&self) -> Vec<PanelId> {
        self.slots.iter().map(|s| s.id).collect()
    }

    /// Shares in layout order.
    pub fn shares(&self) -> Vec<f32> {
        self.slots.iter().map(|s| s.share).collect()
    }

    pub fn share(&self, id: PanelId) -> Option<f32> {
        self.slot(id).map(|s| s.share)
    }

    pub fn share_sum(&self) -> f32 {
        self.slots.iter().map(|s| s.share).sum()
    }

    pub fn slot(&self, id: PanelId) -> Option<&Slot<T>> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn content(&self, id: PanelId) -> Option<&T> {
        self.slot(id).map(|s| &s.content)
    }

    pub fn content_mut(&mut self, id: PanelId) -> Option<&mut T> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| &mut s.content)
    }

    pub fn position(&self, id: PanelId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    /// The panel on the far side of the divider that follows `id`, if any.
    pub fn pair_after(&self, id: PanelId) -> Option<PanelId> {
        let idx = self.position(id)?;
        self.slots.get(idx + 1).map(|s| s.id)
    }

    /// Reset every share to `100 / n`.
    pub fn equalize(&mut self) {
        let shares = equal_shares(self.slots.len());
        for (slot, share) in self.slots.iter_mut().zip(shares) {
            slot.share = share;
        }
    }

    /// Replace the children, rebalancing shares for added and removed panels.
    /// On error the group is left untouched.
    pub fn reconcile(&mut self, children: Vec<PanelChild<T>>) -> Result<(), LayoutError> {
        self.slots = reconcile::reconcile(&self.slots, children)?;
        Ok(())
    }

    /// Pixel size of every slot along the layout axis.
    pub fn compute_sizes(&self, content_length: f32) -> Vec<(PanelId, f32)> {
        let length = sanitize_length(content_length);
        self.slots
            .iter()
            .map(|s| (s.id, s.share / SHARE_TOTAL * length))
            .collect()
    }

    /// Position every slot and divider inside `area`.
    ///
    /// Slots are laid out in order along the axis, each sized from its share
    /// of `content_length`, with a `divider_thickness` strip between adjacent
    /// slots. The cross axis always spans the whole of `area`.
    pub fn compute_rects(&self, area: Rect, content_length: f32, divider_thickness: f32) -> GroupRects {
        let thickness = divider_thickness.max(0.0);
        let mut out = GroupRects::default();
        let mut offset = self.orientation.origin(area);

        let sizes = self.compute_sizes(content_length);
        let count = sizes.len();
        for (idx, (id, size)) in sizes.into_iter().enumerate() {
            out.panels.push((id, along_axis(area, self.orientation, offset, size)));
            offset += size;

            if idx + 1 < count {
                out.dividers.push(Divider {
                    left: id,
                    right: self.slots[idx + 1].id,
                    rect: along_axis(area, self.orientation, offset, thickness),
                });
                offset += thickness;
            }
        }
        out
    }

    /// Commit a finished divider drag.
    ///
    /// `left` takes `new_left_share` and `right` absorbs the difference so the
    /// pair's combined share is unchanged. No other slot moves. Clamping the
    /// value is the caller's job; a result that would make either side
    /// negative is rejected.
    pub fn apply_drag(
        &mut self,
        left: PanelId,
        right: PanelId,
        new_left_share: f32,
    ) -> Result<(), LayoutError> {
        let li = self.position(left).ok_or(LayoutError::UnknownPanel(left))?;
        let ri = self.position(right).ok_or(LayoutError::UnknownPanel(right))?;
        if ri != li + 1 {
            return Err(LayoutError::NotAdjacent { left, right });
        }

        if !new_left_share.is_finite() || new_left_share < 0.0 {
            return Err(LayoutError::NegativeShare {
                index: li,
                value: new_left_share,
            });
        }

        let old_left = self.slots[li].share;
        let mut new_right = self.slots[ri].share + old_left - new_left_share;
        if new_right < 0.0 && new_right > -SHARE_EPSILON {
            new_right = 0.0;
        }
        if new_right < 0.0 {
            return Err(LayoutError::NegativeShare {
                index: ri,
                value: new_right,
            });
        }

        log::trace!(
            "apply_drag: {} {:.3} -> {:.3}, {} -> {:.3}",
            left,
            old_left,
            new_left_share,
            right,
            new_right
        );

        self.slots[li].share = new_left_share;
        self.slots[ri].share = new_right;
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

/// Check caller-supplied shares against a child count.
pub fn validate_shares(shares: &[f32], expected: usize) -> Result<(), LayoutError> {
    if shares.len() != expected {
        return Err(LayoutError::ShareCountMismatch {
            expected,
            actual: shares.len(),
        });
    }

    // An empty group has nothing to share out.
    if shares.is_empty() {
        return Ok(());
    }

    let sum: f32 = shares.iter().sum();
    if !(SHARE_SUM_MIN..=SHARE_SUM_MAX).contains(&sum) {
        return Err(LayoutError::ShareSumInvalid { sum });
    }

    // A NaN or infinite entry already fails the sum check above.
    if let Some((index, &value)) = shares.iter().enumerate().find(|(_, v)| **v < 0.0) {
        return Err(LayoutError::NegativeShare { index, value });
    }

    Ok(())
}

/// `100 / n` for each of `n` panels.
pub fn equal_shares(count: usize) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    vec![SHARE_TOTAL / count as f32; count]
}

/// Whether a set of shares satisfies the group invariant.
pub fn shares_valid(shares: &[f32]) -> bool {
    shares.is_empty() || validate_shares(shares, shares.len()).is_ok()
}

fn sanitize_length(length: f32) -> f32 {
    if length.is_finite() {
        length.max(0.0)
    } else {
        0.0
    }
}

/// A strip of `area` starting at `offset` along `orientation` with the given axis size.
fn along_axis(area: Rect, orientation: Orientation, offset: f32, size: f32) -> Rect {
    match orientation {
        Orientation::Horizontal => Rect::new(offset, area.y, size, area.height),
        Orientation::Vertical => Rect::new(area.x, offset, area.width, size),
    }
}
