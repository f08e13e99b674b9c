use std::collections::{HashMap, HashSet};

use splitter_core::PanelId;

use crate::{equal_shares, LayoutError, PanelChild, Slot, SHARE_TOTAL};

// ──────────────────────────────────────────────
// Reconciliation: previous slots vs. next children
// ──────────────────────────────────────────────

/// Rebuild a group's slots for a new set of children.
///
/// Shares are carried over by panel id and rebalanced for the panels that
/// appeared or disappeared:
/// - no children: empty group
/// - one child: it takes the whole group (100)
/// - growing from zero or one panel: equal shares
/// - same count, same ids: shares follow ids (reordering is free)
/// - same count, every id replaced: shares stay with their positions
/// - otherwise removed shares are handed back to the survivors in proportion
///   to their size, then every survivor gives up an equal slice to make room
///   for `100 / n` per new panel
///
/// The result is in `children` order.
pub fn reconcile<T>(
    previous: &[Slot<T>],
    children: Vec<PanelChild<T>>,
) -> Result<Vec<Slot<T>>, LayoutError> {
    ensure_unique_ids(&children)?;

    let prev_count = previous.len();
    let next_count = children.len();

    if next_count == 0 {
        log::debug!("reconcile: {} -> 0 panels", prev_count);
        return Ok(Vec::new());
    }

    if next_count == 1 {
        log::debug!("reconcile: {} -> 1 panel, collapsing", prev_count);
        return Ok(with_shares(children, vec![SHARE_TOTAL]));
    }

    if prev_count <= 1 {
        log::debug!("reconcile: {} -> {} panels, equal shares", prev_count, next_count);
        return Ok(with_shares(children, equal_shares(next_count)));
    }

    let previous_shares: HashMap<PanelId, f32> =
        previous.iter().map(|s| (s.id, s.share)).collect();

    if prev_count == next_count && children.iter().all(|c| previous_shares.contains_key(&c.id)) {
        let shares = children.iter().map(|c| previous_shares[&c.id]).collect();
        return Ok(with_shares(children, shares));
    }

    // Survivors in their previous order.
    let next_ids: HashSet<PanelId> = children.iter().map(|c| c.id).collect();
    let mut survivors: Vec<(PanelId, f32)> = previous
        .iter()
        .filter(|s| next_ids.contains(&s.id))
        .map(|s| (s.id, s.share))
        .collect();

    if survivors.is_empty() && prev_count == next_count {
        log::debug!("reconcile: {} panels all replaced, shares kept in place", next_count);
        let shares = previous.iter().map(|s| s.share).collect();
        return Ok(with_shares(children, shares));
    }

    if survivors.is_empty() {
        log::debug!(
            "reconcile: {} -> {} panels, no survivors, equal shares",
            prev_count,
            next_count
        );
        return Ok(with_shares(children, equal_shares(next_count)));
    }

    let removed = prev_count - survivors.len();
    let added = next_count - survivors.len();
    log::debug!(
        "reconcile: {} -> {} panels ({} removed, {} added)",
        prev_count,
        next_count,
        removed,
        added
    );

    if removed > 0 {
        reclaim(&mut survivors);
    }
    let flat_ratio = SHARE_TOTAL / next_count as f32;
    if added > 0 {
        make_room(&mut survivors, flat_ratio * added as f32);
    }

    let rebalanced: HashMap<PanelId, f32> = survivors.into_iter().collect();
    let shares = children
        .iter()
        .map(|c| rebalanced.get(&c.id).copied().unwrap_or(flat_ratio))
        .collect();
    Ok(with_shares(children, shares))
}

/// Reject child lists where two children share an id.
pub(crate) fn ensure_unique_ids<T>(children: &[PanelChild<T>]) -> Result<(), LayoutError> {
    let mut seen = HashSet::with_capacity(children.len());
    for child in children {
        if !seen.insert(child.id) {
            return Err(LayoutError::DuplicatePanelId(child.id));
        }
    }
    Ok(())
}

/// Scale the survivors back up to 100, each in proportion to its current share.
fn reclaim(survivors: &mut [(PanelId, f32)]) {
    let sum: f32 = survivors.iter().map(|(_, s)| *s).sum();
    if sum <= 0.0 {
        let share = SHARE_TOTAL / survivors.len() as f32;
        for (_, s) in survivors.iter_mut() {
            *s = share;
        }
        return;
    }
    let factor = SHARE_TOTAL / sum;
    for (_, s) in survivors.iter_mut() {
        *s *= factor;
    }
}

/// Free up `needed` share across the survivors.
///
/// Every survivor gives up the same amount. If that would leave any of them
/// negative, they shrink proportionally instead.
fn make_room(survivors: &mut [(PanelId, f32)], needed: f32) {
    let slice = needed / survivors.len() as f32;
    if survivors.iter().all(|(_, s)| *s - slice >= 0.0) {
        for (_, s) in survivors.iter_mut() {
            *s -= slice;
        }
        return;
    }

    let sum: f32 = survivors.iter().map(|(_, s)| *s).sum();
    let remaining = (sum - needed).max(0.0);
    if sum <= 0.0 {
        let share = remaining / survivors.len() as f32;
        for (_, s) in survivors.iter_mut() {
            *s = share;
        }
        return;
    }
    let factor = remaining / sum;
    for (_, s) in survivors.iter_mut() {
        *s *= factor;
    }
}

fn with_shares<T>(children: Vec<PanelChild<T>>, shares: Vec<f32>) -> Vec<Slot<T>> {
    children
        .into_iter()
        .zip(shares)
        .map(|(child, share)| Slot {
            id: child.id,
            share,
            content: child.content,
        })
        .collect()
}
