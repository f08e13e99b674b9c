// Divider drag coordinator
// Owns the single pointer-capture slot shared by every panel group in a
// container, the floating drag indicator, and bounded position tracking.


use std::fmt;

use splitter_core::{CursorHint, Orientation, PointerEvent, Rect, Vec2};
use thiserror::Error;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DragError {
    /// Another divider drag already holds the pointer capture.
    #[error("a divider drag is already in progress")]
    SessionActive,

    #[error("invalid drag limits [{start}, {end}]")]
    InvalidLimits { start: f32, end: f32 },
}

// ──────────────────────────────────────────────
// Indicator
// ──────────────────────────────────────────────

/// Floating strip that follows the pointer while a divider is dragged, so the
/// panels themselves only re-layout once on release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragIndicator {
    pub rect: Rect,
    pub visible: bool,
    pub cursor: CursorHint,
}

// ──────────────────────────────────────────────
// Session
// ──────────────────────────────────────────────

/// What a pointer event did to the active session.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent<R> {
    /// No session, or the event fell outside the session's limits.
    Ignored,
    /// The tracked position moved to this axis coordinate.
    Tracked(f32),
    /// The pointer was released; carries the completion's return value.
    Completed(R),
    /// The session was abandoned without completing.
    Cancelled,
}

struct DragSession<R> {
    divider: Rect,
    axis: Orientation,
    limit_start: f32,
    limit_end: f32,
    /// Last in-bounds axis coordinate of the pointer.
    tracked: f32,
    on_complete: Box<dyn FnOnce(f32) -> R>,
}

impl<R> DragSession<R> {
    fn in_bounds(&self, coord: f32) -> bool {
        coord >= self.limit_start && coord <= self.limit_end
    }

    /// Indicator geometry: the divider's rect, centred on `coord` along the axis.
    fn indicator_rect(&self, coord: f32) -> Rect {
        let mut rect = self.divider;
        match self.axis {
            Orientation::Horizontal => rect.x = coord - rect.width / 2.0,
            Orientation::Vertical => rect.y = coord - rect.height / 2.0,
        }
        rect
    }
}

// ──────────────────────────────────────────────
// DragCoordinator
// ──────────────────────────────────────────────

/// Shared divider-drag service.
///
/// At most one session is active at a time. While it is, the coordinator
/// observes every pointer move and release regardless of which panel the
/// pointer is over. `R` is whatever the completion function produces.
pub struct DragCoordinator<R = ()> {
    session: Option<DragSession<R>>,
    indicator: Option<DragIndicator>,
}

impl<R> DragCoordinator<R> {
    /// A coordinator with its indicator mounted.
    pub fn new() -> Self {
        Self {
            session: None,
            indicator: Some(DragIndicator::default()),
        }
    }

    /// A coordinator with no indicator yet; visual feedback is skipped until
    /// [`mount_indicator`](Self::mount_indicator) is called.
    pub fn without_indicator() -> Self {
        Self {
            session: None,
            indicator: None,
        }
    }

    pub fn mount_indicator(&mut self) {
        if self.indicator.is_none() {
            self.indicator = Some(DragIndicator::default());
        }
    }

    pub fn unmount_indicator(&mut self) {
        self.indicator = None;
    }

    pub fn indicator(&self) -> Option<&DragIndicator> {
        self.indicator.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Last in-bounds axis coordinate of the active session.
    pub fn tracked_position(&self) -> Option<f32> {
        self.session.as_ref().map(|s| s.tracked)
    }

    /// Axis of the active session.
    pub fn axis(&self) -> Option<Orientation> {
        self.session.as_ref().map(|s| s.axis)
    }

    /// Start dragging a divider.
    ///
    /// `divider` is the divider's screen rect, `axis` the layout axis of its
    /// group, and `[limit_start, limit_end]` the admissible pointer range along
    /// that axis. `on_complete` runs exactly once, on release, with the last
    /// tracked coordinate.
    pub fn start_session<F>(
        &mut self,
        divider: Rect,
        axis: Orientation,
        limit_start: f32,
        limit_end: f32,
        on_complete: F,
    ) -> Result<(), DragError>
    where
        F: FnOnce(f32) -> R + 'static,
    {
        if self.session.is_some() {
            log::warn!("start_session: rejected, a drag is already active");
            return Err(DragError::SessionActive);
        }
        if !limit_start.is_finite() || !limit_end.is_finite() || limit_start > limit_end {
            return Err(DragError::InvalidLimits {
                start: limit_start,
                end: limit_end,
            });
        }

        let session = DragSession {
            divider,
            axis,
            limit_start,
            limit_end,
            tracked: axis.origin(divider) + axis.extent(divider) / 2.0,
            on_complete: Box::new(on_complete),
        };

        if let Some(indicator) = self.indicator.as_mut() {
            indicator.rect = divider;
            indicator.visible = true;
            indicator.cursor = axis.resize_cursor();
        }

        log::debug!(
            "drag started: axis={:?} limits=[{:.1}, {:.1}] at {:.1}",
            axis,
            limit_start,
            limit_end,
            session.tracked
        );
        self.session = Some(session);
        Ok(())
    }

    /// Track a pointer move. Positions outside the limits are ignored and
    /// leave both the tracked position and the indicator where they were.
    pub fn pointer_move(&mut self, position: Vec2) -> DragEvent<R> {
        let Some(session) = self.session.as_mut() else {
            return DragEvent::Ignored;
        };

        let coord = session.axis.coord(position);
        if !session.in_bounds(coord) {
            return DragEvent::Ignored;
        }

        session.tracked = coord;
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.rect = session.indicator_rect(coord);
            indicator.visible = true;
            indicator.cursor = session.axis.resize_cursor();
        }
        DragEvent::Tracked(coord)
    }

    /// Finish the session: release the capture, hide the indicator and hand
    /// the last tracked coordinate to the completion function. The release
    /// position itself is not used.
    pub fn pointer_up(&mut self, _position: Vec2) -> DragEvent<R> {
        let Some(session) = self.session.take() else {
            return DragEvent::Ignored;
        };

        self.hide_indicator();
        log::debug!("drag finished at {:.1}", session.tracked);
        DragEvent::Completed((session.on_complete)(session.tracked))
    }

    /// Abandon the session without calling its completion function.
    /// Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        if self.session.take().is_none() {
            return false;
        }
        self.hide_indicator();
        log::debug!("drag cancelled");
        true
    }

    /// Route a pointer event to the active session.
    ///
    /// Presses are never consumed here; starting a session is the host's call.
    pub fn handle(&mut self, event: PointerEvent) -> DragEvent<R> {
        match event {
            PointerEvent::Down(_) => DragEvent::Ignored,
            PointerEvent::Move(position) => self.pointer_move(position),
            PointerEvent::Up(position) => self.pointer_up(position),
            PointerEvent::Leave | PointerEvent::Blur => {
                if self.cancel() {
                    DragEvent::Cancelled
                } else {
                    DragEvent::Ignored
                }
            }
        }
    }

    fn hide_indicator(&mut self) {
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.visible = false;
            indicator.cursor = CursorHint::Default;
        }
    }
}

impl<R> Default for DragCoordinator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for DragCoordinator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragCoordinator")
            .field("active", &self.session.is_some())
            .field("tracked", &self.tracked_position())
            .field("indicator", &self.indicator)
            .finish()
    }
}
