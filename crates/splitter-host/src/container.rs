use std::time::Duration;

use splitter_core::{CursorHint, Orientation, PanelId, PointerEvent, Rect, Renderer, Size, Vec2};
use splitter_input::{DragCoordinator, DragEvent, DragIndicator};
use splitter_layout::{LayoutError, PanelChild, PanelGroup, SHARE_TOTAL};

use crate::geometry::{ContainerContext, GeometryProvider};
use crate::settings::Settings;
use crate::HostError;

/// Ids of the nested-group panels leading from the root group to a group.
/// The root group is the empty path.
pub type GroupPath = Vec<PanelId>;

// ──────────────────────────────────────────────
// Tree nodes
// ──────────────────────────────────────────────

/// What a slot holds: application content or another group.
#[derive(Debug, Clone)]
pub enum PanelNode<T> {
    Leaf(T),
    Group(GroupNode<T>),
}

impl<T> PanelNode<T> {
    pub fn leaf(content: T) -> Self {
        PanelNode::Leaf(content)
    }

    /// A nested group. Shares are validated right away.
    pub fn group(
        orientation: Orientation,
        children: Vec<PanelChild<PanelNode<T>>>,
        shares: Option<&[f32]>,
    ) -> Result<Self, LayoutError> {
        Ok(PanelNode::Group(GroupNode::new(orientation, children, shares)?))
    }

    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            PanelNode::Leaf(content) => Some(content),
            PanelNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupNode<T>> {
        match self {
            PanelNode::Group(group) => Some(group),
            PanelNode::Leaf(_) => None,
        }
    }
}

/// A panel group plus the geometry measured for it.
#[derive(Debug, Clone)]
pub struct GroupNode<T> {
    panels: PanelGroup<PanelNode<T>>,
    /// Unset until the group is first measured.
    content_length: Option<f32>,
    rect: Option<Rect>,
}

impl<T> GroupNode<T> {
    pub fn new(
        orientation: Orientation,
        children: Vec<PanelChild<PanelNode<T>>>,
        shares: Option<&[f32]>,
    ) -> Result<Self, LayoutError> {
        Ok(Self {
            panels: PanelGroup::new(orientation, children, shares)?,
            content_length: None,
            rect: None,
        })
    }

    pub fn panels(&self) -> &PanelGroup<PanelNode<T>> {
        &self.panels
    }

    pub fn orientation(&self) -> Orientation {
        self.panels.orientation()
    }

    pub fn content_length(&self) -> Option<f32> {
        self.content_length
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn is_mounted(&self) -> bool {
        self.content_length.is_some()
    }

    /// Measure this group inside `rect` and every nested group below it.
    /// Calling it again with the same inputs changes nothing.
    fn measure(&mut self, rect: Rect, ctx: &ContainerContext) {
        let orientation = self.panels.orientation();
        let length = ctx.content_length(rect, orientation, self.panels.len());
        log::trace!(
            "measure: {:?} group of {} in {:?} -> content length {:.1}",
            orientation,
            self.panels.len(),
            rect,
            length
        );
        self.rect = Some(rect);
        self.content_length = Some(length);

        let rects = self
            .panels
            .compute_rects(rect, length, ctx.divider_thickness());
        for (id, child_rect) in rects.panels {
            if let Some(PanelNode::Group(child)) = self.panels.content_mut(id) {
                child.measure(child_rect, ctx);
            }
        }
    }

    fn find(&self, path: &[PanelId]) -> Option<&GroupNode<T>> {
        match path.split_first() {
            None => Some(self),
            Some((id, rest)) => self.panels.content(*id)?.as_group()?.find(rest),
        }
    }

    fn find_mut(&mut self, path: &[PanelId]) -> Option<&mut GroupNode<T>> {
        match path.split_first() {
            None => Some(self),
            Some((id, rest)) => match self.panels.content_mut(*id)? {
                PanelNode::Group(group) => group.find_mut(rest),
                PanelNode::Leaf(_) => None,
            },
        }
    }

    fn max_id(&self) -> PanelId {
        self.panels
            .iter()
            .map(|slot| match slot.content() {
                PanelNode::Group(group) => slot.id().max(group.max_id()),
                PanelNode::Leaf(_) => slot.id(),
            })
            .max()
            .unwrap_or(0)
    }

    fn collect<'a>(
        &'a self,
        path: &mut GroupPath,
        ctx: &ContainerContext,
        transition: Duration,
        out: &mut HostLayout<'a, T>,
    ) {
        let (Some(rect), Some(length)) = (self.rect, self.content_length) else {
            return;
        };
        let orientation = self.panels.orientation();
        let rects = self
            .panels
            .compute_rects(rect, length, ctx.divider_thickness());

        for &(id, panel_rect) in &rects.panels {
            match self.panels.content(id) {
                Some(PanelNode::Leaf(content)) => out.panels.push(PlacedPanel {
                    path: path.clone(),
                    id,
                    rect: panel_rect,
                    transition,
                    content,
                }),
                Some(PanelNode::Group(group)) => {
                    path.push(id);
                    group.collect(path, ctx, transition, out);
                    path.pop();
                }
                None => {}
            }
        }

        for divider in &rects.dividers {
            let left_rect = rects
                .panels
                .iter()
                .find(|(id, _)| *id == divider.left)
                .map(|(_, r)| *r)
                .unwrap_or(divider.rect);
            out.dividers.push(PlacedDivider {
                path: path.clone(),
                left: divider.left,
                right: divider.right,
                rect: divider.rect,
                orientation,
                left_rect,
                group_rect: rect,
                content_length: length,
            });
        }
    }
}

// ──────────────────────────────────────────────
// Layout output
// ──────────────────────────────────────────────

/// A leaf panel positioned on screen.
#[derive(Debug, Clone)]
pub struct PlacedPanel<'a, T> {
    /// Group that holds the panel.
    pub path: GroupPath,
    pub id: PanelId,
    pub rect: Rect,
    /// Size transition hint for the embedding renderer.
    pub transition: Duration,
    pub content: &'a T,
}

/// A divider positioned on screen, with the geometry a drag needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedDivider {
    pub path: GroupPath,
    pub left: PanelId,
    pub right: PanelId,
    pub rect: Rect,
    pub orientation: Orientation,
    /// Rect of the panel immediately before the divider.
    pub left_rect: Rect,
    pub group_rect: Rect,
    pub content_length: f32,
}

#[derive(Debug, Clone)]
pub struct HostLayout<'a, T> {
    /// Leaf panels in document order.
    pub panels: Vec<PlacedPanel<'a, T>>,
    pub dividers: Vec<PlacedDivider>,
    pub indicator: Option<DragIndicator>,
}

impl<'a, T> HostLayout<'a, T> {
    fn empty() -> Self {
        Self {
            panels: Vec::new(),
            dividers: Vec::new(),
            indicator: None,
        }
    }

    pub fn panel(&self, path: &[PanelId], id: PanelId) -> Option<&PlacedPanel<'a, T>> {
        self.panels.iter().find(|p| p.id == id && p.path == path)
    }
}

/// Produced when a divider drag completes; applied to the named pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeRequest {
    pub path: GroupPath,
    pub left: PanelId,
    pub right: PanelId,
    /// New share for `left`, before clamping to the pair.
    pub share: f32,
}

// ──────────────────────────────────────────────
// PanelContainer
// ──────────────────────────────────────────────

/// Outermost panel container: owns the group tree, the shared drag
/// coordinator, and the viewport the tree is measured against.
pub struct PanelContainer<T> {
    root: GroupNode<T>,
    context: ContainerContext,
    settings: Settings,
    drag: DragCoordinator<ResizeRequest>,
    /// Group the active drag belongs to.
    drag_path: Option<GroupPath>,
    viewport: Option<Size>,
    hover: Option<Vec2>,
    next_id: PanelId,
}

impl<T> PanelContainer<T> {
    /// Build the tree. Invalid shares fail here, before anything is laid out.
    pub fn new(
        orientation: Orientation,
        children: Vec<PanelChild<PanelNode<T>>>,
        shares: Option<&[f32]>,
        mut settings: Settings,
    ) -> Result<Self, HostError> {
        let root = GroupNode::new(orientation, children, shares)?;
        let next_id = root.max_id() + 1;
        let context = ContainerContext::new(settings.divider_thickness);
        settings.divider_thickness = context.divider_thickness();
        Ok(Self {
            root,
            context,
            settings,
            drag: DragCoordinator::new(),
            drag_path: None,
            viewport: None,
            hover: None,
            next_id,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn context(&self) -> &ContainerContext {
        &self.context
    }

    pub fn root(&self) -> &GroupNode<T> {
        &self.root
    }

    pub fn group(&self, path: &[PanelId]) -> Option<&GroupNode<T>> {
        self.root.find(path)
    }

    /// Reset the group at `path` to equal shares and re-measure it.
    pub fn equalize(&mut self, path: &[PanelId]) -> Result<(), HostError> {
        let ctx = self.context;
        let group = self
            .root
            .find_mut(path)
            .ok_or_else(|| HostError::UnknownGroup(path.to_vec()))?;
        group.panels.equalize();
        if let Some(rect) = group.rect {
            group.measure(rect, &ctx);
        }
        self.cancel_drag_within(path);
        Ok(())
    }

    pub fn shares(&self, path: &[PanelId]) -> Option<Vec<f32>> {
        self.group(path).map(|g| g.panels.shares())
    }

    /// A panel id not used anywhere in the tree so far.
    pub fn alloc_id(&mut self) -> PanelId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    /// First measurement: the root group fills `viewport`.
    pub fn mount(&mut self, viewport: Size) {
        log::debug!("mount: {}x{}", viewport.width, viewport.height);
        self.viewport = Some(viewport);
        self.measure_all();
    }

    /// Viewport changed size: re-measure every group. An active drag was
    /// bounded by the old geometry and is cancelled.
    pub fn resize(&mut self, viewport: Size) {
        if self.viewport == Some(viewport) {
            return;
        }
        if self.drag.cancel() {
            log::debug!("resize: cancelled active drag");
        }
        log::debug!("resize: {}x{}", viewport.width, viewport.height);
        self.viewport = Some(viewport);
        self.measure_all();
    }

    fn measure_all(&mut self) {
        if let Some(viewport) = self.viewport {
            self.root.measure(Rect::from_size(viewport), &self.context);
        }
    }

    /// Replace the children of the group at `path`, rebalancing its shares.
    pub fn set_children(
        &mut self,
        path: &[PanelId],
        children: Vec<PanelChild<PanelNode<T>>>,
    ) -> Result<(), HostError> {
        let ctx = self.context;
        let group = self
            .root
            .find_mut(path)
            .ok_or_else(|| HostError::UnknownGroup(path.to_vec()))?;

        group.panels.reconcile(children)?;
        if let Some(rect) = group.rect {
            group.measure(rect, &ctx);
        }
        self.next_id = self.next_id.max(self.root.max_id() + 1);
        self.cancel_drag_within(path);
        Ok(())
    }

    /// Cancel the active drag if it belongs to the group at `path` or to a
    /// group nested inside it. Its limits and pixel scale are out of date.
    fn cancel_drag_within(&mut self, path: &[PanelId]) {
        if !self.drag.is_active() {
            return;
        }
        let affected = self
            .drag_path
            .as_deref()
            .is_some_and(|drag_path| drag_path.starts_with(path));
        if affected && self.drag.cancel() {
            log::debug!("cancelled drag on {:?}: group {:?} changed", self.drag_path, path);
            self.drag_path = None;
        }
    }

    /// Every placed leaf and divider. Empty until mounted.
    pub fn layout(&self) -> HostLayout<'_, T> {
        let mut out = HostLayout::empty();
        let mut path = GroupPath::new();
        self.root
            .collect(&mut path, &self.context, self.settings.transition(), &mut out);
        out.indicator = self.drag.indicator().copied();
        out
    }

    /// The divider under `position`, if any.
    pub fn divider_at(&self, position: Vec2) -> Option<PlacedDivider> {
        self.layout()
            .dividers
            .into_iter()
            .find(|d| d.rect.contains(position))
    }

    pub fn cursor_at(&self, position: Vec2) -> CursorHint {
        self.divider_at(position)
            .map(|d| d.orientation.resize_cursor())
            .unwrap_or_default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn indicator(&self) -> Option<&DragIndicator> {
        self.drag.indicator()
    }

    // ── Pointer input ───────────────────────────

    /// Press: start a drag if `position` is on a divider.
    ///
    /// The pointer may then travel from the start of the panel before the
    /// divider to the end of the group. Returns whether a drag started.
    pub fn pointer_down(&mut self, position: Vec2) -> Result<bool, HostError> {
        let Some(divider) = self.divider_at(position) else {
            return Ok(false);
        };

        let orientation = divider.orientation;
        let limit_start = orientation.origin(divider.left_rect);
        let limit_end = orientation.origin(divider.group_rect) + orientation.extent(divider.group_rect);

        let current_share = self
            .group(&divider.path)
            .and_then(|g| g.panels.share(divider.left))
            .unwrap_or(0.0);
        let half_thickness = self.context.divider_thickness() / 2.0;
        let child_offset = limit_start;
        let content_length = divider.content_length;
        let (path, left, right) = (divider.path.clone(), divider.left, divider.right);
        let drag_path = divider.path;

        self.drag.start_session(
            divider.rect,
            orientation,
            limit_start,
            limit_end,
            move |coord| {
                // Centre of the divider lands on the pointer
                let position = coord - half_thickness;
                let share = if content_length > 0.0 {
                    (position - child_offset) / content_length * SHARE_TOTAL
                } else {
                    current_share
                };
                ResizeRequest {
                    path,
                    left,
                    right,
                    share,
                }
            },
        )?;
        self.drag_path = Some(drag_path);
        Ok(true)
    }

    /// Move: feeds the active drag and tracks hover. Returns whether the drag
    /// position changed.
    pub fn pointer_move(&mut self, position: Vec2) -> bool {
        self.hover = Some(position);
        matches!(self.drag.pointer_move(position), DragEvent::Tracked(_))
    }

    /// Release: finish the active drag and commit the new shares.
    /// Returns whether the layout changed.
    pub fn pointer_up(&mut self, position: Vec2) -> bool {
        match self.drag.pointer_up(position) {
            DragEvent::Completed(request) => self.commit(request),
            _ => false,
        }
    }

    /// The pointer left the window; any drag is abandoned.
    pub fn pointer_leave(&mut self) -> bool {
        self.hover = None;
        self.drag.cancel()
    }

    /// The window lost focus; any drag is abandoned.
    pub fn blur(&mut self) -> bool {
        self.drag.cancel()
    }

    /// Dispatch a pointer event. Returns whether it was consumed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<bool, HostError> {
        match event {
            PointerEvent::Down(position) => self.pointer_down(position),
            PointerEvent::Move(position) => Ok(self.pointer_move(position)),
            PointerEvent::Up(position) => Ok(self.pointer_up(position)),
            PointerEvent::Leave => Ok(self.pointer_leave()),
            PointerEvent::Blur => Ok(self.blur()),
        }
    }

    fn commit(&mut self, request: ResizeRequest) -> bool {
        let ctx = self.context;
        let Some(group) = self.root.find_mut(&request.path) else {
            log::warn!("drag finished on a group that no longer exists: {:?}", request.path);
            return false;
        };

        let (Some(left), Some(right)) = (
            group.panels.share(request.left),
            group.panels.share(request.right),
        ) else {
            log::warn!(
                "drag finished on panels that no longer exist: {} / {}",
                request.left,
                request.right
            );
            return false;
        };

        let share = request.share.clamp(0.0, left + right);
        if let Err(e) = group.panels.apply_drag(request.left, request.right, share) {
            log::warn!("drag not applied: {}", e);
            return false;
        }

        if let Some(rect) = group.rect {
            group.measure(rect, &ctx);
        }
        true
    }

    // ── Rendering ───────────────────────────────

    fn current_cursor(&self) -> CursorHint {
        if let Some(axis) = self.drag.axis() {
            return axis.resize_cursor();
        }
        self.hover
            .map(|position| self.cursor_at(position))
            .unwrap_or_default()
    }

    /// Draw the dividers and the drag indicator, and set the cursor.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let Some(viewport) = self.viewport else {
            return;
        };

        renderer.begin_frame(viewport);
        let layout = self.layout();
        for divider in &layout.dividers {
            renderer.draw_rect(divider.rect, self.settings.colors.divider);
        }
        if let Some(indicator) = layout.indicator.filter(|i| i.visible) {
            renderer.draw_rect(indicator.rect, self.settings.colors.indicator);
        }
        renderer.set_cursor(self.current_cursor());
        renderer.end_frame();
    }
}
