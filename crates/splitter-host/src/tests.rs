#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::geometry::GeometryProvider;
    use crate::settings::{load_settings_from, save_settings_to, settings_path, Settings};
    use crate::{
        CursorHint, HostError, LayoutError, Orientation, PanelChild, PanelContainer, PanelNode,
        PointerEvent, Rect, Renderer, Size, Vec2,
    };
    use splitter_core::Color;
    use splitter_input::DragError;

    const VIEWPORT: Size = Size {
        width: 490.0,
        height: 410.0,
    };

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    fn rect_approx_eq(a: &Rect, b: &Rect) -> bool {
        approx_eq(a.x, b.x)
            && approx_eq(a.y, b.y)
            && approx_eq(a.width, b.width)
            && approx_eq(a.height, b.height)
    }

    fn leaf(id: u64) -> PanelChild<PanelNode<&'static str>> {
        PanelChild::new(id, PanelNode::leaf("leaf"))
    }

    fn two_panels(shares: Option<&[f32]>) -> PanelContainer<&'static str> {
        PanelContainer::new(
            Orientation::Horizontal,
            vec![leaf(1), leaf(2)],
            shares,
            Settings::default(),
        )
        .unwrap()
    }

    /// Root: [1 | 2], where 2 is a vertical group [3 / 4].
    fn nested() -> PanelContainer<&'static str> {
        let column = PanelNode::group(Orientation::Vertical, vec![leaf(3), leaf(4)], None).unwrap();
        let mut container = PanelContainer::new(
            Orientation::Horizontal,
            vec![leaf(1), PanelChild::new(2, column)],
            None,
            Settings::default(),
        )
        .unwrap();
        container.mount(VIEWPORT);
        container
    }

    #[derive(Default)]
    struct RecordingRenderer {
        frames: usize,
        rects: Vec<(Rect, Color)>,
        cursor: Option<CursorHint>,
    }

    impl Renderer for RecordingRenderer {
        fn begin_frame(&mut self, _size: Size) {
            self.rects.clear();
        }

        fn draw_rect(&mut self, rect: Rect, color: Color) {
            self.rects.push((rect, color));
        }

        fn set_cursor(&mut self, cursor: CursorHint) {
            self.cursor = Some(cursor);
        }

        fn end_frame(&mut self) {
            self.frames += 1;
        }
    }

    // ──────────────────────────────────────────
    // Construction and measurement
    // ──────────────────────────────────────────

    #[test]
    fn test_unmounted_container_lays_out_nothing() {
        let container = two_panels(None);
        assert!(!container.is_mounted());
        assert_eq!(container.root().content_length(), None);
        let layout = container.layout();
        assert!(layout.panels.is_empty());
        assert!(layout.dividers.is_empty());
    }

    #[test]
    fn test_mount_measures_content_length() {
        init_logging();
        let mut container = two_panels(None);
        container.mount(VIEWPORT);
        assert_eq!(container.root().content_length(), Some(480.0));

        let layout = container.layout();
        assert_eq!(layout.panels.len(), 2);
        assert!(rect_approx_eq(&layout.panels[0].rect, &Rect::new(0.0, 0.0, 240.0, 410.0)));
        assert!(rect_approx_eq(&layout.panels[1].rect, &Rect::new(250.0, 0.0, 240.0, 410.0)));
        assert_eq!(layout.dividers.len(), 1);
        assert!(rect_approx_eq(&layout.dividers[0].rect, &Rect::new(240.0, 0.0, 10.0, 410.0)));
    }

    #[test]
    fn test_construction_errors_are_eager() {
        let err = PanelContainer::new(
            Orientation::Horizontal,
            vec![leaf(1), leaf(2)],
            Some(&[40.0, 40.0, 10.0]),
            Settings::default(),
        )
        .err()
        .unwrap();
        assert_eq!(
            err,
            HostError::Layout(LayoutError::ShareCountMismatch { expected: 2, actual: 3 })
        );
    }

    #[test]
    fn test_nested_group_errors_surface() {
        let err = PanelNode::<&str>::group(Orientation::Vertical, vec![leaf(3), leaf(4)], Some(&[10.0, 10.0]))
            .err()
            .unwrap();
        assert!(matches!(err, LayoutError::ShareSumInvalid { .. }));
    }

    #[test]
    fn test_resize_remeasures_every_group() {
        let mut container = nested();
        container.resize(Size::new(990.0, 810.0));

        assert_eq!(container.root().content_length(), Some(980.0));
        assert_eq!(container.group(&[2]).unwrap().content_length(), Some(800.0));

        let layout = container.layout();
        let p4 = layout.panel(&[2], 4).unwrap();
        assert!(rect_approx_eq(&p4.rect, &Rect::new(500.0, 410.0, 490.0, 400.0)));
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut container = nested();
        let before: Vec<Rect> = container.layout().panels.iter().map(|p| p.rect).collect();
        container.resize(VIEWPORT);
        container.resize(VIEWPORT);
        let after: Vec<Rect> = container.layout().panels.iter().map(|p| p.rect).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_nested_layout_in_document_order() {
        let container = nested();
        let layout = container.layout();

        let ids: Vec<u64> = layout.panels.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);

        let p3 = layout.panel(&[2], 3).unwrap();
        assert!(rect_approx_eq(&p3.rect, &Rect::new(250.0, 0.0, 240.0, 200.0)));
        let p4 = layout.panel(&[2], 4).unwrap();
        assert!(rect_approx_eq(&p4.rect, &Rect::new(250.0, 210.0, 240.0, 200.0)));

        assert_eq!(layout.dividers.len(), 2);
        assert_eq!(layout.panels[0].transition, Duration::from_millis(250));
    }

    #[test]
    fn test_custom_divider_thickness_propagates() {
        let settings = Settings {
            divider_thickness: 4.0,
            ..Settings::default()
        };
        let column = PanelNode::group(Orientation::Vertical, vec![leaf(3), leaf(4)], None).unwrap();
        let mut container = PanelContainer::new(
            Orientation::Horizontal,
            vec![leaf(1), PanelChild::new(2, column)],
            None,
            settings,
        )
        .unwrap();
        container.mount(Size::new(404.0, 204.0));

        assert_eq!(container.root().content_length(), Some(400.0));
        assert_eq!(container.group(&[2]).unwrap().content_length(), Some(200.0));
    }

    #[test]
    fn test_invalid_thickness_is_replaced_in_settings() {
        let settings = Settings {
            divider_thickness: -3.0,
            ..Settings::default()
        };
        let container = PanelContainer::new(
            Orientation::Horizontal,
            vec![leaf(1), leaf(2)],
            None,
            settings,
        )
        .unwrap();
        assert_eq!(container.settings().divider_thickness, 10.0);
        assert_eq!(container.context().divider_thickness(), 10.0);
    }

    #[test]
    fn test_node_accessors() {
        let container = nested();
        assert_eq!(container.viewport(), Some(VIEWPORT));

        let root = container.root().panels();
        assert_eq!(root.content(1).and_then(PanelNode::as_leaf), Some(&"leaf"));
        assert!(root.content(1).and_then(PanelNode::as_group).is_none());

        let column = root.content(2).and_then(PanelNode::as_group).unwrap();
        assert_eq!(column.orientation(), Orientation::Vertical);
        assert!(column.is_mounted());
        assert!(root.content(2).and_then(PanelNode::as_leaf).is_none());
    }

    #[test]
    fn test_alloc_id_skips_existing_ids() {
        let mut container = nested();
        assert_eq!(container.alloc_id(), 5);
        container.set_children(&[], vec![leaf(1), leaf(40)]).unwrap();
        assert_eq!(container.alloc_id(), 41);
    }

    // ──────────────────────────────────────────
    // Children changes
    // ──────────────────────────────────────────

    #[test]
    fn test_set_children_rebalances_and_remeasures() {
        let mut container = two_panels(Some(&[30.0, 70.0]));
        container.mount(VIEWPORT);
        container
            .set_children(&[], vec![leaf(1), leaf(2), leaf(3)])
            .unwrap();

        let shares = container.shares(&[]).unwrap();
        let flat = 100.0 / 3.0;
        assert!(approx_eq(shares[0], 30.0 - flat / 2.0));
        assert!(approx_eq(shares[1], 70.0 - flat / 2.0));
        assert!(approx_eq(shares[2], flat));
        assert_eq!(container.root().content_length(), Some(470.0));
        assert_eq!(container.layout().dividers.len(), 2);
    }

    #[test]
    fn test_set_children_on_nested_group() {
        let mut container = nested();
        container.set_children(&[2], vec![leaf(4)]).unwrap();
        assert_eq!(container.shares(&[2]).unwrap(), vec![100.0]);
        assert_eq!(container.group(&[2]).unwrap().content_length(), Some(410.0));
    }

    #[test]
    fn test_equalize_remeasures_nested_groups() {
        let column = PanelNode::group(Orientation::Vertical, vec![leaf(3), leaf(4)], None).unwrap();
        let mut container = PanelContainer::new(
            Orientation::Horizontal,
            vec![leaf(1), PanelChild::new(2, column)],
            Some(&[25.0, 75.0]),
            Settings::default(),
        )
        .unwrap();
        container.mount(VIEWPORT);
        assert!(approx_eq(container.group(&[2]).unwrap().rect().unwrap().x, 130.0));

        container.equalize(&[]).unwrap();
        assert_eq!(container.shares(&[]).unwrap(), vec![50.0, 50.0]);
        assert!(approx_eq(container.group(&[2]).unwrap().rect().unwrap().x, 250.0));
        assert_eq!(
            container.equalize(&[9]).unwrap_err(),
            HostError::UnknownGroup(vec![9])
        );
    }

    #[test]
    fn test_set_children_unknown_group() {
        let mut container = nested();
        assert_eq!(
            container.set_children(&[1], vec![leaf(9)]).unwrap_err(),
            HostError::UnknownGroup(vec![1])
        );
        assert_eq!(
            container.set_children(&[77], vec![leaf(9)]).unwrap_err(),
            HostError::UnknownGroup(vec![77])
        );
    }

    #[test]
    fn test_set_children_duplicate_ids_leave_tree_alone() {
        let mut container = nested();
        let err = container
            .set_children(&[], vec![leaf(1), leaf(1)])
            .unwrap_err();
        assert_eq!(err, HostError::Layout(LayoutError::DuplicatePanelId(1)));
        assert_eq!(container.layout().panels.len(), 3);
    }

    // ──────────────────────────────────────────
    // Divider drags
    // ──────────────────────────────────────────

    #[test]
    fn test_press_outside_divider_does_nothing() {
        let mut container = nested();
        assert!(!container.pointer_down(Vec2::new(100.0, 100.0)).unwrap());
        assert!(!container.is_dragging());
    }

    #[test]
    fn test_press_before_mount_does_nothing() {
        let mut container = two_panels(None);
        assert!(!container.pointer_down(Vec2::new(245.0, 10.0)).unwrap());
    }

    #[test]
    fn test_drag_root_divider() {
        init_logging();
        let mut container = two_panels(Some(&[60.0, 40.0]));
        container.mount(VIEWPORT);

        // Divider spans x = 288..298
        assert!(container.pointer_down(Vec2::new(290.0, 50.0)).unwrap());
        assert!(container.is_dragging());
        assert!(container.pointer_move(Vec2::new(221.0, 60.0)));
        assert!(container.pointer_up(Vec2::new(221.0, 60.0)));

        let shares = container.shares(&[]).unwrap();
        assert!(approx_eq(shares[0], 45.0));
        assert!(approx_eq(shares[1], 55.0));
        assert!(!container.is_dragging());

        let layout = container.layout();
        assert!(approx_eq(layout.panels[0].rect.width, 216.0));
    }

    #[test]
    fn test_release_outside_group_uses_last_position() {
        let mut container = two_panels(Some(&[60.0, 40.0]));
        container.mount(VIEWPORT);
        container.pointer_down(Vec2::new(290.0, 50.0)).unwrap();
        assert!(container.pointer_move(Vec2::new(221.0, 50.0)));
        assert!(!container.pointer_move(Vec2::new(900.0, 50.0)));
        assert!(container.pointer_up(Vec2::new(900.0, 50.0)));

        let shares = container.shares(&[]).unwrap();
        assert!(approx_eq(shares[0], 45.0));
        assert!(approx_eq(shares[1], 55.0));
    }

    #[test]
    fn test_click_without_move_keeps_shares() {
        let mut container = two_panels(Some(&[60.0, 40.0]));
        container.mount(VIEWPORT);
        assert!(container.pointer_down(Vec2::new(293.0, 50.0)).unwrap());
        container.pointer_up(Vec2::new(293.0, 50.0));

        let shares = container.shares(&[]).unwrap();
        assert!(approx_eq(shares[0], 60.0));
        assert!(approx_eq(shares[1], 40.0));
    }

    #[test]
    fn test_drag_nested_divider() {
        let mut container = nested();
        // Nested divider spans y = 200..210 on the right column
        assert!(container.pointer_down(Vec2::new(300.0, 205.0)).unwrap());
        container.pointer_move(Vec2::new(300.0, 105.0));
        assert!(container.pointer_up(Vec2::new(300.0, 105.0)));

        let shares = container.shares(&[2]).unwrap();
        assert!(approx_eq(shares[0], 25.0));
        assert!(approx_eq(shares[1], 75.0));
        // Root untouched
        assert_eq!(container.shares(&[]).unwrap(), vec![50.0, 50.0]);
    }

    #[test]
    fn test_root_drag_remeasures_nested_group() {
        let mut container = nested();
        assert!(container.pointer_down(Vec2::new(245.0, 100.0)).unwrap());
        container.pointer_move(Vec2::new(125.0, 100.0));
        container.pointer_up(Vec2::new(125.0, 100.0));

        let group = container.group(&[2]).unwrap();
        assert!(rect_approx_eq(&group.rect().unwrap(), &Rect::new(130.0, 0.0, 360.0, 410.0)));

        let layout = container.layout();
        let p3 = layout.panel(&[2], 3).unwrap();
        assert!(rect_approx_eq(&p3.rect, &Rect::new(130.0, 0.0, 360.0, 200.0)));
    }

    #[test]
    fn test_drag_is_clamped_to_pair() {
        let mut container = PanelContainer::new(
            Orientation::Horizontal,
            vec![leaf(1), leaf(2), leaf(3)],
            Some(&[20.0, 20.0, 60.0]),
            Settings::default(),
        )
        .unwrap();
        container.mount(Size::new(520.0, 100.0));
        // content 500: panel 1 = 0..100, divider 100..110, panel 2 = 110..210
        assert!(container.pointer_down(Vec2::new(105.0, 50.0)).unwrap());
        // Far into panel 3: within the group's limits but past panel 2
        container.pointer_move(Vec2::new(400.0, 50.0));
        container.pointer_up(Vec2::new(400.0, 50.0));

        let shares = container.shares(&[]).unwrap();
        assert!(approx_eq(shares[0], 40.0));
        assert!(approx_eq(shares[1], 0.0));
        assert!(approx_eq(shares[2], 60.0));
    }

    #[test]
    fn test_second_press_during_drag_is_rejected() {
        let mut container = nested();
        assert!(container.pointer_down(Vec2::new(245.0, 100.0)).unwrap());
        let err = container.pointer_down(Vec2::new(300.0, 205.0)).unwrap_err();
        assert_eq!(err, HostError::Drag(DragError::SessionActive));
        assert!(container.is_dragging());
    }

    #[test]
    fn test_leave_cancels_drag() {
        let mut container = two_panels(Some(&[60.0, 40.0]));
        container.mount(VIEWPORT);
        container.pointer_down(Vec2::new(290.0, 50.0)).unwrap();
        container.pointer_move(Vec2::new(100.0, 50.0));

        assert!(container.handle_pointer(PointerEvent::Leave).unwrap());
        assert!(!container.is_dragging());
        assert!(!container.handle_pointer(PointerEvent::Up(Vec2::new(100.0, 50.0))).unwrap());
        assert_eq!(container.shares(&[]).unwrap(), vec![60.0, 40.0]);
    }

    #[test]
    fn test_resize_cancels_drag() {
        let mut container = nested();
        container.pointer_down(Vec2::new(245.0, 100.0)).unwrap();
        container.resize(Size::new(800.0, 600.0));
        assert!(!container.is_dragging());
    }

    #[test]
    fn test_removing_dragged_panel_cancels_drag() {
        let mut container = nested();
        container.pointer_down(Vec2::new(300.0, 205.0)).unwrap();
        container.set_children(&[2], vec![leaf(3)]).unwrap();
        assert!(!container.is_dragging());
        assert!(!container.indicator().unwrap().visible);

        container.pointer_move(Vec2::new(300.0, 100.0));
        assert!(!container.pointer_up(Vec2::new(300.0, 100.0)));
        assert_eq!(container.shares(&[2]).unwrap(), vec![100.0]);
    }

    #[test]
    fn test_adding_panel_mid_drag_cancels_drag() {
        let mut container = two_panels(Some(&[60.0, 40.0]));
        container.mount(VIEWPORT);
        assert!(container.pointer_down(Vec2::new(293.0, 50.0)).unwrap());
        container
            .set_children(&[], vec![leaf(1), leaf(2), leaf(3)])
            .unwrap();
        assert!(!container.is_dragging());

        // The old 480px scale would have turned x=221 into 45
        assert!(!container.pointer_move(Vec2::new(221.0, 50.0)));
        assert!(!container.pointer_up(Vec2::new(221.0, 50.0)));

        let shares = container.shares(&[]).unwrap();
        let third = 100.0 / 3.0;
        assert!(approx_eq(shares[0], 60.0 - third / 2.0));
        assert!(approx_eq(shares[1], 40.0 - third / 2.0));
        assert!(approx_eq(shares[2], third));
    }

    #[test]
    fn test_equalize_mid_drag_cancels_drag() {
        let mut container = two_panels(Some(&[60.0, 40.0]));
        container.mount(VIEWPORT);
        container.pointer_down(Vec2::new(293.0, 50.0)).unwrap();
        container.equalize(&[]).unwrap();
        assert!(!container.is_dragging());

        container.pointer_up(Vec2::new(221.0, 50.0));
        assert_eq!(container.shares(&[]).unwrap(), vec![50.0, 50.0]);
    }

    #[test]
    fn test_changing_nested_group_keeps_root_drag() {
        let mut container = nested();
        assert!(container.pointer_down(Vec2::new(245.0, 100.0)).unwrap());
        container
            .set_children(&[2], vec![leaf(3), leaf(4), leaf(5)])
            .unwrap();
        assert!(container.is_dragging());

        container.pointer_move(Vec2::new(125.0, 100.0));
        assert!(container.pointer_up(Vec2::new(125.0, 100.0)));
        let shares = container.shares(&[]).unwrap();
        assert!(approx_eq(shares[0], 25.0));
        assert!(approx_eq(shares[1], 75.0));
    }

    #[test]
    fn test_changing_root_cancels_nested_drag() {
        let mut container = nested();
        assert!(container.pointer_down(Vec2::new(300.0, 205.0)).unwrap());
        container.equalize(&[]).unwrap();
        assert!(!container.is_dragging());
    }

    #[test]
    fn test_handle_pointer_full_sequence() {
        let mut container = two_panels(None);
        container.mount(VIEWPORT);
        assert!(container.handle_pointer(PointerEvent::Down(Vec2::new(245.0, 5.0))).unwrap());
        assert!(container.handle_pointer(PointerEvent::Move(Vec2::new(101.0, 5.0))).unwrap());
        assert!(container.handle_pointer(PointerEvent::Up(Vec2::new(101.0, 5.0))).unwrap());

        let shares = container.shares(&[]).unwrap();
        assert!(approx_eq(shares[0], 20.0));
        assert!(approx_eq(shares[1], 80.0));
    }

    // ──────────────────────────────────────────
    // Rendering
    // ──────────────────────────────────────────

    #[test]
    fn test_render_draws_dividers() {
        let container = nested();
        let mut renderer = RecordingRenderer::default();
        container.render(&mut renderer);

        assert_eq!(renderer.frames, 1);
        assert_eq!(renderer.rects.len(), 2);
        assert_eq!(renderer.cursor, Some(CursorHint::Default));
    }

    #[test]
    fn test_render_before_mount_is_noop() {
        let container = two_panels(None);
        let mut renderer = RecordingRenderer::default();
        container.render(&mut renderer);
        assert_eq!(renderer.frames, 0);
    }

    #[test]
    fn test_render_shows_indicator_while_dragging() {
        let mut container = nested();
        let settings = container.settings().clone();
        container.pointer_down(Vec2::new(300.0, 205.0)).unwrap();
        container.pointer_move(Vec2::new(300.0, 150.0));

        let mut renderer = RecordingRenderer::default();
        container.render(&mut renderer);

        let (indicator_rect, color) = *renderer.rects.last().unwrap();
        assert_eq!(color, settings.colors.indicator);
        assert!(rect_approx_eq(&indicator_rect, &Rect::new(250.0, 145.0, 240.0, 10.0)));
        assert_eq!(renderer.cursor, Some(CursorHint::RowResize));

        container.pointer_up(Vec2::new(300.0, 150.0));
        container.render(&mut renderer);
        assert_eq!(renderer.rects.len(), 2);
        assert!(!container.indicator().unwrap().visible);
    }

    #[test]
    fn test_hover_cursor_over_divider() {
        let mut container = nested();
        container.pointer_move(Vec2::new(245.0, 50.0));
        let mut renderer = RecordingRenderer::default();
        container.render(&mut renderer);
        assert_eq!(renderer.cursor, Some(CursorHint::ColResize));

        assert_eq!(container.cursor_at(Vec2::new(300.0, 205.0)), CursorHint::RowResize);
        assert_eq!(container.cursor_at(Vec2::new(20.0, 20.0)), CursorHint::Default);
    }

    // ──────────────────────────────────────────
    // Settings
    // ──────────────────────────────────────────

    #[test]
    fn test_settings_path_is_under_config_dir() {
        if let Some(path) = settings_path() {
            assert!(path.ends_with("splitter/settings.json"));
        }
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            divider_thickness: 6.0,
            transition_ms: 0,
            ..Settings::default()
        };
        save_settings_to(&path, &settings);
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn test_settings_missing_or_broken_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(load_settings_from(&path), Settings::default());

        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn test_settings_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "divider_thickness": 4 }"#).unwrap();

        let settings = load_settings_from(&path);
        assert_eq!(settings.divider_thickness, 4.0);
        assert_eq!(settings.transition_ms, 250);
        assert_eq!(settings.colors, Settings::default().colors);
    }
}
