//! Integration tests for the drag scroll engine
//!
//! These tests drive a `DragScroll<SyntheticSurface>` through pointer,
//! scroll, resize and navigation input on the virtual clock and verify:
//! - Navigation and snapping land on child boundaries
//! - Bound notifications track the scroll position
//! - Superseded timers never fire
//! - Listeners and scrollbar changes are undone

use std::sync::{Arc, Mutex};

use dragscroll::{
    BoundaryState, ButtonMask, ClipHost, Dimension, DragScroll, DragScrollConfig, DragScrollError,
    EventKind, EventResponse, ListenerTarget, PointerEvent, ProbeMeasurement, Size, StyleSize,
    SyntheticSurface,
};

/// Long enough for any default-timed animation to finish
const SETTLE_MS: u64 = 1_000;

fn carousel(viewport_width: f32, widths: Vec<f32>) -> DragScroll<SyntheticSurface> {
    carousel_with(viewport_width, widths, DragScrollConfig::default())
}

fn carousel_with(
    viewport_width: f32,
    widths: Vec<f32>,
    config: DragScrollConfig,
) -> DragScroll<SyntheticSurface> {
    let surface = SyntheticSurface::new(Size::new(viewport_width, 100.0), widths);
    DragScroll::new(surface, config).unwrap()
}

fn record_bounds(engine: &mut DragScroll<SyntheticSurface>) -> Arc<Mutex<Vec<BoundaryState>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    engine.on_boundary_change(move |state| sink.lock().unwrap().push(state));
    log
}

fn scroll_x(engine: &DragScroll<SyntheticSurface>) -> f32 {
    engine.surface_state().scroll_x
}

/// Five 100px children in a 300px viewport: the surface clamps at 200, so
/// the third step right is blocked at the right end
#[test]
fn test_move_right_stops_at_right_end() {
    let mut engine = carousel(300.0, vec![100.0; 5]);
    let bounds = record_bounds(&mut engine);

    let mut indices = Vec::new();
    for _ in 0..3 {
        engine.move_right();
        engine.advance(SETTLE_MS);
        indices.push(engine.current_index());
    }

    assert_eq!(indices, vec![1, 2, 2]);
    assert_eq!(scroll_x(&engine), 200.0);
    assert!(!engine.is_animating());

    let bounds = bounds.lock().unwrap();
    assert_eq!(bounds.last(), Some(&BoundaryState::new(false, true)));
    assert!(bounds.contains(&BoundaryState::new(false, false)));
}

#[test]
fn test_move_right_reaches_last_child() {
    let mut engine = carousel(100.0, vec![100.0; 5]);

    for expected in 1..=3 {
        assert!(engine.move_right());
        engine.advance(SETTLE_MS);
        assert_eq!(engine.current_index(), expected);
        assert_eq!(scroll_x(&engine), expected as f32 * 100.0);
    }

    // Landing inside the second-to-last child reports one past the end
    assert!(engine.move_right());
    engine.advance(SETTLE_MS);
    assert_eq!(scroll_x(&engine), 400.0);
    assert_eq!(engine.current_index(), 5);

    assert!(!engine.move_right());
    assert_eq!(engine.current_index(), 5);
    assert_eq!(engine.boundary(), BoundaryState::new(false, true));

    assert!(engine.move_left());
    engine.advance(SETTLE_MS);
    assert_eq!(engine.current_index(), 4);
    assert_eq!(scroll_x(&engine), 400.0);
}

#[test]
fn test_settle_at_right_end_then_move_left_stays_clamped() {
    let mut engine = carousel(150.0, vec![100.0; 5]);

    engine.host_mut().scroll_by(350.0, 0.0);
    engine.on_scroll();
    engine.advance(SETTLE_MS);
    engine.advance(SETTLE_MS);
    assert!(!engine.is_animating());
    assert_eq!(scroll_x(&engine), 350.0);
    assert_eq!(engine.current_index(), 5);

    // Child 4 starts at 400, past the furthest reachable offset
    assert!(engine.move_left());
    engine.advance(SETTLE_MS);
    assert_eq!(engine.current_index(), 4);
    assert_eq!(scroll_x(&engine), 350.0);
}

#[test]
fn test_move_left_and_move_to() {
    let mut engine = carousel(100.0, vec![100.0; 5]);

    assert!(!engine.move_left());
    assert!(!engine.move_to(0));
    assert!(!engine.move_to(5));

    assert!(engine.move_to(3));
    engine.advance(SETTLE_MS);
    assert_eq!(engine.current_index(), 3);
    assert_eq!(scroll_x(&engine), 300.0);

    assert!(engine.move_left());
    engine.advance(SETTLE_MS);
    assert_eq!(engine.current_index(), 2);
    assert_eq!(scroll_x(&engine), 200.0);

    assert!(engine.move_to(0));
    engine.advance(SETTLE_MS);
    assert_eq!(scroll_x(&engine), 0.0);
    assert_eq!(engine.boundary(), BoundaryState::new(true, false));
}

#[test]
fn test_navigation_uses_configured_duration() {
    let config = DragScrollConfig {
        timing: dragscroll::SnapTiming {
            snap_duration_ms: 100,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut engine = carousel_with(100.0, vec![100.0; 5], config);

    engine.move_right();
    engine.advance(60);
    assert!(scroll_x(&engine) < 100.0);
    engine.advance(20);
    assert_eq!(scroll_x(&engine), 100.0);
    assert!(engine.is_animating());
    engine.advance(20);
    assert!(!engine.is_animating());
}

#[test]
fn test_drag_release_rolls_back() {
    let mut engine = carousel(300.0, vec![100.0; 5]);

    assert_eq!(
        engine.on_pointer_down(PointerEvent::primary(200.0, 50.0)),
        EventResponse::Handled
    );
    assert!(engine.is_pressed());
    assert_eq!(
        engine.on_pointer_move(PointerEvent::primary(60.0, 50.0)),
        EventResponse::PreventDefault
    );
    assert_eq!(scroll_x(&engine), 140.0);
    assert_eq!(engine.current_index(), 1);

    assert_eq!(
        engine.on_pointer_up(PointerEvent::primary(60.0, 50.0)),
        EventResponse::Handled
    );
    assert!(!engine.is_pressed());
    assert!(engine.is_animating());

    engine.advance(SETTLE_MS);
    assert_eq!(scroll_x(&engine), 100.0);
    assert_eq!(engine.current_index(), 1);
}

#[test]
fn test_drag_release_goes_forward() {
    let mut engine = carousel(300.0, vec![100.0; 5]);

    engine.on_pointer_down(PointerEvent::primary(200.0, 50.0));
    engine.on_pointer_move(PointerEvent::primary(120.0, 50.0));
    engine.on_pointer_move(PointerEvent::primary(40.0, 50.0));
    assert_eq!(scroll_x(&engine), 160.0);
    engine.on_pointer_up(PointerEvent::primary(40.0, 50.0));

    engine.advance(SETTLE_MS);
    assert_eq!(scroll_x(&engine), 200.0);
    assert_eq!(engine.current_index(), 2);
    assert_eq!(engine.boundary(), BoundaryState::new(false, true));
}

#[test]
fn test_drag_with_x_disabled_only_moves_y() {
    let config = DragScrollConfig {
        x_disabled: true,
        ..Default::default()
    };
    let surface = SyntheticSurface::new(Size::new(300.0, 100.0), vec![100.0; 5])
        .with_content_height(300.0);
    let mut engine = DragScroll::new(surface, config).unwrap();

    engine.on_pointer_down(PointerEvent::primary(100.0, 100.0));
    engine.on_pointer_move(PointerEvent::primary(40.0, 60.0));
    engine.on_pointer_move(PointerEvent::primary(10.0, 50.0));

    let state = engine.surface_state();
    assert_eq!(state.scroll_x, 0.0);
    assert_eq!(state.scroll_y, 50.0);
}

#[test]
fn test_drag_disabled_keeps_offsets() {
    let config = DragScrollConfig {
        drag_disabled: true,
        ..Default::default()
    };
    let mut engine = carousel_with(300.0, vec![100.0; 5], config);

    engine.on_pointer_down(PointerEvent::primary(200.0, 50.0));
    assert_eq!(
        engine.on_pointer_move(PointerEvent::primary(100.0, 50.0)),
        EventResponse::PreventDefault
    );
    assert_eq!(scroll_x(&engine), 0.0);
}

#[test]
fn test_disabled_engine_leaves_default_action() {
    let config = DragScrollConfig {
        disabled: true,
        ..Default::default()
    };
    let mut engine = carousel_with(300.0, vec![100.0; 5], config);

    engine.on_pointer_down(PointerEvent::primary(200.0, 50.0));
    assert!(engine
        .on_pointer_move(PointerEvent::primary(150.0, 50.0))
        .is_ignored());
    assert_eq!(scroll_x(&engine), 0.0);
}

#[test]
fn test_masked_button_does_not_drag() {
    let config = DragScrollConfig {
        drag_buttons: ButtonMask::new(true, false, false),
        ..Default::default()
    };
    let mut engine = carousel_with(300.0, vec![100.0; 5], config);
    let right_button = |x| PointerEvent::new(x, 50.0, 2);

    assert!(engine.on_pointer_down(right_button(200.0)).is_ignored());
    assert!(!engine.is_pressed());
    assert!(engine.on_pointer_move(right_button(50.0)).is_ignored());
    assert!(engine.on_pointer_move(PointerEvent::primary(50.0, 50.0)).is_ignored());
    assert!(engine.on_pointer_up(right_button(50.0)).is_ignored());
    assert_eq!(scroll_x(&engine), 0.0);
}

#[test]
fn test_passive_scroll_settles_onto_child() {
    let mut engine = carousel(300.0, vec![100.0; 5]);

    engine.host_mut().scroll_by(130.0, 0.0);
    assert_eq!(engine.on_scroll(), EventResponse::Handled);
    assert!(engine.is_settling());

    engine.advance(499);
    assert_eq!(scroll_x(&engine), 130.0);

    engine.advance(1);
    assert!(!engine.is_settling());
    assert!(engine.is_animating());

    engine.advance(SETTLE_MS);
    assert_eq!(scroll_x(&engine), 100.0);
    assert_eq!(engine.current_index(), 1);
}

#[test]
fn test_new_scroll_resets_settle_timer() {
    let mut engine = carousel(300.0, vec![100.0; 5]);

    engine.host_mut().scroll_by(50.0, 0.0);
    engine.on_scroll();
    engine.advance(300);
    engine.host_mut().scroll_by(20.0, 0.0);
    engine.on_scroll();

    // The first timer would have fired at 500
    engine.advance(300);
    assert_eq!(scroll_x(&engine), 70.0);
    assert!(engine.is_settling());
    assert!(!engine.is_animating());

    engine.advance(200);
    engine.advance(SETTLE_MS);
    assert_eq!(scroll_x(&engine), 100.0);
    assert_eq!(engine.current_index(), 1);
}

#[test]
fn test_pointer_down_cancels_animation() {
    let mut engine = carousel(100.0, vec![100.0; 5]);

    engine.move_to(3);
    engine.advance(200);
    assert!(engine.is_animating());
    let stopped_at = scroll_x(&engine);
    assert!(stopped_at > 0.0 && stopped_at < 300.0);

    engine.on_pointer_down(PointerEvent::primary(10.0, 10.0));
    assert!(!engine.is_animating());

    engine.advance(SETTLE_MS);
    assert_eq!(scroll_x(&engine), stopped_at);
}

#[test]
fn test_pointer_down_cancels_settle() {
    let mut engine = carousel(300.0, vec![100.0; 5]);

    engine.host_mut().scroll_by(130.0, 0.0);
    engine.on_scroll();
    engine.on_pointer_down(PointerEvent::primary(10.0, 10.0));
    assert!(!engine.is_settling());

    engine.advance(SETTLE_MS);
    assert_eq!(scroll_x(&engine), 130.0);
}

#[test]
fn test_new_animation_replaces_old() {
    let mut engine = carousel(100.0, vec![100.0; 5]);

    engine.move_to(4);
    engine.advance(100);
    engine.move_to(1);
    engine.advance(SETTLE_MS);

    assert_eq!(scroll_x(&engine), 100.0);
    assert_eq!(engine.current_index(), 1);
    assert!(!engine.is_animating());
}

#[test]
fn test_snap_disabled_scroll_only_locates() {
    let mut engine = carousel_with(300.0, vec![100.0; 5], DragScrollConfig::free_scroll());

    engine.host_mut().scroll_by(130.0, 0.0);
    engine.on_scroll();
    assert!(!engine.is_settling());
    assert_eq!(engine.current_index(), 1);

    engine.advance(SETTLE_MS);
    assert_eq!(scroll_x(&engine), 130.0);

    engine.on_pointer_down(PointerEvent::primary(0.0, 0.0));
    engine.on_pointer_up(PointerEvent::primary(0.0, 0.0));
    assert!(!engine.is_animating());
}

#[test]
fn test_snap_disabled_move_left_saturates() {
    let mut engine = carousel_with(300.0, vec![100.0; 5], DragScrollConfig::free_scroll());

    engine.host_mut().scroll_by(30.0, 0.0);
    engine.on_scroll();
    assert_eq!(engine.current_index(), 0);

    assert!(engine.move_left());
    engine.advance(SETTLE_MS);
    assert_eq!(engine.current_index(), 0);
    assert_eq!(scroll_x(&engine), 0.0);
}

#[test]
fn test_single_child() {
    let mut engine = carousel(300.0, vec![500.0]);
    let bounds = record_bounds(&mut engine);

    assert_eq!(engine.boundary(), BoundaryState::BOTH);
    assert!(!engine.move_right());
    assert!(!engine.move_left());
    assert!(!engine.move_to(0));

    engine.host_mut().scroll_by(120.0, 0.0);
    engine.on_scroll();
    engine.advance(SETTLE_MS);
    assert_eq!(engine.current_index(), 0);
    assert!(bounds
        .lock()
        .unwrap()
        .iter()
        .all(|state| *state == BoundaryState::BOTH));
}

#[test]
fn test_left_and_right_listeners() {
    let mut engine = carousel(300.0, vec![100.0; 5]);
    let left = Arc::new(Mutex::new(Vec::new()));
    let right = Arc::new(Mutex::new(Vec::new()));

    let sink = left.clone();
    engine.on_left_bound(move |reached| sink.lock().unwrap().push(reached));
    let sink = right.clone();
    let right_id = engine.on_right_bound(move |reached| sink.lock().unwrap().push(reached));

    engine.host_mut().scroll_by(50.0, 0.0);
    engine.on_scroll();
    engine.host_mut().scroll_by(150.0, 0.0);
    engine.on_scroll();

    assert_eq!(*left.lock().unwrap(), vec![false, false]);
    assert_eq!(*right.lock().unwrap(), vec![false, true]);

    assert!(engine.remove_listener(right_id));
    engine.on_scroll();
    assert_eq!(right.lock().unwrap().len(), 2);
    assert_eq!(left.lock().unwrap().len(), 3);
}

#[test]
fn test_resize_resets_to_first_child() {
    let mut engine = carousel(100.0, vec![100.0; 5]);
    let bounds = record_bounds(&mut engine);

    engine.move_to(3);
    engine.advance(SETTLE_MS);
    assert_eq!(scroll_x(&engine), 300.0);

    engine.host_mut().set_viewport(Size::new(200.0, 100.0));
    assert_eq!(engine.on_resize(), EventResponse::Handled);
    assert_eq!(scroll_x(&engine), 0.0);
    assert_eq!(engine.current_index(), 0);
    assert!(engine.is_animating());

    engine.advance(20);
    assert!(!engine.is_animating());
    assert_eq!(
        bounds.lock().unwrap().last(),
        Some(&BoundaryState::new(true, false))
    );
}

#[test]
fn test_child_count_change_resets() {
    let mut engine = carousel(100.0, vec![100.0; 5]);
    assert!(engine.check_structure().is_ignored());

    engine.move_to(2);
    engine.advance(SETTLE_MS);
    assert_eq!(scroll_x(&engine), 200.0);

    engine.host_mut().set_child_widths(vec![100.0; 3]);
    assert_eq!(engine.check_structure(), EventResponse::Handled);
    assert_eq!(scroll_x(&engine), 0.0);
    assert_eq!(engine.current_index(), 0);
    assert_eq!(engine.surface_state().children.len(), 3);
    assert!(engine.check_structure().is_ignored());

    // Navigation follows the new child list
    assert!(!engine.move_to(3));
    assert!(engine.move_to(2));
}

#[test]
fn test_detach_removes_every_listener() {
    let surface = SyntheticSurface::new(Size::new(300.0, 100.0), vec![100.0; 5]);
    let registry = surface.listener_registry();

    let mut engine = DragScroll::new(surface, DragScrollConfig::default()).unwrap();
    assert_eq!(registry.lock().active_count(), 5);
    assert!(registry
        .lock()
        .is_listening(ListenerTarget::Document, EventKind::PointerMove));

    engine.move_right();
    engine.detach();
    assert_eq!(registry.lock().active_count(), 0);
    assert!(!engine.is_animating());

    // Idempotent, and drop does not unregister twice
    engine.detach();
    drop(engine);
    assert_eq!(registry.lock().active_count(), 0);
    assert_eq!(registry.lock().total_registered(), 5);
}

#[test]
fn test_drop_removes_every_listener() {
    let surface = SyntheticSurface::new(Size::new(300.0, 100.0), vec![100.0; 5]);
    let registry = surface.listener_registry();

    let engine = DragScroll::new(surface, DragScrollConfig::default()).unwrap();
    assert_eq!(registry.lock().active_count(), 5);
    drop(engine);
    assert_eq!(registry.lock().active_count(), 0);
}

#[test]
fn test_refused_listener_rolls_back() {
    let surface = SyntheticSurface::new(Size::new(300.0, 100.0), vec![100.0; 5])
        .refusing(ListenerTarget::Window, EventKind::Resize);
    let registry = surface.listener_registry();

    let err = DragScroll::new(surface, DragScrollConfig::default())
        .err()
        .unwrap();
    assert!(matches!(
        err,
        DragScrollError::ListenerRegistration {
            target: ListenerTarget::Window,
            kind: EventKind::Resize,
            ..
        }
    ));
    assert_eq!(registry.lock().active_count(), 0);
    assert_eq!(registry.lock().total_registered(), 4);
}

#[test]
fn test_scrollbar_hide_then_show_restores_style() {
    let original = StyleSize::new(Dimension::Px(300.0), Dimension::Px(100.0));
    let surface = SyntheticSurface::new(Size::new(300.0, 100.0), vec![100.0; 5])
        .with_style(original)
        .with_probe(ProbeMeasurement {
            without_scrollbar: 100.0,
            with_scrollbar: 83.0,
        });

    let mut engine = DragScroll::new(surface, DragScrollConfig::hidden_scrollbar()).unwrap();
    assert_eq!(engine.host().clip_wrapper(), Some(original));
    // Only the horizontal bar exists, so only the height is enlarged
    assert_eq!(
        engine.host().style_size(),
        StyleSize::new(Dimension::Percent(100.0), Dimension::PercentPlusPx(100.0, 17.0))
    );

    engine.attach(DragScrollConfig::default()).unwrap();
    assert_eq!(engine.host().clip_wrapper(), None);
    assert_eq!(engine.host().style_size(), original);

    engine.attach(DragScrollConfig::hidden_scrollbar()).unwrap();
    engine.attach(DragScrollConfig::hidden_scrollbar()).unwrap();
    assert_eq!(engine.host().wrapper_insertions(), 2);
}
