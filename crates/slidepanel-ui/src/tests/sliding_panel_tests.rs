use slidepanel_animation::ManualFrameClock;

use super::*;

const FRAME_MS: u64 = 16;

fn config() -> PanelConfig {
    PanelConfig::default().with_panel_height(100.0)
}

fn unmeasured(config: PanelConfig) -> (SlidingPanel, ManualFrameClock) {
    let clock = ManualFrameClock::new(0);
    let panel = SlidingPanel::new(config, Rc::new(clock.clone()), Box::new(()));
    (panel, clock)
}

fn laid_out(config: PanelConfig) -> (SlidingPanel, ManualFrameClock) {
    let (mut panel, clock) = unmeasured(config);
    panel.measure(PanelMeasurements::new(400, 1_000).with_slideable_height(900));
    panel.layout();
    (panel, clock)
}

fn run_frames(panel: &mut SlidingPanel, clock: &ManualFrameClock) {
    for _ in 0..100 {
        clock.advance(FRAME_MS);
        if !panel.on_frame() {
            return;
        }
    }
    panic!("settle did not finish");
}

#[test]
fn first_layout_rests_collapsed() {
    let (panel, _) = laid_out(config());
    assert_eq!(panel.panel_state(), PanelState::Collapsed);
    assert_eq!(panel.slideable_bounds(), IntRect::new(0, 900, 400, 1_800));
    assert_eq!(panel.main_bounds(), IntRect::new(0, 0, 400, 900));
    assert_eq!(
        panel.current_layout().main_clip,
        Some(IntRect::new(0, 0, 400, 900))
    );
}

#[test]
fn release_heuristic_with_anchor() {
    let (mut panel, _) = laid_out(config().with_anchor_point(0.7));
    let expanding = -1_000.0;
    let collapsing = 1_000.0;

    panel.core.slide_offset = 0.5;
    assert_eq!(panel.core.release_target(expanding), 0.7);
    assert_eq!(panel.core.release_target(collapsing), 0.0);

    panel.core.slide_offset = 0.7;
    assert_eq!(panel.core.release_target(expanding), 0.7);
    assert_eq!(panel.core.release_target(collapsing), 0.7);

    panel.core.slide_offset = 0.8;
    assert_eq!(panel.core.release_target(expanding), 1.0);
    assert_eq!(panel.core.release_target(collapsing), 0.7);
}

#[test]
fn still_release_uses_midpoints() {
    let (mut panel, _) = laid_out(config().with_anchor_point(0.5));
    for (offset, target) in [(0.75, 1.0), (0.74, 0.5), (0.25, 0.5), (0.24, 0.0)] {
        panel.core.slide_offset = offset;
        assert_eq!(panel.core.release_target(0.0), target, "offset {offset}");
    }
}

#[test]
fn top_gravity_flips_release_direction() {
    let (mut panel, _) = laid_out(config().with_gravity(Gravity::Top).with_anchor_point(0.7));
    panel.core.slide_offset = 0.5;
    assert_eq!(panel.core.release_target(1_000.0), 0.7);
    assert_eq!(panel.core.release_target(-1_000.0), 0.0);
}

#[test]
fn state_before_first_layout_is_applied_directly() {
    let (mut panel, _) = unmeasured(config());
    panel.set_panel_state(PanelState::Expanded).unwrap();
    assert_eq!(panel.panel_state(), PanelState::Expanded);
    assert_eq!(panel.drag_state(), DragState::Idle);

    panel.measure(PanelMeasurements::new(400, 1_000).with_slideable_height(900));
    let layout = panel.layout();
    assert_eq!(layout.slideable.top, 100);
    assert_eq!(layout.slide_offset, 1.0);
}

#[test]
fn programmatic_state_change_settles() {
    let (mut panel, clock) = laid_out(config());
    panel.set_panel_state(PanelState::Expanded).unwrap();
    assert_eq!(panel.drag_state(), DragState::Settling);

    clock.advance(FRAME_MS);
    assert!(panel.on_frame());
    assert_eq!(panel.panel_state(), PanelState::Dragging);

    run_frames(&mut panel, &clock);
    assert_eq!(panel.panel_state(), PanelState::Expanded);
    assert_eq!(panel.drag_state(), DragState::Idle);
    assert_eq!(panel.slideable_bounds().top, 100);
    assert_eq!(panel.slide_offset(), 1.0);
}

#[test]
fn dragging_request_fails_without_side_effects() {
    let (mut panel, _) = laid_out(config());
    panel.set_panel_state(PanelState::Expanded).unwrap();
    assert_eq!(
        panel.set_panel_state(PanelState::Dragging),
        Err(PanelError::DraggingNotSettable)
    );
    assert_eq!(panel.drag_state(), DragState::Settling);
}

#[test]
fn hiding_and_showing() {
    let (mut panel, clock) = laid_out(config());
    panel.set_panel_state(PanelState::Hidden).unwrap();
    run_frames(&mut panel, &clock);
    assert_eq!(panel.panel_state(), PanelState::Hidden);
    assert_eq!(panel.slideable_bounds().top, 1_000);
    assert!(!panel.is_slideable_visible());
    assert!(!panel.is_touch_enabled());
    assert_eq!(panel.main_bounds().bottom, 1_000);

    panel.set_panel_state(PanelState::Collapsed).unwrap();
    assert!(panel.is_slideable_visible());
    run_frames(&mut panel, &clock);
    assert_eq!(panel.panel_state(), PanelState::Collapsed);
    assert_eq!(panel.slideable_bounds().top, 900);
    assert!(panel.is_touch_enabled());
}

#[test]
fn disabled_panel_stops_settling() {
    let (mut panel, clock) = laid_out(config());
    panel.set_panel_state(PanelState::Expanded).unwrap();
    panel.set_enabled(false);
    clock.advance(FRAME_MS);
    assert!(!panel.on_frame());
    assert_eq!(panel.drag_state(), DragState::Idle);
    assert_eq!(panel.panel_state(), PanelState::Anchored);

    panel.set_panel_state(PanelState::Collapsed).unwrap();
    assert_eq!(panel.drag_state(), DragState::Idle);
}

#[test]
fn invalid_cosmetic_values_are_ignored() {
    let (mut panel, _) = laid_out(config());
    panel.set_anchor_point(0.0);
    panel.set_anchor_point(1.5);
    assert_eq!(panel.anchor_point(), 1.0);
    panel.set_anchor_point(0.4);
    assert_eq!(panel.anchor_point(), 0.4);

    panel.set_max_slide_offset(1.2);
    assert_eq!(panel.max_slide_offset(), 1.0);
    panel.set_max_slide_offset(0.8);
    assert_eq!(panel.max_slide_offset(), 0.8);
}

#[test]
fn gravity_must_be_top_or_bottom() {
    let (mut panel, _) = unmeasured(config());
    assert_eq!(
        panel.set_gravity(EdgeFlags::LEFT),
        Err(PanelError::InvalidGravity {
            edges: EdgeFlags::LEFT
        })
    );
    assert!(panel.is_sliding_up());

    panel.set_gravity(EdgeFlags::TOP).unwrap();
    assert!(!panel.is_sliding_up());
    panel.measure(PanelMeasurements::new(400, 1_000).with_slideable_height(900));
    let layout = panel.layout();
    assert_eq!(layout.slideable, IntRect::new(0, -800, 400, 100));
    assert_eq!(layout.main, IntRect::new(0, 100, 400, 1_000));
}

#[test]
fn parallax_follows_offset() {
    let (mut panel, _) = laid_out(config().with_parallax_offset(100.0));
    panel.core.slide_offset = 0.5;
    assert_eq!(panel.current_parallax_offset(), -50);
    assert_eq!(panel.current_layout().main_translation_y, -50);
    panel.core.slide_offset = -0.1;
    assert_eq!(panel.current_parallax_offset(), 0);
}

#[test]
fn saved_state_never_holds_dragging() {
    let (mut panel, _) = laid_out(config());
    panel.core.state = PanelState::Dragging;
    panel.core.last_rest_state = PanelState::Anchored;
    let saved = panel.save_state("host");
    assert_eq!(saved.sliding_state, PanelState::Anchored);

    let (mut restored, _) = unmeasured(config().with_anchor_point(0.5));
    assert_eq!(restored.restore_state(saved), "host");
    assert_eq!(restored.panel_state(), PanelState::Anchored);
    restored.measure(PanelMeasurements::new(400, 1_000).with_slideable_height(900));
    assert_eq!(restored.layout().slideable.top, 500);
}

#[test]
fn opaque_panel_hides_covered_main_child() {
    let (mut panel, _) = unmeasured(config().with_initial_state(PanelState::Expanded));
    panel.measure(PanelMeasurements::new(400, 1_000).with_slideable_opaque(true));
    let layout = panel.layout();
    assert_eq!(layout.slideable, IntRect::new(0, 0, 400, 1_000));
    assert!(!layout.main_visible);
}

#[test]
fn gone_slideable_hides_panel() {
    let (mut panel, _) = unmeasured(config());
    panel.measure(
        PanelMeasurements::new(400, 1_000)
            .with_slideable_height(900)
            .with_slideable_visible(false),
    );
    assert_eq!(panel.panel_state(), PanelState::Hidden);
    let layout = panel.layout();
    assert_eq!(layout.slideable.top, 1_000);
    assert_eq!(layout.main, IntRect::new(0, 0, 400, 1_000));
}
