use eframe_sketch::controller::{CanvasHandle, SurfaceController, SurfaceState};
use eframe_sketch::tools::ToolConfig;
use egui::{Color32, Pos2};

fn pixel(controller: &SurfaceController, x: i32, y: i32) -> [u8; 4] {
    controller.buffer().pixel(x, y).unwrap()
}

fn is_blank(controller: &SurfaceController) -> bool {
    controller.buffer().as_bytes().iter().all(|&b| b == 0)
}

#[test]
fn a_width_4_stroke_leaves_an_opaque_band_of_height_4() {
    let mut controller = SurfaceController::new(160, 48);
    let config = ToolConfig::default(); // width 4, black
    controller.pointer_down(Pos2::new(20.0, 20.0), &config);
    controller.pointer_move(Pos2::new(70.0, 20.0));
    controller.pointer_up(Pos2::new(120.0, 20.0));

    for x in 25..115 {
        // Rows whose centers are well inside the brush are exactly opaque black.
        assert_eq!(pixel(&controller, x, 19), [0, 0, 0, 255], "x={x}");
        assert_eq!(pixel(&controller, x, 20), [0, 0, 0, 255], "x={x}");
        // The anti-aliased boundary rows still carry heavy coverage.
        assert!(pixel(&controller, x, 18)[3] > 200, "x={x}");
        assert!(pixel(&controller, x, 21)[3] > 200, "x={x}");
        // One row further out the band has ended.
        assert_eq!(pixel(&controller, x, 17)[3], 0, "x={x}");
        assert_eq!(pixel(&controller, x, 22)[3], 0, "x={x}");
    }

    controller.undo();
    assert!(is_blank(&controller), "one undo must restore the blank canvas");
}

#[test]
fn fast_gestures_render_without_gaps() {
    let mut controller = SurfaceController::new(200, 48);
    let config = ToolConfig::default();
    // A single pointer-move spanning many brush radii.
    controller.pointer_down(Pos2::new(10.0, 24.0), &config);
    controller.pointer_move(Pos2::new(190.0, 24.0));
    controller.pointer_up(Pos2::new(190.0, 24.0));

    for x in 11..189 {
        assert_eq!(pixel(&controller, x, 23)[3], 255, "gap at x={x}");
        assert_eq!(pixel(&controller, x, 24)[3], 255, "gap at x={x}");
    }
}

#[test]
fn a_click_without_a_drag_paints_a_committed_dot() {
    let mut controller = SurfaceController::new(64, 64);
    let config = ToolConfig {
        stroke_width: 8.0,
        ..Default::default()
    };
    controller.pointer_down(Pos2::new(32.0, 32.0), &config);
    controller.pointer_up(Pos2::new(32.0, 32.0));

    assert_eq!(pixel(&controller, 32, 32), [0, 0, 0, 255]);
    assert_eq!(controller.history().len(), 2);
    assert_eq!(controller.state(), SurfaceState::Idle);
}

#[test]
fn erasing_restores_transparency_where_covered() {
    let mut controller = SurfaceController::new(160, 80);
    let pen = ToolConfig {
        stroke_width: 6.0,
        ..Default::default()
    };
    controller.pointer_down(Pos2::new(20.0, 40.0), &pen);
    controller.pointer_up(Pos2::new(140.0, 40.0));
    assert_eq!(pixel(&controller, 80, 40)[3], 255);

    // A perpendicular eraser stroke, wide enough to swallow the pen band.
    let eraser = ToolConfig {
        erase_mode: true,
        eraser_size: 16.0,
        ..Default::default()
    };
    controller.pointer_down(Pos2::new(80.0, 10.0), &eraser);
    controller.pointer_up(Pos2::new(80.0, 70.0));

    // The crossing is transparent again; the rest of the pen stroke is not.
    for y in 36..44 {
        assert_eq!(pixel(&controller, 80, y)[3], 0, "y={y}");
    }
    assert_eq!(pixel(&controller, 40, 40)[3], 255);
    assert_eq!(pixel(&controller, 120, 40)[3], 255);
}

#[test]
fn canceling_a_gesture_rolls_back_its_partial_paint() {
    let mut controller = SurfaceController::new(120, 60);
    let config = ToolConfig::default();
    controller.pointer_down(Pos2::new(20.0, 30.0), &config);
    controller.pointer_move(Pos2::new(90.0, 30.0));
    assert!(!is_blank(&controller), "partial strokes paint incrementally");

    controller.pointer_cancel();
    assert!(is_blank(&controller), "a canceled stroke must leave no trace");
    assert_eq!(controller.history().len(), 1);
    assert_eq!(controller.state(), SurfaceState::Idle);
}

#[test]
fn tool_changes_mid_gesture_do_not_affect_the_active_stroke() {
    let mut controller = SurfaceController::new(120, 60);
    let mut config = ToolConfig::default(); // black
    controller.pointer_down(Pos2::new(20.0, 30.0), &config);

    // The caller flips the color mid-stroke; the stroke was frozen at begin.
    config.stroke_color = Color32::RED;
    controller.pointer_move(Pos2::new(90.0, 30.0));
    controller.pointer_up(Pos2::new(90.0, 30.0));

    for x in 21..89 {
        let [r, _, _, a] = pixel(&controller, x, 30);
        assert_eq!(a, 255);
        assert_eq!(r, 0, "segment painted with the mid-stroke color at x={x}");
    }
}

#[test]
fn stray_pointer_events_without_a_gesture_are_ignored() {
    let mut controller = SurfaceController::new(64, 64);
    controller.pointer_move(Pos2::new(30.0, 30.0));
    controller.pointer_up(Pos2::new(30.0, 30.0));
    controller.pointer_cancel();

    assert!(is_blank(&controller));
    assert_eq!(controller.history().len(), 1);
}
