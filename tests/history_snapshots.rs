use eframe_sketch::controller::{CanvasHandle, SurfaceController, SurfaceState};
use eframe_sketch::tools::ToolConfig;
use egui::Pos2;

// Draw a committed horizontal pen stroke along `row`.
fn draw_row_stroke(controller: &mut SurfaceController, row: f32) {
    let config = ToolConfig::default();
    controller.pointer_down(Pos2::new(20.0, row), &config);
    controller.pointer_move(Pos2::new(60.0, row));
    controller.pointer_up(Pos2::new(100.0, row));
}

fn is_blank(controller: &SurfaceController) -> bool {
    controller.buffer().as_bytes().iter().all(|&b| b == 0)
}

fn alpha_at(controller: &SurfaceController, x: i32, y: i32) -> u8 {
    controller.buffer().pixel(x, y).unwrap()[3]
}

#[test]
fn n_undos_return_to_the_initial_blank_state() {
    let mut controller = SurfaceController::new(160, 120);
    for i in 0..5 {
        draw_row_stroke(&mut controller, 15.0 + 20.0 * i as f32);
    }
    assert!(!is_blank(&controller));
    assert_eq!(controller.history().len(), 6); // blank + 5 strokes

    for _ in 0..5 {
        controller.undo();
    }
    assert!(is_blank(&controller), "undoing every stroke must restore blank");

    // Underflow is a no-op, not an error.
    controller.undo();
    controller.undo();
    assert!(is_blank(&controller));
}

#[test]
fn undo_then_redo_is_a_lossless_round_trip() {
    let mut controller = SurfaceController::new(160, 120);
    for i in 0..3 {
        draw_row_stroke(&mut controller, 20.0 + 25.0 * i as f32);
    }
    let latest = controller.buffer().as_bytes().to_vec();

    for k in 1..=3 {
        for _ in 0..k {
            controller.undo();
        }
        for _ in 0..k {
            controller.redo();
        }
        assert_eq!(
            controller.buffer().as_bytes(),
            latest.as_slice(),
            "round trip of {k} undos broke the buffer"
        );
    }
}

#[test]
fn committing_after_undo_discards_the_redo_tail() {
    let mut controller = SurfaceController::new(160, 120);
    draw_row_stroke(&mut controller, 20.0); // stroke 1
    draw_row_stroke(&mut controller, 50.0); // stroke 2
    controller.undo();
    draw_row_stroke(&mut controller, 80.0); // stroke 3

    // History is now {blank, stroke1, stroke3}; stroke2 is permanently gone.
    assert_eq!(controller.history().len(), 3);
    assert_eq!(alpha_at(&controller, 50, 20), 255);
    assert_eq!(alpha_at(&controller, 50, 50), 0);
    assert_eq!(alpha_at(&controller, 50, 80), 255);

    // Redo after a fresh commit is a no-op.
    let before = controller.buffer().as_bytes().to_vec();
    controller.redo();
    assert_eq!(controller.buffer().as_bytes(), before.as_slice());
}

#[test]
fn undo_and_redo_never_error_at_the_stack_ends() {
    let mut controller = SurfaceController::new(64, 64);
    controller.undo();
    controller.redo();
    assert!(is_blank(&controller));

    draw_row_stroke(&mut controller, 30.0);
    controller.redo(); // already at the latest entry
    assert_eq!(alpha_at(&controller, 50, 30), 255);
}

#[test]
fn undo_during_a_gesture_commits_the_stroke_first() {
    let mut controller = SurfaceController::new(160, 120);
    let config = ToolConfig::default();
    controller.pointer_down(Pos2::new(20.0, 40.0), &config);
    controller.pointer_move(Pos2::new(90.0, 40.0));
    assert_eq!(controller.state(), SurfaceState::Drawing);

    controller.undo();
    assert_eq!(controller.state(), SurfaceState::Idle);
    assert!(is_blank(&controller), "the committed stroke was then undone");

    controller.redo();
    assert_eq!(alpha_at(&controller, 50, 40), 255);
}

#[test]
fn eraser_commits_are_undoable_like_pen_commits() {
    let mut controller = SurfaceController::new(160, 120);
    draw_row_stroke(&mut controller, 40.0);
    assert_eq!(alpha_at(&controller, 50, 40), 255);

    let eraser = ToolConfig {
        erase_mode: true,
        eraser_size: 20.0,
        ..Default::default()
    };
    controller.pointer_down(Pos2::new(20.0, 40.0), &eraser);
    controller.pointer_move(Pos2::new(60.0, 40.0));
    controller.pointer_up(Pos2::new(100.0, 40.0));
    assert_eq!(alpha_at(&controller, 50, 40), 0);
    assert_eq!(controller.history().len(), 3);

    controller.undo();
    assert_eq!(alpha_at(&controller, 50, 40), 255, "undo must restore erased pixels");
}

#[test]
fn capped_history_evicts_only_the_oldest_entries() {
    let mut controller = SurfaceController::with_history_capacity(160, 120, 3);
    for i in 0..5 {
        draw_row_stroke(&mut controller, 15.0 + 20.0 * i as f32);
    }
    assert_eq!(controller.history().len(), 3);

    // Two undos reach the eviction floor; the blank origin is gone.
    controller.undo();
    controller.undo();
    assert!(!controller.can_undo());
    assert_eq!(alpha_at(&controller, 50, 15), 255, "oldest strokes stay flattened");

    // The retained future is intact.
    controller.redo();
    controller.redo();
    assert_eq!(alpha_at(&controller, 50, 95), 255);
}
