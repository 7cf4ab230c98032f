use egui::{Key, Modifiers, Pos2, Response};

/// Pointer events for the surface controller, in buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp(Pos2),
    /// The gesture ended without a proper pointer-up (left the canvas).
    PointerCancel,
}

/// Operations forwarded to the imperative handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleAction {
    Undo,
    Redo,
}

/// Translate this frame's interaction with the canvas widget into pointer
/// events, mapping window coordinates into buffer coordinates.
pub fn canvas_events(response: &Response) -> Vec<InputEvent> {
    let rect = response.rect;
    let local = |pos: Pos2| Pos2::new(pos.x - rect.min.x, pos.y - rect.min.y);

    let mut events = Vec::new();
    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(InputEvent::PointerDown(local(pos)));
        }
    } else if response.dragged() {
        match response.interact_pointer_pos() {
            Some(pos) if rect.contains(pos) => events.push(InputEvent::PointerMove(local(pos))),
            _ => events.push(InputEvent::PointerCancel),
        }
    }
    if response.drag_stopped() {
        match response.interact_pointer_pos() {
            Some(pos) if rect.contains(pos) => events.push(InputEvent::PointerUp(local(pos))),
            _ => events.push(InputEvent::PointerCancel),
        }
    }
    events
}

/// Keyboard shortcuts: Ctrl+Z undoes, Ctrl+Y and Ctrl+Shift+Z redo.
/// Consumes the key presses so nothing else reacts to them.
pub fn handle_actions(ctx: &egui::Context) -> Vec<HandleAction> {
    let mut actions = Vec::new();
    ctx.input_mut(|input| {
        // The stricter chord must be checked before plain Ctrl+Z.
        if input.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z) {
            actions.push(HandleAction::Redo);
        }
        if input.consume_key(Modifiers::COMMAND, Key::Y) {
            actions.push(HandleAction::Redo);
        }
        if input.consume_key(Modifiers::COMMAND, Key::Z) {
            actions.push(HandleAction::Undo);
        }
    });
    actions
}
