//! Input handling — maps key/mouse events to scroll gestures.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    state.status_message = None;

    let result = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
            Ok(())
        }
        KeyCode::Left | KeyCode::Char('h') => state.step(-1.0),
        KeyCode::Right | KeyCode::Char('l') => state.step(1.0),
        KeyCode::Char('H') => state.flick(-1.0),
        KeyCode::Char('L') => state.flick(1.0),
        KeyCode::Home => state.go_to_page(0),
        KeyCode::End => state.go_to_last_page(),
        _ => Ok(()),
    };
    report(state, result);
}

/// Process a mouse event: left-drag scrubs the strip, the wheel pages.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let result = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.begin_drag(mouse.column);
            Ok(())
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            state.drag_to(mouse.column);
            Ok(())
        }
        MouseEventKind::Up(MouseButton::Left) => state.end_drag(),
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => state.step(1.0),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => state.step(-1.0),
        _ => Ok(()),
    };
    report(state, result);
}

fn report(state: &mut AppState, result: anyhow::Result<()>) {
    if let Err(err) = result {
        tracing::warn!("input ignored: {err:#}");
        state.status_message = Some(format!("error: {err}"));
    }
}
