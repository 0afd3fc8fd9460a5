//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use keepsake_core::pages::Block;
use keepsake_core::sequence::PageId;
use keepsake_core::session::{Input, SessionEvent};
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::render;
use crate::state::AppState;

/// Slider distance moved by one arrow key press.
const KEY_STEP: i32 = 4;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.frame = app.frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Frame { width, height, now } => {
            app.size = (width, height);
            let events = app.session.advance_to(now);
            apply_session_events(app, events)
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::HapticDone => {
            app.pulses = app.pulses.saturating_sub(1);
            vec![]
        }
    }
}

fn apply_session_events(app: &mut AppState, events: Vec<SessionEvent>) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for event in events {
        match event {
            SessionEvent::Haptic { duration } if app.haptics => {
                app.pulses += 1;
                effects.push(UiEffect::Haptic { duration });
            }
            SessionEvent::Finished => app.finished = true,
            _ => {}
        }
    }
    effects
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }

    let input = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return vec![UiEffect::Quit];
        }
        KeyCode::Char('q') | KeyCode::Esc => return vec![UiEffect::Quit],
        KeyCode::Enter | KeyCode::Char(' ') => Some(activate(app)),
        KeyCode::Left => nudge(app, -KEY_STEP),
        KeyCode::Right => nudge(app, KEY_STEP),
        KeyCode::Home => slider(app).map(|_| Input::Progress(0)),
        KeyCode::End => slider(app).map(|_| Input::Progress(100)),
        _ => None,
    };

    match input {
        Some(input) => send(app, input),
        None => vec![],
    }
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    let mut effects = send(
        app,
        Input::PointerMoved {
            x: mouse.column,
            y: mouse.row,
        },
    );

    let input = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            slider_input(app, mouse).or_else(|| Some(activate(app)))
        }
        MouseEventKind::Drag(MouseButton::Left) => slider_input(app, mouse),
        _ => None,
    };
    if let Some(input) = input {
        effects.extend(send(app, input));
    }
    effects
}

fn send(app: &mut AppState, input: Input) -> Vec<UiEffect> {
    let events = app.session.handle(input);
    apply_session_events(app, events)
}

/// Enter, space and clicks tap the heart on the heart page and press the
/// button everywhere else.
fn activate(app: &AppState) -> Input {
    if app.session.page().id() == PageId::Heart {
        Input::Tap
    } else {
        Input::Activate
    }
}

/// Current slider value, if the live page has a slider.
fn slider(app: &AppState) -> Option<u8> {
    app.session.view().blocks.iter().find_map(|b| match b {
        Block::Slider { progress } => Some(*progress),
        _ => None,
    })
}

fn nudge(app: &AppState, delta: i32) -> Option<Input> {
    slider(app).map(|progress| Input::Progress(i32::from(progress) + delta))
}

/// Maps a click or drag on the slider row to a slider value.
///
/// Drags may wander off the row; they still follow the column.
fn slider_input(app: &AppState, mouse: MouseEvent) -> Option<Input> {
    slider(app)?;
    let (width, height) = app.size;
    let rect = render::page_layout(Rect::new(0, 0, width, height)).slider;
    let on_row = mouse.row == rect.y;
    let dragging = matches!(mouse.kind, MouseEventKind::Drag(_));
    (on_row || dragging).then(|| Input::Progress(render::slider_value(rect, mouse.column)))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::KeyEventState;
    use keepsake_core::script::Script;
    use keepsake_core::session::Session;
    use keepsake_core::timing::Timing;

    use super::*;

    fn app() -> AppState {
        let (session, _) = Session::new(Script::default(), Timing::default());
        let mut app = AppState::new(session, true);
        app.size = (80, 24);
        app
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> UiEvent {
        UiEvent::Terminal(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn frame_at(ms: u64) -> UiEvent {
        UiEvent::Frame {
            width: 80,
            height: 24,
            now: Duration::from_millis(ms),
        }
    }

    /// Walks the session to the first page with the given id.
    fn reach(app: &mut AppState, id: PageId) {
        while app.session.page().id() != id {
            let next = app.session.next_deadline().unwrap_or(app.session.now());
            update(app, frame_at(next.as_millis() as u64));
            if app.session.page().id() == PageId::DragReveal && id != PageId::DragReveal {
                update(app, key(KeyCode::End));
            } else {
                update(app, key(KeyCode::Enter));
            }
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(update(&mut app, key(KeyCode::Char('q'))), vec![UiEffect::Quit]);
        assert_eq!(update(&mut app, key(KeyCode::Esc)), vec![UiEffect::Quit]);
        let ctrl_c = UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(update(&mut app, ctrl_c), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_frame_drives_the_clock() {
        let mut app = app();
        update(&mut app, frame_at(4600));
        assert_eq!(app.session.now(), Duration::from_millis(4600));
        assert_eq!(app.size, (80, 24));

        let effects = update(&mut app, key(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![UiEffect::Haptic {
                duration: Duration::from_millis(15)
            }]
        );
        assert_eq!(app.session.page().id(), PageId::Consent);
        assert_eq!(app.pulses, 1);

        update(&mut app, UiEvent::HapticDone);
        assert!(!app.is_flashing());
    }

    #[test]
    fn test_haptics_disabled_emit_nothing() {
        let mut app = app();
        app.haptics = false;
        update(&mut app, frame_at(4600));
        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
        assert_eq!(app.session.page().id(), PageId::Consent);
    }

    #[test]
    fn test_enter_taps_the_heart() {
        let mut app = app();
        reach(&mut app, PageId::Heart);
        let effects = update(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(
            effects,
            vec![UiEffect::Haptic {
                duration: Duration::from_millis(10)
            }]
        );
    }

    #[test]
    fn test_slider_keys_and_mouse() {
        let mut app = app();
        reach(&mut app, PageId::DragReveal);

        update(&mut app, key(KeyCode::Right));
        update(&mut app, key(KeyCode::Right));
        assert_eq!(slider(&app), Some(8));
        update(&mut app, key(KeyCode::Left));
        assert_eq!(slider(&app), Some(4));
        update(&mut app, key(KeyCode::Home));
        assert_eq!(slider(&app), Some(0));

        let rect = render::page_layout(Rect::new(0, 0, 80, 24)).slider;
        let middle = rect.x + (rect.width - 1) / 2;
        update(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), middle, rect.y));
        assert_eq!(slider(&app), Some(48));

        // Clicks away from the slider do nothing on this page.
        update(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), middle, 2));
        assert_eq!(slider(&app), Some(48));

        let effects = update(&mut app, key(KeyCode::End));
        assert!(effects.contains(&UiEffect::Haptic {
            duration: Duration::from_millis(20)
        }));
        assert_eq!(slider(&app), Some(100));
    }

    #[test]
    fn test_mouse_move_wakes_from_idle() {
        let mut app = app();
        update(&mut app, mouse(MouseEventKind::Moved, 3, 3));
        update(&mut app, frame_at(4000));
        assert!(app.session.ambient().idle());
        update(&mut app, mouse(MouseEventKind::Moved, 4, 3));
        assert!(!app.session.ambient().idle());
        assert_eq!(app.session.ambient().pointer(), Some((4, 3)));
    }

    #[test]
    fn test_finished_flag() {
        let mut app = app();
        reach(&mut app, PageId::FinalLetter);
        while !app.finished {
            let next = app.session.next_deadline().unwrap_or(app.session.now());
            update(&mut app, frame_at(next.as_millis() as u64));
        }
        assert!(app.session.is_finished());
    }
}
