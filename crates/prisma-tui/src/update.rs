//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use prisma_core::{TickId, TickOutcome};
use ratatui::layout::Position;
use tracing::debug;

use crate::common::sanitize_for_display;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::input;
use crate::state::AppState;

/// Lines moved per PageUp/PageDown.
const PAGE_SCROLL: usize = 10;

/// Lines moved per mouse wheel notch.
const WHEEL_SCROLL: usize = 3;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::PlaybackTick(id) => handle_playback_tick(app, id),
    }
}

fn handle_playback_tick(app: &mut AppState, id: TickId) -> Vec<UiEffect> {
    match app.engine.tick(&mut app.session, id) {
        TickOutcome::Revealed { next, .. } => vec![UiEffect::ScheduleTick(next)],
        TickOutcome::Exhausted | TickOutcome::Stale => vec![],
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => {
            app.input.insert_str(&sanitize_for_display(&text));
            vec![]
        }
        Event::Mouse(mouse) => {
            let pos = Position::new(mouse.column, mouse.row);
            let scroll = if app.logs_area.get().contains(pos) {
                &mut app.logs_scroll
            } else if app.chat_area.get().contains(pos) {
                &mut app.chat_scroll
            } else {
                return vec![];
            };
            match mouse.kind {
                MouseEventKind::ScrollUp => scroll.scroll_up(WHEEL_SCROLL),
                MouseEventKind::ScrollDown => scroll.scroll_down(WHEEL_SCROLL),
                _ => {}
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => {
            if app.input.is_empty() {
                vec![UiEffect::Quit]
            } else {
                app.input.clear();
                vec![]
            }
        }
        KeyCode::F(5) => start_demo(app),
        KeyCode::Char('s') if ctrl => start_demo(app),
        KeyCode::F(6) => reset_demo(app),
        KeyCode::Char('r') if ctrl => reset_demo(app),
        KeyCode::Enter => submit_message(app),
        KeyCode::PageUp => {
            app.chat_scroll.scroll_up(PAGE_SCROLL);
            vec![]
        }
        KeyCode::PageDown => {
            app.chat_scroll.scroll_down(PAGE_SCROLL);
            vec![]
        }
        KeyCode::Up if ctrl => {
            app.logs_scroll.scroll_up(1);
            vec![]
        }
        KeyCode::Down if ctrl => {
            app.logs_scroll.scroll_down(1);
            vec![]
        }
        _ => {
            input::handle_edit_key(&mut app.input, key);
            vec![]
        }
    }
}

fn start_demo(app: &mut AppState) -> Vec<UiEffect> {
    let request = app.engine.start(&mut app.session);
    app.chat_scroll.follow();
    app.logs_scroll.follow();
    vec![UiEffect::ScheduleTick(request)]
}

fn reset_demo(app: &mut AppState) -> Vec<UiEffect> {
    app.engine.reset(&mut app.session);
    app.chat_scroll.follow();
    app.logs_scroll.follow();
    vec![UiEffect::CancelTick]
}

fn submit_message(app: &mut AppState) -> Vec<UiEffect> {
    if app.input.is_blank() {
        debug!("ignoring blank submit");
        return vec![];
    }
    let text = app.input.take();
    if app.session.submit_user_message(&text) {
        app.chat_scroll.follow();
    }
    vec![]
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyEventState, MouseEvent};
    use prisma_core::{DEFAULT_TICK_INTERVAL, Phase, PlaybackEngine, Sender, Severity};
    use ratatui::layout::Rect;

    use super::*;

    fn app() -> AppState {
        AppState::new(PlaybackEngine::default())
    }

    fn press(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            update(app, press(KeyCode::Char(ch)));
        }
    }

    fn scheduled(effects: &[UiEffect]) -> prisma_core::TickRequest {
        match effects {
            [UiEffect::ScheduleTick(request)] => *request,
            other => panic!("expected one ScheduleTick, got {other:?}"),
        }
    }

    #[test]
    fn test_f5_seeds_chat_and_requests_immediate_tick() {
        let mut app = app();
        let effects = update(&mut app, press(KeyCode::F(5)));

        let request = scheduled(&effects);
        assert_eq!(request.delay, Duration::ZERO);
        assert_eq!(app.session.transcript().len(), 9);
        assert!(app.session.revealed_logs().is_empty());
        assert_eq!(app.phase(), Phase::Playing);
    }

    #[test]
    fn test_ctrl_s_starts_too() {
        let mut app = app();
        scheduled(&update(&mut app, ctrl('s')));
        assert_eq!(app.phase(), Phase::Playing);
    }

    #[test]
    fn test_playback_tick_reveals_and_reschedules() {
        let mut app = app();
        let first = scheduled(&update(&mut app, press(KeyCode::F(5))));

        let next = scheduled(&update(&mut app, UiEvent::PlaybackTick(first.id)));
        assert_eq!(next.delay, DEFAULT_TICK_INTERVAL);
        assert_eq!(app.session.revealed_logs().len(), 1);
        assert_eq!(app.session.revealed_logs()[0].event.step, "⚡ Event Detection");
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let mut app = app();
        let first = scheduled(&update(&mut app, press(KeyCode::F(5))));
        scheduled(&update(&mut app, press(KeyCode::F(5))));

        assert!(update(&mut app, UiEvent::PlaybackTick(first.id)).is_empty());
        assert!(app.session.revealed_logs().is_empty());
    }

    #[test]
    fn test_full_run_ends_idle_without_more_ticks() {
        let mut app = app();
        let mut request = scheduled(&update(&mut app, press(KeyCode::F(5))));

        loop {
            let effects = update(&mut app, UiEvent::PlaybackTick(request.id));
            match effects.as_slice() {
                [UiEffect::ScheduleTick(next)] => request = *next,
                [] => break,
                other => panic!("unexpected effects {other:?}"),
            }
        }

        assert_eq!(app.session.revealed_logs().len(), 15);
        assert_eq!(app.session.revealed_logs()[3].event.severity, Some(Severity::High));
        assert_eq!(app.phase(), Phase::Idle);
        assert!(app.session.is_running());
    }

    #[test]
    fn test_f6_clears_and_cancels_timer() {
        let mut app = app();
        let request = scheduled(&update(&mut app, press(KeyCode::F(5))));
        update(&mut app, UiEvent::PlaybackTick(request.id));

        let effects = update(&mut app, press(KeyCode::F(6)));
        assert_eq!(effects, vec![UiEffect::CancelTick]);
        assert!(app.session.transcript().is_empty());
        assert!(app.session.revealed_logs().is_empty());
        assert_eq!(app.phase(), Phase::Stopped);

        assert!(update(&mut app, UiEvent::PlaybackTick(request.id)).is_empty());
    }

    #[test]
    fn test_enter_submits_user_message() {
        let mut app = app();
        type_text(&mut app, "status of hospitals?");
        assert!(update(&mut app, press(KeyCode::Enter)).is_empty());

        let last = app.session.transcript().last().unwrap();
        assert_eq!(last.sender, Sender::User);
        assert_eq!(last.text, "status of hospitals?");
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_blank_enter_is_ignored() {
        let mut app = app();
        type_text(&mut app, "   ");
        update(&mut app, press(KeyCode::Enter));

        assert!(app.session.transcript().is_empty());
        assert_eq!(app.input.text(), "   ");
    }

    #[test]
    fn test_submit_while_playing_appends_after_script() {
        let mut app = app();
        update(&mut app, press(KeyCode::F(5)));
        type_text(&mut app, "ok");
        update(&mut app, press(KeyCode::Enter));

        assert_eq!(app.session.transcript().len(), 10);
        assert_eq!(app.phase(), Phase::Playing);
    }

    #[test]
    fn test_esc_quits() {
        let mut app = app();
        assert_eq!(update(&mut app, press(KeyCode::Esc)), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_ctrl_c_clears_input_before_quitting() {
        let mut app = app();
        type_text(&mut app, "draft");

        assert!(update(&mut app, ctrl('c')).is_empty());
        assert!(app.input.is_empty());
        assert_eq!(update(&mut app, ctrl('c')), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = app();
        let release = KeyEvent {
            code: KeyCode::F(5),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(update(&mut app, UiEvent::Terminal(Event::Key(release))).is_empty());
        assert_eq!(app.phase(), Phase::Stopped);
    }

    #[test]
    fn test_paste_goes_to_input() {
        let mut app = app();
        update(&mut app, UiEvent::Terminal(Event::Paste("two\nlines".into())));
        assert_eq!(app.input.text(), "two lines");
    }

    #[test]
    fn test_mouse_wheel_scrolls_panel_under_pointer() {
        let mut app = app();
        app.chat_area.set(Rect::new(0, 0, 40, 20));
        app.logs_area.set(Rect::new(40, 0, 40, 20));
        // Pretend the logs panel has overflowing content.
        let _ = app.logs_scroll.window(100, 18);

        let wheel = |column| {
            UiEvent::Terminal(Event::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollUp,
                column,
                row: 5,
                modifiers: KeyModifiers::NONE,
            }))
        };
        update(&mut app, wheel(50));
        assert_eq!(app.logs_scroll.offset(), WHEEL_SCROLL);
        assert!(app.chat_scroll.is_following());

        update(&mut app, wheel(90));
        assert_eq!(app.logs_scroll.offset(), WHEEL_SCROLL);
    }

    #[test]
    fn test_tick_advances_spinner() {
        let mut app = app();
        update(&mut app, UiEvent::Tick);
        update(&mut app, UiEvent::Tick);
        assert_eq!(app.spinner_frame, 2);
    }
}
