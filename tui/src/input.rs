//! Input handling for the Mindsweep TUI.
//!
//! A blocking reader thread pumps crossterm events into a bounded channel;
//! the render loop drains a budget of events per frame so a burst can never
//! starve rendering.

use anyhow::{Result, anyhow};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::warn;

use mindsweep_engine::{App, InputMode, Point};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(&stop2, &tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so the reader thread unblocks if it is
        // backpressured on a send.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if the caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: &AtomicBool, tx: &mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "terminal event read failed");
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                warn!(error = %e, "terminal event poll failed");
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain this frame's input events into the app. Returns true when the app
/// should quit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        apply_event(app, &ev);
        processed += 1;
    }
    Ok(app.should_quit())
}

fn apply_event(app: &mut App, event: &Event) {
    match event {
        Event::Key(key) => {
            // Handle press + repeat events (ignore releases)
            if matches!(key.kind, KeyEventKind::Release) {
                return;
            }

            // Ctrl+C quits from anywhere
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                app.request_quit();
                return;
            }

            // Any key dismisses the welcome overlay
            if app.welcome_active() {
                app.dismiss_welcome();
                return;
            }

            // The ritual overlay is modal
            if app.ritual().is_confirming() {
                handle_confirm_keys(app, *key);
                return;
            }
            if app.ritual().is_animating() {
                return;
            }

            match app.input_mode() {
                InputMode::Normal => handle_normal_mode(app, *key),
                InputMode::QuickAdd => handle_quick_add_mode(app, *key),
            }
        }
        Event::Mouse(mouse) => handle_mouse(app, *mouse),
        // Terminals emit no pointer-leave; treat focus loss as drag end.
        Event::FocusLost => app.focus_lost(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let point = Point::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.pointer_down(point),
        MouseEventKind::Drag(MouseButton::Left) => app.pointer_move(point),
        MouseEventKind::Up(MouseButton::Left) => app.pointer_up(point),
        _ => {}
    }
}

fn handle_confirm_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => app.confirm_clear(),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => app.cancel_clear(),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.request_quit();
        }
        KeyCode::Char('i' | 'a') => {
            app.enter_quick_add();
        }
        KeyCode::Char('m') => {
            app.toggle_listening();
        }
        KeyCode::Char('c') => {
            app.request_clear_mind();
        }
        _ => {}
    }
}

fn handle_quick_add_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Exit quick add
        KeyCode::Esc => {
            app.cancel_quick_add();
        }
        // Submit the entry
        KeyCode::Enter => {
            app.submit_quick_add();
        }
        // Backspace: exit quick add if empty, otherwise delete
        KeyCode::Backspace => {
            if app.quick_add().is_empty() {
                app.cancel_quick_add();
            } else if let Some(draft) = app.quick_add_mut() {
                draft.delete_char();
            }
        }
        _ => {
            let Some(draft) = app.quick_add_mut() else {
                return;
            };
            match key.code {
                KeyCode::Left => {
                    draft.move_cursor_left();
                }
                KeyCode::Right => {
                    draft.move_cursor_right();
                }
                KeyCode::Home => {
                    draft.move_cursor_home();
                }
                KeyCode::End => {
                    draft.move_cursor_end();
                }
                // Delete word backwards
                KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    draft.delete_word_backwards();
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    draft.clear();
                }
                // Insert character (ignore \r)
                KeyCode::Char(c) if c != '\r' => {
                    draft.enter_char(c);
                }
                _ => {}
            }
        }
    }
}
