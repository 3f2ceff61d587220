//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a blocking reader
//! task that forwards them over a channel so the main loop stays
//! non-blocking.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Time elapsed since the previous tick (drives animations).
    Tick(Duration),
}

/// Spawns a blocking task that polls the terminal for events and sends them
/// through the returned channel.  A `Tick` is sent whenever `tick_rate`
/// elapses, even while input keeps arriving.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => Some(AppEvent::Key(k)),
                        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
                        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(app_event) = app_event {
                        if tx.send(app_event).is_err() {
                            break; // receiver dropped
                        }
                    }
                }
            }
            if last_tick.elapsed() >= tick_rate {
                let elapsed = last_tick.elapsed();
                last_tick = Instant::now();
                if tx.send(AppEvent::Tick(elapsed)).is_err() {
                    break;
                }
            }
        }
    });

    rx
}
