use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind, MouseEvent};

use crate::error::{CarouscrollError, Result};

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Mouse wheel, click and drag
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic tick driving animations and timers
    Tick,
}

/// Event handler with background thread
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
    _handler: thread::JoinHandle<()>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate);
        let (sender, receiver) = mpsc::channel();

        let handler = thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    let event = match event::read() {
                        Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        Ok(event::Event::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                        Ok(event::Event::Resize(width, height)) => {
                            Some(Event::Resize(width, height))
                        }
                        _ => None,
                    };
                    if let Some(event) = event {
                        if sender.send(event).is_err() {
                            break;
                        }
                    }
                }

                // Ticks keep flowing during bursts of input so animations advance
                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            receiver,
            _handler: handler,
        }
    }

    /// Get the next event, blocking until one is available
    pub fn next(&self) -> Result<Event> {
        self.receiver
            .recv()
            .map_err(|e| CarouscrollError::Tui(e.to_string()))
    }
}
