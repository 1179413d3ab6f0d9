use std::io;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent};

pub enum Event {
    Key(KeyEvent),
    Tick,
}

/// Pumps terminal key events and a steady tick onto a channel.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) && !forward(&tx, event::read()) {
                    return;
                }
                // Ticks keep their pace while keys are held down.
                if last_tick.elapsed() >= tick_rate {
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

/// Passes one terminal read on to the channel. Returns false when the pump
/// should stop: the receiver is gone or the terminal can no longer be read.
fn forward(tx: &Sender<Event>, read: io::Result<event::Event>) -> bool {
    match read {
        // Press, repeat and release all matter for held-key tracking.
        Ok(event::Event::Key(key)) => tx.send(Event::Key(key)).is_ok(),
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("terminal event read failed, stopping input: {e}");
            false
        }
    }
}
