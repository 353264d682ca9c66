use crossterm::event::{KeyEvent, KeyEventKind};
use std::sync::mpsc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Tick,
}

/// Terminal events delivered from a dedicated input thread.
///
/// A tick fires whenever no key arrives within the tick interval, so the UI
/// keeps updating flash-message timeouts while idle.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ready = crossterm::event::poll(Duration::from_millis(tick_rate_ms));
            match ready {
                Ok(true) => match crossterm::event::read() {
                    // Filter for Press only (Windows compatibility)
                    Ok(crossterm::event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(Event::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => break,
                },
                Ok(false) => {
                    if tx.send(Event::Tick).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        EventHandler { rx }
    }

    pub fn next(&mut self) -> Event {
        self.rx.recv().unwrap_or(Event::Tick)
    }
}
