use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    /// Emitted when no input arrived during one tick; drives background work.
    Tick,
}

/// Polls crossterm on a background task and forwards key presses.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    shutdown_tx: mpsc::UnboundedSender<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = tokio::time::sleep(tick_rate) => {
                        let event = match event::poll(Duration::ZERO) {
                            Ok(true) => match event::read() {
                                // Release and repeat events are reported on some platforms.
                                Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                                    Event::Key(key)
                                }
                                Ok(_) => continue,
                                Err(e) => {
                                    tracing::warn!("Failed to read terminal event: {}", e);
                                    Event::Tick
                                }
                            },
                            _ => Event::Tick,
                        };
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { rx, shutdown_tx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }
}
