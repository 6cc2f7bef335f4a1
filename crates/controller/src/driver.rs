//! Input-stream driver
//!
//! Feeds a controller from a channel of input events, the way a form feeds
//! it keystrokes. Events are applied strictly in arrival order.

use crate::debounce::ValidationController;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A change coming from the field or its surroundings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// New raw field value
    Value(Option<String>),
    /// Gate opened or closed
    Gate(bool),
    /// New debounce delay
    Delay(Duration),
}

impl ValidationController {
    /// Apply a single input event
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Value(value) => {
                self.set_value(value.as_deref());
            }
            InputEvent::Gate(should_check) => {
                self.set_gate(should_check);
            }
            InputEvent::Delay(delay) => {
                if let Err(e) = self.set_delay(delay) {
                    warn!("Ignoring delay change: {}", e);
                }
            }
        }
    }
}

/// Apply events until the sender side closes, then hand the controller back
///
/// Checks still pending when the channel closes keep running; drop the
/// returned controller to cancel them.
pub async fn drive(
    mut controller: ValidationController,
    mut events: mpsc::Receiver<InputEvent>,
) -> ValidationController {
    while let Some(event) = events.recv().await {
        debug!(?event, "input event");
        controller.apply(event);
    }
    controller
}
