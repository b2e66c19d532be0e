//! Mutually-exclusive single-slot container for a computed sum.

use std::sync::Mutex;

use crate::types::Element;

/// Holds at most one diagonal sum behind a private lock. Written by a
/// phase-one worker, read by a phase-two worker; the lock itself is never
/// exposed.
pub struct ResultCell {
    value: Mutex<Option<Element>>,
}

impl ResultCell {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    /// Set the held value, overwriting any previous one.
    pub fn store(&self, value: Element) {
        let mut guard = self.value.lock().expect("result cell mutex poisoned");
        *guard = Some(value);
    }

    /// Read the current value; `None` until the first `store`.
    pub fn load(&self) -> Option<Element> {
        let guard = self.value.lock().expect("result cell mutex poisoned");
        *guard
    }
}
