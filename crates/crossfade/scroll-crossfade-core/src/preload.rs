//! Outstanding image-load counting for the optional preloader overlay.
//!
//! A failed load settles exactly like a successful one so a single missing
//! asset cannot keep the overlay up.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadTracker {
    remaining: usize,
    hidden: bool,
}

impl PreloadTracker {
    /// `pending` is the number of images not yet complete at init.
    pub fn new(pending: usize) -> Self {
        Self {
            remaining: pending,
            hidden: false,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Returns `true` exactly once, when every image has settled.
    pub fn take_hide_signal(&mut self) -> bool {
        if self.is_complete() && !self.hidden {
            self.hidden = true;
            return true;
        }
        false
    }

    /// Record one load or error event; returns the hide signal.
    pub fn settle(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.take_hide_signal()
    }
}
