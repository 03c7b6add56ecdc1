//! Hand-off of the latest [`InteractionSignal`] from the video-frame loop to
//! the render loop.
//!
//! Both loops run on the same cooperative thread, so the slot is a shared
//! `Cell` snapshot: last writer wins, the reader always sees a whole signal,
//! and staleness is bounded by one video frame. The pair is split so there is
//! exactly one writer and one reader.

use crate::interaction::InteractionSignal;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct Shared {
    latest: Cell<InteractionSignal>,
    sequence: Cell<u64>,
}

pub struct SignalWriter {
    shared: Rc<Shared>,
}

pub struct SignalReader {
    shared: Rc<Shared>,
    seen: u64,
}

/// Create a connected writer/reader pair holding the idle signal.
pub fn signal_slot() -> (SignalWriter, SignalReader) {
    let shared = Rc::new(Shared::default());
    (
        SignalWriter {
            shared: shared.clone(),
        },
        SignalReader { shared, seen: 0 },
    )
}

impl SignalWriter {
    pub fn publish(&self, signal: InteractionSignal) {
        self.shared.latest.set(signal);
        self.shared.sequence.set(self.shared.sequence.get() + 1);
    }

    /// Reset to the idle signal, e.g. when tracking stops.
    pub fn clear(&self) {
        self.publish(InteractionSignal::IDLE);
    }
}

impl SignalReader {
    /// Most recent signal, whether or not it was already read.
    pub fn latest(&self) -> InteractionSignal {
        self.shared.latest.get()
    }

    /// Most recent signal if a new one was published since the last call.
    pub fn take_fresh(&mut self) -> Option<InteractionSignal> {
        let seq = self.shared.sequence.get();
        if seq == self.seen {
            return None;
        }
        self.seen = seq;
        Some(self.shared.latest.get())
    }

    pub fn writer_alive(&self) -> bool {
        Rc::strong_count(&self.shared) > 1
    }
}
