//! Single-writer, multi-reader snapshot cells.
//!
//! The frame loop is single threaded: a producer publishes once per frame and
//! any number of consumers read the latest value within the same step. A
//! `SignalCell` is a cheap clonable handle onto one such slot.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct SignalCell<T: Copy> {
    slot: Rc<Cell<T>>,
}

impl<T: Copy> SignalCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            slot: Rc::new(Cell::new(initial)),
        }
    }

    #[inline]
    pub fn publish(&self, value: T) {
        self.slot.set(value);
    }

    /// Latest published value. If the producer skipped a frame this is the
    /// previous frame's value; there is no staleness flag.
    #[inline]
    pub fn latest(&self) -> T {
        self.slot.get()
    }

    /// Number of live handles onto the same slot.
    pub fn handles(&self) -> usize {
        Rc::strong_count(&self.slot)
    }
}

impl<T: Copy> Clone for SignalCell<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}
