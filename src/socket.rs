//! Module used to communicate changes in the record.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::mem;
use std::sync::mpsc::{Sender, SyncSender};

/// Slot wrapper that adds some additional functionality.
#[derive(Clone, Debug)]
pub(crate) struct Socket<S>(Option<S>);

impl<S> Socket<S> {
    pub const fn new(slot: S) -> Socket<S> {
        Socket(Some(slot))
    }

    pub fn connect(&mut self, slot: Option<S>) -> Option<S> {
        mem::replace(&mut self.0, slot)
    }

    pub fn disconnect(&mut self) -> Option<S> {
        self.0.take()
    }
}

impl<S> Default for Socket<S> {
    fn default() -> Self {
        Socket(None)
    }
}

impl<S: Slot> Socket<S> {
    pub fn emit(&mut self, signal: impl FnOnce() -> Signal) {
        if let Some(slot) = &mut self.0 {
            slot.on_emit(signal());
        }
    }

    pub fn emit_if(&mut self, cond: bool, signal: impl FnOnce() -> Signal) {
        if cond {
            self.emit(signal);
        }
    }
}

/// The `Signal` describes the state change done to the record.
///
/// Exactly one signal is emitted for every successful mutating call, after the
/// change has been committed. Nothing is emitted when a call fails.
///
/// See [`Slot`] for more information.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[non_exhaustive]
pub enum Signal {
    /// A command was submitted.
    Submit {
        /// The number of applied entries after the submit.
        head: usize,
        /// The number of undone entries that were discarded.
        discarded: usize,
    },
    /// An entry was undone.
    Undo {
        /// The number of applied entries after the undo.
        head: usize,
    },
    /// An entry was redone.
    Redo {
        /// The number of applied entries after the redo.
        head: usize,
    },
    /// The record was reset.
    Reset,
    /// The saved state has changed.
    Saved(bool),
}

/// Use this to handle signals emitted.
///
/// This allows you to trigger events on certain state changes.
///
/// # Examples
/// ```
/// # use std::sync::mpsc;
/// # use linear_undo::{Record, Set, Signal};
/// let (sender, receiver) = mpsc::channel();
/// let mut iter = receiver.try_iter();
///
/// let mut target = 0;
/// let mut record = Record::builder().connect(sender).build();
///
/// record.submit(&mut target, Set::new(1)).unwrap();
/// assert_eq!(iter.next(), Some(Signal::Submit { head: 1, discarded: 0 }));
/// assert_eq!(iter.next(), None);
///
/// record.undo(&mut target).unwrap();
/// assert_eq!(iter.next(), Some(Signal::Undo { head: 0 }));
/// assert_eq!(iter.next(), None);
///
/// assert!(record.undo(&mut target).is_err());
/// assert_eq!(iter.next(), None);
/// ```
pub trait Slot {
    /// Receives a signal that describes the state change done to the record.
    fn on_emit(&mut self, signal: Signal);
}

impl Slot for () {
    fn on_emit(&mut self, _: Signal) {}
}

impl<F: FnMut(Signal)> Slot for F {
    fn on_emit(&mut self, signal: Signal) {
        self(signal)
    }
}

impl Slot for Sender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}

impl Slot for SyncSender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}
