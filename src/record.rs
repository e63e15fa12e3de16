//! A linear record of commands.

mod builder;
mod checkpoint;
mod config;
mod display;
mod queue;

pub use builder::Builder;
pub use checkpoint::Checkpoint;
pub use config::Config;
pub use display::Display;
pub use queue::Queue;

use crate::socket::{Signal, Slot, Socket};
use crate::{Command, Entry, Error, Fault, RedoError, SubmitError, UndoError};
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;
use tracing::{debug, trace, warn};

/// A linear record of commands.
///
/// The record owns the history log and a cursor into it. It rolls the target
/// backwards and forwards with [`undo`](Record::undo) and [`redo`](Record::redo),
/// and notifies a [`Slot`] after every successful change.
///
/// Submitting a command while there are undone entries discards those entries;
/// they can never be redone.
///
/// # Examples
/// ```
/// # use linear_undo::{Record, Set};
/// let mut target = 0;
/// let mut record = Record::new();
/// record.submit(&mut target, Set::new(1)).unwrap();
/// record.submit(&mut target, Set::new(2)).unwrap();
/// record.submit(&mut target, Set::new(3)).unwrap();
/// assert_eq!(target, 3);
/// record.undo(&mut target).unwrap();
/// record.undo(&mut target).unwrap();
/// record.undo(&mut target).unwrap();
/// assert_eq!(target, 0);
/// record.redo(&mut target).unwrap();
/// record.redo(&mut target).unwrap();
/// record.redo(&mut target).unwrap();
/// assert_eq!(target, 3);
/// ```
#[derive(Clone)]
pub struct Record<C, S = ()> {
    entries: VecDeque<Entry<C>>,
    limit: NonZeroUsize,
    head: usize,
    saved: Option<usize>,
    fault: Option<Fault>,
    socket: Socket<S>,
}

/// What a submit replaced, so a checkpoint can put it back.
#[derive(Debug)]
pub(crate) struct Pushed<C> {
    pub tail: VecDeque<Entry<C>>,
    pub evicted: Option<Entry<C>>,
}

impl<C> Record<C> {
    /// Returns a new record.
    pub fn new() -> Record<C> {
        Record::builder().build()
    }

    /// Returns a builder for a record.
    pub fn builder() -> Builder<C> {
        Builder::default()
    }
}

impl<C, S> Record<C, S> {
    pub(crate) fn from_builder(
        capacity: usize,
        limit: NonZeroUsize,
        saved: bool,
        socket: Socket<S>,
    ) -> Record<C, S> {
        Record {
            entries: VecDeque::with_capacity(capacity),
            limit,
            head: 0,
            saved: saved.then_some(0),
            fault: None,
            socket,
        }
    }

    /// Reserves capacity for at least `additional` more commands.
    ///
    /// # Panics
    /// Panics if the new capacity overflows usize.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    /// Returns the capacity of the record.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Shrinks the capacity of the record as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
    }

    /// Returns the number of commands in the record.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the limit of the record.
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Sets how the signal should be handled when the state changes.
    ///
    /// The previous slot is returned if it exists.
    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.socket.connect(Some(slot))
    }

    /// Removes and returns the slot if it exists.
    pub fn disconnect(&mut self) -> Option<S> {
        self.socket.disconnect()
    }

    /// Returns `true` if the record can undo.
    pub fn can_undo(&self) -> bool {
        self.fault.is_none() && self.head > 0
    }

    /// Returns `true` if the record can redo.
    pub fn can_redo(&self) -> bool {
        self.fault.is_none() && self.head < self.len()
    }

    /// Returns `true` if the target is in a saved state, `false` otherwise.
    pub fn is_saved(&self) -> bool {
        self.saved == Some(self.head)
    }

    /// Returns the number of entries whose effect is currently applied.
    ///
    /// This is `0` when everything has been undone and [`len`](Record::len)
    /// when there is nothing to redo.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the index of the most recently applied entry,
    /// or `None` if no entry is applied.
    pub fn cursor(&self) -> Option<usize> {
        self.head.checked_sub(1)
    }

    /// Returns the latched fault, if any.
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    /// Returns `true` if the record has latched a fault.
    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    /// Returns an iterator over the entries, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &Entry<C>> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Returns a queue.
    pub fn queue(&mut self) -> Queue<C, S> {
        Queue::from(self)
    }

    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<C, S> {
        Checkpoint::from(self)
    }

    /// Returns a structure for configurable formatting of the record.
    pub fn display(&self) -> Display<C, S> {
        Display::from(self)
    }

    fn check(&self) -> Result<(), Fault> {
        match self.fault {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    pub(crate) fn latch(&mut self, fault: Fault) {
        if self.fault.is_none() {
            warn!(%fault, "history faulted");
            self.fault = Some(fault);
        }
    }
}

impl<C: Command, S: Slot> Record<C, S> {
    /// Applies the command to the target and pushes it on top of the record.
    ///
    /// Any undone entries are discarded first, so a following
    /// [`redo`](Record::redo) always fails with nothing to redo.
    ///
    /// # Errors
    /// If the command fails to apply the error is returned and the record is
    /// left exactly as it was.
    pub fn submit(
        &mut self,
        target: &mut C::Target,
        command: C,
    ) -> Result<(), SubmitError<C::Error>> {
        self.push(target, command).map(|_| ())
    }

    pub(crate) fn push(
        &mut self,
        target: &mut C::Target,
        mut command: C,
    ) -> Result<Pushed<C>, SubmitError<C::Error>> {
        self.check().map_err(SubmitError::Corrupted)?;
        command.apply(target).map_err(SubmitError::Rejected)?;
        // Pop off all undone entries.
        let tail = self.entries.split_off(self.head);
        if !tail.is_empty() {
            trace!(discarded = tail.len(), "truncated redo tail");
        }
        // Check if the saved state was popped off.
        self.saved = self.saved.filter(|&saved| saved <= self.head);
        // If limit is reached, pop off the first entry.
        let evicted = if self.limit() == self.head {
            self.saved = self.saved.and_then(|saved| saved.checked_sub(1));
            trace!(limit = self.limit(), "evicted oldest entry");
            self.entries.pop_front()
        } else {
            self.head += 1;
            None
        };
        self.entries.push_back(Entry::from(command));
        debug!(head = self.head, len = self.len(), "submitted command");
        let (head, discarded) = (self.head, tail.len());
        self.socket.emit(|| Signal::Submit { head, discarded });
        Ok(Pushed { tail, evicted })
    }

    /// Reverts the most recently applied entry and moves the cursor back by one.
    ///
    /// # Errors
    /// Fails with [`UndoError::NothingToUndo`] when no entry is applied.
    /// If the command fails to revert, the record latches a [`Fault`] and the
    /// cursor does not move.
    pub fn undo(&mut self, target: &mut C::Target) -> Result<(), UndoError<C::Error>> {
        self.check().map_err(UndoError::Corrupted)?;
        let index = self.cursor().ok_or(UndoError::NothingToUndo)?;
        if let Err(source) = self.entries[index].get_mut().revert(target) {
            let fault = Fault::Undo { index };
            self.latch(fault);
            return Err(UndoError::Faulted { fault, source });
        }
        self.head = index;
        debug!(head = self.head, "undid command");
        let head = self.head;
        self.socket.emit(|| Signal::Undo { head });
        Ok(())
    }

    /// Re-applies the first undone entry and moves the cursor forward by one.
    ///
    /// # Errors
    /// Fails with [`RedoError::NothingToRedo`] when no entry is undone.
    /// If the command fails to apply, the record latches a [`Fault`] and the
    /// cursor does not move.
    pub fn redo(&mut self, target: &mut C::Target) -> Result<(), RedoError<C::Error>> {
        self.check().map_err(RedoError::Corrupted)?;
        let index = self.head;
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(RedoError::NothingToRedo)?;
        if let Err(source) = entry.get_mut().apply(target) {
            let fault = Fault::Redo { index };
            self.latch(fault);
            return Err(RedoError::Faulted { fault, source });
        }
        self.head = index + 1;
        debug!(head = self.head, "redid command");
        let head = self.head;
        self.socket.emit(|| Signal::Redo { head });
        Ok(())
    }

    /// Marks the target as currently being in a saved or unsaved state.
    pub fn set_saved(&mut self, saved: bool) {
        let was_saved = self.is_saved();
        self.saved = saved.then_some(self.head);
        self.socket
            .emit_if(was_saved != saved, || Signal::Saved(saved));
    }

    /// Removes all commands from the record without reverting them and clears
    /// any latched fault.
    ///
    /// The target is taken as the new starting point of the history.
    pub fn reset(&mut self) {
        let was_saved = self.is_saved();
        self.entries.clear();
        self.head = 0;
        self.saved = was_saved.then_some(0);
        if let Some(fault) = self.fault.take() {
            debug!(%fault, "cleared fault");
        }
        debug!("reset history");
        self.socket.emit(|| Signal::Reset);
    }

    /// Repeatedly calls [`undo`](Record::undo) or [`redo`](Record::redo) until
    /// `head` entries are applied.
    ///
    /// # Errors
    /// Fails with [`Error::OutOfRange`] without touching the target if `head` is
    /// past the end of the log. If a step fails the error is returned and the
    /// record stays at the last position that was reached.
    pub fn go_to(&mut self, target: &mut C::Target, head: usize) -> Result<(), Error<C::Error>> {
        self.check().map_err(Error::Corrupted)?;
        if head > self.len() {
            return Err(Error::OutOfRange {
                head,
                len: self.len(),
            });
        }
        while self.head > head {
            self.undo(target)?;
        }
        while self.head < head {
            self.redo(target)?;
        }
        Ok(())
    }

    /// Reverts the changes done to the target since the saved state.
    ///
    /// Does nothing if there is no saved state in the record.
    pub fn revert_to_saved(&mut self, target: &mut C::Target) -> Result<(), Error<C::Error>> {
        match self.saved {
            Some(saved) => self.go_to(target, saved),
            None => self.check().map_err(Error::Corrupted),
        }
    }

    /// Goes back or forward in the record to the position that was current at `to`.
    ///
    /// Entries submitted at or before `to` end up applied and later entries end
    /// up undone.
    #[cfg(feature = "chrono")]
    pub fn time_travel(
        &mut self,
        target: &mut C::Target,
        to: &DateTime<Utc>,
    ) -> Result<(), Error<C::Error>> {
        let head = self.entries.partition_point(|e| e.timestamp() <= *to);
        self.go_to(target, head)
    }
}

impl<C: fmt::Display, S> Record<C, S> {
    /// Returns the string of the command which will be undone
    /// in the next call to [`undo`](Record::undo).
    pub fn undo_text(&self) -> Option<String> {
        self.cursor().and_then(|i| self.text(i))
    }

    /// Returns the string of the command which will be redone
    /// in the next call to [`redo`](Record::redo).
    pub fn redo_text(&self) -> Option<String> {
        self.text(self.head)
    }

    fn text(&self, i: usize) -> Option<String> {
        self.entries.get(i).map(|e| e.to_string())
    }
}

impl<C> Default for Record<C> {
    fn default() -> Record<C> {
        Record::new()
    }
}

impl<C: fmt::Debug, S: fmt::Debug> fmt::Debug for Record<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Record")
            .field("entries", &self.entries)
            .field("limit", &self.limit)
            .field("head", &self.head)
            .field("saved", &self.saved)
            .field("fault", &self.fault)
            .field("socket", &self.socket)
            .finish()
    }
}

// Accessors for the sibling modules that need to rewind a submit.
impl<C, S> Record<C, S> {
    pub(crate) fn saved(&self) -> Option<usize> {
        self.saved
    }

    pub(crate) fn restore(&mut self, pushed: Pushed<C>, saved: Option<usize>) {
        let Pushed { mut tail, evicted } = pushed;
        self.entries.pop_back();
        if let Some(evicted) = evicted {
            self.entries.push_front(evicted);
            self.head += 1;
        }
        self.entries.append(&mut tail);
        self.saved = saved;
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[derive(Debug)]
    struct Push(char);

    impl Command for Push {
        type Target = String;
        type Error = &'static str;

        fn apply(&mut self, s: &mut String) -> Result<(), &'static str> {
            s.push(self.0);
            Ok(())
        }

        fn revert(&mut self, s: &mut String) -> Result<(), &'static str> {
            self.0 = s.pop().ok_or("s is empty")?;
            Ok(())
        }
    }

    #[test]
    fn cursor_bounds() {
        let mut target = String::new();
        let mut record = Record::new();
        assert_eq!(record.cursor(), None);
        record.submit(&mut target, Push('a')).unwrap();
        record.submit(&mut target, Push('b')).unwrap();
        assert_eq!(record.cursor(), Some(1));
        assert!(record.can_undo());
        assert!(!record.can_redo());
        record.undo(&mut target).unwrap();
        assert_eq!(record.cursor(), Some(0));
        assert!(record.can_redo());
        record.undo(&mut target).unwrap();
        assert_eq!(record.cursor(), None);
        assert!(!record.can_undo());
    }

    #[test]
    fn nothing_to_undo_is_idempotent() {
        let mut target = String::from("x");
        let mut record: Record<Push> = Record::new();
        for _ in 0..3 {
            assert_eq!(record.undo(&mut target), Err(UndoError::NothingToUndo));
        }
        assert_eq!(target, "x");
        assert!(!record.is_faulted());
    }

    #[test]
    fn submit_truncates() {
        let mut target = String::new();
        let mut record = Record::new();
        record.submit(&mut target, Push('a')).unwrap();
        record.submit(&mut target, Push('b')).unwrap();
        record.submit(&mut target, Push('c')).unwrap();
        record.undo(&mut target).unwrap();
        record.undo(&mut target).unwrap();
        record.submit(&mut target, Push('d')).unwrap();
        assert_eq!(target, "ad");
        assert_eq!(record.len(), 2);
        assert_eq!(record.redo(&mut target), Err(RedoError::NothingToRedo));
        assert_eq!(target, "ad");
    }

    #[test]
    fn limit() {
        let mut target = String::new();
        let mut record = Record::builder().limit(2).build();
        record.submit(&mut target, Push('a')).unwrap();
        record.submit(&mut target, Push('b')).unwrap();
        record.submit(&mut target, Push('c')).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.head(), 2);
        record.undo(&mut target).unwrap();
        record.undo(&mut target).unwrap();
        assert_eq!(target, "a");
        assert_eq!(record.undo(&mut target), Err(UndoError::NothingToUndo));
    }

    #[test]
    fn saved_marker_follows_eviction() {
        let mut target = String::new();
        let mut record = Record::builder().limit(2).build();
        record.submit(&mut target, Push('a')).unwrap();
        record.set_saved(true);
        record.submit(&mut target, Push('b')).unwrap();
        record.submit(&mut target, Push('c')).unwrap();
        assert_eq!(record.saved(), Some(0));
        record.undo(&mut target).unwrap();
        record.undo(&mut target).unwrap();
        assert_eq!(target, "a");
        assert!(record.is_saved());

        let mut target = String::new();
        let mut record = Record::builder().limit(2).build();
        assert!(record.is_saved());
        record.submit(&mut target, Push('a')).unwrap();
        record.submit(&mut target, Push('b')).unwrap();
        record.submit(&mut target, Push('c')).unwrap();
        assert_eq!(record.saved(), None);
        record.go_to(&mut target, 0).unwrap();
        assert_eq!(target, "a");
        assert!(!record.is_saved());
    }

    #[test]
    fn capacity() {
        let mut record: Record<Push> = Record::builder().capacity(4).build();
        assert!(record.capacity() >= 4);
        record.reserve(16);
        assert!(record.capacity() >= 16);
        record.shrink_to_fit();
        assert!(record.is_empty());
    }

    #[test]
    fn saved() {
        let mut target = String::new();
        let mut record = Record::new();
        record.submit(&mut target, Push('a')).unwrap();
        record.set_saved(true);
        record.submit(&mut target, Push('b')).unwrap();
        assert!(!record.is_saved());
        record.undo(&mut target).unwrap();
        assert!(record.is_saved());
        record.undo(&mut target).unwrap();
        record.submit(&mut target, Push('c')).unwrap();
        record.undo(&mut target).unwrap();
        record.redo(&mut target).unwrap();
        assert!(!record.is_saved());
    }

    #[test]
    fn go_to() {
        let mut target = String::new();
        let mut record = Record::new();
        record.submit(&mut target, Push('a')).unwrap();
        record.submit(&mut target, Push('b')).unwrap();
        record.submit(&mut target, Push('c')).unwrap();
        record.set_saved(true);
        record.go_to(&mut target, 1).unwrap();
        assert_eq!(target, "a");
        assert_eq!(
            record.go_to(&mut target, 4),
            Err(Error::OutOfRange { head: 4, len: 3 })
        );
        assert_eq!(target, "a");
        record.revert_to_saved(&mut target).unwrap();
        assert_eq!(target, "abc");
        assert!(record.is_saved());
    }

    #[test]
    fn undo_text() {
        struct Named(&'static str);

        impl std::fmt::Display for Named {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str(self.0)
            }
        }

        impl Command for Named {
            type Target = ();
            type Error = ();

            fn apply(&mut self, _: &mut ()) -> Result<(), ()> {
                Ok(())
            }

            fn revert(&mut self, _: &mut ()) -> Result<(), ()> {
                Ok(())
            }
        }

        let mut record = Record::new();
        record.submit(&mut (), Named("first")).unwrap();
        record.submit(&mut (), Named("second")).unwrap();
        record.undo(&mut ()).unwrap();
        assert_eq!(record.undo_text().as_deref(), Some("first"));
        assert_eq!(record.redo_text().as_deref(), Some("second"));
    }

    #[test]
    fn dyn_command() {
        let mut target = String::new();
        let mut record: Record<Box<dyn Command<Target = String, Error = &'static str>>> =
            Record::default();
        record.submit(&mut target, Box::new(Push('a'))).unwrap();
        record.submit(&mut target, Box::new(Push('b'))).unwrap();
        record.undo(&mut target).unwrap();
        assert_eq!(target, "a");
    }
}
