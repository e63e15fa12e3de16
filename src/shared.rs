//! A record and its target behind a single-writer lock.

use crate::{Command, Error, Fault, Record, RedoError, Slot, SubmitError, UndoError};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::warn;

struct Inner<C: Command, S> {
    record: Record<C, S>,
    target: C::Target,
}

/// A cloneable handle to a record and the target it edits.
///
/// Every mutating call holds the write lock for its whole body, so the truncation,
/// the command, and the cursor move of one call are never interleaved with another.
/// Queries take the read lock and see the cursor, the log, and the target as one
/// consistent state.
///
/// The slot is called while the write lock is held and must not call back into
/// the same handle.
///
/// # Examples
/// ```
/// # use linear_undo::{Set, Shared};
/// # use std::thread;
/// let shared = Shared::new(0);
/// let handles: Vec<_> = (1..=4)
///     .map(|i| {
///         let shared = shared.clone();
///         thread::spawn(move || shared.submit(Set::new(i)).unwrap())
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(shared.len(), 4);
/// for _ in 0..4 {
///     shared.undo().unwrap();
/// }
/// assert_eq!(shared.read(|target| *target), 0);
/// ```
pub struct Shared<C: Command, S = ()> {
    inner: Arc<RwLock<Inner<C, S>>>,
}

impl<C: Command> Shared<C> {
    /// Returns a new handle with an empty record.
    pub fn new(target: C::Target) -> Shared<C> {
        Shared::from_parts(Record::new(), target)
    }
}

impl<C: Command, S> Shared<C, S> {
    /// Returns a new handle from an existing record and the target it was used with.
    pub fn from_parts(record: Record<C, S>, target: C::Target) -> Shared<C, S> {
        Shared {
            inner: Arc::new(RwLock::new(Inner { record, target })),
        }
    }

    /// Returns the record and the target if this is the last handle.
    ///
    /// Otherwise the handle is given back unchanged.
    pub fn try_into_parts(self) -> Result<(Record<C, S>, C::Target), Shared<C, S>> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => {
                let inner = lock.into_inner().unwrap_or_else(PoisonError::into_inner);
                Ok((inner.record, inner.target))
            }
            Err(inner) => Err(Shared { inner }),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<C, S>> {
        match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                let mut guard = poisoned.into_inner();
                warn!("history lock poisoned");
                guard.record.latch(Fault::Poisoned);
                self.inner.clear_poison();
                guard
            }
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Inner<C, S>> {
        if self.inner.is_poisoned() {
            drop(self.write());
        }
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Calls `f` with shared access to the target.
    pub fn read<R>(&self, f: impl FnOnce(&C::Target) -> R) -> R {
        f(&self.read_guard().target)
    }

    /// Calls `f` with shared access to the record.
    pub fn inspect<R>(&self, f: impl FnOnce(&Record<C, S>) -> R) -> R {
        f(&self.read_guard().record)
    }

    /// Returns `true` if the record can undo.
    pub fn can_undo(&self) -> bool {
        self.read_guard().record.can_undo()
    }

    /// Returns `true` if the record can redo.
    pub fn can_redo(&self) -> bool {
        self.read_guard().record.can_redo()
    }

    /// Returns the index of the most recently applied entry,
    /// or `None` if no entry is applied.
    pub fn cursor(&self) -> Option<usize> {
        self.read_guard().record.cursor()
    }

    /// Returns the number of commands in the record.
    pub fn len(&self) -> usize {
        self.read_guard().record.len()
    }

    /// Returns `true` if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.read_guard().record.is_empty()
    }

    /// Returns the latched fault, if any.
    pub fn fault(&self) -> Option<Fault> {
        self.read_guard().record.fault()
    }
}

impl<C: Command, S: Slot> Shared<C, S> {
    /// Calls [`Record::submit`] under the write lock.
    pub fn submit(&self, command: C) -> Result<(), SubmitError<C::Error>> {
        let mut guard = self.write();
        let Inner { record, target } = &mut *guard;
        record.submit(target, command)
    }

    /// Calls [`Record::undo`] under the write lock.
    pub fn undo(&self) -> Result<(), UndoError<C::Error>> {
        let mut guard = self.write();
        let Inner { record, target } = &mut *guard;
        record.undo(target)
    }

    /// Calls [`Record::redo`] under the write lock.
    pub fn redo(&self) -> Result<(), RedoError<C::Error>> {
        let mut guard = self.write();
        let Inner { record, target } = &mut *guard;
        record.redo(target)
    }

    /// Calls [`Record::go_to`] under the write lock.
    pub fn go_to(&self, head: usize) -> Result<(), Error<C::Error>> {
        let mut guard = self.write();
        let Inner { record, target } = &mut *guard;
        record.go_to(target, head)
    }

    /// Calls [`Record::set_saved`] under the write lock.
    pub fn set_saved(&self, saved: bool) {
        self.write().record.set_saved(saved);
    }

    /// Replaces the target and resets the record.
    ///
    /// This is the way out of a faulted state: the caller supplies a target
    /// whose state is known, and the history starts over from it.
    pub fn reset(&self, target: C::Target) {
        let mut guard = self.write();
        guard.target = target;
        guard.record.reset();
    }
}

impl<C: Command, S> Clone for Shared<C, S> {
    fn clone(&self) -> Self {
        Shared {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Command, S> fmt::Debug for Shared<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let guard = self.read_guard();
        f.debug_struct("Shared")
            .field("len", &guard.record.len())
            .field("cursor", &guard.record.cursor())
            .field("fault", &guard.record.fault())
            .finish_non_exhaustive()
    }
}
