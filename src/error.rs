//! Error types returned by the record.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Describes why a record stopped accepting operations.
///
/// A fault is latched when a command fails to revert during an undo or fails to
/// re-apply during a redo. The true state of the target is then unknown, so every
/// following operation fails with the same fault until the record is reset.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Error, Hash, Eq, PartialEq)]
pub enum Fault {
    /// The entry at `index` failed to revert.
    #[error("history corrupted: entry {index} failed to revert")]
    Undo {
        /// Position of the entry in the log.
        index: usize,
    },
    /// The entry at `index` failed to re-apply.
    #[error("history corrupted: entry {index} failed to re-apply")]
    Redo {
        /// Position of the entry in the log.
        index: usize,
    },
    /// A command panicked while a [`Shared`](crate::Shared) handle was locked.
    #[error("history corrupted: a command panicked while the history was locked")]
    Poisoned,
}

/// The error returned by [`Record::submit`](crate::Record::submit).
///
/// A rejected submit leaves the log and cursor as they were before the call.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SubmitError<E> {
    /// The command failed to apply and was not recorded.
    #[error("command failed to apply")]
    Rejected(#[source] E),
    /// The record is faulted.
    #[error(transparent)]
    Corrupted(Fault),
}

/// The error returned by [`Record::undo`](crate::Record::undo).
#[derive(Debug, Error, Eq, PartialEq)]
pub enum UndoError<E> {
    /// The cursor is before the first entry.
    #[error("nothing to undo")]
    NothingToUndo,
    /// The command failed to revert and the record latched `fault`.
    #[error("{fault}")]
    Faulted {
        /// The fault now latched in the record.
        fault: Fault,
        /// The error returned by the command.
        #[source]
        source: E,
    },
    /// The record was already faulted.
    #[error(transparent)]
    Corrupted(Fault),
}

/// The error returned by [`Record::redo`](crate::Record::redo).
#[derive(Debug, Error, Eq, PartialEq)]
pub enum RedoError<E> {
    /// The cursor is at the last entry.
    #[error("nothing to redo")]
    NothingToRedo,
    /// The command failed to re-apply and the record latched `fault`.
    #[error("{fault}")]
    Faulted {
        /// The fault now latched in the record.
        fault: Fault,
        /// The error returned by the command.
        #[source]
        source: E,
    },
    /// The record was already faulted.
    #[error(transparent)]
    Corrupted(Fault),
}

/// The error returned by operations composed of several submits, undos, or redos.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum Error<E> {
    /// The cursor is before the first entry.
    #[error("nothing to undo")]
    NothingToUndo,
    /// The cursor is at the last entry.
    #[error("nothing to redo")]
    NothingToRedo,
    /// The requested position is past the end of the log.
    #[error("position {head} is out of range for a log of {len} entries")]
    OutOfRange {
        /// The requested position.
        head: usize,
        /// The number of entries in the log.
        len: usize,
    },
    /// A command failed to apply and was not recorded.
    #[error("command failed to apply")]
    Rejected(#[source] E),
    /// A command failed and the record latched `fault`.
    #[error("{fault}")]
    Faulted {
        /// The fault now latched in the record.
        fault: Fault,
        /// The error returned by the command.
        #[source]
        source: E,
    },
    /// The record was already faulted.
    #[error(transparent)]
    Corrupted(Fault),
}

impl<E> From<SubmitError<E>> for Error<E> {
    fn from(err: SubmitError<E>) -> Self {
        match err {
            SubmitError::Rejected(source) => Error::Rejected(source),
            SubmitError::Corrupted(fault) => Error::Corrupted(fault),
        }
    }
}

impl<E> From<UndoError<E>> for Error<E> {
    fn from(err: UndoError<E>) -> Self {
        match err {
            UndoError::NothingToUndo => Error::NothingToUndo,
            UndoError::Faulted { fault, source } => Error::Faulted { fault, source },
            UndoError::Corrupted(fault) => Error::Corrupted(fault),
        }
    }
}

impl<E> From<RedoError<E>> for Error<E> {
    fn from(err: RedoError<E>) -> Self {
        match err {
            RedoError::NothingToRedo => Error::NothingToRedo,
            RedoError::Faulted { fault, source } => Error::Faulted { fault, source },
            RedoError::Corrupted(fault) => Error::Corrupted(fault),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let fault = Fault::Undo { index: 2 };
        assert_eq!(fault.to_string(), "history corrupted: entry 2 failed to revert");
        let err: UndoError<&str> = UndoError::Corrupted(fault);
        assert_eq!(err.to_string(), fault.to_string());
        let err: Error<&str> = Error::OutOfRange { head: 4, len: 3 };
        assert_eq!(err.to_string(), "position 4 is out of range for a log of 3 entries");
    }

    #[test]
    fn into_error() {
        let err: Error<&str> = RedoError::NothingToRedo.into();
        assert_eq!(err, Error::NothingToRedo);
        let fault = Fault::Redo { index: 0 };
        let err: Error<&str> = RedoError::Faulted {
            fault,
            source: "drift",
        }
        .into();
        assert_eq!(
            err,
            Error::Faulted {
                fault,
                source: "drift"
            }
        );
    }
}
