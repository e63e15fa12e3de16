//! Provides linear undo-redo functionality for reversible commands.
//!
//! It is an implementation of the command pattern, where all modifications are done
//! by creating commands that apply the modifications. Every command knows how to
//! revert the change it applies, and by submitting them to a [`Record`] it is easy
//! to apply, undo, and redo changes made to a target.
//!
//! The history is strictly linear: submitting a new command after one or more undos
//! permanently discards the undone commands.
//!
//! # Features
//!
//! * [`Command`] provides the base functionality for all commands.
//! * [`Record`] provides linear undo-redo functionality and owns the history log.
//! * [`Shared`] wraps a record and its target behind a lock so that it can be used
//!   from several threads, serializing every mutating call.
//! * [`Queue`] and [`Checkpoint`] extend a record with batch and transactional edits.
//! * A failing [`Command::revert`] or re-apply during undo or redo latches a [`Fault`].
//!   The record refuses further work until it is [`reset`](Record::reset).
//! * The target can be marked as saved and the record tracks whether it is still
//!   in the saved state.
//! * The amount of changes being tracked can be limited so only the `N` most recent
//!   changes are stored.
//! * Configurable display formatting is provided, colored when the `colored` feature
//!   is enabled.
//! * Time stamps and time travel are provided when the `chrono` feature is enabled.
//!
//! # Examples
//!
//! ```
//! use linear_undo::{Record, Set};
//!
//! let mut learning_rate = 0.01;
//! let mut record = Record::new();
//! record.submit(&mut learning_rate, Set::new(0.001)).unwrap();
//! record.submit(&mut learning_rate, Set::new(0.0001)).unwrap();
//! assert_eq!(learning_rate, 0.0001);
//! record.undo(&mut learning_rate).unwrap();
//! record.undo(&mut learning_rate).unwrap();
//! assert_eq!(learning_rate, 0.01);
//! assert!(record.undo(&mut learning_rate).is_err());
//! record.redo(&mut learning_rate).unwrap();
//! assert_eq!(learning_rate, 0.001);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod entry;
mod error;
mod format;
mod from_fn;
pub mod record;
mod set;
mod shared;
mod socket;

use self::format::Format;

pub use self::{
    entry::Entry,
    error::{Error, Fault, RedoError, SubmitError, UndoError},
    from_fn::FromFn,
    record::{Checkpoint, Config, Queue, Record},
    set::{Inconsistent, Set},
    shared::Shared,
    socket::{Signal, Slot},
};

/// Base functionality for all commands.
///
/// A command must be symmetric: calling [`apply`](Command::apply) and then
/// [`revert`](Command::revert) leaves the target exactly as it was, provided nothing
/// else touched it in between. When the target is not in the state the command
/// expects, it should return an error instead of mutating it.
pub trait Command {
    /// The target type.
    type Target;
    /// The error returned when the target is not in the expected state.
    type Error;

    /// Applies the command on the target.
    ///
    /// Called once when the command is submitted and again on every redo.
    fn apply(&mut self, target: &mut Self::Target) -> Result<(), Self::Error>;

    /// Restores the target as it was before the most recent [`apply`](Command::apply).
    fn revert(&mut self, target: &mut Self::Target) -> Result<(), Self::Error>;
}

impl<C: Command + ?Sized> Command for Box<C> {
    type Target = C::Target;
    type Error = C::Error;

    fn apply(&mut self, target: &mut Self::Target) -> Result<(), Self::Error> {
        (**self).apply(target)
    }

    fn revert(&mut self, target: &mut Self::Target) -> Result<(), Self::Error> {
        (**self).revert(target)
    }
}
