use super::{Pushed, Queue};
use crate::{Command, Error, Record, Slot};
use tracing::debug;

#[derive(Debug)]
pub(super) enum CheckpointAction<C> {
    Submit(Option<usize>, Pushed<C>),
    Undo,
    Redo,
}

/// Wraps a record and gives it checkpoint functionality.
///
/// Actions are performed right away, but can all be rolled back by
/// [`cancel`](Checkpoint::cancel), including the entries a submit discarded.
/// Queues and checkpoints made from a checkpoint hand what they did to it
/// when committed, so canceling the outer one rolls that back too.
///
/// # Examples
/// ```
/// # use linear_undo::{Record, Set};
/// let mut target = 0;
/// let mut record = Record::new();
/// record.submit(&mut target, Set::new(1)).unwrap();
/// record.undo(&mut target).unwrap();
///
/// let mut cp = record.checkpoint();
/// cp.submit(&mut target, Set::new(2)).unwrap();
/// assert_eq!(target, 2);
/// cp.cancel(&mut target).unwrap();
/// assert_eq!(target, 0);
///
/// record.redo(&mut target).unwrap();
/// assert_eq!(target, 1);
/// ```
#[derive(Debug)]
pub struct Checkpoint<'a, C, S> {
    record: &'a mut Record<C, S>,
    actions: Vec<CheckpointAction<C>>,
    parent: Option<&'a mut Vec<CheckpointAction<C>>>,
}

impl<C: Command, S: Slot> Checkpoint<'_, C, S> {
    /// Calls the [`Record::submit`] method.
    pub fn submit(&mut self, target: &mut C::Target, command: C) -> Result<(), Error<C::Error>> {
        let saved = self.record.saved();
        let pushed = self.record.push(target, command)?;
        self.actions.push(CheckpointAction::Submit(saved, pushed));
        Ok(())
    }

    /// Calls the [`Record::undo`] method.
    pub fn undo(&mut self, target: &mut C::Target) -> Result<(), Error<C::Error>> {
        self.record.undo(target)?;
        self.actions.push(CheckpointAction::Undo);
        Ok(())
    }

    /// Calls the [`Record::redo`] method.
    pub fn redo(&mut self, target: &mut C::Target) -> Result<(), Error<C::Error>> {
        self.record.redo(target)?;
        self.actions.push(CheckpointAction::Redo);
        Ok(())
    }

    /// Commits the changes and consumes the checkpoint.
    pub fn commit(self) {
        if let Some(parent) = self.parent {
            parent.extend(self.actions);
        }
    }

    /// Cancels the changes and consumes the checkpoint.
    ///
    /// # Errors
    /// If an error occurs when canceling the changes, the error is returned
    /// and the remaining actions are not canceled.
    pub fn cancel(self, target: &mut C::Target) -> Result<(), Error<C::Error>> {
        debug!(actions = self.actions.len(), "canceling checkpoint");
        for action in self.actions.into_iter().rev() {
            match action {
                CheckpointAction::Submit(saved, pushed) => {
                    self.record.undo(target)?;
                    self.record.restore(pushed, saved);
                }
                CheckpointAction::Undo => self.record.redo(target)?,
                CheckpointAction::Redo => self.record.undo(target)?,
            }
        }
        Ok(())
    }

    /// Returns a queue that reports to this checkpoint when committed.
    pub fn queue(&mut self) -> Queue<C, S> {
        Queue::with_log(&mut *self.record, &mut self.actions)
    }

    /// Returns a checkpoint that reports to this checkpoint when committed.
    pub fn checkpoint(&mut self) -> Checkpoint<C, S> {
        Checkpoint::with_parent(&mut *self.record, Some(&mut self.actions))
    }
}

impl<'a, C, S> Checkpoint<'a, C, S> {
    pub(super) fn with_parent(
        record: &'a mut Record<C, S>,
        parent: Option<&'a mut Vec<CheckpointAction<C>>>,
    ) -> Self {
        Checkpoint {
            record,
            actions: Vec::new(),
            parent,
        }
    }
}

impl<'a, C, S> From<&'a mut Record<C, S>> for Checkpoint<'a, C, S> {
    fn from(record: &'a mut Record<C, S>) -> Self {
        Checkpoint::with_parent(record, None)
    }
}
