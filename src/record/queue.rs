use super::checkpoint::CheckpointAction;
use super::Checkpoint;
use crate::{Command, Error, Record, Slot};

#[derive(Debug)]
enum QueueAction<C> {
    Submit(C),
    Undo,
    Redo,
}

/// Wraps a record and gives it batch queue functionality.
///
/// Nothing touches the target until the queue is committed.
///
/// # Examples
/// ```
/// # use linear_undo::{Record, Set};
/// let mut target = 0;
/// let mut record = Record::new();
/// let mut queue = record.queue();
///
/// queue.submit(Set::new(1));
/// queue.submit(Set::new(2));
/// queue.undo();
/// assert_eq!(target, 0);
///
/// queue.commit(&mut target).unwrap();
/// assert_eq!(target, 1);
/// ```
#[derive(Debug)]
pub struct Queue<'a, C, S> {
    record: &'a mut Record<C, S>,
    actions: Vec<QueueAction<C>>,
    log: Option<&'a mut Vec<CheckpointAction<C>>>,
}

impl<C: Command, S: Slot> Queue<'_, C, S> {
    /// Queues a `submit` action.
    pub fn submit(&mut self, command: C) {
        self.actions.push(QueueAction::Submit(command));
    }

    /// Queues an `undo` action.
    pub fn undo(&mut self) {
        self.actions.push(QueueAction::Undo);
    }

    /// Queues a `redo` action.
    pub fn redo(&mut self) {
        self.actions.push(QueueAction::Redo);
    }

    /// Performs the queued actions in order.
    ///
    /// # Errors
    /// Stops at the first action that fails and returns its error.
    /// Actions performed before it are kept.
    pub fn commit(self, target: &mut C::Target) -> Result<(), Error<C::Error>> {
        let Queue {
            record,
            actions,
            mut log,
        } = self;
        for action in actions {
            let done = match action {
                QueueAction::Submit(command) => {
                    let saved = record.saved();
                    let pushed = record.push(target, command)?;
                    CheckpointAction::Submit(saved, pushed)
                }
                QueueAction::Undo => {
                    record.undo(target)?;
                    CheckpointAction::Undo
                }
                QueueAction::Redo => {
                    record.redo(target)?;
                    CheckpointAction::Redo
                }
            };
            if let Some(log) = log.as_mut() {
                log.push(done);
            }
        }
        Ok(())
    }

    /// Cancels the queued actions.
    pub fn cancel(self) {}

    /// Returns a queue.
    pub fn queue(&mut self) -> Queue<C, S> {
        Queue {
            record: &mut *self.record,
            actions: Vec::new(),
            log: self.log.as_deref_mut(),
        }
    }

    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<C, S> {
        Checkpoint::with_parent(&mut *self.record, self.log.as_deref_mut())
    }
}

impl<'a, C, S> Queue<'a, C, S> {
    pub(super) fn with_log(
        record: &'a mut Record<C, S>,
        log: &'a mut Vec<CheckpointAction<C>>,
    ) -> Self {
        Queue {
            record,
            actions: Vec::new(),
            log: Some(log),
        }
    }
}

impl<'a, C, S> From<&'a mut Record<C, S>> for Queue<'a, C, S> {
    fn from(record: &'a mut Record<C, S>) -> Self {
        Queue {
            record,
            actions: Vec::new(),
            log: None,
        }
    }
}
