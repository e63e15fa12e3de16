use linear_undo::{Command, Fault, Record, RedoError, Set, Signal, SubmitError, UndoError};
use std::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Model {
    learning_rate: f64,
}

fn learning_rate(lr: f64) -> Set<Model, f64> {
    Set::field(|m: &mut Model| &mut m.learning_rate, lr)
}

#[test]
fn learning_rate_walkthrough() {
    let mut model = Model {
        learning_rate: 0.01,
    };
    let mut record = Record::new();
    record.submit(&mut model, learning_rate(0.001)).unwrap();
    assert_eq!(model.learning_rate, 0.001);
    record.submit(&mut model, learning_rate(0.0001)).unwrap();
    assert_eq!(model.learning_rate, 0.0001);

    record.undo(&mut model).unwrap();
    assert_eq!(model.learning_rate, 0.001);
    record.undo(&mut model).unwrap();
    assert_eq!(model.learning_rate, 0.01);
    assert_eq!(record.undo(&mut model), Err(UndoError::NothingToUndo));
    assert_eq!(model.learning_rate, 0.01);

    record.redo(&mut model).unwrap();
    assert_eq!(model.learning_rate, 0.001);
    record.redo(&mut model).unwrap();
    assert_eq!(model.learning_rate, 0.0001);
    assert_eq!(record.redo(&mut model), Err(RedoError::NothingToRedo));
    assert_eq!(model.learning_rate, 0.0001);
}

#[test]
fn submit_discards_undone_entries() {
    let mut model = Model {
        learning_rate: 0.01,
    };
    let mut record = Record::new();
    record.submit(&mut model, learning_rate(0.001)).unwrap();
    record.submit(&mut model, learning_rate(0.0001)).unwrap();
    record.undo(&mut model).unwrap();
    assert_eq!(model.learning_rate, 0.001);
    assert!(record.can_redo());

    record.submit(&mut model, learning_rate(0.5)).unwrap();
    assert_eq!(model.learning_rate, 0.5);
    assert_eq!(record.redo(&mut model), Err(RedoError::NothingToRedo));
    assert_eq!(model.learning_rate, 0.5);
    assert_eq!(record.len(), 2);

    record.undo(&mut model).unwrap();
    record.undo(&mut model).unwrap();
    assert_eq!(model.learning_rate, 0.01);
}

#[test]
fn redo_after_submit_fails() {
    let mut target = 0;
    let mut record = Record::new();
    record.submit(&mut target, Set::new(1)).unwrap();
    assert_eq!(record.redo(&mut target), Err(RedoError::NothingToRedo));
    assert_eq!(target, 1);
}

#[test]
fn rejected_submit_leaves_record_untouched() {
    let mut target = 1;
    let mut record = Record::new();
    record.submit(&mut target, Set::new(2)).unwrap();
    record.submit(&mut target, Set::new(3)).unwrap();
    record.undo(&mut target).unwrap();

    let result = record.submit(&mut target, Set::new(9).with_previous(8));
    assert!(matches!(result, Err(SubmitError::Rejected(_))));
    assert_eq!(target, 2);
    assert_eq!(record.len(), 2);
    assert_eq!(record.cursor(), Some(0));
    record.redo(&mut target).unwrap();
    assert_eq!(target, 3);
}

/// Reverts fail whenever `fail` is set on the target.
struct Flaky;

#[derive(Default)]
struct Counter {
    value: i32,
    fail: bool,
}

impl Command for Flaky {
    type Target = Counter;
    type Error = &'static str;

    fn apply(&mut self, c: &mut Counter) -> Result<(), &'static str> {
        if c.fail {
            return Err("apply refused");
        }
        c.value += 1;
        Ok(())
    }

    fn revert(&mut self, c: &mut Counter) -> Result<(), &'static str> {
        if c.fail {
            return Err("revert refused");
        }
        c.value -= 1;
        Ok(())
    }
}

#[test]
fn failed_undo_latches_fault() {
    let mut counter = Counter::default();
    let mut record = Record::new();
    record.submit(&mut counter, Flaky).unwrap();
    record.submit(&mut counter, Flaky).unwrap();

    counter.fail = true;
    let fault = Fault::Undo { index: 1 };
    assert_eq!(
        record.undo(&mut counter),
        Err(UndoError::Faulted {
            fault,
            source: "revert refused"
        })
    );
    assert_eq!(record.cursor(), Some(1));
    assert_eq!(record.fault(), Some(fault));

    counter.fail = false;
    assert_eq!(record.undo(&mut counter), Err(UndoError::Corrupted(fault)));
    assert_eq!(record.redo(&mut counter), Err(RedoError::Corrupted(fault)));
    assert_eq!(
        record.submit(&mut counter, Flaky),
        Err(SubmitError::Corrupted(fault))
    );
    assert!(!record.can_undo());
    assert_eq!(counter.value, 2);

    record.reset();
    assert!(!record.is_faulted());
    assert!(record.is_empty());
    record.submit(&mut counter, Flaky).unwrap();
    record.undo(&mut counter).unwrap();
    assert_eq!(counter.value, 2);
}

#[test]
fn failed_redo_latches_fault() {
    let mut counter = Counter::default();
    let mut record = Record::new();
    record.submit(&mut counter, Flaky).unwrap();
    record.undo(&mut counter).unwrap();

    counter.fail = true;
    let err = record.redo(&mut counter).unwrap_err();
    assert_eq!(
        err,
        RedoError::Faulted {
            fault: Fault::Redo { index: 0 },
            source: "apply refused"
        }
    );
    assert_eq!(record.cursor(), None);
    assert_eq!(counter.value, 0);
}

#[test]
fn signals_once_per_successful_call() {
    let (sender, receiver) = mpsc::channel();
    let mut target = 0;
    let mut record = Record::builder().connect(sender).build();

    record.submit(&mut target, Set::new(1)).unwrap();
    record.submit(&mut target, Set::new(2)).unwrap();
    record.undo(&mut target).unwrap();
    record.submit(&mut target, Set::new(3)).unwrap();
    assert!(record.redo(&mut target).is_err());
    assert!(record
        .submit(&mut target, Set::new(5).with_previous(4))
        .is_err());
    record.set_saved(true);
    record.set_saved(true);
    record.reset();

    let signals: Vec<_> = receiver.try_iter().collect();
    assert_eq!(
        signals,
        [
            Signal::Submit {
                head: 1,
                discarded: 0
            },
            Signal::Submit {
                head: 2,
                discarded: 0
            },
            Signal::Undo { head: 1 },
            Signal::Submit {
                head: 2,
                discarded: 1
            },
            Signal::Saved(true),
            Signal::Reset,
        ]
    );
}

#[test]
fn signal_after_commit() {
    let mut target = 0;
    let mut seen = Vec::new();
    {
        let mut record = Record::builder()
            .connect(|signal: Signal| seen.push(signal))
            .build();
        record.submit(&mut target, Set::new(1)).unwrap();
        record.undo(&mut target).unwrap();
    }
    assert_eq!(
        seen,
        [
            Signal::Submit {
                head: 1,
                discarded: 0
            },
            Signal::Undo { head: 0 }
        ]
    );
}

#[test]
fn entries() {
    let mut target = 0;
    let mut record = Record::new();
    record.submit(&mut target, Set::new(1)).unwrap();
    record.submit(&mut target, Set::new(2)).unwrap();
    let values: Vec<_> = record.entries().map(|e| *e.get().value()).collect();
    assert_eq!(values, [1, 2]);
    assert_eq!(record.entries().len(), 2);
    let previous: Vec<_> = record
        .entries()
        .rev()
        .map(|e| e.get().previous().copied())
        .collect();
    assert_eq!(previous, [Some(1), Some(0)]);
}

#[cfg(feature = "chrono")]
#[test]
fn time_travel() {
    use chrono::Utc;
    use std::thread;
    use std::time::Duration;

    let mut target = 0;
    let mut record = Record::new();
    record.submit(&mut target, Set::new(1)).unwrap();
    thread::sleep(Duration::from_millis(5));
    let between = Utc::now();
    thread::sleep(Duration::from_millis(5));
    record.submit(&mut target, Set::new(2)).unwrap();

    record.time_travel(&mut target, &between).unwrap();
    assert_eq!(target, 1);
    record.time_travel(&mut target, &Utc::now()).unwrap();
    assert_eq!(target, 2);
}
