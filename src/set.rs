use crate::Command;
use std::fmt::{self, Debug, Display, Formatter};
use thiserror::Error;

/// The error returned by [`Set`] when the target does not hold the value it expects.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("target is out of sync: expected {expected}, found {found}")]
pub struct Inconsistent {
    /// The value the command expected, formatted with `Debug`.
    pub expected: String,
    /// The value that was found, formatted with `Debug`.
    pub found: String,
}

impl Inconsistent {
    fn new(expected: &impl Debug, found: &impl Debug) -> Inconsistent {
        Inconsistent {
            expected: format!("{expected:?}"),
            found: format!("{found:?}"),
        }
    }
}

/// Assigns a value to the target, or to a part of it.
///
/// The previous value is remembered the first time the command is applied, unless
/// it was given up front with [`with_previous`](Set::with_previous). Every later
/// apply and revert checks that the target still holds what the command left
/// there, and fails with [`Inconsistent`] otherwise.
///
/// # Examples
/// ```
/// # use linear_undo::{Record, Set};
/// struct Model {
///     learning_rate: f64,
/// }
///
/// let mut model = Model { learning_rate: 0.01 };
/// let mut record = Record::new();
/// record
///     .submit(&mut model, Set::field(|m: &mut Model| &mut m.learning_rate, 0.001))
///     .unwrap();
/// assert_eq!(model.learning_rate, 0.001);
/// record.undo(&mut model).unwrap();
/// assert_eq!(model.learning_rate, 0.01);
/// ```
#[derive(Clone)]
pub struct Set<T, V = T> {
    project: fn(&mut T) -> &mut V,
    value: V,
    previous: Option<V>,
}

impl<V> Set<V, V> {
    /// Returns a command that replaces the whole target with `value`.
    pub fn new(value: V) -> Set<V, V> {
        Set::field(identity, value)
    }
}

impl<T, V> Set<T, V> {
    /// Returns a command that replaces the part of the target selected by
    /// `project` with `value`.
    pub fn field(project: fn(&mut T) -> &mut V, value: V) -> Set<T, V> {
        Set {
            project,
            value,
            previous: None,
        }
    }

    /// Sets the value the target is expected to hold before the first apply.
    pub fn with_previous(mut self, previous: V) -> Set<T, V> {
        self.previous = Some(previous);
        self
    }

    /// Returns the value the command assigns.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the value the command restores, if known.
    pub fn previous(&self) -> Option<&V> {
        self.previous.as_ref()
    }
}

fn identity<V>(value: &mut V) -> &mut V {
    value
}

// Two values that are not equal to themselves, like NaN, count as the same.
#[allow(clippy::eq_op)]
fn same<V: PartialEq>(a: &V, b: &V) -> bool {
    a == b || (a != a && b != b)
}

impl<T, V: Clone + PartialEq + Debug> Command for Set<T, V> {
    type Target = T;
    type Error = Inconsistent;

    fn apply(&mut self, target: &mut T) -> Result<(), Inconsistent> {
        let slot = (self.project)(target);
        match &self.previous {
            Some(previous) if !same(previous, &*slot) => {
                return Err(Inconsistent::new(previous, &*slot));
            }
            Some(_) => {}
            None => self.previous = Some(slot.clone()),
        }
        *slot = self.value.clone();
        Ok(())
    }

    fn revert(&mut self, target: &mut T) -> Result<(), Inconsistent> {
        let slot = (self.project)(target);
        if !same(&*slot, &self.value) {
            return Err(Inconsistent::new(&self.value, &*slot));
        }
        match &self.previous {
            Some(previous) => {
                *slot = previous.clone();
                Ok(())
            }
            None => Err(Inconsistent {
                expected: "an applied command".into(),
                found: "a command that was never applied".into(),
            }),
        }
    }
}

impl<T, V: Debug> Debug for Set<T, V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Set")
            .field("value", &self.value)
            .field("previous", &self.previous)
            .finish()
    }
}

impl<T, V: Debug> Display for Set<T, V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.previous {
            Some(previous) => write!(f, "set {previous:?} to {:?}", self.value),
            None => write!(f, "set to {:?}", self.value),
        }
    }
}
