use crate::Command;
use std::convert::Infallible;
use std::fmt::{self, Debug, Formatter};
use std::mem;

/// Command made from a function.
///
/// The revert functionality is provided by cloning the target before the
/// function is called, so it works for any change at the cost of a full copy.
///
/// # Examples
/// ```
/// # use linear_undo::{FromFn, Record};
/// fn push(c: char) -> FromFn<impl FnMut(&mut String), String> {
///     FromFn::new(move |s: &mut String| s.push(c))
/// }
///
/// let mut target = String::new();
/// let mut record = Record::new();
/// record.submit(&mut target, push('a')).unwrap();
/// record.submit(&mut target, push('b')).unwrap();
/// assert_eq!(target, "ab");
/// record.undo(&mut target).unwrap();
/// assert_eq!(target, "a");
/// record.redo(&mut target).unwrap();
/// assert_eq!(target, "ab");
/// ```
#[derive(Clone)]
pub struct FromFn<F, T> {
    f: F,
    target: Option<T>,
}

impl<F, T> FromFn<F, T> {
    /// Creates a new `FromFn` from `f`.
    pub fn new(f: F) -> Self {
        FromFn { f, target: None }
    }
}

impl<F, T> Command for FromFn<F, T>
where
    F: FnMut(&mut T),
    T: Clone,
{
    type Target = T;
    type Error = Infallible;

    fn apply(&mut self, target: &mut T) -> Result<(), Infallible> {
        self.target = Some(target.clone());
        (self.f)(target);
        Ok(())
    }

    fn revert(&mut self, target: &mut T) -> Result<(), Infallible> {
        if let Some(old) = self.target.as_mut() {
            mem::swap(old, target);
        }
        Ok(())
    }
}

impl<F, T: Debug> Debug for FromFn<F, T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("FromFn")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
