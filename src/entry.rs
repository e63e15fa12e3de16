#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
use std::fmt::{self, Display, Formatter};

/// Wrapper around a command that contains additional metadata.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Entry<C> {
    command: C,
    #[cfg(feature = "chrono")]
    timestamp: DateTime<Utc>,
}

impl<C> Entry<C> {
    /// Returns the command.
    pub fn get(&self) -> &C {
        &self.command
    }

    /// Returns the time the command was submitted.
    #[cfg(feature = "chrono")]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub(crate) fn get_mut(&mut self) -> &mut C {
        &mut self.command
    }
}

impl<C> From<C> for Entry<C> {
    fn from(command: C) -> Self {
        Entry {
            command,
            #[cfg(feature = "chrono")]
            timestamp: Utc::now(),
        }
    }
}

impl<C: Display> Display for Entry<C> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        (&self.command as &dyn Display).fmt(f)
    }
}
