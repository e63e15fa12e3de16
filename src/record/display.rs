use crate::{Entry, Format, Record};
use std::fmt::{self, Write};

/// Configurable display formatting for the [`Record`].
///
/// Entries are listed newest first, each prefixed with the position it moves the
/// head to. Position `0` is the state before the first entry.
///
/// # Examples
/// ```
/// # use linear_undo::{Record, Set};
/// let mut target = 0;
/// let mut record = Record::new();
/// record.submit(&mut target, Set::new(1)).unwrap();
/// record.submit(&mut target, Set::new(2)).unwrap();
/// record.undo(&mut target).unwrap();
///
/// let mut display = record.display();
/// # #[cfg(feature = "colored")]
/// # display.colored(false);
/// let output = display.detailed(false).to_string();
/// assert!(output.contains("1 [HEAD]"));
/// assert!(output.contains("0 [SAVED]"));
/// ```
pub struct Display<'a, C, S> {
    record: &'a Record<C, S>,
    format: Format,
}

impl<C, S> Display<'_, C, S> {
    /// Show colored output (on by default).
    ///
    /// Requires the `colored` feature to be enabled.
    #[cfg(feature = "colored")]
    pub fn colored(&mut self, on: bool) -> &mut Self {
        self.format.colored = on;
        self
    }

    /// Show detailed output (on by default).
    pub fn detailed(&mut self, on: bool) -> &mut Self {
        self.format.detailed = on;
        self
    }

    /// Show the current position in the output (on by default).
    pub fn head(&mut self, on: bool) -> &mut Self {
        self.format.head = on;
        self
    }

    /// Show the saved position (on by default).
    pub fn saved(&mut self, on: bool) -> &mut Self {
        self.format.saved = on;
        self
    }
}

impl<C: fmt::Display, S> Display<'_, C, S> {
    fn fmt_list(
        &self,
        f: &mut fmt::Formatter,
        index: usize,
        entry: Option<&Entry<C>>,
    ) -> fmt::Result {
        self.format.index(f, index)?;

        #[cfg(feature = "chrono")]
        if let Some(entry) = entry {
            if self.format.detailed {
                self.format.timestamp(f, &entry.timestamp())?;
            }
        }

        self.format
            .labels(f, index, self.record.head(), self.record.saved())?;

        match entry {
            Some(entry) if self.format.detailed => {
                writeln!(f)?;
                self.format.message(f, entry)?;
            }
            Some(entry) => {
                f.write_char(' ')?;
                self.format.message(f, entry)?;
                writeln!(f)?;
            }
            None => writeln!(f)?,
        }
        Ok(())
    }
}

impl<'a, C, S> From<&'a Record<C, S>> for Display<'a, C, S> {
    fn from(record: &'a Record<C, S>) -> Self {
        Display {
            record,
            format: Format::default(),
        }
    }
}

impl<C: fmt::Display, S> fmt::Display for Display<'_, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, entry) in self.record.entries().enumerate().rev() {
            self.fmt_list(f, i + 1, Some(entry))?;
        }
        self.fmt_list(f, 0, None)
    }
}
