use super::Config;
use crate::socket::Socket;
use crate::Record;
use std::marker::PhantomData;
use std::num::NonZeroUsize;

/// Builder for a [`Record`].
///
/// # Examples
/// ```
/// # use linear_undo::{Record, Set, Signal};
/// # let mut target = 0;
/// let mut record = Record::builder()
///     .limit(100)
///     .capacity(100)
///     .connect(|s: Signal| { dbg!(s); })
///     .build();
/// # record.submit(&mut target, Set::new(1)).unwrap();
/// ```
#[derive(Debug)]
pub struct Builder<C, S = ()> {
    capacity: usize,
    limit: NonZeroUsize,
    saved: bool,
    socket: Socket<S>,
    pd: PhantomData<C>,
}

impl<C, S> Builder<C, S> {
    /// Sets the capacity for the record.
    pub fn capacity(mut self, capacity: usize) -> Builder<C, S> {
        self.capacity = capacity;
        self
    }

    /// Sets the `limit` of the record.
    ///
    /// # Panics
    /// Panics if `limit` is `0`.
    pub fn limit(mut self, limit: usize) -> Builder<C, S> {
        self.limit = NonZeroUsize::new(limit).expect("limit can not be `0`");
        self
    }

    /// Sets if the target is initially in a saved state.
    /// By default the target is in a saved state.
    pub fn saved(mut self, saved: bool) -> Builder<C, S> {
        self.saved = saved;
        self
    }

    /// Connects the slot.
    pub fn connect<T>(self, slot: T) -> Builder<C, T> {
        Builder {
            capacity: self.capacity,
            limit: self.limit,
            saved: self.saved,
            socket: Socket::new(slot),
            pd: PhantomData,
        }
    }

    /// Applies the settings in `config`.
    pub fn config(mut self, config: &Config) -> Builder<C, S> {
        self.capacity = config.capacity;
        self.limit = config.limit.unwrap_or(NonZeroUsize::MAX);
        self.saved = config.saved;
        self
    }

    /// Builds the record.
    pub fn build(self) -> Record<C, S> {
        Record::from_builder(self.capacity, self.limit, self.saved, self.socket)
    }
}

impl<C> Default for Builder<C> {
    fn default() -> Self {
        Builder {
            capacity: 0,
            limit: NonZeroUsize::MAX,
            saved: true,
            socket: Socket::default(),
            pd: PhantomData,
        }
    }
}

impl<C> From<&Config> for Builder<C> {
    fn from(config: &Config) -> Self {
        Builder::default().config(config)
    }
}
