#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Plain settings for a [`Record`](crate::Record).
///
/// Hosts that keep their settings in a file can deserialize this with the
/// `serde` feature and hand it to [`Builder::config`](super::Builder::config).
/// Missing fields take their default values.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Config {
    /// Initial capacity of the log.
    pub capacity: usize,
    /// Maximum number of entries kept, unlimited if `None`.
    pub limit: Option<NonZeroUsize>,
    /// If the target starts in a saved state.
    pub saved: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            capacity: 0,
            limit: None,
            saved: true,
        }
    }
}
