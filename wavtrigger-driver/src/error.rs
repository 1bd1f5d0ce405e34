//! Encoder errors

use core::fmt;

/// Errors returned by [`WavTrigger`](crate::WavTrigger) operations
///
/// Out-of-range numbers are never an error; they are truncated to 16 bits.
/// The only failure is the transport refusing the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport could not be configured, written or flushed
    Transport(E),
}

impl<E> Error<E> {
    /// The underlying transport error
    pub fn into_transport(self) -> E {
        match self {
            Error::Transport(e) => e,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "serial transport error: {:?}", e),
        }
    }
}
