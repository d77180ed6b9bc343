//! Common error type for modem and HTTP operations

/// A common error type for modem and HTTP operations.
///
/// This enum defines the errors that can occur when driving the modem or
/// issuing an HTTP request. It is designed to be simple and portable for
/// `no_std` environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A networked operation was attempted before [`init`](crate::modem::Modem::init) succeeded.
    NotInitialized,
    /// The modem reports no WiFi association.
    NotJoined,
    /// The modem answered a command with the `ERROR` marker.
    Rejected,
    /// The deadline elapsed before the expected marker or `ERROR` was seen.
    Timeout,
    /// An error occurred while writing to the serial port.
    WriteError,
    /// An error occurred while reading from the serial port.
    ReadError,
    /// A fixed-capacity buffer was exceeded while composing a command or request.
    BufferOverflow,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NotInitialized => defmt::write!(f, "NotInitialized"),
            Error::NotJoined => defmt::write!(f, "NotJoined"),
            Error::Rejected => defmt::write!(f, "Rejected"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
        }
    }
}
