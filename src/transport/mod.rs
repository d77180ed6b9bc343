//! Host capability traits for embedded targets
//!
//! The driver never talks to hardware directly. The host environment
//! supplies three capabilities: a serial line with non-blocking reads, a
//! monotonic millisecond clock, and a cooperative delay used to pace the
//! polling loops. Implementations are typically thin wrappers over the
//! platform HAL; the integration tests implement them over in-memory
//! scripts.

#![deny(unsafe_code)]

/// Re-exports of the capability traits
pub mod prelude {
    pub use super::{Clock, Delay, SerialPort};
}

/// A half-duplex serial line attached to the modem.
pub trait SerialPort {
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Reconfigure the line parameters (baud rate).
    fn configure(&mut self, baud: u32) -> Result<(), Self::Error>;

    /// Write all bytes to the line.
    fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error>;

    /// Read whatever bytes are currently buffered, without blocking.
    ///
    /// Returns the number of bytes placed into `buf`; zero when nothing is
    /// pending. Must never wait for data to arrive.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// A monotonic millisecond clock.
///
/// Every deadline in the driver is measured against this clock, so it must
/// never move backwards. Wrap-around is not handled; a `u64` at millisecond
/// resolution outlives any device.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch.
    fn now_ms(&self) -> u64;
}

/// A cooperative delay used between polls of the serial line.
///
/// On bare-metal targets this is usually a busy-wait HAL delay; on hosted
/// targets it can yield to other work. The driver only relies on it to
/// pace its loops, never for timing accuracy.
pub trait Delay {
    /// Pause for approximately `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
