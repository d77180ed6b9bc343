//! Marker-matched command/response engine.
//!
//! An AT command is one CRLF-terminated line; the reply is whatever bytes
//! trickle in afterwards. Completion is detected purely by substring: the
//! caller names an expected marker, and the engine scans the ENTIRE
//! accumulated buffer (not just the newest chunk) for either that marker or
//! the literal `ERROR`, bounded by a monotonic deadline. Timeout tuning and
//! buffer discipline carry all the correctness weight here.

use crate::error::Error;
use crate::transport::{Clock, Delay, SerialPort};

use super::Modem;

/// The failure marker every ESP-AT command may answer with.
pub const ERROR_MARKER: &str = "ERROR";

/// Pacing between polls while waiting on a command reply.
const COMMAND_POLL_MS: u32 = 10;

/// Outcome of one command/response cycle.
///
/// Distinguishes a modem rejection from a deadline expiry; callers that
/// only care about the collapsed boolean use
/// [`is_success`](CommandOutcome::is_success).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The expected marker appeared before `ERROR` and before the deadline.
    Success,
    /// The `ERROR` marker appeared first.
    Rejected,
    /// The deadline elapsed with neither marker observed.
    TimedOut,
}

impl CommandOutcome {
    /// The collapsed boolean view of the outcome.
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success)
    }

    /// Convert into a `Result` for `?`-style composition.
    pub fn ok(self) -> Result<(), Error> {
        match self {
            CommandOutcome::Success => Ok(()),
            CommandOutcome::Rejected => Err(Error::Rejected),
            CommandOutcome::TimedOut => Err(Error::Timeout),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandOutcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            CommandOutcome::Success => defmt::write!(f, "Success"),
            CommandOutcome::Rejected => defmt::write!(f, "Rejected"),
            CommandOutcome::TimedOut => defmt::write!(f, "TimedOut"),
        }
    }
}

impl<P: SerialPort, C: Clock, D: Delay> Modem<P, C, D> {
    /// Send one AT command and wait for its completion marker.
    ///
    /// Clears the receive buffer, discards any line backlog, then writes
    /// `command` followed by CRLF. With `expected == None` the command is
    /// fire-and-forget and succeeds immediately after the write. Otherwise
    /// the engine polls until `expected` is found (success), [`ERROR_MARKER`]
    /// is found (rejection), or `timeout_ms` elapses on the monotonic
    /// clock. Marker checks run before the deadline check, so a marker
    /// arriving on the final poll still counts.
    ///
    /// No retry happens here; retry policy belongs to the caller. Serial
    /// I/O failures surface as `Err`, never as an outcome.
    pub fn send_command(
        &mut self,
        command: &str,
        expected: Option<&str>,
        timeout_ms: u32,
    ) -> Result<CommandOutcome, Error> {
        self.rx.clear();
        self.drain_backlog()?;

        self.port
            .write(command.as_bytes())
            .map_err(|_| Error::WriteError)?;
        self.port.write(b"\r\n").map_err(|_| Error::WriteError)?;

        let Some(expected) = expected else {
            return Ok(CommandOutcome::Success);
        };

        let deadline = self.clock.now_ms() + u64::from(timeout_ms);
        loop {
            self.poll_into_rx()?;
            if find_slice(&self.rx, expected.as_bytes()).is_some() {
                return Ok(CommandOutcome::Success);
            }
            if find_slice(&self.rx, ERROR_MARKER.as_bytes()).is_some() {
                return Ok(CommandOutcome::Rejected);
            }
            if self.clock.now_ms() >= deadline {
                return Ok(CommandOutcome::TimedOut);
            }
            self.delay.delay_ms(COMMAND_POLL_MS);
        }
    }
}

/// Finds the first occurrence of a slice in another slice and returns its starting position.
pub(crate) fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
