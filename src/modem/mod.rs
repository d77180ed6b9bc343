//! WiFi modem driver for ESP-AT class firmware.
//!
//! This module owns the serial exchange with the modem: a fixed-capacity
//! receive buffer, the command engine (see [`command`]), and the connection
//! lifecycle (reset, echo-off, station mode, WiFi association, socket
//! open/close).
//!
//! # Buffer discipline
//!
//! The modem gives no message framing, so correctness rests on one rule:
//! the receive buffer is cleared at the start of every command/response
//! cycle and is moved out wholesale when an HTTP exchange snapshots it.
//! Stale bytes from a prior exchange can therefore never satisfy a marker
//! match in a later one.
//!
//! # Usage
//!
//! ```rust,no_run
//! use atmodem::modem::Modem;
//! # use atmodem::transport::{SerialPort, Clock, Delay};
//! # struct MockPort;
//! # impl SerialPort for MockPort {
//! #     type Error = ();
//! #     fn configure(&mut self, _baud: u32) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _buf: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn read_available(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # struct MockClock;
//! # impl Clock for MockClock { fn now_ms(&self) -> u64 { 0 } }
//! # struct MockDelay;
//! # impl Delay for MockDelay { fn delay_ms(&mut self, _ms: u32) {} }
//!
//! let mut modem = Modem::new(MockPort, MockClock, MockDelay);
//! // modem.init()?;
//! // modem.join_wifi("ssid", "password")?;
//! ```

use core::fmt::Write as FmtWrite;

use heapless::{String, Vec};

use crate::error::Error;
use crate::transport::{Clock, Delay, SerialPort};

/// Command engine: marker-matched request/response over the serial line.
pub mod command;

pub use command::CommandOutcome;

/// Capacity of the receive buffer, in bytes.
///
/// Everything the modem sends during one exchange must fit here; bytes
/// beyond the capacity are dropped rather than wrapped.
pub const RX_BUFFER_SIZE: usize = 2048;

/// Baud rate the port is configured to during [`Modem::init`].
pub const DEFAULT_BAUD: u32 = 115_200;

/// Maximum length of a composed AT command line.
const CMD_BUFFER_SIZE: usize = 256;

/// Pacing between polls while collecting an HTTP response body.
const RESPONSE_POLL_MS: u32 = 200;

/// Transport type named in the socket-open command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    /// Plain TCP socket.
    Tcp,
    /// TLS socket terminated by the modem firmware (no local certificate
    /// validation).
    Ssl,
}

impl LinkType {
    fn as_str(self) -> &'static str {
        match self {
            LinkType::Tcp => "TCP",
            LinkType::Ssl => "SSL",
        }
    }
}

/// Driver for a serial-attached WiFi modem.
///
/// Owns the port, the monotonic clock, the cooperative delay, and the
/// receive buffer. Exactly one logical operation is in flight at a time;
/// the driver is single-threaded and never retries on its own.
pub struct Modem<P: SerialPort, C: Clock, D: Delay> {
    port: P,
    clock: C,
    delay: D,
    rx: Vec<u8, RX_BUFFER_SIZE>,
    initialized: bool,
}

impl<P: SerialPort, C: Clock, D: Delay> Modem<P, C, D> {
    /// Create a driver over the given host capabilities.
    ///
    /// The modem is not usable for networked operations until
    /// [`init`](Self::init) succeeds.
    pub fn new(port: P, clock: C, delay: D) -> Self {
        Self {
            port,
            clock,
            delay,
            rx: Vec::new(),
            initialized: false,
        }
    }

    /// Whether the reset/echo-off/station-mode sequence has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Reset the modem and put it into station mode.
    ///
    /// Reconfigures the line to [`DEFAULT_BAUD`], then runs three gated
    /// steps: `AT+RST` (expect `ready`), `ATE0` (expect `OK`),
    /// `AT+CWMODE=1` (expect `OK`). On any failure the driver is left
    /// uninitialized but may be re-attempted.
    pub fn init(&mut self) -> Result<(), Error> {
        self.initialized = false;
        self.port
            .configure(DEFAULT_BAUD)
            .map_err(|_| Error::WriteError)?;

        self.send_command("AT+RST", Some("ready"), 5_000)?.ok()?;
        self.send_command("ATE0", Some("OK"), 1_000)?.ok()?;
        self.send_command("AT+CWMODE=1", Some("OK"), 1_000)?.ok()?;

        self.initialized = true;
        Ok(())
    }

    /// Associate with an access point.
    ///
    /// Waits up to 20 seconds for the `WIFI GOT IP` marker. Re-joining
    /// while already associated is tolerated: the firmware repeats the
    /// marker.
    pub fn join_wifi(&mut self, ssid: &str, password: &str) -> Result<(), Error> {
        let mut cmd: String<CMD_BUFFER_SIZE> = String::new();
        write!(cmd, "AT+CWJAP=\"{ssid}\",\"{password}\"").map_err(|_| Error::BufferOverflow)?;
        self.send_command(&cmd, Some("WIFI GOT IP"), 20_000)?.ok()
    }

    /// Query whether the modem currently reports an association.
    ///
    /// Issues `AT+CWJAP?` and looks for the `+CWJAP:` echo. `Ok(false)`
    /// covers both "no AP" and an unresponsive modem; serial failures
    /// still surface as errors.
    pub fn is_wifi_connected(&mut self) -> Result<bool, Error> {
        Ok(self
            .send_command("AT+CWJAP?", Some("+CWJAP:"), 1_000)?
            .is_success())
    }

    /// Open a TCP or SSL socket to `host:port`.
    ///
    /// Waits up to 10 seconds for the `CONNECT` marker. Hostname
    /// resolution happens inside the modem firmware.
    pub fn open_socket(&mut self, link: LinkType, host: &str, port: u16) -> Result<(), Error> {
        let mut cmd: String<CMD_BUFFER_SIZE> = String::new();
        write!(cmd, "AT+CIPSTART=\"{}\",\"{host}\",{port}", link.as_str())
            .map_err(|_| Error::BufferOverflow)?;
        self.send_command(&cmd, Some("CONNECT"), 10_000)?.ok()
    }

    /// Announce an outgoing payload of exactly `len` bytes.
    ///
    /// Issues `AT+CIPSEND=<len>` and waits up to 5 seconds for the `>`
    /// send-ready prompt. The payload itself must follow via
    /// [`write_raw`](Self::write_raw).
    pub fn announce_send(&mut self, len: usize) -> Result<(), Error> {
        let mut cmd: String<32> = String::new();
        write!(cmd, "AT+CIPSEND={len}").map_err(|_| Error::BufferOverflow)?;
        self.send_command(&cmd, Some(">"), 5_000)?.ok()
    }

    /// Close the current socket, fire-and-forget.
    ///
    /// The modem's reply is not awaited; a close racing a remote reset is
    /// harmless.
    pub fn close_socket(&mut self) -> Result<(), Error> {
        self.send_command("AT+CIPCLOSE", None, 0).map(|_| ())
    }

    /// Write bytes straight to the line, bypassing the command engine.
    ///
    /// Used for the HTTP request payload after the send-ready prompt,
    /// where no line-based marker matching applies.
    pub(crate) fn write_raw(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.port.write(bytes).map_err(|_| Error::WriteError)
    }

    /// Accumulate inbound bytes for a fixed window.
    ///
    /// The receive buffer is NOT cleared: at call time it holds only bytes
    /// that arrived after the send-ready prompt. There is no completion
    /// detector; the window elapsing is the only termination signal, so a
    /// shorter window risks truncated bodies.
    pub(crate) fn collect_for(&mut self, window_ms: u32) -> Result<(), Error> {
        let deadline = self.clock.now_ms() + u64::from(window_ms);
        while self.clock.now_ms() < deadline {
            self.poll_into_rx()?;
            self.delay.delay_ms(RESPONSE_POLL_MS);
        }
        Ok(())
    }

    /// Move the accumulated capture out, leaving the buffer empty.
    pub(crate) fn take_capture(&mut self) -> Vec<u8, RX_BUFFER_SIZE> {
        core::mem::take(&mut self.rx)
    }

    /// Append every currently-buffered inbound byte to the receive buffer.
    ///
    /// Bytes past the buffer capacity are dropped; the head of the
    /// exchange is the part marker matching needs.
    fn poll_into_rx(&mut self) -> Result<(), Error> {
        let mut chunk = [0u8; 128];
        loop {
            let n = self
                .port
                .read_available(&mut chunk)
                .map_err(|_| Error::ReadError)?;
            if n == 0 {
                return Ok(());
            }
            let room = self.rx.capacity() - self.rx.len();
            let take = n.min(room);
            let _ = self.rx.extend_from_slice(&chunk[..take]);
        }
    }

    /// Discard any bytes left over on the line from a prior exchange.
    fn drain_backlog(&mut self) -> Result<(), Error> {
        let mut chunk = [0u8; 128];
        loop {
            let n = self
                .port
                .read_available(&mut chunk)
                .map_err(|_| Error::ReadError)?;
            if n == 0 {
                return Ok(());
            }
        }
    }
}

impl<P: SerialPort, C: Clock, D: Delay> core::fmt::Debug for Modem<P, C, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Modem")
            .field("initialized", &self.initialized)
            .field("rx_len", &self.rx.len())
            .finish()
    }
}
