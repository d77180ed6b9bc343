//! # atmodem - AT-command WiFi modem driver with a minimal HTTP client
//!
//! A Rust library that drives a serial-attached WiFi modem (ESP8266 and
//! other ESP-AT class firmware) through its textual AT command protocol and
//! layers a minimal blocking HTTP/HTTPS client on top of it. It is designed
//! for resource-constrained microcontrollers and supports `no_std`
//! environments with zero heap allocation.
//!
//! ## Features
//!
//! ### Modem driver
//! - **Command engine**: send one AT command, wait with a deadline for a
//!   success marker or the `ERROR` marker in the accumulated reply stream
//! - **Lifecycle**: modem reset, echo-off, station mode, WiFi association
//! - **Owned receive buffer**: fixed-capacity, cleared at well-defined
//!   points, never shared between exchanges
//!
//! ### HTTP client
//! - HTTP/1.1 request composition with `Connection: close` semantics
//! - HTTPS via the modem's SSL transport mode (no on-device TLS)
//! - Blocking response collection inside a fixed time window
//! - Stateless response inspection: status code, body, success predicate
//! - JSON payload helpers built on `serde` and `serde-json-core`
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! atmodem = "0.1.0"
//! ```
//!
//! ### Basic request
//!
//! ```rust,no_run
//! use atmodem::http::client::Client;
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
//!
//! let mut client = Client::new(modem);
//! // let response = client.get("http://192.168.1.100/api")?;
//! // let code = response.status_code();
//! ```
//!
//! ## Platform support
//!
//! The library never touches hardware directly. The host environment
//! provides three capabilities through the [`transport`] traits: a serial
//! port with non-blocking reads, a monotonic millisecond clock, and a
//! cooperative delay. Any platform that can supply those three works:
//! bare-metal ARM Cortex-M, RISC-V, or a hosted test harness.
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Crate-wide error type shared by the modem driver and the HTTP client.
pub mod error;

/// Host capability traits: serial port, monotonic clock, cooperative delay.
///
/// The physical UART, the timer source, and the yield primitive are
/// external collaborators; the driver reaches them only through these
/// narrow traits.
pub mod transport;

/// Modem driver: command engine, receive buffer, connection lifecycle.
pub mod modem;

/// Minimal HTTP/1.1 client layered on the modem's TCP/SSL sockets.
///
/// Contains the URL parser, the request/response engine, and the stateless
/// response inspection utilities.
pub mod http;
