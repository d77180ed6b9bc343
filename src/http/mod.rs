//! Minimal HTTP/1.1 client over the modem's TCP/SSL sockets.
//!
//! This is deliberately not a general HTTP implementation: no chunked
//! transfer, no redirects, no persistent connections, text payloads only.
//! Every request opens one socket with `Connection: close` semantics,
//! collects whatever arrives inside a fixed time window, and hands the raw
//! capture back for inspection.
//!
//! # Features
//!
//! - Request composition: request line, `Host`, optional
//!   `Content-Type`/`Content-Length`, `Connection: close`
//! - HTTPS via the modem's SSL mode (certificate validation stays in the
//!   firmware)
//! - Verb wrappers and JSON payload helpers
//! - Stateless response inspection with both a behavior-faithful and a
//!   strict status parser
//!
//! # Usage
//!
//! The main entry point is [`client::Client`], which owns an initialized
//! [`Modem`](crate::modem::Modem).

/// HTTP client implementation: request engine and verb wrappers.
pub mod client;

/// Raw response capture and its inspection accessors.
pub mod response;

/// URL splitting into scheme, host, port, and path.
pub mod url;
