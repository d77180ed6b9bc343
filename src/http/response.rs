//! Raw response capture and stateless inspection.
//!
//! A [`Response`] is nothing more than the bytes that arrived inside the
//! collection window, verbatim — send-ready prompt echoes and firmware
//! chatter included. No parsed structure is retained; every accessor
//! re-scans the raw capture on demand, so calling one twice on the same
//! capture always yields the same answer.

use core::fmt::Write as FmtWrite;

use serde::Deserialize;

use crate::modem::RX_BUFFER_SIZE;
use crate::modem::command::find_slice;

use heapless::{String, Vec};

/// Blank line separating the HTTP header block from the body.
const HEADER_TERMINATOR: &str = "\r\n\r\n";

/// Marker preceding the status code in a status line.
const STATUS_MARKER: &[u8] = b"HTTP/1.1 ";

/// The verbatim byte stream captured during one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    raw: Vec<u8, RX_BUFFER_SIZE>,
}

impl Response {
    pub(crate) fn new(raw: Vec<u8, RX_BUFFER_SIZE>) -> Self {
        Self { raw }
    }

    /// Wrap a previously captured stream for offline inspection.
    ///
    /// Bytes beyond the capture capacity are dropped, matching the
    /// accumulation discipline of a live exchange.
    pub fn from_raw(bytes: &[u8]) -> Self {
        let mut raw = Vec::new();
        let take = bytes.len().min(RX_BUFFER_SIZE);
        let _ = raw.extend_from_slice(&bytes[..take]);
        Self { raw }
    }

    /// The capture as text; empty if it is not valid UTF-8.
    ///
    /// Payloads are text by contract (binary bodies are out of scope), so
    /// an invalid capture degrades to the same "nothing useful arrived"
    /// shape as an empty one.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.raw).unwrap_or("")
    }

    /// Number of captured bytes.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether nothing at all arrived inside the window.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Status code by the behavior-faithful scan.
    ///
    /// Locates the literal `HTTP/1.1 ` and examines exactly the next three
    /// characters, accumulating decimal digits and skipping anything else —
    /// a malformed status line quietly yields a partial number (`2x4`
    /// becomes 24). Returns 0 when the marker is absent.
    pub fn status_code(&self) -> u16 {
        let Some(pos) = find_slice(&self.raw, STATUS_MARKER) else {
            return 0;
        };
        let start = pos + STATUS_MARKER.len();
        let mut code: u16 = 0;
        for &byte in self.raw.iter().skip(start).take(3) {
            if byte.is_ascii_digit() {
                code = code * 10 + u16::from(byte - b'0');
            }
        }
        code
    }

    /// Status code by a strict, status-line-anchored parse.
    ///
    /// Finds the first line starting with `HTTP/` and parses its second
    /// space-separated field as a full decimal number. Any malformation
    /// yields `None` instead of a partial code.
    pub fn status_code_strict(&self) -> Option<u16> {
        let line = self.as_str().lines().find(|line| line.starts_with("HTTP/"))?;
        line.split(' ').nth(1)?.parse().ok()
    }

    /// The response body.
    ///
    /// Everything after the first header terminator (`\r\n\r\n`). When no
    /// well-formed header block was captured (e.g. a truncated stream),
    /// falls back to everything from the first `{` — a heuristic assuming
    /// JSON payloads. Empty when neither is found.
    pub fn body(&self) -> &str {
        let text = self.as_str();
        if let Some(pos) = text.find(HEADER_TERMINATOR) {
            &text[pos + HEADER_TERMINATOR.len()..]
        } else if let Some(pos) = text.find('{') {
            &text[pos..]
        } else {
            ""
        }
    }

    /// Whether the capture looks like a 2xx success.
    ///
    /// This is a substring test for the literal codes `200`, `201`, and
    /// `204` anywhere in the capture, not a status-line parse: a matching
    /// digit sequence inside headers or body trips it too. Known-imprecise
    /// by contract; use [`status_code_strict`](Self::status_code_strict)
    /// when that matters.
    pub fn is_success(&self) -> bool {
        self.has_status(200) || self.has_status(201) || self.has_status(204)
    }

    /// Whether the capture contains `code`'s decimal text anywhere.
    ///
    /// Same substring imprecision as [`is_success`](Self::is_success).
    pub fn has_status(&self, code: u16) -> bool {
        let mut text: String<5> = String::new();
        let _ = write!(text, "{code}");
        find_slice(&self.raw, text.as_bytes()).is_some()
    }

    /// Deserialize the body as JSON.
    ///
    /// Returns `None` when the body is absent or does not parse as `T`.
    pub fn json<'a, T: Deserialize<'a>>(&'a self) -> Option<T> {
        serde_json_core::from_str(self.body())
            .ok()
            .map(|(value, _)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_from_well_formed_line() {
        let r = Response::from_raw(b"HTTP/1.1 404 Not Found\r\n\r\n");
        assert_eq!(r.status_code(), 404);
        assert_eq!(r.status_code_strict(), Some(404));
    }

    #[test]
    fn status_code_absent_marker_is_zero() {
        let r = Response::from_raw(b"garbage with no status line");
        assert_eq!(r.status_code(), 0);
        assert_eq!(r.status_code_strict(), None);
    }

    #[test]
    fn status_code_ignores_leading_prompt_noise() {
        let r = Response::from_raw(b"> Recv 42 bytes\r\nSEND OK\r\nHTTP/1.1 200 OK\r\n\r\nok");
        assert_eq!(r.status_code(), 200);
        assert_eq!(r.status_code_strict(), Some(200));
    }

    #[test]
    fn faithful_scan_returns_partial_number_on_malformed_line() {
        let r = Response::from_raw(b"HTTP/1.1 2x4 Weird\r\n\r\n");
        assert_eq!(r.status_code(), 24);
        // The strict variant refuses the same input.
        assert_eq!(r.status_code_strict(), None);
    }

    #[test]
    fn body_after_header_terminator() {
        let r = Response::from_raw(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\n{}");
        assert_eq!(r.body(), "{}");
    }

    #[test]
    fn body_falls_back_to_first_brace_on_truncated_stream() {
        let r = Response::from_raw(b"HTTP/1.1 200 OK\r\nContent-Len{\"id\":7}");
        assert_eq!(r.body(), "{\"id\":7}");
    }

    #[test]
    fn body_empty_when_nothing_matches() {
        let r = Response::from_raw(b"no terminator and no brace");
        assert_eq!(r.body(), "");
    }

    #[test]
    fn accessors_are_idempotent() {
        let r = Response::from_raw(b"HTTP/1.1 201 Created\r\n\r\n{\"id\":7}");
        assert_eq!(r.status_code(), r.status_code());
        assert_eq!(r.body(), r.body());
        assert_eq!(r.is_success(), r.is_success());
    }

    #[test]
    fn success_on_2xx_codes() {
        assert!(Response::from_raw(b"HTTP/1.1 200 OK\r\n\r\n").is_success());
        assert!(Response::from_raw(b"HTTP/1.1 201 Created\r\n\r\n").is_success());
        assert!(Response::from_raw(b"HTTP/1.1 204 No Content\r\n\r\n").is_success());
        assert!(!Response::from_raw(b"HTTP/1.1 500 Oops\r\n\r\n").is_success());
    }

    #[test]
    fn success_false_positive_on_body_digits_is_expected() {
        // Imprecise by contract: "200" inside the JSON body trips the
        // substring test even though the status line says 404.
        let r = Response::from_raw(b"HTTP/1.1 404 Not Found\r\n\r\n{\"count\":200}");
        assert!(r.is_success());
        assert_eq!(r.status_code_strict(), Some(404));
    }

    #[test]
    fn has_status_matches_literal_code_text() {
        let r = Response::from_raw(b"HTTP/1.1 503 Service Unavailable\r\n\r\n");
        assert!(r.has_status(503));
        assert!(!r.has_status(404));
    }

    #[test]
    fn json_deserializes_body() {
        #[derive(serde::Deserialize)]
        struct Payload {
            id: u32,
        }
        let r = Response::from_raw(b"HTTP/1.1 200 OK\r\n\r\n{\"id\":7}");
        let payload: Payload = r.json().unwrap();
        assert_eq!(payload.id, 7);

        let bad = Response::from_raw(b"HTTP/1.1 200 OK\r\n\r\nnot json");
        assert!(bad.json::<Payload>().is_none());
    }

    #[test]
    fn oversized_capture_is_truncated_not_wrapped() {
        let big = [b'a'; RX_BUFFER_SIZE + 64];
        let r = Response::from_raw(&big);
        assert_eq!(r.len(), RX_BUFFER_SIZE);
    }
}
