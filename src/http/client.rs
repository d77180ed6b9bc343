//! HTTP request engine and verb wrappers.

use core::fmt::Write as FmtWrite;

use heapless::{String, Vec};
use serde::Serialize;

use crate::error::Error;
use crate::http::response::Response;
use crate::http::url::{self, ParsedUrl};
use crate::modem::{LinkType, Modem};
use crate::transport::{Clock, Delay, SerialPort};

/// Maximum size of a composed request: request line, headers, and body.
pub const MAX_REQUEST_SIZE: usize = 1024;

/// Maximum serialized size of a [`post_json`](Client::post_json) payload.
pub const MAX_JSON_BODY: usize = 512;

/// Default `Content-Type` used by the verb wrappers.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Response collection window for plain TCP exchanges.
const TCP_RESPONSE_WINDOW_MS: u32 = 8_000;

/// Response collection window for SSL exchanges, which add handshake and
/// record latency on the modem side.
const SSL_RESPONSE_WINDOW_MS: u32 = 12_000;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Blocking HTTP client over an initialized [`Modem`].
///
/// One request maps to one socket: open, announce, send, collect for a
/// fixed window, close. The returned [`Response`] is the raw capture of
/// that window; inspect it with the accessors in
/// [`response`](crate::http::response).
pub struct Client<P: SerialPort, C: Clock, D: Delay> {
    modem: Modem<P, C, D>,
}

impl<P: SerialPort, C: Clock, D: Delay> Client<P, C, D> {
    /// Take ownership of a modem to issue requests through it.
    pub fn new(modem: Modem<P, C, D>) -> Self {
        Self { modem }
    }

    /// Access the underlying modem, e.g. to re-run lifecycle commands.
    pub fn modem(&mut self) -> &mut Modem<P, C, D> {
        &mut self.modem
    }

    /// Give the modem back.
    pub fn release(self) -> Modem<P, C, D> {
        self.modem
    }

    /// Issue one blocking HTTP request.
    ///
    /// Preconditions: the modem must be initialized and report a WiFi
    /// association, otherwise this fails without generating channel
    /// traffic to a socket. `Content-Type` and `Content-Length` headers
    /// are emitted only when `body` is non-empty.
    ///
    /// The response is whatever bytes arrived inside the collection
    /// window (8 s for TCP, 12 s for SSL); there is no early exit on a
    /// complete body, so the call always occupies the full window.
    pub fn request(
        &mut self,
        method: Method,
        target_url: &str,
        body: Option<&str>,
        content_type: &str,
    ) -> Result<Response, Error> {
        if !self.modem.is_initialized() {
            return Err(Error::NotInitialized);
        }
        if !self.modem.is_wifi_connected()? {
            return Err(Error::NotJoined);
        }

        let target = url::parse(target_url);
        let link = if target.https {
            LinkType::Ssl
        } else {
            LinkType::Tcp
        };

        // A socket that never opened gets no close attempt.
        self.modem.open_socket(link, target.host, target.port)?;

        let request = build_request(method, &target, body, content_type)?;

        if let Err(e) = self.modem.announce_send(request.len()) {
            let _ = self.modem.close_socket();
            return Err(e);
        }
        if let Err(e) = self.modem.write_raw(&request) {
            let _ = self.modem.close_socket();
            return Err(e);
        }

        // The receive buffer is not cleared here: after the send-ready
        // prompt it holds only bytes belonging to this exchange.
        let window = if target.https {
            SSL_RESPONSE_WINDOW_MS
        } else {
            TCP_RESPONSE_WINDOW_MS
        };
        if let Err(e) = self.modem.collect_for(window) {
            let _ = self.modem.close_socket();
            return Err(e);
        }

        let raw = self.modem.take_capture();
        let _ = self.modem.close_socket();
        Ok(Response::new(raw))
    }

    /// `GET` the given URL.
    pub fn get(&mut self, target_url: &str) -> Result<Response, Error> {
        self.request(Method::Get, target_url, None, CONTENT_TYPE_JSON)
    }

    /// `POST` a text body with the default JSON content type.
    pub fn post(&mut self, target_url: &str, body: &str) -> Result<Response, Error> {
        self.request(Method::Post, target_url, Some(body), CONTENT_TYPE_JSON)
    }

    /// `PUT` a text body with the default JSON content type.
    pub fn put(&mut self, target_url: &str, body: &str) -> Result<Response, Error> {
        self.request(Method::Put, target_url, Some(body), CONTENT_TYPE_JSON)
    }

    /// `DELETE` the given URL.
    pub fn delete(&mut self, target_url: &str) -> Result<Response, Error> {
        self.request(Method::Delete, target_url, None, CONTENT_TYPE_JSON)
    }

    /// Serialize `payload` as JSON and `POST` it.
    pub fn post_json<T: Serialize>(
        &mut self,
        target_url: &str,
        payload: &T,
    ) -> Result<Response, Error> {
        let mut buf = [0u8; MAX_JSON_BODY];
        let len =
            serde_json_core::to_slice(payload, &mut buf).map_err(|_| Error::BufferOverflow)?;
        let body = core::str::from_utf8(&buf[..len]).map_err(|_| Error::BufferOverflow)?;
        self.request(Method::Post, target_url, Some(body), CONTENT_TYPE_JSON)
    }
}

impl<P: SerialPort, C: Clock, D: Delay> core::fmt::Debug for Client<P, C, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Client").field("modem", &self.modem).finish()
    }
}

/// Compose the request text: request line, `Host`, optional
/// `Content-Type`/`Content-Length` (body present only), `Connection:
/// close`, blank-line terminator, body.
fn build_request(
    method: Method,
    target: &ParsedUrl<'_>,
    body: Option<&str>,
    content_type: &str,
) -> Result<Vec<u8, MAX_REQUEST_SIZE>, Error> {
    // An empty body is treated as no body: no Content-* headers.
    let body = body.filter(|b| !b.is_empty());

    let mut buf: Vec<u8, MAX_REQUEST_SIZE> = Vec::new();

    // Request line
    buf.extend_from_slice(method.as_str().as_bytes())
        .map_err(|_| Error::BufferOverflow)?;
    buf.push(b' ').map_err(|_| Error::BufferOverflow)?;
    buf.extend_from_slice(target.path.as_bytes())
        .map_err(|_| Error::BufferOverflow)?;
    buf.extend_from_slice(b" HTTP/1.1\r\n")
        .map_err(|_| Error::BufferOverflow)?;

    // Headers
    buf.extend_from_slice(b"Host: ")
        .map_err(|_| Error::BufferOverflow)?;
    buf.extend_from_slice(target.host.as_bytes())
        .map_err(|_| Error::BufferOverflow)?;
    buf.extend_from_slice(b"\r\n")
        .map_err(|_| Error::BufferOverflow)?;

    if let Some(body) = body {
        buf.extend_from_slice(b"Content-Type: ")
            .map_err(|_| Error::BufferOverflow)?;
        buf.extend_from_slice(content_type.as_bytes())
            .map_err(|_| Error::BufferOverflow)?;
        buf.extend_from_slice(b"\r\n")
            .map_err(|_| Error::BufferOverflow)?;

        let mut len_str: String<10> = String::new();
        write!(len_str, "{}", body.len()).map_err(|_| Error::BufferOverflow)?;
        buf.extend_from_slice(b"Content-Length: ")
            .map_err(|_| Error::BufferOverflow)?;
        buf.extend_from_slice(len_str.as_bytes())
            .map_err(|_| Error::BufferOverflow)?;
        buf.extend_from_slice(b"\r\n")
            .map_err(|_| Error::BufferOverflow)?;
    }

    buf.extend_from_slice(b"Connection: close\r\n\r\n")
        .map_err(|_| Error::BufferOverflow)?;

    // Body
    if let Some(body) = body {
        buf.extend_from_slice(body.as_bytes())
            .map_err(|_| Error::BufferOverflow)?;
    }

    Ok(buf)
}
