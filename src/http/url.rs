//! URL splitting for request targets.
//!
//! Parsing is total: malformed input degrades to something usable rather
//! than erroring, which matches how the rest of the stack treats partial
//! data. Accepted syntax is `[http://|https://]host[:port][/path]`.

/// The components of a request URL, borrowed from the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedUrl<'a> {
    /// Hostname or IP literal, without any `:port` suffix.
    pub host: &'a str,
    /// Absolute path including the leading `/`; defaults to `/`.
    pub path: &'a str,
    /// Whether the `https://` scheme was present.
    pub https: bool,
    /// Explicit `:port` if given, else 443 for https, else 80.
    pub port: u16,
}

/// Split a URL into host, path, scheme flag, and port.
///
/// A leading `https://` sets the flag and a default port of 443; `http://`
/// keeps 80; no scheme treats the whole string as host+path on port 80.
/// The first `/` in the remainder separates host from path. A `:` inside
/// the host carries an explicit port, which always overrides the scheme
/// default; non-digit characters in the port text are skipped, not
/// rejected.
pub fn parse(url: &str) -> ParsedUrl<'_> {
    let (rest, https, scheme_port) = if let Some(rest) = url.strip_prefix("https://") {
        (rest, true, 443)
    } else if let Some(rest) = url.strip_prefix("http://") {
        (rest, false, 80)
    } else {
        (url, false, 80)
    };

    let (mut host, path) = match rest.find('/') {
        Some(slash) => (&rest[..slash], &rest[slash..]),
        None => (rest, "/"),
    };

    let mut port = scheme_port;
    if let Some(colon) = host.find(':') {
        port = parse_port(&host[colon + 1..]);
        host = &host[..colon];
    }

    ParsedUrl {
        host,
        path,
        https,
        port,
    }
}

/// Decimal port with non-digits skipped; saturates at `u16::MAX`.
fn parse_port(text: &str) -> u16 {
    let mut port: u32 = 0;
    for c in text.chars() {
        if let Some(digit) = c.to_digit(10) {
            port = (port * 10 + digit).min(u32::from(u16::MAX));
        }
    }
    port as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_https_url() {
        let url = parse("https://api.example.com:8443/v1/data");
        assert_eq!(url.host, "api.example.com");
        assert_eq!(url.path, "/v1/data");
        assert!(url.https);
        assert_eq!(url.port, 8443);
    }

    #[test]
    fn bare_host_and_path_defaults_to_http() {
        let url = parse("192.168.1.100/api");
        assert_eq!(url.host, "192.168.1.100");
        assert_eq!(url.path, "/api");
        assert!(!url.https);
        assert_eq!(url.port, 80);
    }

    #[test]
    fn scheme_defaults_apply_without_explicit_port() {
        assert_eq!(parse("http://example.com/x").port, 80);
        assert_eq!(parse("https://example.com/x").port, 443);
    }

    #[test]
    fn explicit_port_overrides_scheme_default() {
        assert_eq!(parse("http://example.com:8080/").port, 8080);
        assert_eq!(parse("https://example.com:80/").port, 80);
    }

    #[test]
    fn missing_path_defaults_to_root() {
        let url = parse("https://example.com");
        assert_eq!(url.host, "example.com");
        assert_eq!(url.path, "/");
        assert_eq!(url.port, 443);
    }

    #[test]
    fn host_only_with_port() {
        let url = parse("example.com:9000");
        assert_eq!(url.host, "example.com");
        assert_eq!(url.path, "/");
        assert_eq!(url.port, 9000);
        assert!(!url.https);
    }

    #[test]
    fn non_digits_in_port_are_skipped() {
        assert_eq!(parse("example.com:8a0/").port, 80);
        assert_eq!(parse("example.com:/x").port, 0);
    }

    #[test]
    fn path_keeps_query_text_verbatim() {
        let url = parse("http://h/api?x=1&y=2");
        assert_eq!(url.path, "/api?x=1&y=2");
    }
}
