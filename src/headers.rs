//! Header sanitization for intercepted traffic.
//!
//! Both functions mutate header maps in place, are idempotent and treat
//! absent headers as no-ops. They run before every other pipeline stage so
//! that later stages always see uncompressed, non-cached, non-conditional
//! messages they are free to rewrite.
use http::header;
use http::{HeaderMap, HeaderName, HeaderValue};

static REQUEST_STRIP: [HeaderName; 4] = [
  header::ACCEPT_ENCODING,
  header::IF_NONE_MATCH,
  header::IF_MODIFIED_SINCE,
  header::UPGRADE_INSECURE_REQUESTS,
];

static RESPONSE_STRIP: [HeaderName; 12] = [
  header::CONTENT_SECURITY_POLICY_REPORT_ONLY,
  header::CONTENT_SECURITY_POLICY,
  header::STRICT_TRANSPORT_SECURITY,
  header::PUBLIC_KEY_PINS,
  header::PUBLIC_KEY_PINS_REPORT_ONLY,
  header::X_FRAME_OPTIONS,
  header::X_CONTENT_TYPE_OPTIONS,
  HeaderName::from_static("x-webkit-csp"),
  HeaderName::from_static("x-content-security-policy"),
  HeaderName::from_static("x-download-options"),
  HeaderName::from_static("x-permitted-cross-domain-policies"),
  header::X_XSS_PROTECTION,
];

static RESPONSE_OPEN: [HeaderName; 4] = [
  HeaderName::from_static("allow-access-from-same-origin"),
  header::ACCESS_CONTROL_ALLOW_ORIGIN,
  header::ACCESS_CONTROL_ALLOW_METHODS,
  header::ACCESS_CONTROL_ALLOW_HEADERS,
];

/// Strip caching and conditional-request headers from an outbound request.
///
/// Removes `Accept-Encoding`, `If-None-Match`, `If-Modified-Since` and
/// `Upgrade-Insecure-Requests`, then sets `Pragma: no-cache`, so the origin
/// answers with a plaintext, fresh body.
pub fn sanitize_request_headers(headers: &mut HeaderMap) {
  for name in &REQUEST_STRIP {
    headers.remove(name);
  }
  headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
}

/// Strip browser security policies from an inbound response and open it up
/// for cross-origin reads.
///
/// Removes every header that would keep injected content from executing
/// client-side (CSP variants, HSTS, pinning, framing and sniffing
/// restrictions), then sets the CORS allow headers to `*`.
pub fn sanitize_response_headers(headers: &mut HeaderMap) {
  for name in &RESPONSE_STRIP {
    headers.remove(name);
  }
  for name in &RESPONSE_OPEN {
    headers.insert(name, HeaderValue::from_static("*"));
  }
}

/// Case-insensitive header lookup, returning the first value.
///
/// Values holding non-UTF-8 bytes read as absent. Note the value itself is
/// returned raw; callers matching on it (like the injector's `text/html`
/// check) compare case-sensitively.
pub fn get_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
  headers.get(name).and_then(|value| value.to_str().ok())
}
