//! `Set-Cookie` parsing for session-stripper implementations.
//!
//! Strippers that invalidate sessions need to read the cookies an origin
//! sets and write back expired replacements; this module wraps the
//! [`cookie`] crate just enough for that.
use http::header::SET_COOKIE;
use http::HeaderValue;

/// A cookie parsed from a `Set-Cookie` response header.
#[derive(Debug, Clone)]
pub struct Cookie<'a>(cookie::Cookie<'a>);

impl<'a> Cookie<'a> {
  fn parse(value: &'a HeaderValue) -> Result<Cookie<'a>, cookie::ParseError> {
    std::str::from_utf8(value.as_bytes())
      .map_err(cookie::ParseError::from)
      .and_then(cookie::Cookie::parse)
      .map(Cookie)
  }

  /// The cookie's name.
  pub fn name(&self) -> &str {
    self.0.name()
  }

  /// The cookie's value.
  pub fn value(&self) -> &str {
    self.0.value()
  }

  /// Returns true if the `HttpOnly` attribute is set.
  pub fn http_only(&self) -> bool {
    self.0.http_only().unwrap_or(false)
  }

  /// Returns true if the `Secure` attribute is set.
  pub fn secure(&self) -> bool {
    self.0.secure().unwrap_or(false)
  }

  /// The cookie's `Path` attribute, if any.
  pub fn path(&self) -> Option<&str> {
    self.0.path()
  }

  /// The cookie's `Domain` attribute, if any.
  pub fn domain(&self) -> Option<&str> {
    self.0.domain()
  }

  /// Turn this cookie into one that expires it client-side: the value is
  /// cleared, `Max-Age` becomes zero and the expiry is moved into the past.
  pub fn make_removal(&mut self) {
    self.0.make_removal();
  }

  /// Encode back into a `Set-Cookie` header value.
  pub fn encode(&self) -> String {
    self.0.to_string()
  }
}

pub(crate) fn extract_response_cookies(
  headers: &http::HeaderMap,
) -> impl Iterator<Item = Result<Cookie, cookie::ParseError>> {
  headers.get_all(SET_COOKIE).iter().map(Cookie::parse)
}
