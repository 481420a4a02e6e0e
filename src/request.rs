use std::fmt::{Debug, Formatter};
use std::net::SocketAddr;

use http::Request as HttpRequest;
use http::{HeaderMap, HeaderValue, Method, Version};

use crate::body::Body;

/// An intercepted request on its way from the client to the origin.
///
/// The interception engine builds one of these from the parsed wire message
/// and hands it to [`HttpFilter::on_request`](crate::HttpFilter::on_request).
/// Header lookups through [`HeaderMap`] are case-insensitive while the
/// original casing is preserved for re-serialization.
#[derive(Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
  #[cfg_attr(feature = "serde", serde(with = "http_serde::uri"))]
  uri: http::Uri,
  #[cfg_attr(feature = "serde", serde(with = "http_serde::version"))]
  version: Version,
  #[cfg_attr(feature = "serde", serde(with = "http_serde::method"))]
  method: Method,
  #[cfg_attr(feature = "serde", serde(with = "http_serde::header_map"))]
  headers: HeaderMap<HeaderValue>,
  body: Option<Body>,
  remote_addr: Option<SocketAddr>,
}

impl Debug for Request {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Request")
      .field("uri", &self.uri)
      .field("version", &self.version)
      .field("method", &self.method)
      .field("headers", &self.headers)
      .field("body", &self.body)
      .field("remote_addr", &self.remote_addr)
      .finish()
  }
}

impl<T> From<HttpRequest<T>> for Request
where
  T: Into<Body>,
{
  fn from(value: HttpRequest<T>) -> Self {
    let (parts, body) = value.into_parts();
    let body = body.into();
    Self {
      uri: parts.uri,
      version: parts.version,
      method: parts.method,
      headers: parts.headers,
      body: if body.is_empty() { None } else { Some(body) },
      remote_addr: None,
    }
  }
}

impl Request {
  /// Attach the client socket address this request was intercepted from.
  ///
  /// # Examples
  ///
  /// ```
  /// use tamper::Request;
  /// let req = Request::from(http::Request::get("http://example.com/").body("").unwrap())
  ///   .with_remote_addr("1.2.3.4:9999".parse().unwrap());
  /// assert_eq!(req.client_ip(), "1.2.3.4");
  /// ```
  pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
    self.remote_addr = Some(addr);
    self
  }
  /// Get the HTTP method of this request.
  #[inline]
  pub fn method(&self) -> &Method {
    &self.method
  }
  /// Get a mutable reference to the method.
  #[inline]
  pub fn method_mut(&mut self) -> &mut Method {
    &mut self.method
  }
  /// Get the URI of this request.
  #[inline]
  pub fn uri(&self) -> &http::Uri {
    &self.uri
  }
  /// Get a mutable reference to the URI.
  #[inline]
  pub fn uri_mut(&mut self) -> &mut http::Uri {
    &mut self.uri
  }
  /// Get the HTTP `Version` of this request.
  #[inline]
  pub fn version(&self) -> Version {
    self.version
  }
  /// Get the `Headers` of this request.
  #[inline]
  pub fn headers(&self) -> &HeaderMap {
    &self.headers
  }
  /// Get a mutable reference to the `Headers` of this request.
  #[inline]
  pub fn headers_mut(&mut self) -> &mut HeaderMap {
    &mut self.headers
  }
  /// Get the request body, if any.
  #[inline]
  pub fn body(&self) -> &Option<Body> {
    &self.body
  }
  /// Get a mutable reference to the request body.
  #[inline]
  pub fn body_mut(&mut self) -> &mut Option<Body> {
    &mut self.body
  }
  /// Get the client socket address this request was intercepted from.
  #[inline]
  pub fn remote_addr(&self) -> Option<SocketAddr> {
    self.remote_addr
  }
  /// Get the target host, from the URI authority or the `Host` header.
  pub fn host(&self) -> &str {
    if let Some(host) = self.uri.host() {
      return host;
    }
    self
      .headers
      .get(http::header::HOST)
      .and_then(|v| v.to_str().ok())
      .unwrap_or_default()
  }
  /// Get the URI path of this request.
  #[inline]
  pub fn path(&self) -> &str {
    self.uri.path()
  }
  /// Get the client address without the port, empty when unknown.
  ///
  /// This is the `to` field of emitted [`AuditRecord`](crate::AuditRecord)s.
  pub fn client_ip(&self) -> String {
    match self.remote_addr {
      Some(addr) => addr.ip().to_string(),
      None => String::new(),
    }
  }
}
