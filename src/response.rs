use http::Response as HttpResponse;
use http::{HeaderMap, HeaderValue, StatusCode, Version};

use crate::body::Body;
#[cfg(feature = "cookie")]
use crate::cookies;
use crate::errors::Result;
use crate::request::Request;

/// An intercepted response on its way from the origin back to the client.
///
/// A response always carries the [`Request`] that produced it. The
/// back-reference is read-only and is used for logging, audit attribution
/// and rebuilding the response after payload injection; it is never mutated
/// by the pipeline.
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Response {
  #[cfg_attr(feature = "serde", serde(with = "http_serde::version"))]
  version: Version,
  #[cfg_attr(feature = "serde", serde(with = "http_serde::status_code"))]
  status_code: StatusCode,
  #[cfg_attr(feature = "serde", serde(with = "http_serde::header_map"))]
  headers: HeaderMap<HeaderValue>,
  body: Option<Body>,
  request: Request,
}

impl PartialEq for Response {
  fn eq(&self, other: &Self) -> bool {
    self.version == other.version
      && self.status_code == other.status_code
      && self.headers == other.headers
      && self.body.eq(&other.body)
  }
}

impl Response {
  /// Build a synthetic response for a request, e.g. a fake answer returned
  /// by a script hook or a session-expiry redirect from a stripper.
  ///
  /// The response is `HTTP/1.1` with `Content-Type` and `Content-Length`
  /// set from the arguments.
  ///
  /// # Examples
  ///
  /// ```
  /// use http::StatusCode;
  /// use tamper::{Request, Response};
  /// # fn run() -> Result<(), tamper::Error> {
  /// let req = Request::from(http::Request::get("http://example.com/").body("").unwrap());
  /// let res = Response::new(req, StatusCode::OK, "text/html", "<html></html>")?;
  /// assert_eq!(res.content_length(), Some(13));
  /// # Ok(())
  /// # }
  /// ```
  pub fn new<B: Into<Body>>(
    request: Request,
    status_code: StatusCode,
    content_type: &str,
    body: B,
  ) -> Result<Response> {
    let body = body.into();
    let mut headers = HeaderMap::new();
    headers.insert(
      http::header::CONTENT_TYPE,
      HeaderValue::from_str(content_type)?,
    );
    headers.insert(http::header::CONTENT_LENGTH, HeaderValue::from(body.len()));
    Ok(Response {
      version: Version::default(),
      status_code,
      headers,
      body: if body.is_empty() { None } else { Some(body) },
      request,
    })
  }
  /// Build a response from a parsed wire message and the request that
  /// produced it. This is the interception engine's entry point.
  pub fn from_http<T>(request: Request, response: HttpResponse<T>) -> Response
  where
    T: Into<Body>,
  {
    let (parts, body) = response.into_parts();
    let body = body.into();
    Response {
      version: parts.version,
      status_code: parts.status,
      headers: parts.headers,
      body: if body.is_empty() { None } else { Some(body) },
      request,
    }
  }
  pub(crate) fn from_parts(
    request: Request,
    version: Version,
    status_code: StatusCode,
    headers: HeaderMap<HeaderValue>,
    body: Body,
  ) -> Response {
    Response {
      version,
      status_code,
      headers,
      body: if body.is_empty() { None } else { Some(body) },
      request,
    }
  }
  /// Get the `StatusCode` of this response.
  #[inline]
  pub fn status_code(&self) -> StatusCode {
    self.status_code
  }
  /// Get the HTTP `Version` of this response.
  #[inline]
  pub fn version(&self) -> Version {
    self.version
  }
  /// Get the `Headers` of this response.
  #[inline]
  pub fn headers(&self) -> &HeaderMap {
    &self.headers
  }
  /// Get a mutable reference to the `Headers` of this response.
  #[inline]
  pub fn headers_mut(&mut self) -> &mut HeaderMap {
    &mut self.headers
  }
  /// Get the response body, if any.
  #[inline]
  pub fn body(&self) -> &Option<Body> {
    &self.body
  }
  /// Get a mutable reference to the response body.
  #[inline]
  pub fn body_mut(&mut self) -> &mut Option<Body> {
    &mut self.body
  }
  /// Get the content-length of the response, if it is known.
  pub fn content_length(&self) -> Option<u64> {
    self
      .headers
      .get(http::header::CONTENT_LENGTH)
      .and_then(|x| x.to_str().ok()?.parse().ok())
  }
  /// Get the request that produced this response.
  #[inline]
  pub fn request(&self) -> &Request {
    &self.request
  }
  /// Decode the response body as UTF-8 text.
  ///
  /// The decode is strict: a body holding invalid UTF-8 yields
  /// [`Error::Decode`](crate::Error::Decode) rather than replacement
  /// characters, so a rebuilt body always round-trips byte-exact.
  pub fn text(&self) -> Result<String> {
    let body = if let Some(b) = self.body() {
      b.to_vec()
    } else {
      return Ok(String::new());
    };
    Ok(String::from_utf8(body)?)
  }
  /// Retrieve the cookies contained in the response.
  ///
  /// Note that invalid `Set-Cookie` headers will be ignored.
  ///
  /// # Optional
  ///
  /// This requires the optional `cookie` feature to be enabled.
  #[cfg(feature = "cookie")]
  #[cfg_attr(docsrs, doc(cfg(feature = "cookie")))]
  pub fn cookies(&self) -> impl Iterator<Item = cookies::Cookie> {
    cookies::extract_response_cookies(&self.headers).filter_map(|x| x.ok())
  }
}
