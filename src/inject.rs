//! HTML payload injection.
//!
//! The injector works on the decoded body text with a literal marker
//! search, not an HTML parser. Matching is byte-exact on purpose: the
//! `Content-Type` check looks for the exact substring `text/html` and the
//! splice point is the exact lowercase `</head>` tag. Uppercase markup and
//! exotic content-type casings are therefore left alone; broadening the
//! match would change what existing deployments rewrite, so the literal
//! behavior is kept and documented here as a known limitation.
use http::HeaderValue;

use crate::errors::Result;
use crate::headers::get_header;
use crate::response::Response;

/// The literal marker each payload copy is spliced in front of.
pub const HEAD_TAG: &str = "</head>";

/// Decide whether a response is eligible for injection.
///
/// Eligible means the configured payload is non-empty and the raw
/// `Content-Type` value contains `text/html` (case-sensitive). Returns the
/// matched content type.
pub fn injectable<'a>(payload: &str, res: &'a Response) -> Option<&'a str> {
  if payload.is_empty() {
    return None;
  }
  match get_header(res.headers(), "content-type") {
    Some(content_type) if content_type.contains("text/html") => Some(content_type),
    _ => None,
  }
}

/// Splice the payload into an eligible response body.
///
/// Every `</head>` occurrence gets a copy of the payload concatenated
/// immediately before it; injection is deliberately not idempotent, so a
/// body that still carries the marker after one pass receives another copy
/// on the next. Returns `Ok(None)` when the marker is absent: not an
/// error, the response just passes through.
///
/// The rebuilt response keeps the original status code, version and every
/// original header with per-key value order intact; only `Content-Length`
/// is replaced, since the origin's length is stale after the splice. A body
/// that does not decode as UTF-8 is reported as a recoverable error and the
/// caller passes the original response through unmodified.
pub fn inject(payload: &str, res: &Response) -> Result<Option<Response>> {
  let html = res.text()?;
  if !html.contains(HEAD_TAG) {
    return Ok(None);
  }
  let spliced = html.replace(HEAD_TAG, &format!("{payload}{HEAD_TAG}"));
  let mut headers = res.headers().clone();
  headers.insert(
    http::header::CONTENT_LENGTH,
    HeaderValue::from(spliced.len()),
  );
  Ok(Some(Response::from_parts(
    res.request().clone(),
    res.version(),
    res.status_code(),
    headers,
    spliced.into(),
  )))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::request::Request;
  use http::StatusCode;

  fn html_response(body: &'static str) -> Response {
    let req = Request::from(http::Request::get("http://example.com/").body("").unwrap());
    Response::new(req, StatusCode::OK, "text/html; charset=utf-8", body).unwrap()
  }

  #[test]
  fn injectable_requires_payload_and_html() {
    let res = html_response("<html></html>");
    assert_eq!(
      injectable("<script>1</script>", &res),
      Some("text/html; charset=utf-8")
    );
    assert_eq!(injectable("", &res), None);
  }

  #[test]
  fn content_type_match_is_case_sensitive() {
    let req = Request::from(http::Request::get("http://example.com/").body("").unwrap());
    let res = Response::new(req, StatusCode::OK, "TEXT/HTML", "<html><head></head></html>").unwrap();
    assert_eq!(injectable("<script>1</script>", &res), None);
  }

  #[test]
  fn marker_match_is_case_sensitive() {
    let res = html_response("<html><HEAD></HEAD><body></body></html>");
    assert!(inject("<script>1</script>", &res).unwrap().is_none());
  }

  #[test]
  fn every_marker_occurrence_gets_a_copy() {
    let res = html_response("<head></head><head></head>");
    let injected = inject("<x>", &res).unwrap().unwrap();
    assert_eq!(
      injected.text().unwrap(),
      "<head><x></head><head><x></head>"
    );
  }

  #[test]
  fn missing_marker_is_a_noop() {
    let res = html_response("<html><body></body></html>");
    assert!(inject("<x>", &res).unwrap().is_none());
  }

  #[test]
  fn content_length_tracks_the_spliced_body() {
    let res = html_response("<html><head></head></html>");
    let injected = inject("<x>", &res).unwrap().unwrap();
    let body_len = injected.body().as_ref().unwrap().len() as u64;
    assert_eq!(injected.content_length(), Some(body_len));
  }

  #[test]
  fn undecodable_body_is_reported() {
    let req = Request::from(http::Request::get("http://example.com/").body("").unwrap());
    let mut res = Response::new(req, StatusCode::OK, "text/html", "<head></head>").unwrap();
    *res.body_mut() = Some(vec![0x3c, 0x68, 0xff, 0xfe].into());
    assert!(inject("<x>", &res).is_err());
  }
}
