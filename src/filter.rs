//! The request/response filtering pipeline.
//!
//! The interception engine calls [`HttpFilter::on_request`] once per
//! intercepted request and [`HttpFilter::on_response`] once per response it
//! gets back from the origin (or from a short-circuited request). Each call
//! walks a fixed stage chain (sanitize, stripper, script, and payload
//! injection for responses) and returns a [`FilterOutcome`] telling the
//! engine what to forward. A stage failure is logged and the message falls
//! through unmodified; nothing here ever takes the connection down.
use std::sync::Arc;

use crate::events::{AuditRecord, EventSink, LoggingSink, SPOOFED_REQUEST, SPOOFED_RESPONSE};
use crate::headers;
use crate::inject;
use crate::request::Request;
use crate::response::Response;
use crate::script::{ScriptHook, ScriptRewrite};
use crate::stripper::SessionStripper;

/// Either kind of intercepted message.
#[derive(Debug, Clone)]
pub enum Message {
  /// A request bound for the origin.
  Request(Request),
  /// A response bound for the client.
  Response(Response),
}

/// What the interception engine should do with the in-flight message.
///
/// From the request phase, `Replace(Message::Request)` means "send this
/// rewritten request to the origin instead" and
/// `Replace(Message::Response)` means "answer the client directly and skip
/// the origin". From the response phase only `Replace(Message::Response)`
/// is produced. Ownership of a replacement transfers to the engine.
#[derive(Debug)]
pub enum FilterOutcome {
  /// Forward the original message; headers may have been sanitized in
  /// place, the rest is untouched.
  Pass,
  /// Forward this message instead of the original.
  Replace(Message),
}

impl FilterOutcome {
  /// Returns true when the original message should be forwarded.
  pub fn is_pass(&self) -> bool {
    matches!(self, FilterOutcome::Pass)
  }
}

/// The traffic-rewriting pipeline for one proxy instance.
///
/// A filter is cheap to share: all state is read-only after construction
/// and every collaborator is behind an [`Arc`], so independent connections
/// invoke the same filter concurrently without extra locking.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tamper::{HttpFilter, MemorySink};
/// let sink = Arc::new(MemorySink::new());
/// let filter = HttpFilter::builder("wifi.http.proxy")
///   .hook_payload("<script>alert(1)</script>")
///   .events(sink)
///   .build();
/// assert_eq!(filter.name(), "wifi.http.proxy");
/// ```
pub struct HttpFilter {
  name: String,
  payload: Option<String>,
  script: Option<Arc<dyn ScriptHook>>,
  stripper: Option<Arc<dyn SessionStripper>>,
  events: Arc<dyn EventSink>,
}

/// Builder for [`HttpFilter`].
pub struct HttpFilterBuilder {
  name: String,
  payload: Option<String>,
  script: Option<Arc<dyn ScriptHook>>,
  stripper: Option<Arc<dyn SessionStripper>>,
  events: Option<Arc<dyn EventSink>>,
}

impl HttpFilterBuilder {
  /// Set the payload spliced into eligible HTML responses. The payload is
  /// immutable for the lifetime of the filter; an empty string disables
  /// injection.
  pub fn hook_payload(mut self, payload: impl Into<String>) -> Self {
    let payload = payload.into();
    self.payload = if payload.is_empty() {
      None
    } else {
      Some(payload)
    };
    self
  }

  /// Attach the scripting subsystem's per-message callbacks.
  pub fn script(mut self, script: Arc<dyn ScriptHook>) -> Self {
    self.script = Some(script);
    self
  }

  /// Attach the session-stripping collaborator.
  pub fn stripper(mut self, stripper: Arc<dyn SessionStripper>) -> Self {
    self.stripper = Some(stripper);
    self
  }

  /// Set the audit sink. Defaults to [`LoggingSink`].
  pub fn events(mut self, events: Arc<dyn EventSink>) -> Self {
    self.events = Some(events);
    self
  }

  /// Build the filter.
  pub fn build(self) -> HttpFilter {
    HttpFilter {
      name: self.name,
      payload: self.payload,
      script: self.script,
      stripper: self.stripper,
      events: self.events.unwrap_or_else(|| Arc::new(LoggingSink)),
    }
  }
}

impl HttpFilter {
  /// Start building a filter for the proxy instance with the given name.
  /// The name prefixes every emitted audit event.
  pub fn builder(name: impl Into<String>) -> HttpFilterBuilder {
    HttpFilterBuilder {
      name: name.into(),
      payload: None,
      script: None,
      stripper: None,
      events: None,
    }
  }

  /// The proxy instance name this filter reports under.
  #[inline]
  pub fn name(&self) -> &str {
    &self.name
  }

  fn event(&self, suffix: &str) -> String {
    format!("{}.{}", self.name, suffix)
  }

  /// Filter one intercepted request.
  ///
  /// Stage order: sanitize headers in place, stripper preprocess (its
  /// redirect short-circuits the chain and is not attributed to the
  /// script), then the script hook. A script rewrite emits exactly one
  /// audit record before this returns.
  pub async fn on_request(&self, request: &mut Request) -> FilterOutcome {
    tracing::debug!(
      name = %self.name,
      client = %request.client_ip(),
      method = %request.method(),
      host = %request.host(),
      path = %request.path(),
      "request intercepted",
    );

    headers::sanitize_request_headers(request.headers_mut());

    if let Some(stripper) = &self.stripper {
      match stripper.preprocess(request).await {
        // redirect the client so a stale session cookie expires,
        // skipping the origin entirely
        Ok(Some(redirect)) => return FilterOutcome::Replace(Message::Response(redirect)),
        Ok(None) => {}
        Err(err) => {
          tracing::warn!(name = %self.name, error = %err, "stripper preprocess failed");
        }
      }
    }

    // do we have a proxy script?
    let Some(script) = &self.script else {
      return FilterOutcome::Pass;
    };

    match script.on_request(request).await {
      Ok(ScriptRewrite::Request(rewritten)) => {
        self.events.add(
          &self.event(SPOOFED_REQUEST),
          AuditRecord::spoofed_request(request, &rewritten),
        );
        FilterOutcome::Replace(Message::Request(rewritten))
      }
      Ok(ScriptRewrite::Response(fake)) => {
        self.events.add(
          &self.event(SPOOFED_RESPONSE),
          AuditRecord::spoofed_response(request, &fake),
        );
        FilterOutcome::Replace(Message::Response(fake))
      }
      Ok(ScriptRewrite::NoAction) => FilterOutcome::Pass,
      Err(err) => {
        tracing::warn!(name = %self.name, error = %err, "request hook failed");
        FilterOutcome::Pass
      }
    }
  }

  /// Filter one intercepted response.
  ///
  /// Stage order: sanitize headers in place, stripper process (in-place,
  /// never short-circuits), script hook (a script-authored response is
  /// final and skips injection), then payload injection. `None` means the
  /// upstream produced no response, e.g. a connection reset, and passes
  /// through without running any stage.
  pub async fn on_response(&self, response: Option<&mut Response>) -> FilterOutcome {
    // sometimes it happens ¯\_(ツ)_/¯
    let Some(response) = response else {
      return FilterOutcome::Pass;
    };

    tracing::debug!(
      name = %self.name,
      client = %response.request().client_ip(),
      method = %response.request().method(),
      host = %response.request().host(),
      path = %response.request().path(),
      "response intercepted",
    );

    headers::sanitize_response_headers(response.headers_mut());

    if let Some(stripper) = &self.stripper {
      if let Err(err) = stripper.process(response).await {
        tracing::warn!(name = %self.name, error = %err, "stripper process failed");
      }
    }

    if let Some(script) = &self.script {
      match script.on_response(response).await {
        Ok(ScriptRewrite::Response(rewritten)) => {
          self.events.add(
            &self.event(SPOOFED_RESPONSE),
            AuditRecord::spoofed_response(response.request(), &rewritten),
          );
          return FilterOutcome::Replace(Message::Response(rewritten));
        }
        // a request rewrite is meaningless for a response in flight
        Ok(ScriptRewrite::Request(_)) | Ok(ScriptRewrite::NoAction) => {}
        Err(err) => {
          tracing::warn!(name = %self.name, error = %err, "response hook failed");
        }
      }
    }

    if let Some(payload) = self.payload.as_deref() {
      if inject::injectable(payload, response).is_some() {
        match inject::inject(payload, response) {
          Ok(Some(injected)) => {
            tracing::info!(
              name = %self.name,
              payload_size = payload.len(),
              target = %format!("{}{}", response.request().host(), response.request().path()),
              body_size = response.body().as_ref().map(|b| b.len()).unwrap_or(0),
              client = %response.request().client_ip(),
              "injecting payload",
            );
            return FilterOutcome::Replace(Message::Response(injected));
          }
          Ok(None) => {}
          Err(err) => {
            tracing::error!(name = %self.name, error = %err, "payload injection failed");
          }
        }
      }
    }

    FilterOutcome::Pass
  }
}
