//! Audit records for synthetically altered traffic.
//!
//! Whenever a script hook rewrites a message, the filter emits exactly one
//! [`AuditRecord`] to the configured [`EventSink`] before returning.
//! Pass-through traffic, stripper redirects and payload injection never
//! produce records; those are either not attributed to the script or
//! reported through ordinary logging instead.
use std::sync::Mutex;

use crate::request::Request;
use crate::response::Response;

/// Event name suffix for a request rewritten by a script.
pub const SPOOFED_REQUEST: &str = "spoofed-request";
/// Event name suffix for a response rewritten or faked by a script.
pub const SPOOFED_RESPONSE: &str = "spoofed-response";

/// A structured record of one synthetic rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuditRecord {
  /// Client address the altered message is delivered to, without the port.
  pub to: String,
  /// Request method.
  pub method: String,
  /// Request host.
  pub host: String,
  /// Request path.
  pub path: String,
  /// Byte length of the rewritten body.
  pub size: usize,
}

impl AuditRecord {
  /// Record for a request the script replaced: method, host, path and size
  /// describe the rewritten request, `to` stays the original client.
  pub fn spoofed_request(original: &Request, rewritten: &Request) -> AuditRecord {
    AuditRecord {
      to: original.client_ip(),
      method: rewritten.method().to_string(),
      host: rewritten.host().to_string(),
      path: rewritten.path().to_string(),
      size: rewritten.body().as_ref().map(|b| b.len()).unwrap_or(0),
    }
  }

  /// Record for a response the script faked or replaced: attribution comes
  /// from the request that produced it, size from the synthetic body.
  pub fn spoofed_response(request: &Request, response: &Response) -> AuditRecord {
    AuditRecord {
      to: request.client_ip(),
      method: request.method().to_string(),
      host: request.host().to_string(),
      path: request.path().to_string(),
      size: response.body().as_ref().map(|b| b.len()).unwrap_or(0),
    }
  }
}

/// An append-only, concurrency-safe destination for audit records.
///
/// Implementations must tolerate concurrent `add` calls from independent
/// connections; no ordering is guaranteed between records of different
/// connections.
pub trait EventSink: Send + Sync {
  /// Append one record under the given event name
  /// (`"<proxy-name>.spoofed-request"` or `"<proxy-name>.spoofed-response"`).
  fn add(&self, event: &str, record: AuditRecord);
}

/// Sink that forwards records to the `tracing` subscriber. This is the
/// default when no sink is configured.
#[derive(Debug, Default)]
pub struct LoggingSink;

impl EventSink for LoggingSink {
  fn add(&self, event: &str, record: AuditRecord) {
    tracing::info!(
      event,
      to = %record.to,
      method = %record.method,
      host = %record.host,
      path = %record.path,
      size = record.size,
      "audit",
    );
  }
}

/// One named entry buffered by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
  /// Full event name, `"<proxy-name>.<suffix>"`.
  pub name: String,
  /// The record emitted under that name.
  pub record: AuditRecord,
}

/// Sink that buffers records in memory, for embedders that drain them into
/// their own event bus and for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
  events: Mutex<Vec<Event>>,
}

impl MemorySink {
  /// Create an empty sink.
  pub fn new() -> MemorySink {
    MemorySink::default()
  }

  /// Snapshot the buffered events.
  pub fn records(&self) -> Vec<Event> {
    match self.events.lock() {
      Ok(events) => events.clone(),
      Err(_) => Vec::new(),
    }
  }

  /// Take the buffered events, leaving the sink empty.
  pub fn drain(&self) -> Vec<Event> {
    match self.events.lock() {
      Ok(mut events) => events.drain(..).collect(),
      Err(_) => Vec::new(),
    }
  }
}

impl EventSink for MemorySink {
  fn add(&self, event: &str, record: AuditRecord) {
    if let Ok(mut events) = self.events.lock() {
      events.push(Event {
        name: event.to_string(),
        record,
      });
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn memory_sink_buffers_in_order() {
    let sink = MemorySink::new();
    let record = AuditRecord {
      to: "1.2.3.4".to_string(),
      method: "GET".to_string(),
      host: "example.com".to_string(),
      path: "/".to_string(),
      size: 0,
    };
    sink.add("proxy.spoofed-request", record.clone());
    sink.add("proxy.spoofed-response", record.clone());
    let events = sink.drain();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name, "proxy.spoofed-request");
    assert_eq!(events[1].name, "proxy.spoofed-response");
    assert!(sink.records().is_empty());
  }
}
