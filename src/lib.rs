#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # tamper
//!
//! The `tamper` crate is the traffic-rewriting core of an interactive,
//! man-in-the-middle HTTP interception proxy. It sits between a client and
//! an origin on an already-established intercepted connection and decides,
//! per message, whether to pass it through, rewrite it, answer with a
//! synthetic response, or splice content into it.
//!
//! The crate owns only the decision pipeline: the two ordered stage chains
//! ([`HttpFilter::on_request`], [`HttpFilter::on_response`]), the header
//! sanitization policy ([`headers`]), the HTML payload injector
//! ([`inject`]) and the audit contract ([`AuditRecord`], [`EventSink`]).
//! Terminating TLS, parsing wire octets and re-serializing messages is the
//! interception engine's job; scripting and session stripping plug in
//! through the [`ScriptHook`] and [`SessionStripper`] traits.
//!
//! ## Filtering an intercepted exchange
//!
//! ```rust
//! use std::sync::Arc;
//! use tamper::{HttpFilter, MemorySink, Request};
//!
//! # async fn run() {
//! let events = Arc::new(MemorySink::new());
//! let filter = HttpFilter::builder("wifi.http.proxy")
//!   .hook_payload("<script src=\"http://127.0.0.1/hook.js\"></script>")
//!   .events(events)
//!   .build();
//!
//! let mut request = Request::from(
//!   http::Request::get("http://example.com/index.html").body("").unwrap(),
//! );
//! // Pass means "forward the sanitized original".
//! let outcome = filter.on_request(&mut request).await;
//! assert!(outcome.is_pass());
//! # }
//! ```
//!
//! A filter is `Send + Sync` and all of its state is read-only after
//! construction, so one instance serves every connection concurrently.
//!
//! ## Optional Features
//!
//! The following are a list of Cargo features that can be enabled or
//! disabled:
//!
//! - **cookie**: `Set-Cookie` parsing helpers for stripper implementations.
//! - **serde**: Provides serialization and deserialization support.
mod body;
#[cfg(feature = "cookie")]
pub mod cookies;
mod errors;
mod events;
mod filter;
/// Header sanitization policy
pub mod headers;
/// HTML payload injection
pub mod inject;
mod request;
mod response;
mod script;
mod stripper;

pub use body::Body;
pub use errors::{Error, Result};
pub use events::{
  AuditRecord, Event, EventSink, LoggingSink, MemorySink, SPOOFED_REQUEST, SPOOFED_RESPONSE,
};
pub use filter::{FilterOutcome, HttpFilter, HttpFilterBuilder, Message};
pub use http::header;
pub use http::uri;
pub use http::Method;
pub use http::{StatusCode, Version};
pub use request::Request;
pub use response::Response;
pub use script::{ScriptHook, ScriptRewrite};
pub use stripper::SessionStripper;
