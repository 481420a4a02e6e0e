//! Session stripper call contract.
use async_trait::async_trait;

use crate::errors::Result;
use crate::request::Request;
use crate::response::Response;

/// The cookie/session-invalidation collaborator.
///
/// The stripper sees every message before the script hook does. Its
/// internals (which cookies to kill, how to rewrite them) live in their own
/// module; the pipeline only depends on these two entry points.
#[async_trait]
pub trait SessionStripper: Send + Sync {
  /// Runs against each request before it leaves for the origin. Returning
  /// `Some(response)` short-circuits the whole request chain with that
  /// response, used to force a redirect that expires a stale session
  /// cookie on the client.
  async fn preprocess(&self, request: &mut Request) -> Result<Option<Response>>;

  /// Runs against each response, rewriting it in place (typically the
  /// `Set-Cookie` headers). Cannot short-circuit.
  async fn process(&self, response: &mut Response) -> Result<()>;
}
