//! Script hook call contract.
//!
//! A proxy script gets a callback per intercepted message and may rewrite
//! the request, answer with a fake response, or just watch. The execution
//! semantics of the scripting runtime live elsewhere; the pipeline only
//! depends on this contract.
use async_trait::async_trait;

use crate::errors::Result;
use crate::request::Request;
use crate::response::Response;

/// Outcome of one script hook invocation.
///
/// The hook contract allows at most one rewrite per call; encoding the
/// outcome as an enum makes a simultaneous request-and-response rewrite
/// unrepresentable instead of a runtime assertion.
#[derive(Debug, Clone)]
pub enum ScriptRewrite {
  /// Observe only, the message continues down the chain.
  NoAction,
  /// Replace the outbound request with a rewritten one.
  Request(Request),
  /// Answer with a synthetic response; the origin is never contacted when
  /// this is returned from the request hook.
  Response(Response),
}

/// Per-message callbacks supplied by the scripting subsystem.
///
/// Both hooks default to [`ScriptRewrite::NoAction`] so observers only
/// implement the side they care about. A hook that fails is logged by the
/// filter and treated as `NoAction`, so a broken script never takes the
/// connection down.
#[async_trait]
pub trait ScriptHook: Send + Sync {
  /// Called once per intercepted request, after header sanitization.
  async fn on_request(&self, request: &Request) -> Result<ScriptRewrite> {
    let _ = request;
    Ok(ScriptRewrite::NoAction)
  }

  /// Called once per intercepted response. Only
  /// [`ScriptRewrite::Response`] is meaningful here; a `Request` rewrite
  /// returned from this hook is discarded.
  async fn on_response(&self, response: &Response) -> Result<ScriptRewrite> {
    let _ = response;
    Ok(ScriptRewrite::NoAction)
  }
}
