//! pipeline error
use std::string::FromUtf8Error;
use thiserror::Error as ThisError;
/// A `Result` alias where the `Err` case is `tamper::Error`.
pub type Result<T> = std::result::Result<T, Error>;
/// The Errors that may occur while filtering intercepted traffic.
///
/// None of these are fatal to the pipeline: the filter logs them and falls
/// back to passing the message through unmodified.
#[derive(ThisError, Debug)]
pub enum Error {
  /// a response body that could not be decoded for injection
  #[error(transparent)]
  Decode(#[from] FromUtf8Error),
  /// http::Error
  #[error(transparent)]
  Http(http::Error),
  /// Error
  #[error(transparent)]
  IO(#[from] std::io::Error),
  /// a script hook reported a failure
  #[error("script hook: {0}")]
  Script(String),
  /// a session stripper reported a failure
  #[error("session stripper: {0}")]
  Stripper(String),
  /// Unknown Error
  #[error("other")]
  Other(String),
}

impl From<http::Error> for Error {
  fn from(value: http::Error) -> Self {
    Error::Http(value)
  }
}

impl From<http::header::InvalidHeaderValue> for Error {
  fn from(value: http::header::InvalidHeaderValue) -> Self {
    Error::Http(http::Error::from(value))
  }
}
