// flo/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failures raised by the composition framework itself.
///
/// Handler failures of the host's own error type are never wrapped or translated; they
/// propagate to the caller of the pipeline as-is. `FloError` only covers conditions the
/// framework detects, and host error types must be constructible from it
/// (`Err: From<FloError>`).
#[derive(Debug, Error)]
pub enum FloError {
  /// The resolver could not produce an instance for the requested type.
  /// Raised when the step that needs the instance executes, never at registration time.
  #[error("Unable to resolve handler type '{type_name}'. Source: {source}")]
  UnresolvableType {
    type_name: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Error in user-provided handler. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },
}

impl FloError {
  pub(crate) fn unresolvable(type_name: &str, source: AnyhowError) -> Self {
    FloError::UnresolvableType {
      type_name: type_name.to_string(),
      source,
    }
  }
}

impl From<AnyhowError> for FloError {
  fn from(err: AnyhowError) -> Self {
    // Avoid FloError::HandlerError(FloError::...) when a FloError travelled through anyhow.
    match err.downcast::<FloError>() {
      Ok(flo_err) => flo_err,
      Err(source) => FloError::HandlerError { source },
    }
  }
}

pub type FloResult<T, E = FloError> = std::result::Result<T, E>;
