use std::sync::Arc;

use escena_core::CoreError;

/// Error de una lectura.
///
/// Se comparte entre todos los que esperan la misma petición, así que es
/// barato de clonar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct QueryError {
  message: Arc<str>,
}

impl QueryError {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: Arc::from(message.into()) }
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

impl From<CoreError> for QueryError {
  fn from(e: CoreError) -> Self {
    Self::new(e.to_string())
  }
}
