// crates/escena-core/src/errors.rs
use thiserror::Error;

/// Error genérico del núcleo de Escena.
///
/// Las capas superiores (formularios, páginas, comandos de la app) lo
/// traducen a notificaciones para el usuario o a logs. El `Display` de cada
/// variante es el mensaje que termina en la notificación.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
  /// El cliente remoto todavía no está listo (se está estableciendo).
  #[error("Actor not available")]
  ClientUnavailable,

  /// Fallo del backend remoto (red, rechazo, trap...).
  #[error("{0}")]
  Backend(String),

  #[error("Unauthorized: {0}")]
  Unauthorized(String),

  #[error("{0} not found")]
  NotFound(String),

  #[error("{0} already exists")]
  AlreadyExists(String),
}
