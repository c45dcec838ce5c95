use async_trait::async_trait;

use crate::domain::Identity;
use crate::errors::CoreError;

/// Port del proveedor de identidad.
///
/// Esta capa sólo necesita saber si hay identidad y disparar login/logout;
/// el protocolo de autenticación queda fuera.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
  /// Identidad actual, `None` si no hay sesión.
  fn identity(&self) -> Option<Identity>;

  async fn login(&self) -> Result<Identity, CoreError>;

  async fn logout(&self) -> Result<(), CoreError>;

  fn is_authenticated(&self) -> bool {
    self.identity().is_some()
  }
}
