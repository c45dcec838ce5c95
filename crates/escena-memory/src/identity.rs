use std::sync::Mutex;

use async_trait::async_trait;
use escena_core::CoreError;
use escena_core::domain::Identity;
use escena_core::ports::IdentityProvider;

/// Proveedor de identidad fijo: `login` siempre entra como la misma identidad.
#[derive(Debug)]
pub struct StaticIdentity {
  principal: Identity,
  current: Mutex<Option<Identity>>,
}

impl StaticIdentity {
  /// Empieza sin sesión.
  pub fn new(principal: Identity) -> Self {
    Self { principal, current: Mutex::new(None) }
  }

  /// Empieza con la sesión ya abierta.
  pub fn logged_in(principal: Identity) -> Self {
    Self { current: Mutex::new(Some(principal.clone())), principal }
  }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
  fn identity(&self) -> Option<Identity> {
    self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
  }

  async fn login(&self) -> Result<Identity, CoreError> {
    *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(self.principal.clone());
    Ok(self.principal.clone())
  }

  async fn logout(&self) -> Result<(), CoreError> {
    *self.current.lock().unwrap_or_else(|e| e.into_inner()) = None;
    Ok(())
  }
}
