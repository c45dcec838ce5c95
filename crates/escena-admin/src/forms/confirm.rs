use std::sync::Mutex;

use escena_core::CoreError;
use escena_query::{Crud, Mutations, QueryKey};

/// Texto del diálogo de borrado para la entidad `E`.
pub fn delete_prompt<E: Crud>() -> String {
  if E::COLLECTION == QueryKey::UserPlans {
    return "Are you sure you want to delete this plan? This action cannot be undone. \
            Users currently subscribed to this plan may be affected."
      .to_string();
  }
  format!("Are you sure you want to delete this {}?", E::LABEL.to_lowercase())
}

/// Borrado en dos pasos: `request` abre el diálogo, `confirm` borra.
pub struct DeleteConfirmation<E: Crud> {
  pending: Mutex<Option<E::Id>>,
}

impl<E: Crud> Default for DeleteConfirmation<E> {
  fn default() -> Self {
    Self { pending: Mutex::new(None) }
  }
}

impl<E: Crud> DeleteConfirmation<E> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn request(&self, id: E::Id) {
    *self.pending.lock().unwrap_or_else(|e| e.into_inner()) = Some(id);
  }

  pub fn pending(&self) -> Option<E::Id> {
    self.pending.lock().unwrap_or_else(|e| e.into_inner()).clone()
  }

  pub fn prompt(&self) -> Option<String> {
    self.pending().map(|_| delete_prompt::<E>())
  }

  pub fn cancel(&self) {
    *self.pending.lock().unwrap_or_else(|e| e.into_inner()) = None;
  }

  /// Borra el registro pendiente. `Ok(false)` si no había ninguno. Si el
  /// borrado falla, el diálogo sigue abierto con el mismo id.
  pub async fn confirm(&self, mutations: &Mutations) -> Result<bool, CoreError> {
    let Some(id) = self.pending() else {
      return Ok(false);
    };
    mutations.remove::<E>(id.clone()).await?;
    self.settle(&id);
    Ok(true)
  }

  /// Cierra el diálogo sólo si sigue apuntando a `deleted`: una petición
  /// hecha durante el borrado se conserva.
  fn settle(&self, deleted: &E::Id) {
    let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
    if pending.as_ref() == Some(deleted) {
      *pending = None;
    }
  }
}
