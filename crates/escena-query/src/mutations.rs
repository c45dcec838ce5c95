use std::future::Future;
use std::sync::Arc;

use escena_core::CoreError;
use escena_core::domain::{ArtistProfile, PlanId, UserProfile};
use escena_core::ports::{ClientHandle, Notifier, SiteBackend};
use tracing::{info, warn};

use crate::cache::QueryClient;
use crate::crud::Crud;
use crate::keys::QueryKey;

/// Textos e invalidaciones de una escritura.
struct Outcome<'a> {
  /// `None` → sin notificación de éxito.
  success: Option<String>,
  /// Mensaje si el error viene vacío.
  fallback: String,
  invalidate: &'a [QueryKey],
}

/// Escrituras del panel.
///
/// Tras un éxito invalida las claves afectadas y notifica; tras un fallo
/// notifica el error y deja la caché intacta. No hay reintentos.
#[derive(Clone)]
pub struct Mutations {
  handle: ClientHandle,
  cache: QueryClient,
  notifier: Arc<dyn Notifier>,
}

impl Mutations {
  pub fn new(handle: ClientHandle, cache: QueryClient, notifier: Arc<dyn Notifier>) -> Self {
    Self { handle, cache, notifier }
  }

  async fn run<F, Fut>(&self, outcome: Outcome<'_>, op: F) -> Result<(), CoreError>
  where
    F: FnOnce(Arc<dyn SiteBackend>) -> Fut,
    Fut: Future<Output = Result<(), CoreError>>,
  {
    let result = match self.handle.require() {
      Ok(client) => op(client).await,
      Err(e) => Err(e),
    };

    match &result {
      Ok(()) => {
        for key in outcome.invalidate {
          self.cache.invalidate(*key);
        }
        if let Some(message) = &outcome.success {
          info!(%message, "mutation succeeded");
          self.notifier.success(message);
        }
      }
      Err(e) => {
        let message = e.to_string();
        let message = if message.is_empty() { outcome.fallback } else { message };
        warn!(%message, "mutation failed");
        self.notifier.error(&message);
      }
    }
    result
  }

  fn keys<E: Crud>() -> Vec<QueryKey> {
    std::iter::once(E::COLLECTION).chain(E::extra_invalidations().iter().copied()).collect()
  }

  pub async fn add<E: Crud>(&self, item: E) -> Result<(), CoreError> {
    let (verb, done) = E::ADD_VERB;
    let keys = Self::keys::<E>();
    let outcome = Outcome {
      success: Some(format!("{} {done} successfully", E::LABEL)),
      fallback: format!("Failed to {verb} {}", E::LABEL.to_lowercase()),
      invalidate: &keys,
    };
    self.run(outcome, |c| async move { E::add(c.as_ref(), item).await }).await
  }

  pub async fn update<E: Crud>(&self, item: E) -> Result<(), CoreError> {
    let keys = Self::keys::<E>();
    let outcome = Outcome {
      success: Some(format!("{} updated successfully", E::LABEL)),
      fallback: format!("Failed to update {}", E::LABEL.to_lowercase()),
      invalidate: &keys,
    };
    self.run(outcome, |c| async move { E::update(c.as_ref(), item).await }).await
  }

  pub async fn remove<E: Crud>(&self, id: E::Id) -> Result<(), CoreError> {
    let keys = Self::keys::<E>();
    let outcome = Outcome {
      success: Some(format!("{} deleted successfully", E::LABEL)),
      fallback: format!("Failed to delete {}", E::LABEL.to_lowercase()),
      invalidate: &keys,
    };
    self.run(outcome, |c| async move { E::remove(c.as_ref(), id).await }).await
  }

  pub async fn update_profile(&self, profile: ArtistProfile) -> Result<(), CoreError> {
    let outcome = Outcome {
      success: Some("Profile updated successfully".into()),
      fallback: "Failed to update profile".into(),
      invalidate: &[QueryKey::ArtistProfile],
    };
    self.run(outcome, |c| async move { c.update_profile(profile).await }).await
  }

  pub async fn assign_user_plan(&self, plan_id: PlanId) -> Result<(), CoreError> {
    let outcome = Outcome {
      success: Some("Plan selected successfully".into()),
      fallback: "Failed to select plan".into(),
      invalidate: &[QueryKey::CurrentUserPlan],
    };
    self.run(outcome, |c| async move { c.assign_user_plan(plan_id).await }).await
  }

  /// Perfil del usuario que llama (alta inicial): sin notificación de éxito.
  pub async fn save_caller_user_profile(&self, profile: UserProfile) -> Result<(), CoreError> {
    let outcome = Outcome {
      success: None,
      fallback: "Failed to save profile".into(),
      invalidate: &[QueryKey::CurrentUserProfile],
    };
    self.run(outcome, |c| async move { c.save_caller_user_profile(profile).await }).await
  }
}
