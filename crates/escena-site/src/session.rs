use std::sync::Arc;

use escena_core::CoreError;
use escena_core::domain::Identity;
use escena_core::ports::{ClientConnector, ClientHandle, IdentityProvider};
use escena_query::QueryClient;
use tracing::{info, warn};

/// Sesión del visitante: identidad, cliente remoto y caché van juntos.
///
/// Cambiar de identidad (login o logout) vacía la caché y reconecta el
/// cliente con la nueva identidad. Mientras reconecta, las lecturas
/// devuelven "cargando" y las escrituras fallan.
#[derive(Clone)]
pub struct Session {
  identity: Arc<dyn IdentityProvider>,
  connector: Arc<dyn ClientConnector>,
  handle: ClientHandle,
  cache: QueryClient,
}

impl Session {
  pub fn new(
    identity: Arc<dyn IdentityProvider>,
    connector: Arc<dyn ClientConnector>,
    handle: ClientHandle,
    cache: QueryClient,
  ) -> Self {
    Self { identity, connector, handle, cache }
  }

  pub fn identity(&self) -> Option<Identity> {
    self.identity.identity()
  }

  pub fn is_authenticated(&self) -> bool {
    self.identity.is_authenticated()
  }

  /// (Re)crea el cliente para la identidad actual. Si falla, las lecturas
  /// devuelven el error hasta el siguiente `connect` que funcione.
  pub async fn connect(&self) -> Result<(), CoreError> {
    self.handle.set_connecting();
    let identity = self.identity.identity();
    match self.connector.connect(identity.as_ref()).await {
      Ok(client) => {
        self.handle.set_ready(client);
        info!(identity = ?identity.as_ref().map(Identity::as_str), "client ready");
        Ok(())
      }
      Err(e) => {
        warn!(error = %e, "client connection failed");
        self.handle.set_failed(e.clone());
        Err(e)
      }
    }
  }

  pub async fn login(&self) -> Result<Identity, CoreError> {
    let identity = self.identity.login().await?;
    self.cache.clear();
    self.connect().await?;
    Ok(identity)
  }

  pub async fn logout(&self) -> Result<(), CoreError> {
    self.identity.logout().await?;
    self.cache.clear();
    self.connect().await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use escena_core::domain::UserProfile;
  use escena_core::ports::SiteBackend;
  use std::sync::atomic::{AtomicBool, Ordering};
  use escena_memory::{MemoryBackend, MemoryConnector, StaticIdentity};
  use escena_query::{QueryKey, SiteQueries};
  use std::time::Duration;

  fn session(backend: &MemoryBackend) -> (Session, SiteQueries) {
    let handle = ClientHandle::connecting();
    let cache = QueryClient::new(Duration::from_secs(300));
    let session = Session::new(
      Arc::new(StaticIdentity::new(Identity::new("fan"))),
      Arc::new(MemoryConnector::new(backend.clone())),
      handle.clone(),
      cache.clone(),
    );
    (session, SiteQueries::new(handle, cache))
  }

  #[tokio::test]
  async fn reads_wait_for_connection() {
    let backend = MemoryBackend::new();
    let (session, queries) = session(&backend);

    assert!(queries.videos().await.is_loading);
    session.connect().await.unwrap();
    assert_eq!(queries.videos().await.data, Some(vec![]));
  }

  /// Falla la primera conexión y delega el resto.
  struct FlakyConnector {
    inner: MemoryConnector,
    failed_once: AtomicBool,
  }

  #[async_trait]
  impl ClientConnector for FlakyConnector {
    async fn connect(&self, identity: Option<&Identity>) -> Result<Arc<dyn SiteBackend>, CoreError> {
      if !self.failed_once.swap(true, Ordering::SeqCst) {
        return Err(CoreError::Backend("handshake refused".into()));
      }
      self.inner.connect(identity).await
    }
  }

  #[tokio::test]
  async fn failed_connection_is_reported_until_retry() {
    let backend = MemoryBackend::new();
    let handle = ClientHandle::connecting();
    let cache = QueryClient::new(Duration::from_secs(300));
    let connector = FlakyConnector { inner: MemoryConnector::new(backend.clone()), failed_once: AtomicBool::new(false) };
    let session =
      Session::new(Arc::new(StaticIdentity::new(Identity::new("fan"))), Arc::new(connector), handle.clone(), cache.clone());
    let queries = SiteQueries::new(handle, cache);

    assert!(session.connect().await.is_err());
    let res = queries.videos().await;
    assert!(!res.is_loading);
    assert_eq!(res.error.map(|e| e.message().to_string()), Some("handshake refused".to_string()));
    assert_eq!(queries.handle().require().err(), Some(CoreError::Backend("handshake refused".into())));

    session.connect().await.unwrap();
    assert_eq!(queries.videos().await.data, Some(vec![]));
  }

  #[tokio::test]
  async fn login_and_logout_switch_caller_and_clear_cache() {
    let backend = MemoryBackend::new();
    let (session, queries) = session(&backend);
    session.connect().await.unwrap();

    assert_eq!(queries.caller_user_profile().await.data, Some(None));
    assert_eq!(session.login().await.unwrap(), Identity::new("fan"));
    assert!(session.is_authenticated());
    assert!(queries.cache().peek::<Option<UserProfile>>(QueryKey::CurrentUserProfile).is_none());

    let client = queries.handle().require().unwrap();
    client.save_caller_user_profile(UserProfile { name: "Fan".into() }).await.unwrap();
    assert!(queries.caller_user_profile().await.data.flatten().is_some());

    session.logout().await.unwrap();
    assert!(!session.is_authenticated());
    assert_eq!(queries.caller_user_profile().await.data, Some(None));
  }
}
