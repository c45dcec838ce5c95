use std::future::Future;
use std::sync::Arc;

use escena_core::CoreError;
use escena_core::domain::{ArtistProfile, Event, GalleryItem, Release, Track, UserPlan, UserProfile, Video};
use escena_core::ports::{ClientHandle, SiteBackend};
use serde::Serialize;
use tracing::warn;

use crate::cache::QueryClient;
use crate::crud::Crud;
use crate::error::QueryError;
use crate::keys::QueryKey;

/// Estado de una lectura tal como lo consume una vista.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<T> {
  pub data: Option<T>,
  pub is_loading: bool,
  #[serde(serialize_with = "serialize_error")]
  pub error: Option<QueryError>,
}

fn serialize_error<S: serde::Serializer>(error: &Option<QueryError>, s: S) -> Result<S::Ok, S::Error> {
  match error {
    Some(e) => s.serialize_some(e.message()),
    None => s.serialize_none(),
  }
}

impl<T> QueryResult<T> {
  pub fn loading() -> Self {
    Self { data: None, is_loading: true, error: None }
  }

  pub fn ready(data: T) -> Self {
    Self { data: Some(data), is_loading: false, error: None }
  }

  pub fn failed(error: QueryError) -> Self {
    Self { data: None, is_loading: false, error: Some(error) }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryResult<U> {
    QueryResult { data: self.data.map(f), is_loading: self.is_loading, error: self.error }
  }
}

impl<T> From<Result<T, QueryError>> for QueryResult<T> {
  fn from(res: Result<T, QueryError>) -> Self {
    match res {
      Ok(data) => Self::ready(data),
      Err(e) => Self::failed(e),
    }
  }
}

/// Lecturas tipadas del sitio, una por [`QueryKey`].
///
/// Mientras el cliente remoto no está listo devuelven "cargando" sin hacer
/// ninguna llamada; si la conexión falló, devuelven ese error.
#[derive(Clone)]
pub struct SiteQueries {
  handle: ClientHandle,
  cache: QueryClient,
}

impl SiteQueries {
  pub fn new(handle: ClientHandle, cache: QueryClient) -> Self {
    Self { handle, cache }
  }

  pub fn cache(&self) -> &QueryClient {
    &self.cache
  }

  pub fn handle(&self) -> &ClientHandle {
    &self.handle
  }

  async fn read<T, F, Fut>(&self, key: QueryKey, f: F) -> QueryResult<T>
  where
    T: Clone + Send + Sync + 'static,
    F: FnOnce(Arc<dyn SiteBackend>) -> Fut,
    Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
  {
    let Some(client) = self.handle.client() else {
      return match self.handle.failure() {
        Some(e) => QueryResult::failed(e.into()),
        None => QueryResult::loading(),
      };
    };
    self.cache.fetch(key, move || f(client)).await.into()
  }

  /// Colección completa de una entidad gestionable, bajo su clave.
  pub async fn collection<E: Crud>(&self) -> QueryResult<Vec<E>> {
    self.read(E::COLLECTION, |c| async move { E::list(c.as_ref()).await }).await
  }

  pub async fn artist_profile(&self) -> QueryResult<Option<ArtistProfile>> {
    self.read(QueryKey::ArtistProfile, |c| async move { c.get_profile().await }).await
  }

  pub async fn releases(&self) -> QueryResult<Vec<Release>> {
    self.read(QueryKey::Releases, |c| async move { c.get_all_releases().await }).await
  }

  pub async fn tracks(&self) -> QueryResult<Vec<Track>> {
    self.read(QueryKey::Tracks, |c| async move { c.get_all_tracks().await }).await
  }

  pub async fn videos(&self) -> QueryResult<Vec<Video>> {
    self.read(QueryKey::Videos, |c| async move { c.get_all_videos().await }).await
  }

  pub async fn events(&self) -> QueryResult<Vec<Event>> {
    self.read(QueryKey::Events, |c| async move { c.get_all_events().await }).await
  }

  pub async fn gallery_items(&self) -> QueryResult<Vec<GalleryItem>> {
    self.read(QueryKey::GalleryItems, |c| async move { c.get_all_gallery_items().await }).await
  }

  pub async fn caller_user_profile(&self) -> QueryResult<Option<UserProfile>> {
    self.read(QueryKey::CurrentUserProfile, |c| async move { c.get_caller_user_profile().await }).await
  }

  /// Cualquier error cuenta como "no admin".
  pub async fn is_caller_admin(&self) -> QueryResult<bool> {
    self
      .read(QueryKey::IsAdmin, |c| async move {
        Ok(c.is_caller_admin().await.unwrap_or_else(|e| {
          warn!(error = %e, "admin check failed, treating caller as non-admin");
          false
        }))
      })
      .await
  }

  /// Sin colección de planes en el backend → lista vacía.
  pub async fn user_plans(&self) -> QueryResult<Vec<UserPlan>> {
    self.read(QueryKey::UserPlans, |c| async move { Ok(c.get_all_user_plans().await?.unwrap_or_default()) }).await
  }

  /// Un error al leer el plan actual se trata como "sin plan".
  pub async fn current_user_plan(&self) -> QueryResult<Option<UserPlan>> {
    self
      .read(QueryKey::CurrentUserPlan, |c| async move {
        Ok(c.get_current_user_plan().await.unwrap_or_else(|e| {
          warn!(error = %e, "current plan lookup failed");
          None
        }))
      })
      .await
  }
}
