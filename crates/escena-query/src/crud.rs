use async_trait::async_trait;

use escena_core::CoreError;
use escena_core::domain::{Entity, Event, GalleryItem, Release, Track, UserPlan, Video};
use escena_core::ports::SiteBackend;

use crate::keys::QueryKey;

/// Entidad gestionable desde el panel: alta, edición y borrado por id.
///
/// Une cada tipo con sus operaciones del [`SiteBackend`], su clave de
/// colección y los textos de las notificaciones.
#[async_trait]
pub trait Crud: Entity {
  /// Colección que se invalida tras cualquier escritura.
  const COLLECTION: QueryKey;
  /// Nombre para mensajes, con mayúscula inicial ("Gallery item").
  const LABEL: &'static str;
  /// Verbo del alta en infinitivo y participio.
  const ADD_VERB: (&'static str, &'static str) = ("add", "added");

  /// Claves extra a invalidar tras escribir.
  fn extra_invalidations() -> &'static [QueryKey] {
    &[]
  }

  async fn list(backend: &dyn SiteBackend) -> Result<Vec<Self>, CoreError>;
  async fn add(backend: &dyn SiteBackend, item: Self) -> Result<(), CoreError>;
  async fn update(backend: &dyn SiteBackend, item: Self) -> Result<(), CoreError>;
  async fn remove(backend: &dyn SiteBackend, id: Self::Id) -> Result<(), CoreError>;
}

macro_rules! crud_impl {
  ($ty:ty, $key:expr, $label:literal, $list:ident, $add:ident, $update:ident, $delete:ident) => {
    #[async_trait]
    impl Crud for $ty {
      const COLLECTION: QueryKey = $key;
      const LABEL: &'static str = $label;

      async fn list(backend: &dyn SiteBackend) -> Result<Vec<Self>, CoreError> {
        backend.$list().await
      }

      async fn add(backend: &dyn SiteBackend, item: Self) -> Result<(), CoreError> {
        backend.$add(item).await
      }

      async fn update(backend: &dyn SiteBackend, item: Self) -> Result<(), CoreError> {
        backend.$update(item).await
      }

      async fn remove(backend: &dyn SiteBackend, id: Self::Id) -> Result<(), CoreError> {
        backend.$delete(id).await
      }
    }
  };
}

crud_impl!(Release, QueryKey::Releases, "Release", get_all_releases, add_release, update_release, delete_release);
crud_impl!(Track, QueryKey::Tracks, "Track", get_all_tracks, add_track, update_track, delete_track);
crud_impl!(Video, QueryKey::Videos, "Video", get_all_videos, add_video, update_video, delete_video);
crud_impl!(Event, QueryKey::Events, "Event", get_all_events, add_event, update_event, delete_event);
crud_impl!(
  GalleryItem,
  QueryKey::GalleryItems,
  "Gallery item",
  get_all_gallery_items,
  add_gallery_item,
  update_gallery_item,
  delete_gallery_item
);

#[async_trait]
impl Crud for UserPlan {
  const COLLECTION: QueryKey = QueryKey::UserPlans;
  const LABEL: &'static str = "Plan";
  const ADD_VERB: (&'static str, &'static str) = ("create", "created");

  fn extra_invalidations() -> &'static [QueryKey] {
    &[QueryKey::CurrentUserPlan]
  }

  async fn list(backend: &dyn SiteBackend) -> Result<Vec<Self>, CoreError> {
    Ok(backend.get_all_user_plans().await?.unwrap_or_default())
  }

  async fn add(backend: &dyn SiteBackend, item: Self) -> Result<(), CoreError> {
    backend.create_user_plan(item).await
  }

  async fn update(backend: &dyn SiteBackend, item: Self) -> Result<(), CoreError> {
    backend.update_user_plan(item).await
  }

  async fn remove(backend: &dyn SiteBackend, id: Self::Id) -> Result<(), CoreError> {
    backend.delete_user_plan(id).await
  }
}
