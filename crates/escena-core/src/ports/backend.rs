use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::{
  ArtistProfile, Event, EventId, GalleryItem, GalleryItemId, Identity, PlanId, Release, ReleaseId, Track,
  TrackId, UserPlan, UserProfile, UserRole, Video, VideoId,
};
use crate::errors::CoreError;

/// Port del cliente de datos remoto.
///
/// Cada operación es atómica por registro desde el punto de vista del que
/// llama: o se persiste el registro completo o se devuelve error. Las
/// llamadas van implícitamente firmadas con la identidad con la que se creó
/// el cliente (ver [`ClientConnector`]).
///
/// El transporte, la serialización y la autenticación quedan dentro del
/// adapter.
#[async_trait]
pub trait SiteBackend: Send + Sync {
  // --- Perfil del artista ---
  async fn get_profile(&self) -> Result<Option<ArtistProfile>, CoreError>;
  async fn update_profile(&self, profile: ArtistProfile) -> Result<(), CoreError>;

  // --- Releases ---
  async fn add_release(&self, release: Release) -> Result<(), CoreError>;
  async fn get_release(&self, id: ReleaseId) -> Result<Option<Release>, CoreError>;
  async fn get_all_releases(&self) -> Result<Vec<Release>, CoreError>;
  async fn update_release(&self, release: Release) -> Result<(), CoreError>;
  async fn delete_release(&self, id: ReleaseId) -> Result<(), CoreError>;

  // --- Tracks ---
  async fn add_track(&self, track: Track) -> Result<(), CoreError>;
  async fn get_track(&self, id: TrackId) -> Result<Option<Track>, CoreError>;
  async fn get_all_tracks(&self) -> Result<Vec<Track>, CoreError>;
  async fn update_track(&self, track: Track) -> Result<(), CoreError>;
  async fn delete_track(&self, id: TrackId) -> Result<(), CoreError>;

  // --- Videos ---
  async fn add_video(&self, video: Video) -> Result<(), CoreError>;
  async fn get_video(&self, id: VideoId) -> Result<Option<Video>, CoreError>;
  async fn get_all_videos(&self) -> Result<Vec<Video>, CoreError>;
  async fn update_video(&self, video: Video) -> Result<(), CoreError>;
  async fn delete_video(&self, id: VideoId) -> Result<(), CoreError>;

  // --- Events ---
  async fn add_event(&self, event: Event) -> Result<(), CoreError>;
  async fn get_event(&self, id: EventId) -> Result<Option<Event>, CoreError>;
  async fn get_all_events(&self) -> Result<Vec<Event>, CoreError>;
  async fn update_event(&self, event: Event) -> Result<(), CoreError>;
  async fn delete_event(&self, id: EventId) -> Result<(), CoreError>;

  // --- Gallery ---
  async fn add_gallery_item(&self, item: GalleryItem) -> Result<(), CoreError>;
  async fn get_gallery_item(&self, id: GalleryItemId) -> Result<Option<GalleryItem>, CoreError>;
  async fn get_all_gallery_items(&self) -> Result<Vec<GalleryItem>, CoreError>;
  async fn update_gallery_item(&self, item: GalleryItem) -> Result<(), CoreError>;
  async fn delete_gallery_item(&self, id: GalleryItemId) -> Result<(), CoreError>;

  // --- Planes ---
  async fn create_user_plan(&self, plan: UserPlan) -> Result<(), CoreError>;
  async fn get_user_plan(&self, id: PlanId) -> Result<Option<UserPlan>, CoreError>;
  /// `None` cuando el backend todavía no tiene colección de planes.
  async fn get_all_user_plans(&self) -> Result<Option<Vec<UserPlan>>, CoreError>;
  async fn update_user_plan(&self, plan: UserPlan) -> Result<(), CoreError>;
  async fn delete_user_plan(&self, id: PlanId) -> Result<(), CoreError>;
  async fn assign_user_plan(&self, plan_id: PlanId) -> Result<(), CoreError>;
  async fn get_current_user_plan(&self) -> Result<Option<UserPlan>, CoreError>;

  // --- Usuario que llama y roles ---
  async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, CoreError>;
  async fn save_caller_user_profile(&self, profile: UserProfile) -> Result<(), CoreError>;
  async fn get_user_profile(&self, user: Identity) -> Result<Option<UserProfile>, CoreError>;
  async fn get_caller_user_role(&self) -> Result<UserRole, CoreError>;
  async fn is_caller_admin(&self) -> Result<bool, CoreError>;
  async fn assign_caller_user_role(&self, user: Identity, role: UserRole) -> Result<(), CoreError>;
  async fn initialize_artist(&self, admin_token: String, user_provided_token: String) -> Result<(), CoreError>;
}

/// Port que crea un cliente remoto para una identidad (o anónimo).
///
/// Equivale a "construir el actor": puede tardar (handshake, claves...), y
/// mientras tanto el [`ClientHandle`] queda en estado `Connecting`.
#[async_trait]
pub trait ClientConnector: Send + Sync {
  async fn connect(&self, identity: Option<&Identity>) -> Result<Arc<dyn SiteBackend>, CoreError>;
}

enum ClientState {
  Connecting,
  Ready(Arc<dyn SiteBackend>),
  /// El último intento de conexión falló. Se sale con otro `connect`.
  Failed(CoreError),
}

/// Manejador compartido del cliente remoto.
///
/// - Mientras está `Connecting` las lecturas no hacen llamadas de red y las
///   escrituras fallan con [`CoreError::ClientUnavailable`].
/// - En `Failed` las lecturas y escrituras devuelven el error de conexión.
/// - Se clona barato: todos los clones ven el mismo estado.
#[derive(Clone)]
pub struct ClientHandle {
  state: Arc<RwLock<ClientState>>,
}

impl ClientHandle {
  pub fn connecting() -> Self {
    Self { state: Arc::new(RwLock::new(ClientState::Connecting)) }
  }

  pub fn ready(client: Arc<dyn SiteBackend>) -> Self {
    Self { state: Arc::new(RwLock::new(ClientState::Ready(client))) }
  }

  pub fn set_ready(&self, client: Arc<dyn SiteBackend>) {
    let mut guard = self.state.write().unwrap_or_else(|e| e.into_inner());
    *guard = ClientState::Ready(client);
  }

  /// Vuelve a `Connecting` (p. ej. al cambiar de identidad).
  pub fn set_connecting(&self) {
    let mut guard = self.state.write().unwrap_or_else(|e| e.into_inner());
    *guard = ClientState::Connecting;
  }

  pub fn set_failed(&self, error: CoreError) {
    let mut guard = self.state.write().unwrap_or_else(|e| e.into_inner());
    *guard = ClientState::Failed(error);
  }

  /// Error del último intento de conexión, si fue fallido.
  pub fn failure(&self) -> Option<CoreError> {
    let guard = self.state.read().unwrap_or_else(|e| e.into_inner());
    match &*guard {
      ClientState::Failed(e) => Some(e.clone()),
      _ => None,
    }
  }

  pub fn is_ready(&self) -> bool {
    self.client().is_some()
  }

  /// Cliente actual, si ya está establecido.
  pub fn client(&self) -> Option<Arc<dyn SiteBackend>> {
    let guard = self.state.read().unwrap_or_else(|e| e.into_inner());
    match &*guard {
      ClientState::Ready(client) => Some(Arc::clone(client)),
      ClientState::Connecting | ClientState::Failed(_) => None,
    }
  }

  /// Igual que [`ClientHandle::client`] pero como error, para escrituras.
  pub fn require(&self) -> Result<Arc<dyn SiteBackend>, CoreError> {
    match self.client() {
      Some(client) => Ok(client),
      None => Err(self.failure().unwrap_or(CoreError::ClientUnavailable)),
    }
  }
}

impl Default for ClientHandle {
  fn default() -> Self {
    Self::connecting()
  }
}
