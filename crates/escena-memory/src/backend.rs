use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use escena_core::CoreError;
use escena_core::domain::{
  ArtistProfile, Entity, Event, EventId, GalleryItem, GalleryItemId, Identity, PlanId, Release, ReleaseId,
  Track, TrackId, UserPlan, UserProfile, UserRole, Video, VideoId,
};
use escena_core::ports::{ClientConnector, SiteBackend};
use tracing::debug;

/// Identidad con la que opera [`MemoryBackend::new`]; ya es admin.
pub const LOCAL_ADMIN: &str = "local-admin";

#[derive(Default)]
struct Store {
  profile: Option<ArtistProfile>,
  releases: Vec<Release>,
  tracks: Vec<Track>,
  videos: Vec<Video>,
  events: Vec<Event>,
  gallery: Vec<GalleryItem>,
  /// `None` hasta que se crea el primer plan.
  plans: Option<Vec<UserPlan>>,
  assignments: HashMap<Identity, PlanId>,
  user_profiles: HashMap<Identity, UserProfile>,
  roles: HashMap<Identity, UserRole>,
}

impl Store {
  fn role_of(&self, caller: Option<&Identity>) -> UserRole {
    match caller {
      None => UserRole::Guest,
      Some(id) => self.roles.get(id).copied().unwrap_or(UserRole::User),
    }
  }
}

#[derive(Default)]
struct Shared {
  store: Mutex<Store>,
  faults: Mutex<HashMap<String, VecDeque<String>>>,
  calls: Mutex<HashMap<String, usize>>,
}

/// Backend en memoria con el mismo contrato que el servicio remoto.
///
/// - Los clones y las vistas de [`MemoryBackend::as_caller`] comparten datos.
/// - Escribir contenido requiere rol admin.
/// - Cualquier identidad autenticada sin rol explícito es `User`.
/// - Las listas conservan el orden de inserción.
#[derive(Clone)]
pub struct MemoryBackend {
  shared: Arc<Shared>,
  caller: Option<Identity>,
}

impl Default for MemoryBackend {
  fn default() -> Self {
    Self::new()
  }
}

impl MemoryBackend {
  /// Store vacío visto por [`LOCAL_ADMIN`].
  pub fn new() -> Self {
    let admin = Identity::new(LOCAL_ADMIN);
    let shared = Arc::new(Shared::default());
    lock(&shared.store).roles.insert(admin.clone(), UserRole::Admin);
    Self { shared, caller: Some(admin) }
  }

  /// Vista del mismo store para otra identidad (`None` = anónimo).
  pub fn as_caller(&self, caller: Option<Identity>) -> Self {
    Self { shared: Arc::clone(&self.shared), caller }
  }

  pub fn caller(&self) -> Option<&Identity> {
    self.caller.as_ref()
  }

  /// La próxima llamada a `op` falla con `CoreError::Backend(message)`.
  pub fn fail_next(&self, op: &str, message: &str) {
    lock(&self.shared.faults).entry(op.to_string()).or_default().push_back(message.to_string());
  }

  /// Veces que se ha llamado a `op` (desde cualquier vista).
  pub fn calls(&self, op: &str) -> usize {
    lock(&self.shared.calls).get(op).copied().unwrap_or(0)
  }

  fn enter(&self, op: &str) -> Result<MutexGuard<'_, Store>, CoreError> {
    *lock(&self.shared.calls).entry(op.to_string()).or_default() += 1;
    if let Some(message) = lock(&self.shared.faults).get_mut(op).and_then(VecDeque::pop_front) {
      debug!(op, %message, "injected failure");
      return Err(CoreError::Backend(message));
    }
    Ok(lock(&self.shared.store))
  }

  fn enter_admin(&self, op: &str) -> Result<MutexGuard<'_, Store>, CoreError> {
    let store = self.enter(op)?;
    if store.role_of(self.caller.as_ref()) != UserRole::Admin {
      return Err(CoreError::Unauthorized("Only admins can perform this action".into()));
    }
    Ok(store)
  }

  fn enter_user(&self, op: &str) -> Result<(MutexGuard<'_, Store>, Identity), CoreError> {
    let store = self.enter(op)?;
    match &self.caller {
      Some(id) => Ok((store, id.clone())),
      None => Err(CoreError::Unauthorized("Only users can perform this action".into())),
    }
  }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
  m.lock().unwrap_or_else(|e| e.into_inner())
}

fn insert<E: Entity>(items: &mut Vec<E>, item: E) -> Result<(), CoreError> {
  if items.iter().any(|i| i.id() == item.id()) {
    return Err(CoreError::AlreadyExists(item.id().to_string()));
  }
  items.push(item);
  Ok(())
}

fn replace<E: Entity>(items: &mut [E], item: E) -> Result<(), CoreError> {
  let slot = items.iter_mut().find(|i| i.id() == item.id()).ok_or_else(|| CoreError::NotFound(item.id().to_string()))?;
  *slot = item;
  Ok(())
}

fn remove<E: Entity>(items: &mut Vec<E>, id: &E::Id) -> Result<(), CoreError> {
  let pos = items.iter().position(|i| i.id() == id).ok_or_else(|| CoreError::NotFound(id.to_string()))?;
  items.remove(pos);
  Ok(())
}

fn find<E: Entity>(items: &[E], id: &E::Id) -> Option<E> {
  items.iter().find(|i| i.id() == id).cloned()
}

#[async_trait]
impl SiteBackend for MemoryBackend {
  async fn get_profile(&self) -> Result<Option<ArtistProfile>, CoreError> {
    Ok(self.enter("get_profile")?.profile.clone())
  }

  async fn update_profile(&self, profile: ArtistProfile) -> Result<(), CoreError> {
    self.enter_admin("update_profile")?.profile = Some(profile);
    Ok(())
  }

  async fn add_release(&self, release: Release) -> Result<(), CoreError> {
    insert(&mut self.enter_admin("add_release")?.releases, release)
  }

  async fn get_release(&self, id: ReleaseId) -> Result<Option<Release>, CoreError> {
    Ok(find(&self.enter("get_release")?.releases, &id))
  }

  async fn get_all_releases(&self) -> Result<Vec<Release>, CoreError> {
    Ok(self.enter("get_all_releases")?.releases.clone())
  }

  async fn update_release(&self, release: Release) -> Result<(), CoreError> {
    replace(&mut self.enter_admin("update_release")?.releases, release)
  }

  async fn delete_release(&self, id: ReleaseId) -> Result<(), CoreError> {
    remove(&mut self.enter_admin("delete_release")?.releases, &id)
  }

  async fn add_track(&self, track: Track) -> Result<(), CoreError> {
    insert(&mut self.enter_admin("add_track")?.tracks, track)
  }

  async fn get_track(&self, id: TrackId) -> Result<Option<Track>, CoreError> {
    Ok(find(&self.enter("get_track")?.tracks, &id))
  }

  async fn get_all_tracks(&self) -> Result<Vec<Track>, CoreError> {
    Ok(self.enter("get_all_tracks")?.tracks.clone())
  }

  async fn update_track(&self, track: Track) -> Result<(), CoreError> {
    replace(&mut self.enter_admin("update_track")?.tracks, track)
  }

  async fn delete_track(&self, id: TrackId) -> Result<(), CoreError> {
    remove(&mut self.enter_admin("delete_track")?.tracks, &id)
  }

  async fn add_video(&self, video: Video) -> Result<(), CoreError> {
    insert(&mut self.enter_admin("add_video")?.videos, video)
  }

  async fn get_video(&self, id: VideoId) -> Result<Option<Video>, CoreError> {
    Ok(find(&self.enter("get_video")?.videos, &id))
  }

  async fn get_all_videos(&self) -> Result<Vec<Video>, CoreError> {
    Ok(self.enter("get_all_videos")?.videos.clone())
  }

  async fn update_video(&self, video: Video) -> Result<(), CoreError> {
    replace(&mut self.enter_admin("update_video")?.videos, video)
  }

  async fn delete_video(&self, id: VideoId) -> Result<(), CoreError> {
    remove(&mut self.enter_admin("delete_video")?.videos, &id)
  }

  async fn add_event(&self, event: Event) -> Result<(), CoreError> {
    insert(&mut self.enter_admin("add_event")?.events, event)
  }

  async fn get_event(&self, id: EventId) -> Result<Option<Event>, CoreError> {
    Ok(find(&self.enter("get_event")?.events, &id))
  }

  async fn get_all_events(&self) -> Result<Vec<Event>, CoreError> {
    Ok(self.enter("get_all_events")?.events.clone())
  }

  async fn update_event(&self, event: Event) -> Result<(), CoreError> {
    replace(&mut self.enter_admin("update_event")?.events, event)
  }

  async fn delete_event(&self, id: EventId) -> Result<(), CoreError> {
    remove(&mut self.enter_admin("delete_event")?.events, &id)
  }

  async fn add_gallery_item(&self, item: GalleryItem) -> Result<(), CoreError> {
    insert(&mut self.enter_admin("add_gallery_item")?.gallery, item)
  }

  async fn get_gallery_item(&self, id: GalleryItemId) -> Result<Option<GalleryItem>, CoreError> {
    Ok(find(&self.enter("get_gallery_item")?.gallery, &id))
  }

  async fn get_all_gallery_items(&self) -> Result<Vec<GalleryItem>, CoreError> {
    Ok(self.enter("get_all_gallery_items")?.gallery.clone())
  }

  async fn update_gallery_item(&self, item: GalleryItem) -> Result<(), CoreError> {
    replace(&mut self.enter_admin("update_gallery_item")?.gallery, item)
  }

  async fn delete_gallery_item(&self, id: GalleryItemId) -> Result<(), CoreError> {
    remove(&mut self.enter_admin("delete_gallery_item")?.gallery, &id)
  }

  async fn create_user_plan(&self, plan: UserPlan) -> Result<(), CoreError> {
    insert(self.enter_admin("create_user_plan")?.plans.get_or_insert_with(Vec::new), plan)
  }

  async fn get_user_plan(&self, id: PlanId) -> Result<Option<UserPlan>, CoreError> {
    let store = self.enter("get_user_plan")?;
    Ok(store.plans.as_deref().and_then(|plans| find(plans, &id)))
  }

  async fn get_all_user_plans(&self) -> Result<Option<Vec<UserPlan>>, CoreError> {
    Ok(self.enter("get_all_user_plans")?.plans.clone())
  }

  async fn update_user_plan(&self, plan: UserPlan) -> Result<(), CoreError> {
    let mut store = self.enter_admin("update_user_plan")?;
    match store.plans.as_mut() {
      Some(plans) => replace(plans, plan),
      None => Err(CoreError::NotFound(plan.id.to_string())),
    }
  }

  /// No toca las asignaciones: quien tuviera el plan se queda sin plan.
  async fn delete_user_plan(&self, id: PlanId) -> Result<(), CoreError> {
    let mut store = self.enter_admin("delete_user_plan")?;
    match store.plans.as_mut() {
      Some(plans) => remove(plans, &id),
      None => Err(CoreError::NotFound(id.to_string())),
    }
  }

  async fn assign_user_plan(&self, plan_id: PlanId) -> Result<(), CoreError> {
    let (mut store, caller) = self.enter_user("assign_user_plan")?;
    let exists = store.plans.as_deref().is_some_and(|plans| plans.iter().any(|p| p.id == plan_id));
    if !exists {
      return Err(CoreError::NotFound(plan_id.to_string()));
    }
    store.assignments.insert(caller, plan_id);
    Ok(())
  }

  async fn get_current_user_plan(&self) -> Result<Option<UserPlan>, CoreError> {
    let store = self.enter("get_current_user_plan")?;
    let Some(plan_id) = self.caller.as_ref().and_then(|c| store.assignments.get(c)) else {
      return Ok(None);
    };
    Ok(store.plans.as_deref().and_then(|plans| find(plans, plan_id)))
  }

  async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, CoreError> {
    let store = self.enter("get_caller_user_profile")?;
    Ok(self.caller.as_ref().and_then(|c| store.user_profiles.get(c).cloned()))
  }

  async fn save_caller_user_profile(&self, profile: UserProfile) -> Result<(), CoreError> {
    let (mut store, caller) = self.enter_user("save_caller_user_profile")?;
    store.user_profiles.insert(caller, profile);
    Ok(())
  }

  async fn get_user_profile(&self, user: Identity) -> Result<Option<UserProfile>, CoreError> {
    let store = self.enter("get_user_profile")?;
    let is_self = self.caller.as_ref() == Some(&user);
    if !is_self && store.role_of(self.caller.as_ref()) != UserRole::Admin {
      return Err(CoreError::Unauthorized("Can only view your own profile".into()));
    }
    Ok(store.user_profiles.get(&user).cloned())
  }

  async fn get_caller_user_role(&self) -> Result<UserRole, CoreError> {
    Ok(self.enter("get_caller_user_role")?.role_of(self.caller.as_ref()))
  }

  async fn is_caller_admin(&self) -> Result<bool, CoreError> {
    Ok(self.enter("is_caller_admin")?.role_of(self.caller.as_ref()) == UserRole::Admin)
  }

  async fn assign_caller_user_role(&self, user: Identity, role: UserRole) -> Result<(), CoreError> {
    self.enter_admin("assign_caller_user_role")?.roles.insert(user, role);
    Ok(())
  }

  /// Con tokens iguales el que llama pasa a admin; si no, queda como usuario.
  async fn initialize_artist(&self, admin_token: String, user_provided_token: String) -> Result<(), CoreError> {
    let (mut store, caller) = self.enter_user("initialize_artist")?;
    if admin_token == user_provided_token {
      store.roles.insert(caller, UserRole::Admin);
    } else {
      store.roles.entry(caller).or_insert(UserRole::User);
    }
    Ok(())
  }
}

/// Conecta vistas de un [`MemoryBackend`] compartido según la identidad.
#[derive(Clone)]
pub struct MemoryConnector {
  backend: MemoryBackend,
}

impl MemoryConnector {
  pub fn new(backend: MemoryBackend) -> Self {
    Self { backend }
  }
}

#[async_trait]
impl ClientConnector for MemoryConnector {
  async fn connect(&self, identity: Option<&Identity>) -> Result<Arc<dyn SiteBackend>, CoreError> {
    debug!(identity = ?identity.map(Identity::as_str), "connecting in-memory client");
    Ok(Arc::new(self.backend.as_caller(identity.cloned())))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use escena_core::domain::{BlobRef, Timestamp};

  fn release(title: &str) -> Release {
    Release {
      id: ReleaseId::generate(),
      title: title.into(),
      date: Timestamp::from_nanos(0),
      streaming_links: vec!["https://open.spotify.com/album/1".into()],
      cover_image: BlobRef::from_url("memory://blobs/cover"),
    }
  }

  #[tokio::test]
  async fn keeps_insertion_order_and_rejects_duplicates() {
    let backend = MemoryBackend::new();
    let a = release("A");
    let b = release("B");
    backend.add_release(a.clone()).await.unwrap();
    backend.add_release(b.clone()).await.unwrap();

    let err = backend.add_release(a.clone()).await.unwrap_err();
    assert!(matches!(err, CoreError::AlreadyExists(_)));
    assert_eq!(backend.get_all_releases().await.unwrap(), vec![a, b]);
  }

  #[tokio::test]
  async fn update_and_delete_missing_records_fail() {
    let backend = MemoryBackend::new();
    let r = release("Ghost");

    assert!(matches!(backend.update_release(r.clone()).await, Err(CoreError::NotFound(_))));
    assert!(matches!(backend.delete_release(r.id).await, Err(CoreError::NotFound(_))));
  }

  #[tokio::test]
  async fn non_admin_cannot_write_content() {
    let backend = MemoryBackend::new();
    let fan = backend.as_caller(Some(Identity::new("fan")));

    let err = fan.add_release(release("Nope")).await.unwrap_err();

    assert!(matches!(err, CoreError::Unauthorized(_)));
    assert!(backend.get_all_releases().await.unwrap().is_empty());
    assert!(!fan.is_caller_admin().await.unwrap());
    assert_eq!(fan.get_caller_user_role().await.unwrap(), UserRole::User);
  }

  #[tokio::test]
  async fn anonymous_is_guest() {
    let anon = MemoryBackend::new().as_caller(None);
    assert_eq!(anon.get_caller_user_role().await.unwrap(), UserRole::Guest);
    assert_eq!(anon.get_caller_user_profile().await.unwrap(), None);
    assert!(anon.save_caller_user_profile(UserProfile { name: "x".into() }).await.is_err());
  }

  #[tokio::test]
  async fn injected_failure_fires_once_and_is_counted() {
    let backend = MemoryBackend::new();
    backend.fail_next("get_all_videos", "timeout");

    assert_eq!(backend.get_all_videos().await, Err(CoreError::Backend("timeout".into())));
    assert_eq!(backend.get_all_videos().await, Ok(vec![]));
    assert_eq!(backend.calls("get_all_videos"), 2);
  }

  #[tokio::test]
  async fn initialize_artist_promotes_on_matching_token() {
    let backend = MemoryBackend::new();
    let owner = backend.as_caller(Some(Identity::new("owner")));
    let other = backend.as_caller(Some(Identity::new("other")));

    owner.initialize_artist("s3cret".into(), "s3cret".into()).await.unwrap();
    other.initialize_artist("s3cret".into(), "guess".into()).await.unwrap();

    assert!(owner.is_caller_admin().await.unwrap());
    assert!(!other.is_caller_admin().await.unwrap());
  }

  #[tokio::test]
  async fn plans_are_absent_until_first_created() {
    let backend = MemoryBackend::new();
    assert_eq!(backend.get_all_user_plans().await.unwrap(), None);

    let plan = UserPlan { id: PlanId::generate(), name: "Fan".into(), description: "d".into(), price: 0 };
    backend.create_user_plan(plan.clone()).await.unwrap();

    assert_eq!(backend.get_all_user_plans().await.unwrap(), Some(vec![plan]));
  }

  #[tokio::test]
  async fn connector_scopes_to_identity() {
    let backend = MemoryBackend::new();
    let connector = MemoryConnector::new(backend.clone());
    let fan = Identity::new("fan");

    let client = connector.connect(Some(&fan)).await.unwrap();
    client.save_caller_user_profile(UserProfile { name: "Fan".into() }).await.unwrap();

    assert_eq!(backend.get_user_profile(fan).await.unwrap(), Some(UserProfile { name: "Fan".into() }));
    assert_eq!(backend.get_caller_user_profile().await.unwrap(), None);
  }
}
