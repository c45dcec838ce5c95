use escena_core::domain::UserProfile;
use escena_query::{Mutations, SiteQueries};
use serde::Serialize;
use tracing::debug;

use crate::forms::{FormError, GalleryDraft, PlanDraft, ProfileEditor, ShowDraft, VideoDraft, required};
use crate::managers::{Manager, ReleasesManager};
use crate::upload::BlobUploader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminTab {
  Profile,
  Releases,
  Videos,
  Shows,
  Gallery,
  Plans,
}

impl AdminTab {
  pub const ALL: [AdminTab; 6] =
    [AdminTab::Profile, AdminTab::Releases, AdminTab::Videos, AdminTab::Shows, AdminTab::Gallery, AdminTab::Plans];

  pub fn label(self) -> &'static str {
    match self {
      AdminTab::Profile => "Profile",
      AdminTab::Releases => "Releases",
      AdminTab::Videos => "Videos",
      AdminTab::Shows => "Shows",
      AdminTab::Gallery => "Gallery",
      AdminTab::Plans => "Plans",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AdminView {
  LoginRequired,
  Loading,
  AccessDenied,
  Dashboard {
    tabs: Vec<AdminTab>,
    /// El usuario aún no tiene perfil propio: pedirle un nombre.
    show_profile_setup: bool,
  },
}

/// Decide qué ve quien entra en `/admin`. No lanza errores: un fallo al
/// comprobar el rol se trata como "no admin".
#[derive(Clone)]
pub struct AdminGate {
  queries: SiteQueries,
  mutations: Mutations,
}

impl AdminGate {
  pub fn new(queries: SiteQueries, mutations: Mutations) -> Self {
    Self { queries, mutations }
  }

  pub async fn view(&self, authenticated: bool) -> AdminView {
    if !authenticated {
      return AdminView::LoginRequired;
    }

    let (admin, profile) = tokio::join!(self.queries.is_caller_admin(), self.queries.caller_user_profile());
    if admin.is_loading {
      return AdminView::Loading;
    }
    if admin.data != Some(true) {
      debug!("admin area requested by non-admin caller");
      return AdminView::AccessDenied;
    }

    let show_profile_setup = !profile.is_loading && profile.error.is_none() && profile.data == Some(None);
    AdminView::Dashboard { tabs: AdminTab::ALL.to_vec(), show_profile_setup }
  }

  /// Guarda el nombre pedido en el alta inicial.
  pub async fn complete_profile_setup(&self, name: &str) -> Result<(), FormError> {
    required(name, "Name").map_err(FormError::Validation)?;
    self.mutations.save_caller_user_profile(UserProfile { name: name.trim().to_string() }).await?;
    Ok(())
  }
}

/// Todo el panel: la puerta y una pestaña por colección.
pub struct AdminPanel {
  gate: AdminGate,
  queries: SiteQueries,
  mutations: Mutations,
  pub releases: ReleasesManager,
  pub videos: Manager<VideoDraft>,
  pub shows: Manager<ShowDraft>,
  pub gallery: Manager<GalleryDraft>,
  pub plans: Manager<PlanDraft>,
}

impl AdminPanel {
  pub fn new(queries: SiteQueries, mutations: Mutations, uploader: BlobUploader) -> Self {
    let (q, m, u) = (&queries, &mutations, &uploader);
    Self {
      gate: AdminGate::new(q.clone(), m.clone()),
      releases: ReleasesManager::new(q.clone(), m.clone(), u.clone()),
      videos: Manager::new(q.clone(), m.clone(), u.clone()),
      shows: Manager::new(q.clone(), m.clone(), u.clone()),
      gallery: Manager::new(q.clone(), m.clone(), u.clone()),
      plans: Manager::new(q.clone(), m.clone(), u.clone()),
      queries,
      mutations,
    }
  }

  pub fn gate(&self) -> &AdminGate {
    &self.gate
  }

  /// `None` mientras el perfil se está cargando.
  pub async fn profile_editor(&self) -> Option<ProfileEditor> {
    ProfileEditor::load(&self.queries).await
  }

  pub async fn save_profile(&self, editor: &ProfileEditor) -> Result<(), FormError> {
    editor.save(&self.mutations).await
  }
}
