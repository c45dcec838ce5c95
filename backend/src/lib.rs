mod config;
pub mod demo;
mod infrastructure;

use std::sync::Arc;

use escena_admin::{AdminPanel, BlobUploader, UploadConfig};
use escena_config::{CONFIG_BACKEND, ConfigBackend};
use escena_core::domain::PlanId;
use escena_core::ports::{BlobStorage, ClientConnector, ClientHandle, IdentityProvider};
use escena_query::{Mutations, QueryClient, QueryConfig, SiteQueries};
use escena_site::pages::{self, PlansPage};
use escena_site::routes::nav_links;
use escena_site::{Route, Session};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use crate::config::{LoggingConfig, UploadConfigDto};
pub use infrastructure::notifier::TracingNotifier;

/// Instala el subscriber global. `RUST_LOG` manda sobre la sección `[logging]`.
pub fn init_logging(cfg: &LoggingConfig) -> Result<(), String> {
  let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cfg.filter)).map_err(|e| e.to_string())?;
  tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).try_init().map_err(|e| e.to_string())
}

/// Estado de la aplicación: sesión, lecturas, escrituras y panel.
pub struct SiteApp {
  session: Session,
  queries: SiteQueries,
  plans: PlansPage,
  admin: AdminPanel,
}

impl SiteApp {
  pub fn new(
    connector: Arc<dyn ClientConnector>,
    identity: Arc<dyn IdentityProvider>,
    blobs: Arc<dyn BlobStorage>,
    query: &QueryConfig,
    upload: UploadConfig,
  ) -> Self {
    // --- Wiring ---

    // 1. Cliente remoto: arranca "conectando" hasta `start`.
    let handle = ClientHandle::connecting();

    // 2. Caché compartida por lecturas, escrituras y sesión.
    let cache = QueryClient::new(query.stale_time());

    // 3. Lecturas y escrituras sobre el mismo cliente.
    let queries = SiteQueries::new(handle.clone(), cache.clone());
    let mutations = Mutations::new(handle.clone(), cache.clone(), Arc::new(TracingNotifier));

    // 4. Subidas de imágenes del panel.
    let uploader = BlobUploader::new(blobs, upload);

    Self {
      session: Session::new(identity, connector, handle, cache),
      plans: PlansPage::new(queries.clone(), mutations.clone()),
      admin: AdminPanel::new(queries.clone(), mutations, uploader),
      queries,
    }
  }

  /// Conecta el cliente con la identidad actual.
  pub async fn start(&self) -> Result<(), String> {
    self.session.connect().await.map_err(|e| e.to_string())
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  pub fn admin(&self) -> &AdminPanel {
    &self.admin
  }

  async fn page(&self, route: Route) -> Result<Value, serde_json::Error> {
    let authenticated = self.session.is_authenticated();
    let q = &self.queries;
    match route {
      Route::Home => serde_json::to_value(pages::home_page(q).await),
      Route::Music => serde_json::to_value(pages::releases_page(q).await),
      Route::Videos => serde_json::to_value(pages::videos_page(q).await),
      Route::Shows => serde_json::to_value(pages::shows_page(q).await),
      Route::Gallery => serde_json::to_value(pages::gallery_page(q).await),
      Route::Plans => serde_json::to_value(self.plans.view(authenticated).await),
      Route::Admin => serde_json::to_value(self.admin.gate().view(authenticated).await),
    }
  }
}

/// Command: Renders the view model of a site path as JSON.
pub async fn site_render(app: &SiteApp, path: &str) -> Result<Value, String> {
  let route = Route::parse(path).ok_or_else(|| format!("unknown route: {path}"))?;
  let is_admin = app.queries.is_caller_admin().await.data.unwrap_or(false);
  let page = app.page(route).await.map_err(|e| e.to_string())?;
  Ok(json!({ "route": route, "nav": nav_links(is_admin, route), "page": page }))
}

/// Command: Logs in through the identity provider and reconnects.
pub async fn session_login(app: &SiteApp) -> Result<String, String> {
  app.session.login().await.map(|id| id.to_string()).map_err(|e| e.to_string())
}

/// Command: Logs out, clearing every cached read.
pub async fn session_logout(app: &SiteApp) -> Result<(), String> {
  app.session.logout().await.map_err(|e| e.to_string())
}

/// Command: Assigns a plan to the caller. `false` if a selection was already running.
pub async fn plans_select(app: &SiteApp, plan_id: String) -> Result<bool, String> {
  app.plans.select(PlanId::from(plan_id.as_str())).await.map_err(|e| e.to_string())
}

/// Command: Retrieves the current upload configuration.
pub fn upload_get_config() -> Result<UploadConfigDto, String> {
  upload_get_config_from(&*CONFIG_BACKEND)
}

/// Command: Persists an updated upload configuration.
pub fn upload_save_config(input: UploadConfigDto) -> Result<(), String> {
  upload_save_config_to(&*CONFIG_BACKEND, input)
}

fn upload_get_config_from<B: ConfigBackend>(backend: &B) -> Result<UploadConfigDto, String> {
  let cfg = UploadConfig::load_from(backend).map_err(|e| e.to_string())?;
  Ok(UploadConfigDto::from(cfg))
}

fn upload_save_config_to<B: ConfigBackend>(backend: &B, input: UploadConfigDto) -> Result<(), String> {
  let cfg = UploadConfig::try_from(input)?;
  cfg.save_to(backend).map_err(|e| e.to_string())
}
