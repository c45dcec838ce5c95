use std::sync::Arc;

use anyhow::{Context, Result};
use escena_admin::UploadConfig;
use escena_core::domain::Identity;
use escena_lib::{LoggingConfig, SiteApp, demo, site_render};
use escena_memory::{LOCAL_ADMIN, MemoryBackend, MemoryBlobStore, MemoryConnector, StaticIdentity};
use escena_query::QueryConfig;
use escena_site::Route;

/// Imprime el view model de cada ruta pedida (todas si no se pasa ninguna).
#[tokio::main]
async fn main() -> Result<()> {
  let logging = LoggingConfig::load().context("failed to load [logging]")?;
  escena_lib::init_logging(&logging).map_err(anyhow::Error::msg)?;

  let query = QueryConfig::load().context("failed to load [query]")?;
  let upload = UploadConfig::load().context("failed to load [upload]")?;

  let backend = MemoryBackend::new();
  demo::seed(&backend).await.context("failed to seed demo content")?;

  let app = SiteApp::new(
    Arc::new(MemoryConnector::new(backend)),
    Arc::new(StaticIdentity::logged_in(Identity::new(LOCAL_ADMIN))),
    Arc::new(MemoryBlobStore::new()),
    &query,
    upload,
  );
  app.start().await.map_err(anyhow::Error::msg)?;

  let mut paths: Vec<String> = std::env::args().skip(1).collect();
  if paths.is_empty() {
    paths = Route::ALL.iter().map(|r| r.path().to_string()).collect();
  }

  for path in paths {
    let view = site_render(&app, &path).await.map_err(anyhow::Error::msg)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
  }
  Ok(())
}
