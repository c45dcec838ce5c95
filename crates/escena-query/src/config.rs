use std::time::Duration;

use escena_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use serde::{Deserialize, Serialize};

/// Sección `[query]` de escena.toml.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QueryConfig {
  /// Segundos durante los que un valor cacheado se sirve sin refrescar.
  #[serde(default = "default_stale_time_secs")]
  pub stale_time_secs: u64,
}

fn default_stale_time_secs() -> u64 {
  300
}

impl Default for QueryConfig {
  fn default() -> Self {
    Self { stale_time_secs: default_stale_time_secs() }
  }
}

impl QueryConfig {
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(&*CONFIG_BACKEND)
  }

  /// Lee la sección (o el default) y la vuelve a escribir para que el
  /// usuario vea todas las claves en el fichero.
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    let cfg: Self = backend.load_section_with_default("query")?;
    backend.save_section("query", &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("query", self)
  }

  pub fn stale_time(&self) -> Duration {
    Duration::from_secs(self.stale_time_secs)
  }
}
