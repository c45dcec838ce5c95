use escena_admin::UploadConfig;
use escena_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use serde::{Deserialize, Serialize};

/// Sección `[logging]` de escena.toml. `RUST_LOG` tiene prioridad.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
  #[serde(default = "default_filter")]
  pub filter: String,
}

fn default_filter() -> String {
  "info".to_string()
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self { filter: default_filter() }
  }
}

impl LoggingConfig {
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(&*CONFIG_BACKEND)
  }

  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    let cfg: Self = backend.load_section_with_default("logging")?;
    backend.save_section("logging", &cfg)?;
    Ok(cfg)
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadConfigDto {
  pub chunk_size_bytes: usize,
  pub image_exts: Vec<String>,
}

impl From<UploadConfig> for UploadConfigDto {
  fn from(cfg: UploadConfig) -> Self {
    UploadConfigDto { chunk_size_bytes: cfg.chunk_size_bytes, image_exts: cfg.image_exts }
  }
}

impl TryFrom<UploadConfigDto> for UploadConfig {
  type Error = String;

  fn try_from(dto: UploadConfigDto) -> Result<Self, Self::Error> {
    if dto.chunk_size_bytes == 0 {
      return Err("chunk size must be greater than zero".to_string());
    }
    Ok(UploadConfig {
      chunk_size_bytes: dto.chunk_size_bytes,
      image_exts: dto.image_exts.into_iter().map(|e| e.trim().trim_start_matches('.').to_lowercase()).collect(),
    })
  }
}
