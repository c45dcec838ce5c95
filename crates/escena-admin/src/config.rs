use escena_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use serde::{Deserialize, Serialize};

/// Sección `[upload]` de escena.toml.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UploadConfig {
  /// Tamaño de cada trozo enviado al almacenamiento.
  #[serde(default = "default_chunk_size")]
  pub chunk_size_bytes: usize,

  /// Extensiones de imagen aceptadas (minúsculas, sin punto).
  #[serde(default = "default_image_exts")]
  pub image_exts: Vec<String>,
}

fn default_chunk_size() -> usize {
  64 * 1024
}

fn default_image_exts() -> Vec<String> {
  ["jpg", "jpeg", "png", "gif", "webp", "avif"].into_iter().map(String::from).collect()
}

impl Default for UploadConfig {
  fn default() -> Self {
    Self { chunk_size_bytes: default_chunk_size(), image_exts: default_image_exts() }
  }
}

impl UploadConfig {
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(&*CONFIG_BACKEND)
  }

  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    let cfg: Self = backend.load_section_with_default("upload")?;
    backend.save_section("upload", &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    self.save_to(&*CONFIG_BACKEND)
  }

  pub fn save_to<B: ConfigBackend>(&self, backend: &B) -> Result<(), ConfigError> {
    backend.save_section("upload", self)
  }

  pub fn accepts(&self, ext: &str) -> bool {
    self.image_exts.iter().any(|e| e.eq_ignore_ascii_case(ext))
  }
}
