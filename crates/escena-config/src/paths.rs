use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

#[derive(Debug, Clone)]
pub struct EscenaPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
  pub cache_dir: PathBuf,
}

impl EscenaPaths {
  pub fn new() -> Result<Self, ConfigError> {
    let paths = match std::env::var("ESCENA_BASE_DIR") {
      Ok(env_base) => Self::under(PathBuf::from(env_base)),
      Err(_) => {
        let proj_dirs = ProjectDirs::from("com", "escena", "escena").ok_or(ConfigError::Directories)?;
        Self {
          base_dir: proj_dirs.config_dir().to_path_buf(),
          config_dir: proj_dirs.config_dir().to_path_buf(),
          cache_dir: proj_dirs.cache_dir().to_path_buf(),
        }
      }
    };

    std::fs::create_dir_all(&paths.config_dir)?;
    std::fs::create_dir_all(&paths.cache_dir)?;

    Ok(paths)
  }

  /// Layout portable: todo cuelga de `base`.
  pub fn under(base: PathBuf) -> Self {
    Self { config_dir: base.join("config"), cache_dir: base.join("cache"), base_dir: base }
  }

  pub fn detect() -> Result<Self, ConfigError> {
    Self::new()
  }

  /// Como [`EscenaPaths::detect`], pero si no hay home (contenedores, CI) cae
  /// a un directorio bajo el temporal del sistema en vez de abortar.
  pub fn detect_or_temp() -> Self {
    Self::detect().unwrap_or_else(|_| Self::under(std::env::temp_dir().join("escena")))
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("escena.toml")
  }
}
