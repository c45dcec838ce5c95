mod backend;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use paths::{ConfigError, EscenaPaths};

use once_cell::sync::Lazy;

// Singleton de paths (ESCENA_BASE_DIR o directorios del sistema)
pub static PATHS: Lazy<EscenaPaths> = Lazy::new(EscenaPaths::detect_or_temp);

// Singleton del backend de config
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> = Lazy::new(|| TomlConfigBackend::new(PATHS.clone()));
