//! Panel de administración de Escena.
//!
//! Formularios de alta/edición, subida de imágenes y la puerta de acceso a
//! `/admin`. Todas las escrituras pasan por [`escena_query::Mutations`].

pub mod config;
pub mod dashboard;
pub mod forms;
pub mod managers;
pub mod upload;

pub use config::UploadConfig;
pub use dashboard::{AdminGate, AdminPanel, AdminTab, AdminView};
pub use forms::{EntityForm, FormError, FormPhase};
pub use managers::{Manager, ReleasesManager, Section};
pub use upload::{BlobUploader, UploadError, UploadStatus, WatchProgress};

#[cfg(test)]
mod testing;
