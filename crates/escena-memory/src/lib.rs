//! Adapters en memoria de los ports de `escena-core`.
//!
//! Los usa la app de demostración y los tests de los demás crates: guardan
//! todo en el proceso, cuentan llamadas y permiten inyectar fallos.

mod backend;
mod blobs;
mod identity;
mod notifier;

pub use backend::{LOCAL_ADMIN, MemoryBackend, MemoryConnector};
pub use blobs::MemoryBlobStore;
pub use identity::StaticIdentity;
pub use notifier::{Notification, RecordingNotifier};
