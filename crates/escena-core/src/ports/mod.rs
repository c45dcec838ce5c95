pub mod backend;
pub mod blobs;
pub mod identity;
pub mod notifier;
pub mod progress;

pub use backend::{ClientConnector, ClientHandle, SiteBackend};
pub use blobs::{BlobError, BlobStorage, UploadSession};
pub use identity::IdentityProvider;
pub use notifier::Notifier;
pub use progress::ProgressReporter;
