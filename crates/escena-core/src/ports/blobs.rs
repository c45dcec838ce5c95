use async_trait::async_trait;

use crate::domain::BlobRef;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobError {
  #[error("upload session not found: {0}")]
  UnknownSession(String),

  #[error("chunk out of order: expected offset {expected}, got {got}")]
  OutOfOrder { expected: u64, got: u64 },

  #[error("incomplete upload: {received} of {expected} bytes")]
  Incomplete { received: u64, expected: u64 },

  #[error("storage error: {0}")]
  Storage(String),
}

/// Sesión de subida abierta en el almacenamiento remoto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession {
  pub id: String,
  pub content_type: String,
  pub total_bytes: u64,
}

/// Port de almacenamiento de binarios.
///
/// La subida va por trozos para poder informar progreso:
/// `begin` → `put_chunk`* (offsets consecutivos) → `finish`.
/// Sólo `finish` produce un [`BlobRef`] utilizable.
#[async_trait]
pub trait BlobStorage: Send + Sync {
  async fn begin(&self, content_type: &str, total_bytes: u64) -> Result<UploadSession, BlobError>;

  async fn put_chunk(&self, session: &UploadSession, offset: u64, chunk: &[u8]) -> Result<(), BlobError>;

  async fn finish(&self, session: UploadSession) -> Result<BlobRef, BlobError>;
}
