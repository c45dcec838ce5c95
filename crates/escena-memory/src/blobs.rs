use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use escena_core::domain::BlobRef;
use escena_core::ports::{BlobError, BlobStorage, UploadSession};
use uuid::Uuid;

const URL_PREFIX: &str = "memory://blobs/";

struct Pending {
  content_type: String,
  total_bytes: u64,
  bytes: Vec<u8>,
}

#[derive(Default)]
struct Blobs {
  pending: HashMap<String, Pending>,
  stored: HashMap<String, (String, Vec<u8>)>,
  chunk_faults: VecDeque<String>,
  chunks_received: usize,
}

/// Almacenamiento de binarios en memoria. Las URLs son `memory://blobs/<uuid>`.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
  inner: Arc<Mutex<Blobs>>,
}

impl MemoryBlobStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> MutexGuard<'_, Blobs> {
    self.inner.lock().unwrap_or_else(|e| e.into_inner())
  }

  /// El próximo `put_chunk` falla con `BlobError::Storage(message)`.
  pub fn fail_next_chunk(&self, message: &str) {
    self.lock().chunk_faults.push_back(message.to_string());
  }

  /// Contenido y tipo de un blob ya terminado.
  pub fn get(&self, blob: &BlobRef) -> Option<(String, Vec<u8>)> {
    let key = blob.direct_url().strip_prefix(URL_PREFIX)?;
    self.lock().stored.get(key).cloned()
  }

  pub fn stored_count(&self) -> usize {
    self.lock().stored.len()
  }

  pub fn chunks_received(&self) -> usize {
    self.lock().chunks_received
  }
}

#[async_trait]
impl BlobStorage for MemoryBlobStore {
  async fn begin(&self, content_type: &str, total_bytes: u64) -> Result<UploadSession, BlobError> {
    let id = Uuid::new_v4().to_string();
    let pending = Pending { content_type: content_type.to_string(), total_bytes, bytes: Vec::new() };
    self.lock().pending.insert(id.clone(), pending);
    Ok(UploadSession { id, content_type: content_type.to_string(), total_bytes })
  }

  async fn put_chunk(&self, session: &UploadSession, offset: u64, chunk: &[u8]) -> Result<(), BlobError> {
    let mut blobs = self.lock();
    if let Some(message) = blobs.chunk_faults.pop_front() {
      blobs.pending.remove(&session.id);
      return Err(BlobError::Storage(message));
    }

    let pending = blobs.pending.get_mut(&session.id).ok_or_else(|| BlobError::UnknownSession(session.id.clone()))?;
    let expected = pending.bytes.len() as u64;
    if offset != expected {
      return Err(BlobError::OutOfOrder { expected, got: offset });
    }
    pending.bytes.extend_from_slice(chunk);
    blobs.chunks_received += 1;
    Ok(())
  }

  async fn finish(&self, session: UploadSession) -> Result<BlobRef, BlobError> {
    let mut blobs = self.lock();
    let pending = blobs.pending.remove(&session.id).ok_or_else(|| BlobError::UnknownSession(session.id.clone()))?;
    let received = pending.bytes.len() as u64;
    if received != pending.total_bytes {
      return Err(BlobError::Incomplete { received, expected: pending.total_bytes });
    }
    blobs.stored.insert(session.id.clone(), (pending.content_type, pending.bytes));
    Ok(BlobRef::from_url(format!("{URL_PREFIX}{}", session.id)))
  }
}
