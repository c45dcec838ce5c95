use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use escena_core::domain::BlobRef;
use escena_core::ports::{BlobError, BlobStorage, ProgressReporter};
use escena_fs::{FsError, LocalFile};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::UploadConfig;

#[derive(Debug, Error)]
pub enum UploadError {
  #[error("could not read file: {0}")]
  Io(#[from] FsError),

  #[error("unsupported file type: {0}")]
  UnsupportedType(String),

  #[error("storage error: {0}")]
  Storage(#[from] BlobError),
}

/// Sube imágenes locales al almacenamiento de binarios por trozos.
#[derive(Clone)]
pub struct BlobUploader {
  storage: Arc<dyn BlobStorage>,
  config: UploadConfig,
}

impl BlobUploader {
  pub fn new(storage: Arc<dyn BlobStorage>, config: UploadConfig) -> Self {
    Self { storage, config }
  }

  pub fn config(&self) -> &UploadConfig {
    &self.config
  }

  pub async fn upload_file(&self, path: &Path, progress: &dyn ProgressReporter) -> Result<BlobRef, UploadError> {
    let result = self.try_upload(path, progress).await;
    match &result {
      Ok(blob) => {
        info!(path = %path.display(), url = blob.direct_url(), "upload finished");
        progress.finish().await;
      }
      Err(e) => {
        warn!(path = %path.display(), error = %e, "upload failed");
        progress.on_error(&e.to_string()).await;
      }
    }
    result
  }

  async fn try_upload(&self, path: &Path, progress: &dyn ProgressReporter) -> Result<BlobRef, UploadError> {
    let ext = escena_fs::extension_of(path).unwrap_or_default();
    if !self.config.accepts(&ext) {
      return Err(UploadError::UnsupportedType(path.display().to_string()));
    }

    let file = LocalFile::read(path).await?;
    let total = file.len();
    info!(path = %path.display(), bytes = total, "upload started");
    progress.start(total).await;

    let session = self.storage.begin(file.content_type(), total).await?;
    let mut meter = Meter::default();
    let mut offset = 0u64;

    for chunk in file.bytes.chunks(self.config.chunk_size_bytes.max(1)) {
      self.storage.put_chunk(&session, offset, chunk).await?;
      offset += chunk.len() as u64;
      if let Some(pct) = meter.advance(offset, total) {
        progress.on_progress(pct).await;
      }
    }
    if let Some(pct) = meter.complete() {
      progress.on_progress(pct).await;
    }

    Ok(self.storage.finish(session).await?)
  }
}

/// Porcentaje monótono en `[0, 100]`: sólo emite cuando sube.
#[derive(Debug, Default)]
struct Meter {
  last: Option<u8>,
}

impl Meter {
  fn advance(&mut self, sent: u64, total: u64) -> Option<u8> {
    let pct = if total == 0 { 100 } else { (sent.saturating_mul(100) / total).min(100) as u8 };
    self.emit(pct)
  }

  fn complete(&mut self) -> Option<u8> {
    self.emit(100)
  }

  fn emit(&mut self, pct: u8) -> Option<u8> {
    if self.last.is_some_and(|last| pct <= last) {
      return None;
    }
    self.last = Some(pct);
    Some(pct)
  }
}

/// Estado de una subida tal como lo ve un formulario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UploadStatus {
  Idle,
  Uploading { percentage: u8 },
  Done,
  Failed { message: String },
}

impl UploadStatus {
  /// Porcentaje a mostrar ("Uploading: N%") sólo mientras está a medias.
  pub fn visible_percentage(&self) -> Option<u8> {
    match self {
      UploadStatus::Uploading { percentage } if (1..100).contains(percentage) => Some(*percentage),
      _ => None,
    }
  }
}

/// [`ProgressReporter`] sobre un canal `watch`: el último estado siempre queda
/// guardado aunque no quede ningún receptor.
#[derive(Debug, Clone)]
pub struct WatchProgress {
  tx: watch::Sender<UploadStatus>,
}

impl WatchProgress {
  pub fn new() -> Self {
    Self { tx: watch::Sender::new(UploadStatus::Idle) }
  }

  pub fn subscribe(&self) -> watch::Receiver<UploadStatus> {
    self.tx.subscribe()
  }

  pub fn current(&self) -> UploadStatus {
    self.tx.borrow().clone()
  }

  pub fn reset(&self) {
    self.tx.send_replace(UploadStatus::Idle);
  }
}

impl Default for WatchProgress {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl ProgressReporter for WatchProgress {
  async fn start(&self, _total_bytes: u64) {
    self.tx.send_replace(UploadStatus::Uploading { percentage: 0 });
  }

  async fn on_progress(&self, percentage: u8) {
    self.tx.send_replace(UploadStatus::Uploading { percentage: percentage.min(100) });
  }

  async fn on_error(&self, error: &str) {
    self.tx.send_replace(UploadStatus::Failed { message: error.to_string() });
  }

  async fn finish(&self) {
    self.tx.send_replace(UploadStatus::Done);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use escena_memory::MemoryBlobStore;
  use std::sync::Mutex;
  use tempfile::tempdir;

  #[derive(Default)]
  struct Recorder {
    values: Mutex<Vec<u8>>,
    errors: Mutex<Vec<String>>,
  }

  #[async_trait]
  impl ProgressReporter for Recorder {
    async fn start(&self, _total_bytes: u64) {}
    async fn on_progress(&self, percentage: u8) {
      self.values.lock().unwrap().push(percentage);
    }
    async fn on_error(&self, error: &str) {
      self.errors.lock().unwrap().push(error.to_string());
    }
    async fn finish(&self) {}
  }

  fn uploader(store: &MemoryBlobStore, chunk: usize) -> BlobUploader {
    BlobUploader::new(Arc::new(store.clone()), UploadConfig { chunk_size_bytes: chunk, ..UploadConfig::default() })
  }

  #[tokio::test]
  async fn progress_is_monotonic_and_ends_at_100() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("cover.png");
    std::fs::write(&path, vec![7u8; 1000]).unwrap();
    let store = MemoryBlobStore::new();
    let recorder = Recorder::default();

    let blob = uploader(&store, 300).upload_file(&path, &recorder).await.unwrap();

    let values = recorder.values.lock().unwrap().clone();
    assert_eq!(values, vec![30, 60, 90, 100]);
    assert!(values.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(store.get(&blob).map(|(ct, bytes)| (ct, bytes.len())), Some(("image/png".to_string(), 1000)));
  }

  #[tokio::test]
  async fn empty_file_still_reports_100() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("blank.jpg");
    std::fs::write(&path, b"").unwrap();
    let recorder = Recorder::default();

    uploader(&MemoryBlobStore::new(), 64).upload_file(&path, &recorder).await.unwrap();

    assert_eq!(recorder.values.lock().unwrap().clone(), vec![100]);
  }

  #[tokio::test]
  async fn rejects_non_images_before_reading() {
    let recorder = Recorder::default();
    let err = uploader(&MemoryBlobStore::new(), 64)
      .upload_file(Path::new("/definitely/missing/notes.txt"), &recorder)
      .await
      .unwrap_err();

    assert!(matches!(err, UploadError::UnsupportedType(_)));
    assert_eq!(recorder.errors.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn storage_failure_is_reported() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("photo.webp");
    std::fs::write(&path, vec![1u8; 10]).unwrap();
    let store = MemoryBlobStore::new();
    store.fail_next_chunk("disk full");
    let progress = WatchProgress::new();
    let rx = progress.subscribe();

    let err = uploader(&store, 4).upload_file(&path, &progress).await.unwrap_err();

    assert!(matches!(err, UploadError::Storage(BlobError::Storage(_))));
    assert!(matches!(&*rx.borrow(), UploadStatus::Failed { .. }));
    assert_eq!(store.stored_count(), 0);
  }

  #[tokio::test]
  async fn watch_progress_survives_dropped_receiver() {
    let progress = WatchProgress::new();
    drop(progress.subscribe());

    progress.on_progress(150).await;
    assert_eq!(progress.current(), UploadStatus::Uploading { percentage: 100 });
    assert_eq!(progress.current().visible_percentage(), None);

    progress.on_progress(42).await;
    assert_eq!(progress.current().visible_percentage(), Some(42));
  }
}
