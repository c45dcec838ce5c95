use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use escena_core::ports::ClientHandle;
use escena_memory::{MemoryBackend, MemoryBlobStore, RecordingNotifier};
use escena_query::{Mutations, QueryClient, SiteQueries};

use crate::config::UploadConfig;
use crate::upload::BlobUploader;

pub struct Panel {
  pub backend: MemoryBackend,
  pub blobs: MemoryBlobStore,
  pub queries: SiteQueries,
  pub mutations: Mutations,
  pub uploader: BlobUploader,
  pub notifier: Arc<RecordingNotifier>,
}

pub fn panel_for(backend: MemoryBackend) -> Panel {
  let handle = ClientHandle::ready(Arc::new(backend.clone()));
  let cache = QueryClient::new(Duration::from_secs(300));
  let notifier = Arc::new(RecordingNotifier::default());
  let blobs = MemoryBlobStore::new();
  let config = UploadConfig { chunk_size_bytes: 1024, ..UploadConfig::default() };
  Panel {
    queries: SiteQueries::new(handle.clone(), cache.clone()),
    mutations: Mutations::new(handle, cache, notifier.clone()),
    uploader: BlobUploader::new(Arc::new(blobs.clone()), config),
    notifier,
    blobs,
    backend,
  }
}

pub fn panel() -> Panel {
  panel_for(MemoryBackend::new())
}

pub fn write_image(dir: &Path, name: &str, len: usize) -> PathBuf {
  let path = dir.join(name);
  std::fs::write(&path, vec![0xAB; len]).unwrap();
  path
}
