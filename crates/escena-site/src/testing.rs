use std::sync::Arc;
use std::time::Duration;

use escena_core::ports::ClientHandle;
use escena_memory::{MemoryBackend, RecordingNotifier};
use escena_query::{Mutations, QueryClient, SiteQueries};

pub struct Site {
  pub backend: MemoryBackend,
  pub queries: SiteQueries,
  pub mutations: Mutations,
  pub notifier: Arc<RecordingNotifier>,
}

/// Sitio conectado a `backend`, con la identidad de esa vista.
pub fn site_for(backend: MemoryBackend) -> Site {
  let handle = ClientHandle::ready(Arc::new(backend.clone()));
  let cache = QueryClient::new(Duration::from_secs(300));
  let notifier = Arc::new(RecordingNotifier::default());
  Site {
    queries: SiteQueries::new(handle.clone(), cache.clone()),
    mutations: Mutations::new(handle, cache, notifier.clone()),
    notifier,
    backend,
  }
}

pub fn site() -> Site {
  site_for(MemoryBackend::new())
}
