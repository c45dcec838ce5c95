use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use escena_core::CoreError;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::{debug, warn};

use crate::error::QueryError;
use crate::keys::QueryKey;

type Erased = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<Erased, QueryError>>>;

#[derive(Default)]
struct Entry {
  value: Option<Erased>,
  updated_at: Option<Instant>,
  /// Tick de la petición que produjo `value`.
  value_tick: u64,
  /// Tick de la última invalidación. `value_tick < invalidated_tick` ⇒ inválido.
  invalidated_tick: u64,
  inflight: Option<(u64, SharedFetch)>,
  last_error: Option<QueryError>,
}

impl Entry {
  fn is_invalidated(&self) -> bool {
    self.value_tick < self.invalidated_tick
  }
}

#[derive(Default)]
struct State {
  entries: HashMap<QueryKey, Entry>,
  /// Reloj lógico: avanza en cada petición, invalidación y `clear`.
  tick: u64,
  /// Peticiones con tick `<= cleared_tick` se descartan al terminar.
  cleared_tick: u64,
}

impl State {
  fn next_tick(&mut self) -> u64 {
    self.tick += 1;
    self.tick
  }
}

struct Inner {
  state: Mutex<State>,
  stale_time: Duration,
}

impl Inner {
  fn lock(&self) -> MutexGuard<'_, State> {
    self.state.lock().unwrap_or_else(|e| e.into_inner())
  }

  fn complete(&self, key: QueryKey, tick: u64, result: &Result<Erased, QueryError>) {
    let mut state = self.lock();
    if tick <= state.cleared_tick {
      debug!(%key, tick, "discarding result fetched before cache clear");
      return;
    }

    let entry = state.entries.entry(key).or_default();
    if entry.inflight.as_ref().is_some_and(|(t, _)| *t == tick) {
      entry.inflight = None;
    }

    match result {
      Ok(value) if tick > entry.value_tick => {
        entry.value = Some(Arc::clone(value));
        entry.value_tick = tick;
        entry.updated_at = Some(Instant::now());
        entry.last_error = None;
        if entry.is_invalidated() {
          debug!(%key, tick, "stored result is already stale");
        }
      }
      Ok(_) => debug!(%key, tick, "ignoring result older than cached value"),
      Err(e) => {
        warn!(%key, error = %e, "query failed");
        entry.last_error = Some(e.clone());
      }
    }
  }
}

enum Plan {
  Fresh(Erased),
  Revalidate(Erased),
  Await(SharedFetch),
}

/// Caché de lecturas por [`QueryKey`].
///
/// - Llamadas concurrentes a la misma clave comparten una sola petición.
/// - La petición corre en una tarea propia: si quien la pidió se cae, sigue
///   hasta el final y guarda el resultado.
/// - Un valor más viejo que `stale_time` se devuelve tal cual y se refresca
///   en segundo plano.
/// - Tras [`QueryClient::invalidate`], la siguiente lectura espera una
///   petición nueva; una petición lanzada antes de invalidar que termine
///   después se guarda ya marcada como inválida.
///
/// Requiere un runtime de tokio.
#[derive(Clone)]
pub struct QueryClient {
  inner: Arc<Inner>,
}

impl QueryClient {
  pub fn new(stale_time: Duration) -> Self {
    Self { inner: Arc::new(Inner { state: Mutex::new(State::default()), stale_time }) }
  }

  pub fn stale_time(&self) -> Duration {
    self.inner.stale_time
  }

  /// Devuelve el valor de `key`, pidiéndolo con `fetcher` si hace falta.
  ///
  /// `fetcher` se invoca con el lock de la caché tomado: sólo debe construir
  /// el future, no hacer trabajo.
  pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, QueryError>
  where
    T: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
  {
    let plan = {
      let mut state = self.inner.lock();
      let stale_time = self.inner.stale_time;
      let (cached, aged, inflight) = {
        let entry = state.entries.entry(key).or_default();
        let cached = entry.value.clone().filter(|_| !entry.is_invalidated());
        let aged = entry.updated_at.is_none_or(|at| at.elapsed() >= stale_time);
        (cached, aged, entry.inflight.clone())
      };

      match (cached, inflight) {
        (Some(value), _) if !aged => Plan::Fresh(value),
        (Some(value), Some(_)) => Plan::Revalidate(value),
        (None, Some((tick, shared))) => {
          debug!(%key, tick, "joining in-flight query");
          Plan::Await(shared)
        }
        (cached, None) => {
          let tick = state.next_tick();
          let fut = fetcher().map(|res| res.map(|v| Arc::new(v) as Erased).map_err(QueryError::from));
          let shared = self.spawn(key, tick, fut.boxed());
          state.entries.entry(key).or_default().inflight = Some((tick, shared.clone()));
          match cached {
            Some(value) => {
              debug!(%key, tick, "serving aged value, refreshing in background");
              Plan::Revalidate(value)
            }
            None => Plan::Await(shared),
          }
        }
      }
    };

    let erased = match plan {
      Plan::Fresh(value) | Plan::Revalidate(value) => value,
      Plan::Await(shared) => shared.await?,
    };
    downcast(key, erased)
  }

  fn spawn(&self, key: QueryKey, tick: u64, fut: BoxFuture<'static, Result<Erased, QueryError>>) -> SharedFetch {
    debug!(%key, tick, "fetching");
    let inner = Arc::clone(&self.inner);
    let handle = tokio::spawn(async move {
      let result = fut.await;
      inner.complete(key, tick, &result);
      result
    });

    async move {
      match handle.await {
        Ok(result) => result,
        Err(e) => Err(QueryError::new(format!("query task failed: {e}"))),
      }
    }
    .boxed()
    .shared()
  }

  /// Valor cacheado (válido o no) sin hacer peticiones.
  pub fn peek<T: Clone + Send + Sync + 'static>(&self, key: QueryKey) -> Option<T> {
    let value = self.inner.lock().entries.get(&key)?.value.clone()?;
    downcast(key, value).ok()
  }

  pub fn is_fetching(&self, key: QueryKey) -> bool {
    self.inner.lock().entries.get(&key).is_some_and(|e| e.inflight.is_some())
  }

  /// Último error de la clave, si la última petición terminada falló.
  pub fn last_error(&self, key: QueryKey) -> Option<QueryError> {
    self.inner.lock().entries.get(&key).and_then(|e| e.last_error.clone())
  }

  /// Marca la clave como inválida y suelta la petición en curso.
  ///
  /// El valor anterior se conserva para [`QueryClient::peek`], pero la
  /// siguiente [`QueryClient::fetch`] no lo sirve.
  pub fn invalidate(&self, key: QueryKey) {
    let mut state = self.inner.lock();
    let tick = state.next_tick();
    let entry = state.entries.entry(key).or_default();
    entry.invalidated_tick = tick;
    entry.inflight = None;
    debug!(%key, tick, "invalidated");
  }

  /// Vacía la caché entera (logout). Las peticiones en curso se descartan.
  pub fn clear(&self) {
    let mut state = self.inner.lock();
    let tick = state.next_tick();
    state.cleared_tick = tick;
    state.entries.clear();
    debug!(tick, "query cache cleared");
  }
}

fn downcast<T: Clone + Send + Sync + 'static>(key: QueryKey, value: Erased) -> Result<T, QueryError> {
  value
    .downcast::<T>()
    .map(|v| (*v).clone())
    .map_err(|_| QueryError::new(format!("cached value for {key} has an unexpected type")))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use tokio::sync::oneshot;

  fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
  }

  async fn counted(calls: Arc<AtomicUsize>, value: u32) -> Result<u32, CoreError> {
    calls.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(20)).await;
    Ok(value)
  }

  #[tokio::test]
  async fn concurrent_reads_share_one_request() {
    let client = QueryClient::new(Duration::from_secs(300));
    let calls = counter();

    let a = client.fetch(QueryKey::Releases, {
      let calls = calls.clone();
      move || counted(calls, 7)
    });
    let b = client.fetch(QueryKey::Releases, {
      let calls = calls.clone();
      move || counted(calls, 8)
    });
    let (a, b) = tokio::join!(a, b);

    assert_eq!(a.unwrap(), 7);
    assert_eq!(b.unwrap(), 7);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn fresh_value_is_served_from_cache() {
    let client = QueryClient::new(Duration::from_secs(300));
    let calls = counter();

    for _ in 0..3 {
      let calls = calls.clone();
      let v = client.fetch(QueryKey::Videos, move || counted(calls, 1)).await.unwrap();
      assert_eq!(v, 1);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn invalidate_forces_a_new_request() {
    let client = QueryClient::new(Duration::from_secs(300));
    let calls = counter();

    let c = calls.clone();
    assert_eq!(client.fetch(QueryKey::Events, move || counted(c, 1)).await.unwrap(), 1);

    client.invalidate(QueryKey::Events);
    assert_eq!(client.peek::<u32>(QueryKey::Events), Some(1));

    let c = calls.clone();
    assert_eq!(client.fetch(QueryKey::Events, move || counted(c, 2)).await.unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn aged_value_is_returned_then_refreshed() {
    let client = QueryClient::new(Duration::ZERO);
    let calls = counter();

    let c = calls.clone();
    assert_eq!(client.fetch(QueryKey::Tracks, move || counted(c, 1)).await.unwrap(), 1);

    // Con stale_time 0 todo valor está viejo: se sirve y se refresca.
    let c = calls.clone();
    assert_eq!(client.fetch(QueryKey::Tracks, move || counted(c, 2)).await.unwrap(), 1);

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(client.peek::<u32>(QueryKey::Tracks), Some(2));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn request_started_before_invalidation_is_stored_as_stale() {
    let client = QueryClient::new(Duration::from_secs(300));
    let (tx, rx) = oneshot::channel::<u32>();

    let slow = {
      let client = client.clone();
      tokio::spawn(async move {
        client
          .fetch(QueryKey::GalleryItems, move || async move {
            rx.await.map_err(|_| CoreError::Backend("dropped".into()))
          })
          .await
      })
    };
    tokio::task::yield_now().await;
    while !client.is_fetching(QueryKey::GalleryItems) {
      tokio::task::yield_now().await;
    }

    client.invalidate(QueryKey::GalleryItems);
    tx.send(1).unwrap();
    assert_eq!(slow.await.unwrap().unwrap(), 1);

    // El valor viejo quedó guardado pero no se sirve: hay petición nueva.
    let calls = counter();
    let c = calls.clone();
    assert_eq!(client.fetch(QueryKey::GalleryItems, move || counted(c, 2)).await.unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn failure_keeps_previous_value() {
    let client = QueryClient::new(Duration::from_secs(300));

    client.fetch(QueryKey::UserPlans, || async { Ok::<_, CoreError>(vec![1u32, 2]) }).await.unwrap();
    client.invalidate(QueryKey::UserPlans);

    let err = client
      .fetch(QueryKey::UserPlans, || async { Err::<Vec<u32>, _>(CoreError::Backend("boom".into())) })
      .await
      .unwrap_err();

    assert_eq!(err.message(), "boom");
    assert_eq!(client.last_error(QueryKey::UserPlans), Some(err));
    assert_eq!(client.peek::<Vec<u32>>(QueryKey::UserPlans), Some(vec![1, 2]));
  }

  #[tokio::test]
  async fn dropped_reader_does_not_cancel_request() {
    let client = QueryClient::new(Duration::from_secs(300));
    let calls = counter();

    let c = calls.clone();
    let reader = client.fetch(QueryKey::ArtistProfile, move || counted(c, 5));
    // Se hace poll una vez (lanza la tarea) y se abandona.
    let _ = tokio::time::timeout(Duration::from_millis(1), reader).await;

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(client.peek::<u32>(QueryKey::ArtistProfile), Some(5));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn clear_discards_entries_and_late_results() {
    let client = QueryClient::new(Duration::from_secs(300));
    let calls = counter();

    let c = calls.clone();
    let pending = client.fetch(QueryKey::CurrentUserPlan, move || counted(c, 9));
    let _ = tokio::time::timeout(Duration::from_millis(1), pending).await;
    client.clear();

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(client.peek::<u32>(QueryKey::CurrentUserPlan), None);
  }

  #[tokio::test]
  async fn wrong_type_for_key_is_an_error() {
    let client = QueryClient::new(Duration::from_secs(300));
    client.fetch(QueryKey::IsAdmin, || async { Ok::<_, CoreError>(true) }).await.unwrap();

    let res = client.fetch(QueryKey::IsAdmin, || async { Ok::<_, CoreError>(1u8) }).await;
    assert!(res.is_err());
  }
}
