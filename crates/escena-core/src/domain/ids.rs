use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Último sufijo entregado por [`next_suffix`].
static LAST_SUFFIX: AtomicU64 = AtomicU64::new(0);

/// Devuelve un sufijo basado en los milisegundos actuales desde epoch.
///
/// Es estrictamente creciente dentro del proceso: si dos ids se piden en el
/// mismo milisegundo, el segundo recibe `anterior + 1`.
pub fn next_suffix() -> u64 {
  let now = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or_default();

  let mut prev = LAST_SUFFIX.load(Ordering::Relaxed);
  loop {
    let candidate = now.max(prev + 1);
    match LAST_SUFFIX.compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed) {
      Ok(_) => return candidate,
      Err(actual) => prev = actual,
    }
  }
}

macro_rules! string_id {
  ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
    $(#[$meta])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      /// Prefijo usado al generar ids nuevos.
      pub const PREFIX: &'static str = $prefix;

      /// Genera un id nuevo con la forma `<prefijo>-<millis>`.
      pub fn generate() -> Self {
        $name(format!("{}-{}", Self::PREFIX, next_suffix()))
      }

      pub fn as_str(&self) -> &str {
        &self.0
      }
    }

    impl From<String> for $name {
      fn from(s: String) -> Self {
        $name(s)
      }
    }

    impl From<&str> for $name {
      fn from(s: &str) -> Self {
        $name(s.to_string())
      }
    }

    impl From<$name> for String {
      fn from(id: $name) -> Self {
        id.0
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }
  };
}

string_id!(
  /// Identificador de un lanzamiento (`Release`).
  ReleaseId,
  "release"
);

string_id!(
  /// Identificador de una pista. Siempre apunta a un [`ReleaseId`] existente
  /// en el momento de crearse, pero no hay borrado en cascada.
  TrackId,
  "track"
);

string_id!(VideoId, "video");

string_id!(
  /// Identificador de un concierto / evento.
  EventId,
  "event"
);

string_id!(GalleryItemId, "gallery");

string_id!(
  /// Identificador de un plan de suscripción.
  PlanId,
  "plan"
);
