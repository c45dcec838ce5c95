use escena_query::QueryResult;
use serde::Serialize;

/// Iconos que usan las vistas. Sólo la etiqueta: pintarlos es cosa de la UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
  Music,
  Video,
  Calendar,
  MapPin,
  Image,
  User,
  ExternalLink,
  Loader,
  ShieldAlert,
  LogIn,
  Check,
  Spotify,
  AppleMusic,
  YouTube,
  SoundCloud,
  Tidal,
  AmazonMusic,
  Instagram,
  X,
  Facebook,
  LinkedIn,
  TikTok,
}

/// Estado pintable de una página o sección.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "content", rename_all = "snake_case")]
pub enum PageView<T> {
  /// `skeletons` = cuántas tarjetas fantasma mostrar.
  Loading { skeletons: usize },
  Empty { icon: Icon, message: &'static str },
  Ready(T),
}

impl<T> PageView<T> {
  pub fn is_loading(&self) -> bool {
    matches!(self, PageView::Loading { .. })
  }

  pub fn ready(&self) -> Option<&T> {
    match self {
      PageView::Ready(t) => Some(t),
      _ => None,
    }
  }
}

/// Vista de una colección: cargando, vacía (también si la lectura falló) o
/// la lista transformada con `render`.
pub fn list_view<T, U>(
  result: QueryResult<Vec<T>>,
  skeletons: usize,
  empty: (Icon, &'static str),
  render: impl FnOnce(Vec<T>) -> Vec<U>,
) -> PageView<Vec<U>> {
  if result.is_loading {
    return PageView::Loading { skeletons };
  }
  match result.data {
    Some(items) if !items.is_empty() => PageView::Ready(render(items)),
    _ => PageView::Empty { icon: empty.0, message: empty.1 },
  }
}
