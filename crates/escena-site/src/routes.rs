use serde::Serialize;

/// Rutas del sitio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
  Home,
  Music,
  Videos,
  Shows,
  Gallery,
  Plans,
  Admin,
}

impl Route {
  pub const ALL: [Route; 7] =
    [Route::Home, Route::Music, Route::Videos, Route::Shows, Route::Gallery, Route::Plans, Route::Admin];

  pub fn path(self) -> &'static str {
    match self {
      Route::Home => "/",
      Route::Music => "/music",
      Route::Videos => "/videos",
      Route::Shows => "/shows",
      Route::Gallery => "/gallery",
      Route::Plans => "/plans",
      Route::Admin => "/admin",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Route::Home => "Home",
      Route::Music => "Music",
      Route::Videos => "Videos",
      Route::Shows => "Shows",
      Route::Gallery => "Gallery",
      Route::Plans => "Plans",
      Route::Admin => "Admin",
    }
  }

  /// Acepta barra final, query string y fragmento: `/shows/?x=1#top` → Shows.
  pub fn parse(path: &str) -> Option<Self> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    Self::ALL.into_iter().find(|r| r.path() == normalized)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
  pub route: Route,
  pub path: &'static str,
  pub label: &'static str,
  pub active: bool,
}

/// Enlaces de la cabecera. `Admin` sólo aparece para administradores.
pub fn nav_links(is_admin: bool, current: Route) -> Vec<NavLink> {
  Route::ALL
    .into_iter()
    .filter(|r| *r != Route::Admin || is_admin)
    .map(|route| NavLink { route, path: route.path(), label: route.label(), active: route == current })
    .collect()
}
