use serde::Serialize;
use std::fmt;

/// Identificador de cada lectura cacheada.
///
/// Los nombres son estables: aparecen en logs y en la salida de la app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryKey {
  ArtistProfile,
  Releases,
  Tracks,
  Videos,
  Events,
  GalleryItems,
  CurrentUserProfile,
  IsAdmin,
  UserPlans,
  CurrentUserPlan,
}

impl QueryKey {
  pub const ALL: [QueryKey; 10] = [
    QueryKey::ArtistProfile,
    QueryKey::Releases,
    QueryKey::Tracks,
    QueryKey::Videos,
    QueryKey::Events,
    QueryKey::GalleryItems,
    QueryKey::CurrentUserProfile,
    QueryKey::IsAdmin,
    QueryKey::UserPlans,
    QueryKey::CurrentUserPlan,
  ];

  pub fn name(self) -> &'static str {
    match self {
      QueryKey::ArtistProfile => "artistProfile",
      QueryKey::Releases => "releases",
      QueryKey::Tracks => "tracks",
      QueryKey::Videos => "videos",
      QueryKey::Events => "events",
      QueryKey::GalleryItems => "galleryItems",
      QueryKey::CurrentUserProfile => "currentUserProfile",
      QueryKey::IsAdmin => "isAdmin",
      QueryKey::UserPlans => "userPlans",
      QueryKey::CurrentUserPlan => "currentUserPlan",
    }
  }
}

impl fmt::Display for QueryKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
