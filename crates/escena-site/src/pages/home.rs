use escena_query::SiteQueries;
use serde::Serialize;

use crate::platforms::PlatformLink;
use crate::view::{Icon, PageView};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
  pub name: String,
  pub bio: String,
  /// Vacío → no se pinta la sección de redes.
  pub socials: Vec<PlatformLink>,
}

pub async fn home_page(queries: &SiteQueries) -> PageView<HomeView> {
  let result = queries.artist_profile().await;
  if result.is_loading {
    return PageView::Loading { skeletons: 2 };
  }
  match result.data.flatten() {
    Some(profile) => PageView::Ready(HomeView {
      socials: profile.socials.iter().map(|s| PlatformLink::new(s, "Link")).collect(),
      name: profile.name,
      bio: profile.bio,
    }),
    None => PageView::Empty { icon: Icon::User, message: "Artist profile not yet configured" },
  }
}
