use escena_core::domain::group_tracks_by_release;
use escena_query::{QueryResult, SiteQueries};
use serde::Serialize;

use crate::format;
use crate::platforms::PlatformLink;
use crate::view::{Icon, PageView, list_view};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseCard {
  pub id: String,
  pub title: String,
  pub date_label: String,
  pub cover_url: String,
  /// Títulos en el orden en que se dieron de alta.
  pub tracks: Vec<String>,
  pub links: Vec<PlatformLink>,
}

pub async fn releases_page(queries: &SiteQueries) -> PageView<Vec<ReleaseCard>> {
  let (releases, tracks) = tokio::join!(queries.releases(), queries.tracks());
  let releases = QueryResult { is_loading: releases.is_loading || tracks.is_loading, ..releases };
  let tracks = tracks.data.unwrap_or_default();

  list_view(releases, 4, (Icon::Music, "No releases yet"), |releases| {
    group_tracks_by_release(&releases, &tracks)
      .into_iter()
      .map(|group| ReleaseCard {
        id: group.release.id.to_string(),
        date_label: format::release_date(group.release.date),
        cover_url: group.release.cover_image.direct_url().to_string(),
        tracks: group.tracks.into_iter().map(|t| t.title).collect(),
        links: group.release.streaming_links.iter().map(|l| PlatformLink::new(l, "Listen")).collect(),
        title: group.release.title,
      })
      .collect()
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::site;
  use escena_core::domain::{BlobRef, Release, ReleaseId, Timestamp, Track, TrackId};

  #[tokio::test]
  async fn cards_group_tracks_and_label_links() {
    let s = site();
    let release = Release {
      id: ReleaseId::generate(),
      title: "Night Drive".into(),
      date: Timestamp::parse_date_input("2025-12-01").unwrap(),
      streaming_links: vec!["https://open.spotify.com/album/1".into(), "https://artist.bandcamp.com".into()],
      cover_image: BlobRef::from_url("memory://blobs/cover"),
    };
    s.mutations.add(release.clone()).await.unwrap();
    for title in ["Intro", "Highway"] {
      let track = Track { id: TrackId::generate(), title: title.into(), release_id: release.id.clone() };
      s.mutations.add(track).await.unwrap();
    }

    let view = releases_page(&s.queries).await;
    let card = &view.ready().unwrap()[0];

    assert_eq!(card.date_label, "December 1, 2025");
    assert_eq!(card.tracks, ["Intro", "Highway"]);
    assert_eq!(card.links.iter().map(|l| l.label.as_str()).collect::<Vec<_>>(), ["Spotify", "Listen"]);
    assert_eq!(card.cover_url, "memory://blobs/cover");
  }

  #[tokio::test]
  async fn empty_catalog() {
    let s = site();
    assert_eq!(releases_page(&s.queries).await, PageView::Empty { icon: Icon::Music, message: "No releases yet" });
  }
}
