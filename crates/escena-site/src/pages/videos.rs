use escena_core::domain::Video;
use escena_query::SiteQueries;
use serde::Serialize;

use crate::view::{Icon, PageView, list_view};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoCard {
  pub id: String,
  pub title: String,
  pub watch_url: String,
}

impl From<Video> for VideoCard {
  fn from(v: Video) -> Self {
    Self { id: v.id.to_string(), title: v.title, watch_url: v.platform_link }
  }
}

pub async fn videos_page(queries: &SiteQueries) -> PageView<Vec<VideoCard>> {
  list_view(queries.videos().await, 6, (Icon::Video, "No videos yet"), |videos| {
    videos.into_iter().map(VideoCard::from).collect()
  })
}
