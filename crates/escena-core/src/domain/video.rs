use serde::{Deserialize, Serialize};

use crate::domain::entity::Entity;
use crate::domain::ids::VideoId;

/// Vídeo alojado en una plataforma externa (YouTube, Vimeo...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
  pub id: VideoId,
  pub title: String,
  pub platform_link: String,
}

impl Entity for Video {
  type Id = VideoId;

  fn id(&self) -> &VideoId {
    &self.id
  }

  fn new_id() -> VideoId {
    VideoId::generate()
  }
}
