use async_trait::async_trait;
use escena_core::domain::{Entity, Video};
use escena_core::ports::ProgressReporter;

use super::{Draft, FormError, required};
use crate::upload::BlobUploader;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoDraft {
  pub title: String,
  pub platform_link: String,
}

#[async_trait]
impl Draft for VideoDraft {
  type Record = Video;
  const NOUN: &'static str = "Video";

  fn load(record: &Video) -> Self {
    Self { title: record.title.clone(), platform_link: record.platform_link.clone() }
  }

  fn validate(&self, _original: Option<&Video>) -> Result<(), String> {
    required(&self.title, "Title")?;
    required(&self.platform_link, "Video link")
  }

  async fn build(
    &self,
    original: Option<&Video>,
    _uploader: &BlobUploader,
    _progress: &dyn ProgressReporter,
  ) -> Result<Video, FormError> {
    Ok(Video {
      id: original.map(|v| v.id.clone()).unwrap_or_else(Video::new_id),
      title: self.title.trim().to_string(),
      platform_link: self.platform_link.trim().to_string(),
    })
  }
}
