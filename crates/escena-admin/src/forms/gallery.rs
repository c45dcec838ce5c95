use std::path::PathBuf;

use async_trait::async_trait;
use escena_core::domain::{Entity, GalleryItem};
use escena_core::ports::ProgressReporter;

use super::{Draft, FormError, resolve_image};
use crate::upload::BlobUploader;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryDraft {
  pub caption: String,
  pub image: Option<PathBuf>,
}

#[async_trait]
impl Draft for GalleryDraft {
  type Record = GalleryItem;
  const NOUN: &'static str = "Photo";

  fn load(record: &GalleryItem) -> Self {
    Self { caption: record.caption.clone(), image: None }
  }

  fn validate(&self, original: Option<&GalleryItem>) -> Result<(), String> {
    if original.is_none() && self.image.is_none() {
      return Err("Image is required".into());
    }
    Ok(())
  }

  async fn build(
    &self,
    original: Option<&GalleryItem>,
    uploader: &BlobUploader,
    progress: &dyn ProgressReporter,
  ) -> Result<GalleryItem, FormError> {
    let image = resolve_image(self.image.as_ref(), original.map(|g| &g.image), uploader, progress).await?;
    Ok(GalleryItem {
      id: original.map(|g| g.id.clone()).unwrap_or_else(GalleryItem::new_id),
      caption: self.caption.trim().to_string(),
      image,
    })
  }
}
