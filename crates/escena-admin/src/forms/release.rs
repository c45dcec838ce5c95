use std::path::PathBuf;

use async_trait::async_trait;
use escena_core::domain::{Entity, Release, Timestamp};
use escena_core::ports::ProgressReporter;

use super::{Draft, FormError, LinkRows, required, resolve_image};
use crate::upload::BlobUploader;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseDraft {
  pub title: String,
  /// Fecha tal como la da un `<input type="date">`.
  pub date: String,
  pub links: LinkRows,
  /// Portada nueva elegida en el diálogo.
  pub cover: Option<PathBuf>,
}

fn parse_date(input: &str) -> Result<Timestamp, String> {
  Timestamp::parse_date_input(input).ok_or_else(|| format!("Invalid date: {}", input.trim()))
}

#[async_trait]
impl Draft for ReleaseDraft {
  type Record = Release;
  const NOUN: &'static str = "Release";

  fn load(record: &Release) -> Self {
    Self {
      title: record.title.clone(),
      date: record.date.to_date_input(),
      links: LinkRows::from_links(&record.streaming_links),
      cover: None,
    }
  }

  fn validate(&self, original: Option<&Release>) -> Result<(), String> {
    required(&self.title, "Title")?;
    required(&self.date, "Release date")?;
    parse_date(&self.date)?;
    if original.is_none() && self.cover.is_none() {
      return Err("Cover image is required".into());
    }
    Ok(())
  }

  async fn build(
    &self,
    original: Option<&Release>,
    uploader: &BlobUploader,
    progress: &dyn ProgressReporter,
  ) -> Result<Release, FormError> {
    let date = parse_date(&self.date).map_err(FormError::Validation)?;
    let cover_image =
      resolve_image(self.cover.as_ref(), original.map(|r| &r.cover_image), uploader, progress).await?;
    Ok(Release {
      id: original.map(|r| r.id.clone()).unwrap_or_else(Release::new_id),
      title: self.title.trim().to_string(),
      date,
      streaming_links: self.links.cleaned(),
      cover_image,
    })
  }
}
