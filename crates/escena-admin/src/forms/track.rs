use async_trait::async_trait;
use escena_core::domain::{Entity, ReleaseId, Track};
use escena_core::ports::ProgressReporter;

use super::{Draft, FormError, required};
use crate::upload::BlobUploader;

/// Pista. Se abre siempre desde un release concreto con
/// [`TrackDraft::for_release`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackDraft {
  pub title: String,
  pub release_id: Option<ReleaseId>,
}

impl TrackDraft {
  pub fn for_release(release_id: ReleaseId) -> Self {
    Self { title: String::new(), release_id: Some(release_id) }
  }
}

#[async_trait]
impl Draft for TrackDraft {
  type Record = Track;
  const NOUN: &'static str = "Track";

  fn load(record: &Track) -> Self {
    Self { title: record.title.clone(), release_id: Some(record.release_id.clone()) }
  }

  fn validate(&self, _original: Option<&Track>) -> Result<(), String> {
    required(&self.title, "Track title")?;
    if self.release_id.is_none() {
      return Err("Release is required".into());
    }
    Ok(())
  }

  async fn build(
    &self,
    original: Option<&Track>,
    _uploader: &BlobUploader,
    _progress: &dyn ProgressReporter,
  ) -> Result<Track, FormError> {
    let release_id = self.release_id.clone().ok_or_else(|| FormError::Validation("Release is required".into()))?;
    Ok(Track {
      id: original.map(|t| t.id.clone()).unwrap_or_else(Track::new_id),
      title: self.title.trim().to_string(),
      release_id,
    })
  }
}
