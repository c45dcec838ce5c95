use serde::{Deserialize, Serialize};

use crate::domain::blob::BlobRef;
use crate::domain::entity::Entity;
use crate::domain::ids::GalleryItemId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
  pub id: GalleryItemId,
  /// Pie de foto opcional (cadena vacía si no hay).
  pub caption: String,
  pub image: BlobRef,
}

impl Entity for GalleryItem {
  type Id = GalleryItemId;

  fn id(&self) -> &GalleryItemId {
    &self.id
  }

  fn new_id() -> GalleryItemId {
    GalleryItemId::generate()
  }
}
