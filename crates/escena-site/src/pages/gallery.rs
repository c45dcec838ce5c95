use escena_core::domain::GalleryItem;
use escena_query::SiteQueries;
use serde::Serialize;

use crate::view::{Icon, PageView, list_view};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryTile {
  pub id: String,
  pub image_url: String,
  /// `None` cuando el pie de foto está vacío.
  pub caption: Option<String>,
}

impl From<GalleryItem> for GalleryTile {
  fn from(item: GalleryItem) -> Self {
    let caption = Some(item.caption).filter(|c| !c.trim().is_empty());
    Self { id: item.id.to_string(), image_url: item.image.direct_url().to_string(), caption }
  }
}

/// Rejilla de la galería con la imagen ampliada (lightbox), si hay una.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryPage {
  pub tiles: Vec<GalleryTile>,
  pub selected: Option<String>,
}

impl GalleryPage {
  /// Abre el lightbox con la imagen del tile `id`. Ids desconocidos se ignoran.
  pub fn open(&mut self, id: &str) {
    if let Some(tile) = self.tiles.iter().find(|t| t.id == id) {
      self.selected = Some(tile.image_url.clone());
    }
  }

  pub fn close(&mut self) {
    self.selected = None;
  }
}

pub async fn gallery_page(queries: &SiteQueries) -> PageView<GalleryPage> {
  match list_view(queries.gallery_items().await, 6, (Icon::Image, "No gallery items yet"), |items| {
    items.into_iter().map(GalleryTile::from).collect()
  }) {
    PageView::Ready(tiles) => PageView::Ready(GalleryPage { tiles, selected: None }),
    PageView::Loading { skeletons } => PageView::Loading { skeletons },
    PageView::Empty { icon, message } => PageView::Empty { icon, message },
  }
}
