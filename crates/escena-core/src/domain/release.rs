use serde::{Deserialize, Serialize};

use crate::domain::blob::BlobRef;
use crate::domain::entity::Entity;
use crate::domain::ids::{ReleaseId, TrackId};
use crate::domain::time::Timestamp;

/// Representa un lanzamiento publicado por el artista (álbum, EP, single...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
  pub id: ReleaseId,

  /// Título tal como aparece oficialmente.
  pub title: String,

  /// Fecha oficial de publicación.
  pub date: Timestamp,

  /// Enlaces a plataformas de streaming, en orden de aparición.
  pub streaming_links: Vec<String>,

  /// Portada ya subida.
  pub cover_image: BlobRef,
}

/// Una pista de un lanzamiento.
///
/// La relación con el release es sólo por id: borrar un release no borra sus
/// pistas desde esta capa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
  pub id: TrackId,
  pub title: String,
  pub release_id: ReleaseId,
}

impl Entity for Release {
  type Id = ReleaseId;

  fn id(&self) -> &ReleaseId {
    &self.id
  }

  fn new_id() -> ReleaseId {
    ReleaseId::generate()
  }
}

impl Entity for Track {
  type Id = TrackId;

  fn id(&self) -> &TrackId {
    &self.id
  }

  fn new_id() -> TrackId {
    TrackId::generate()
  }
}

/// Un release junto a las pistas que le pertenecen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseWithTracks {
  pub release: Release,
  pub tracks: Vec<Track>,
}

/// Agrupa las pistas bajo su release.
///
/// - Los releases conservan el orden de entrada (orden de inserción).
/// - Las pistas conservan su orden relativo dentro de cada release.
/// - Las pistas cuyo release no existe se descartan.
pub fn group_tracks_by_release(releases: &[Release], tracks: &[Track]) -> Vec<ReleaseWithTracks> {
  releases
    .iter()
    .map(|release| ReleaseWithTracks {
      release: release.clone(),
      tracks: tracks.iter().filter(|t| t.release_id == release.id).cloned().collect(),
    })
    .collect()
}
