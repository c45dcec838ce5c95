use serde::{Deserialize, Serialize};

/// Perfil del artista. Hay uno solo por sitio, sin id explícito.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtistProfile {
  pub name: String,
  pub bio: String,
  /// Enlaces a redes sociales, en el orden en que se muestran.
  pub socials: Vec<String>,
}
