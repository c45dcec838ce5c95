use serde::{Deserialize, Serialize};

/// Referencia opaca a un binario ya subido (portadas, fotos de galería).
///
/// Sólo se puede obtener de dos formas:
/// - como resultado de una subida completa (`BlobStorage::finish`),
/// - a partir de una URL existente con [`BlobRef::from_url`], para las
///   ediciones en las que el archivo no cambia.
///
/// No existe una referencia "provisional": un registro nunca se guarda
/// apuntando a algo que no se terminó de subir.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobRef {
  url: String,
}

impl BlobRef {
  pub fn from_url(url: impl Into<String>) -> Self {
    BlobRef { url: url.into() }
  }

  /// URL directa desde la que se puede descargar el binario.
  pub fn direct_url(&self) -> &str {
    &self.url
  }
}
