use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("not a regular file: {0}")]
  NotAFile(PathBuf),
}

/// Fichero local elegido por el usuario, ya leído en memoria.
///
/// Las imágenes de un sitio de artista son pequeñas (portadas, fotos), así
/// que se lee entero y el troceado se hace al subir.
#[derive(Debug, Clone)]
pub struct LocalFile {
  pub path: PathBuf,
  pub bytes: Vec<u8>,
}

impl LocalFile {
  pub async fn read(path: impl AsRef<Path>) -> Result<Self, FsError> {
    let path = path.as_ref().to_path_buf();
    let meta = tokio::fs::metadata(&path).await?;
    if !meta.is_file() {
      return Err(FsError::NotAFile(path));
    }
    let bytes = tokio::fs::read(&path).await?;
    Ok(Self { path, bytes })
  }

  pub fn len(&self) -> u64 {
    self.bytes.len() as u64
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  /// Extensión en minúsculas, sin el punto.
  pub fn extension(&self) -> Option<String> {
    extension_of(&self.path)
  }

  pub fn content_type(&self) -> &'static str {
    content_type_for(&self.path)
  }

  pub fn file_name(&self) -> String {
    self.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
  }
}

pub fn extension_of(path: &Path) -> Option<String> {
  path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase())
}

/// Tipo MIME según la extensión. Desconocido → `application/octet-stream`.
pub fn content_type_for(path: &Path) -> &'static str {
  match extension_of(path).as_deref() {
    Some("jpg") | Some("jpeg") => "image/jpeg",
    Some("png") => "image/png",
    Some("gif") => "image/gif",
    Some("webp") => "image/webp",
    Some("avif") => "image/avif",
    Some("svg") => "image/svg+xml",
    _ => "application/octet-stream",
  }
}
