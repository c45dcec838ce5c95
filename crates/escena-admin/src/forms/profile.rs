use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use escena_core::domain::ArtistProfile;
use escena_query::{Mutations, SiteQueries};
use serde::Serialize;

use super::{FormError, required};

/// Editor del perfil del artista. No es un diálogo: siempre está abierto
/// en la pestaña "Profile" y se guarda entero.
///
/// Los clones comparten el estado de guardado.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileEditor {
  pub name: String,
  pub bio: String,
  pub socials: Vec<String>,
  #[serde(skip)]
  saving: Arc<AtomicBool>,
}

impl PartialEq for ProfileEditor {
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name && self.bio == other.bio && self.socials == other.socials
  }
}

struct ResetOnDrop<'a>(&'a AtomicBool);

impl Drop for ResetOnDrop<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::SeqCst);
  }
}

impl ProfileEditor {
  pub fn new(name: impl Into<String>, bio: impl Into<String>, socials: Vec<String>) -> Self {
    Self { name: name.into(), bio: bio.into(), socials, saving: Arc::default() }
  }

  pub fn from_profile(profile: Option<&ArtistProfile>) -> Self {
    profile.map(|p| Self::new(p.name.clone(), p.bio.clone(), p.socials.clone())).unwrap_or_default()
  }

  /// Carga el perfil actual. `None` mientras la lectura está en curso; sin
  /// perfil, o con error, el editor empieza vacío.
  pub async fn load(queries: &SiteQueries) -> Option<Self> {
    let result = queries.artist_profile().await;
    if result.is_loading {
      return None;
    }
    Some(Self::from_profile(result.data.flatten().as_ref()))
  }

  pub fn add_social(&mut self) {
    self.socials.push(String::new());
  }

  pub fn set_social(&mut self, index: usize, url: impl Into<String>) {
    if let Some(slot) = self.socials.get_mut(index) {
      *slot = url.into();
    }
  }

  pub fn remove_social(&mut self, index: usize) {
    if index < self.socials.len() {
      self.socials.remove(index);
    }
  }

  pub fn is_saving(&self) -> bool {
    self.saving.load(Ordering::SeqCst)
  }

  pub fn validate(&self) -> Result<(), String> {
    required(&self.name, "Artist name")?;
    required(&self.bio, "Bio")
  }

  fn to_profile(&self) -> ArtistProfile {
    ArtistProfile {
      name: self.name.trim().to_string(),
      bio: self.bio.trim().to_string(),
      socials: self.socials.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).map(String::from).collect(),
    }
  }

  /// Guarda el perfil. Un segundo guardado mientras el primero sigue en
  /// curso devuelve [`FormError::Busy`].
  pub async fn save(&self, mutations: &Mutations) -> Result<(), FormError> {
    self.validate().map_err(FormError::Validation)?;
    if self.saving.swap(true, Ordering::SeqCst) {
      return Err(FormError::Busy);
    }
    let _reset = ResetOnDrop(&self.saving);
    mutations.update_profile(self.to_profile()).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::panel;
  use escena_core::ports::ClientHandle;
  use escena_query::QueryClient;
  use std::time::Duration;

  #[test]
  fn socials_can_be_appended_and_removed() {
    let mut editor = ProfileEditor::from_profile(Some(&ArtistProfile {
      name: "Nadia".into(),
      bio: String::new(),
      socials: vec!["https://instagram.com/nadia".into()],
    }));
    editor.add_social();
    editor.set_social(1, "https://tiktok.com/@nadia");
    editor.remove_social(0);
    editor.remove_social(7);

    assert_eq!(editor.socials, vec!["https://tiktok.com/@nadia".to_string()]);
  }

  #[test]
  fn blank_socials_are_dropped_and_text_trimmed() {
    let editor = ProfileEditor::new(" Nadia ", " bio ", vec!["  ".into(), " https://x.com/n ".into()]);

    let profile = editor.to_profile();

    assert_eq!(profile.name, "Nadia");
    assert_eq!(profile.bio, "bio");
    assert_eq!(profile.socials, vec!["https://x.com/n".to_string()]);
  }

  #[test]
  fn name_and_bio_are_required() {
    assert_eq!(ProfileEditor::default().validate(), Err("Artist name is required".to_string()));
    assert_eq!(ProfileEditor::new("Nadia", "   ", vec![]).validate(), Err("Bio is required".to_string()));
  }

  #[tokio::test]
  async fn blank_bio_never_reaches_the_backend() {
    let p = panel();

    let err = ProfileEditor::new("Nadia", "   ", vec![]).save(&p.mutations).await.unwrap_err();

    assert!(matches!(err, FormError::Validation(_)));
    assert_eq!(p.backend.calls("update_profile"), 0);
  }

  #[tokio::test]
  async fn save_while_saving_is_busy() {
    let p = panel();
    let editor = ProfileEditor::new("Nadia", "Songwriter", vec![]);
    editor.saving.store(true, Ordering::SeqCst);

    let err = editor.clone().save(&p.mutations).await.unwrap_err();

    assert!(matches!(err, FormError::Busy));
    assert_eq!(p.backend.calls("update_profile"), 0);

    editor.saving.store(false, Ordering::SeqCst);
    editor.save(&p.mutations).await.unwrap();
    assert!(!editor.is_saving());
    assert_eq!(p.backend.calls("update_profile"), 1);
  }

  #[tokio::test]
  async fn loading_profile_is_distinct_from_missing_profile() {
    let p = panel();
    let connecting = SiteQueries::new(ClientHandle::connecting(), QueryClient::new(Duration::from_secs(300)));

    assert_eq!(ProfileEditor::load(&connecting).await, None);
    assert_eq!(ProfileEditor::load(&p.queries).await, Some(ProfileEditor::default()));
  }
}
