//! Formularios del panel de administración.
//!
//! Todos comparten la misma máquina de estados ([`EntityForm`]):
//!
//! ```text
//! Closed ──open──▶ Editing ──submit──▶ Submitting ──ok──▶ Closed
//!                     ▲                    │
//!                     └──────error─────────┘
//! ```
//!
//! Lo específico de cada entidad vive en su [`Draft`].

mod confirm;
mod gallery;
mod links;
mod plan;
mod profile;
mod release;
mod show;
mod track;
mod video;

pub use confirm::{DeleteConfirmation, delete_prompt};
pub use gallery::GalleryDraft;
pub use links::LinkRows;
pub use plan::PlanDraft;
pub use profile::ProfileEditor;
pub use release::ReleaseDraft;
pub use show::ShowDraft;
pub use track::TrackDraft;
pub use video::VideoDraft;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use escena_core::CoreError;
use escena_core::domain::BlobRef;
use escena_core::ports::ProgressReporter;
use escena_query::{Crud, Mutations};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::upload::{BlobUploader, UploadError, UploadStatus, WatchProgress};

#[derive(Debug, Error)]
pub enum FormError {
  #[error("{0}")]
  Validation(String),

  #[error("upload failed: {0}")]
  Upload(#[from] UploadError),

  #[error("{0}")]
  Mutation(#[from] CoreError),

  #[error("a submission is already in progress")]
  Busy,

  #[error("the form is not open")]
  NotOpen,
}

/// Estado editable de un formulario para un tipo de registro.
#[async_trait]
pub trait Draft: Default + Clone + Send + Sync + 'static {
  type Record: Crud;

  /// Nombre en los títulos ("Add New Show", "Edit Photo").
  const NOUN: &'static str;

  /// Borrador a partir de un registro existente (edición).
  fn load(record: &Self::Record) -> Self;

  /// Campos obligatorios. `original` es el registro que se edita, si aplica.
  fn validate(&self, original: Option<&Self::Record>) -> Result<(), String>;

  /// Construye el registro final: recorta textos, sube ficheros, asigna id.
  async fn build(
    &self,
    original: Option<&Self::Record>,
    uploader: &BlobUploader,
    progress: &dyn ProgressReporter,
  ) -> Result<Self::Record, FormError>;
}

/// Fichero nuevo si se eligió uno, o la referencia previa si se edita sin cambiarlo.
pub(crate) async fn resolve_image(
  file: Option<&PathBuf>,
  previous: Option<&BlobRef>,
  uploader: &BlobUploader,
  progress: &dyn ProgressReporter,
) -> Result<BlobRef, FormError> {
  match (file, previous) {
    (Some(path), _) => Ok(uploader.upload_file(path, progress).await?),
    (None, Some(previous)) => Ok(previous.clone()),
    (None, None) => Err(FormError::Validation("An image is required".into())),
  }
}

pub(crate) fn required(value: &str, field: &str) -> Result<(), String> {
  if value.trim().is_empty() { Err(format!("{field} is required")) } else { Ok(()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
  Closed,
  Editing,
  Submitting,
}

struct FormState<D: Draft> {
  phase: FormPhase,
  draft: D,
  original: Option<D::Record>,
  error: Option<String>,
}

impl<D: Draft> Default for FormState<D> {
  fn default() -> Self {
    Self { phase: FormPhase::Closed, draft: D::default(), original: None, error: None }
  }
}

/// Diálogo de alta/edición de un registro.
///
/// Se clona barato y todos los clones comparten estado, para que la UI pueda
/// pintar el progreso mientras otra tarea espera a `submit`.
pub struct EntityForm<D: Draft> {
  state: Arc<Mutex<FormState<D>>>,
  progress: WatchProgress,
}

impl<D: Draft> Clone for EntityForm<D> {
  fn clone(&self) -> Self {
    Self { state: Arc::clone(&self.state), progress: self.progress.clone() }
  }
}

impl<D: Draft> Default for EntityForm<D> {
  fn default() -> Self {
    Self::new()
  }
}

impl<D: Draft> EntityForm<D> {
  pub fn new() -> Self {
    Self { state: Arc::new(Mutex::new(FormState::default())), progress: WatchProgress::new() }
  }

  fn lock(&self) -> MutexGuard<'_, FormState<D>> {
    self.state.lock().unwrap_or_else(|e| e.into_inner())
  }

  pub fn open_create(&self) {
    self.open_with(D::default());
  }

  /// Alta con campos ya rellenos (p. ej. la pista de un release concreto).
  pub fn open_with(&self, draft: D) {
    self.progress.reset();
    *self.lock() = FormState { phase: FormPhase::Editing, draft, original: None, error: None };
  }

  pub fn open_edit(&self, record: &D::Record) {
    self.progress.reset();
    *self.lock() =
      FormState { phase: FormPhase::Editing, draft: D::load(record), original: Some(record.clone()), error: None };
  }

  /// Descarta el borrador. No hace nada mientras se está enviando.
  pub fn close(&self) {
    let mut state = self.lock();
    if state.phase != FormPhase::Submitting {
      *state = FormState::default();
      self.progress.reset();
    }
  }

  pub fn phase(&self) -> FormPhase {
    self.lock().phase
  }

  pub fn error(&self) -> Option<String> {
    self.lock().error.clone()
  }

  pub fn is_editing_existing(&self) -> bool {
    self.lock().original.is_some()
  }

  pub fn title(&self) -> String {
    if self.is_editing_existing() { format!("Edit {}", D::NOUN) } else { format!("Add New {}", D::NOUN) }
  }

  pub fn draft(&self) -> D {
    self.lock().draft.clone()
  }

  /// Modifica el borrador. Sólo tiene efecto en `Editing`.
  pub fn edit(&self, f: impl FnOnce(&mut D)) {
    let mut state = self.lock();
    if state.phase == FormPhase::Editing {
      f(&mut state.draft);
    }
  }

  pub fn upload_status(&self) -> UploadStatus {
    self.progress.current()
  }

  pub fn subscribe_upload(&self) -> tokio::sync::watch::Receiver<UploadStatus> {
    self.progress.subscribe()
  }

  /// Valida, sube lo necesario y guarda. En éxito el formulario se cierra;
  /// en error vuelve a `Editing` con los campos intactos y el mensaje.
  pub async fn submit(&self, uploader: &BlobUploader, mutations: &Mutations) -> Result<(), FormError> {
    let (draft, original) = {
      let mut state = self.lock();
      match state.phase {
        FormPhase::Closed => return Err(FormError::NotOpen),
        FormPhase::Submitting => return Err(FormError::Busy),
        FormPhase::Editing => {}
      }
      if let Err(message) = state.draft.validate(state.original.as_ref()) {
        state.error = Some(message.clone());
        return Err(FormError::Validation(message));
      }
      state.phase = FormPhase::Submitting;
      state.error = None;
      (state.draft.clone(), state.original.clone())
    };

    let result = self.persist(&draft, original.as_ref(), uploader, mutations).await;

    let mut state = self.lock();
    match &result {
      Ok(()) => {
        info!(noun = D::NOUN, "form submitted");
        *state = FormState::default();
        self.progress.reset();
      }
      Err(e) => {
        warn!(noun = D::NOUN, error = %e, "form submission failed");
        state.phase = FormPhase::Editing;
        state.error = Some(e.to_string());
      }
    }
    result
  }

  async fn persist(
    &self,
    draft: &D,
    original: Option<&D::Record>,
    uploader: &BlobUploader,
    mutations: &Mutations,
  ) -> Result<(), FormError> {
    let record = draft.build(original, uploader, &self.progress).await?;
    match original {
      Some(_) => mutations.update(record).await?,
      None => mutations.add(record).await?,
    }
    Ok(())
  }
}
