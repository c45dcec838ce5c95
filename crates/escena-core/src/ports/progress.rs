use async_trait::async_trait;

/// Port de progreso de una subida.
///
/// La UI (un formulario abierto, un comando de la app) lo implementa para
/// mostrar el porcentaje. Las implementaciones no deben fallar si ya no hay
/// nadie escuchando: el formulario puede haberse cerrado a mitad de subida.
#[async_trait]
pub trait ProgressReporter: Send + Sync {
  async fn start(&self, total_bytes: u64);
  /// Porcentaje en `[0, 100]`.
  async fn on_progress(&self, percentage: u8);
  async fn on_error(&self, error: &str);
  async fn finish(&self);
}
