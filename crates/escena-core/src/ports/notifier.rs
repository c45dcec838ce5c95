/// Port de notificaciones transitorias ("toasts").
///
/// Fire-and-forget: si no hay nadie mostrando notificaciones, se pierden.
pub trait Notifier: Send + Sync {
  fn success(&self, message: &str);
  fn error(&self, message: &str);
}
