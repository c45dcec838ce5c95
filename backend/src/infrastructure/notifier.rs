use escena_core::ports::Notifier;
use tracing::{error, info};

/// `Notifier` que deja las notificaciones en el log (no hay UI de toasts).
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
  fn success(&self, message: &str) {
    info!(target: "escena::notify", %message);
  }

  fn error(&self, message: &str) {
    error!(target: "escena::notify", %message);
  }
}
