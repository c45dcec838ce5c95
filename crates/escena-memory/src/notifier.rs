use std::sync::Mutex;

use escena_core::ports::Notifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
  Success(String),
  Error(String),
}

/// Guarda las notificaciones en orden para poder inspeccionarlas.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
  log: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
  pub fn all(&self) -> Vec<Notification> {
    self.log.lock().unwrap_or_else(|e| e.into_inner()).clone()
  }

  pub fn successes(&self) -> Vec<String> {
    self.all().into_iter().filter_map(|n| if let Notification::Success(m) = n { Some(m) } else { None }).collect()
  }

  pub fn errors(&self) -> Vec<String> {
    self.all().into_iter().filter_map(|n| if let Notification::Error(m) = n { Some(m) } else { None }).collect()
  }

  fn push(&self, n: Notification) {
    self.log.lock().unwrap_or_else(|e| e.into_inner()).push(n);
  }
}

impl Notifier for RecordingNotifier {
  fn success(&self, message: &str) {
    self.push(Notification::Success(message.to_string()));
  }

  fn error(&self, message: &str) {
    self.push(Notification::Error(message.to_string()));
  }
}
