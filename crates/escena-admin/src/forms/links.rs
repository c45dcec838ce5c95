/// Lista editable de enlaces (enlaces de streaming de un release).
///
/// Siempre hay al menos una fila, aunque esté vacía.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRows {
  rows: Vec<String>,
}

impl Default for LinkRows {
  fn default() -> Self {
    Self { rows: vec![String::new()] }
  }
}

impl LinkRows {
  pub fn from_links(links: &[String]) -> Self {
    if links.is_empty() { Self::default() } else { Self { rows: links.to_vec() } }
  }

  pub fn rows(&self) -> &[String] {
    &self.rows
  }

  pub fn append(&mut self) {
    self.rows.push(String::new());
  }

  pub fn set(&mut self, index: usize, value: impl Into<String>) {
    if let Some(row) = self.rows.get_mut(index) {
      *row = value.into();
    }
  }

  /// Quita la fila `index` salvo que sea la única.
  pub fn remove(&mut self, index: usize) {
    if self.rows.len() > 1 && index < self.rows.len() {
      self.rows.remove(index);
    }
  }

  /// Sólo las filas con contenido, recortadas.
  pub fn cleaned(&self) -> Vec<String> {
    self.rows.iter().map(|r| r.trim()).filter(|r| !r.is_empty()).map(String::from).collect()
  }
}
