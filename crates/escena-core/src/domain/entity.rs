use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Un registro de una colección gestionada desde el panel de administración.
///
/// Las entidades se reemplazan completas: no hay actualizaciones parciales,
/// cada `update` reenvía el registro entero.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
  type Id: Clone + Debug + Display + Eq + Hash + Send + Sync + 'static;

  fn id(&self) -> &Self::Id;

  /// Id nuevo, generado en el cliente, para un registro que aún no existe.
  fn new_id() -> Self::Id;
}
