use serde::{Deserialize, Serialize};

use crate::domain::entity::Entity;
use crate::domain::ids::EventId;
use crate::domain::time::Timestamp;

/// Un concierto (en la web pública se llaman "Shows").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub id: EventId,
  pub venue: String,
  pub city: String,
  pub date: Timestamp,
  /// Enlace de venta de entradas. Vacío cuando no hay venta online.
  pub ticket_link: String,
}

impl Event {
  pub fn has_tickets(&self) -> bool {
    !self.ticket_link.trim().is_empty()
  }
}

impl Entity for Event {
  type Id = EventId;

  fn id(&self) -> &EventId {
    &self.id
  }

  fn new_id() -> EventId {
    EventId::generate()
  }
}

/// Ordena conciertos por fecha ascendente.
///
/// El orden es estable: conciertos con la misma fecha mantienen el orden de
/// inserción.
pub fn sort_by_date(events: &mut [Event]) {
  events.sort_by_key(|e| e.date);
}
