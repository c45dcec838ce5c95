use serde::{Deserialize, Serialize};

use crate::domain::entity::Entity;
use crate::domain::ids::PlanId;

/// Plan de suscripción ofrecido a los usuarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPlan {
  pub id: PlanId,
  pub name: String,
  pub description: String,
  /// Precio mensual en unidades enteras de moneda (sin céntimos).
  pub price: u64,
}

impl Entity for UserPlan {
  type Id = PlanId;

  fn id(&self) -> &PlanId {
    &self.id
  }

  fn new_id() -> PlanId {
    PlanId::generate()
  }
}
