use async_trait::async_trait;
use escena_core::domain::{Entity, UserPlan};
use escena_core::ports::ProgressReporter;

use super::{Draft, FormError, required};
use crate::upload::BlobUploader;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanDraft {
  pub name: String,
  pub description: String,
  /// Precio mensual tal como se escribió.
  pub price: String,
}

fn parse_price(input: &str) -> Result<u64, String> {
  input.trim().parse::<u64>().map_err(|_| "Price must be a non-negative whole number".to_string())
}

#[async_trait]
impl Draft for PlanDraft {
  type Record = UserPlan;
  const NOUN: &'static str = "Plan";

  fn load(record: &UserPlan) -> Self {
    Self { name: record.name.clone(), description: record.description.clone(), price: record.price.to_string() }
  }

  fn validate(&self, _original: Option<&UserPlan>) -> Result<(), String> {
    required(&self.name, "Plan name")?;
    required(&self.description, "Description")?;
    required(&self.price, "Price")?;
    parse_price(&self.price).map(|_| ())
  }

  async fn build(
    &self,
    original: Option<&UserPlan>,
    _uploader: &BlobUploader,
    _progress: &dyn ProgressReporter,
  ) -> Result<UserPlan, FormError> {
    Ok(UserPlan {
      id: original.map(|p| p.id.clone()).unwrap_or_else(UserPlan::new_id),
      name: self.name.trim().to_string(),
      description: self.description.trim().to_string(),
      price: parse_price(&self.price).map_err(FormError::Validation)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft(price: &str) -> PlanDraft {
    PlanDraft { name: "Fan".into(), description: "Early access".into(), price: price.into() }
  }

  #[test]
  fn price_must_be_a_whole_non_negative_number() {
    assert!(draft("0").validate(None).is_ok());
    assert!(draft(" 12 ").validate(None).is_ok());
    assert!(draft("-1").validate(None).is_err());
    assert!(draft("9.99").validate(None).is_err());
    assert_eq!(draft("").validate(None), Err("Price is required".to_string()));
  }
}
