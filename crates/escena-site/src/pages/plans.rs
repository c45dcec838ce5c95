use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use escena_core::CoreError;
use escena_core::domain::{PlanId, UserPlan};
use escena_query::{Mutations, SiteQueries};
use serde::Serialize;

use crate::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSelectButton {
  Select,
  Selecting,
  Selected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanCard {
  pub id: String,
  pub name: String,
  pub description: String,
  pub price_label: String,
  pub is_current: bool,
  pub button: PlanSelectButton,
  pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlansView {
  LoginRequired,
  Loading,
  Error { message: String },
  Empty,
  Ready { cards: Vec<PlanCard> },
}

/// Página de planes: listado y selección del plan propio.
#[derive(Clone)]
pub struct PlansPage {
  queries: SiteQueries,
  mutations: Mutations,
  selecting: Arc<AtomicBool>,
}

struct ResetOnDrop<'a>(&'a AtomicBool);

impl Drop for ResetOnDrop<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::SeqCst);
  }
}

impl PlansPage {
  pub fn new(queries: SiteQueries, mutations: Mutations) -> Self {
    Self { queries, mutations, selecting: Arc::new(AtomicBool::new(false)) }
  }

  pub fn is_selecting(&self) -> bool {
    self.selecting.load(Ordering::SeqCst)
  }

  pub async fn view(&self, authenticated: bool) -> PlansView {
    if !authenticated {
      return PlansView::LoginRequired;
    }

    let (plans, current) = tokio::join!(self.queries.user_plans(), self.queries.current_user_plan());
    if plans.is_loading || current.is_loading {
      return PlansView::Loading;
    }
    if let Some(e) = plans.error {
      let message = if e.message().is_empty() { "Failed to load plans".to_string() } else { e.message().to_string() };
      return PlansView::Error { message };
    }

    let plans = plans.data.unwrap_or_default();
    if plans.is_empty() {
      return PlansView::Empty;
    }

    let current_id = current.data.flatten().map(|p| p.id);
    let selecting = self.is_selecting();
    let cards = plans.into_iter().map(|plan| card(plan, current_id.as_ref(), selecting)).collect();
    PlansView::Ready { cards }
  }

  /// Asigna el plan al usuario. Devuelve `Ok(false)` si ya había una
  /// selección en curso y esta se ignoró.
  pub async fn select(&self, plan_id: PlanId) -> Result<bool, CoreError> {
    if self.selecting.swap(true, Ordering::SeqCst) {
      return Ok(false);
    }
    let _reset = ResetOnDrop(&self.selecting);
    self.mutations.assign_user_plan(plan_id).await?;
    Ok(true)
  }
}

fn card(plan: UserPlan, current: Option<&PlanId>, selecting: bool) -> PlanCard {
  let is_current = current == Some(&plan.id);
  let button = if selecting {
    PlanSelectButton::Selecting
  } else if is_current {
    PlanSelectButton::Selected
  } else {
    PlanSelectButton::Select
  };
  PlanCard {
    id: plan.id.to_string(),
    price_label: format::plan_price(plan.price),
    name: plan.name,
    description: plan.description,
    is_current,
    button,
    disabled: is_current || selecting,
  }
}
