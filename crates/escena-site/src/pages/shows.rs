use escena_core::domain::Event;
use escena_core::domain::event::sort_by_date;
use escena_query::SiteQueries;
use serde::Serialize;

use crate::format;
use crate::view::{Icon, PageView, list_view};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowCard {
  pub id: String,
  pub date_label: String,
  pub venue: String,
  pub city: String,
  /// `None` → sin botón de entradas.
  pub ticket_link: Option<String>,
}

impl From<Event> for ShowCard {
  fn from(e: Event) -> Self {
    Self {
      id: e.id.to_string(),
      date_label: format::show_date(e.date),
      ticket_link: e.has_tickets().then(|| e.ticket_link.clone()),
      venue: e.venue,
      city: e.city,
    }
  }
}

/// Conciertos en orden ascendente de fecha.
pub async fn shows_page(queries: &SiteQueries) -> PageView<Vec<ShowCard>> {
  list_view(queries.events().await, 4, (Icon::Calendar, "No upcoming shows"), |mut events| {
    sort_by_date(&mut events);
    events.into_iter().map(ShowCard::from).collect()
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::site;
  use escena_core::domain::{EventId, Timestamp};

  fn show(date: &str, venue: &str, city: &str, ticket: &str) -> Event {
    Event {
      id: EventId::generate(),
      venue: venue.into(),
      city: city.into(),
      date: Timestamp::parse_date_input(date).unwrap(),
      ticket_link: ticket.into(),
    }
  }

  #[tokio::test]
  async fn new_show_lands_between_earlier_and_later_ones() {
    let s = site();
    s.mutations.add(show("2026-02-10", "Arena", "Denver", "https://tix.test/2")).await.unwrap();
    s.mutations.add(show("2025-11-20", "Club", "Dallas", "https://tix.test/1")).await.unwrap();
    assert_eq!(shows_page(&s.queries).await.ready().map(Vec::len), Some(2));

    s.mutations.add(show("2025-12-01", "The Loft", "Austin", "")).await.unwrap();

    let view = shows_page(&s.queries).await;
    let cards = view.ready().unwrap();
    let venues: Vec<_> = cards.iter().map(|c| c.venue.as_str()).collect();
    assert_eq!(venues, ["Club", "The Loft", "Arena"]);

    let loft = &cards[1];
    assert_eq!(loft.date_label, "Mon, Dec 1, 2025");
    assert_eq!(loft.city, "Austin");
    assert_eq!(loft.ticket_link, None);
    assert_eq!(cards[0].ticket_link.as_deref(), Some("https://tix.test/1"));
  }

  #[tokio::test]
  async fn no_shows_is_empty_state() {
    let s = site();
    assert_eq!(shows_page(&s.queries).await, PageView::Empty { icon: Icon::Calendar, message: "No upcoming shows" });
  }
}
