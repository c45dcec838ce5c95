use async_trait::async_trait;
use escena_core::domain::{Entity, Event, Timestamp};
use escena_core::ports::ProgressReporter;

use super::{Draft, FormError, required};
use crate::upload::BlobUploader;

/// Concierto. El enlace de entradas es opcional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowDraft {
  pub date: String,
  pub venue: String,
  pub city: String,
  pub ticket_link: String,
}

fn parse_date(input: &str) -> Result<Timestamp, String> {
  Timestamp::parse_date_input(input).ok_or_else(|| format!("Invalid date: {}", input.trim()))
}

#[async_trait]
impl Draft for ShowDraft {
  type Record = Event;
  const NOUN: &'static str = "Show";

  fn load(record: &Event) -> Self {
    Self {
      date: record.date.to_date_input(),
      venue: record.venue.clone(),
      city: record.city.clone(),
      ticket_link: record.ticket_link.clone(),
    }
  }

  fn validate(&self, _original: Option<&Event>) -> Result<(), String> {
    required(&self.date, "Date")?;
    parse_date(&self.date)?;
    required(&self.venue, "Venue")?;
    required(&self.city, "City")
  }

  async fn build(
    &self,
    original: Option<&Event>,
    _uploader: &BlobUploader,
    _progress: &dyn ProgressReporter,
  ) -> Result<Event, FormError> {
    Ok(Event {
      id: original.map(|e| e.id.clone()).unwrap_or_else(Event::new_id),
      venue: self.venue.trim().to_string(),
      city: self.city.trim().to_string(),
      date: parse_date(&self.date).map_err(FormError::Validation)?,
      ticket_link: self.ticket_link.trim().to_string(),
    })
  }
}
