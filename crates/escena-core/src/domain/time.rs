use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instante expresado en nanosegundos desde epoch (UTC).
///
/// Es el formato de fecha que intercambia el backend remoto para
/// lanzamientos y conciertos. Todas las conversiones a calendario se hacen
/// en UTC para que la fecha mostrada coincida con la introducida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
  pub const fn from_nanos(nanos: i64) -> Self {
    Timestamp(nanos)
  }

  pub const fn as_nanos(&self) -> i64 {
    self.0
  }

  /// Medianoche UTC del día indicado.
  ///
  /// Devuelve `None` fuera del rango representable en `i64` nanosegundos
  /// (aprox. años 1677..2262).
  pub fn from_date(date: NaiveDate) -> Option<Self> {
    date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_nanos_opt().map(Timestamp)
  }

  /// Parsea el valor de un `<input type="date">` (`YYYY-MM-DD`).
  pub fn parse_date_input(input: &str) -> Option<Self> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()?;
    Self::from_date(date)
  }

  pub fn to_datetime(&self) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(self.0)
  }

  /// Inversa de [`Timestamp::parse_date_input`], usada al editar.
  pub fn to_date_input(&self) -> String {
    self.to_datetime().format("%Y-%m-%d").to_string()
  }
}

impl fmt::Display for Timestamp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_datetime().to_rfc3339())
  }
}
