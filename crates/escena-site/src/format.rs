use escena_core::domain::Timestamp;

/// Fecha larga de un lanzamiento: `December 1, 2025`.
pub fn release_date(ts: Timestamp) -> String {
  ts.to_datetime().format("%B %-d, %Y").to_string()
}

/// Fecha de un concierto: `Mon, Dec 1, 2025`.
pub fn show_date(ts: Timestamp) -> String {
  ts.to_datetime().format("%a, %b %-d, %Y").to_string()
}

/// Precio mensual de un plan: `$5/month`.
pub fn plan_price(price: u64) -> String {
  format!("${price}/month")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn dec_first() -> Timestamp {
    Timestamp::parse_date_input("2025-12-01").unwrap()
  }

  #[test]
  fn release_dates_use_long_month() {
    assert_eq!(release_date(dec_first()), "December 1, 2025");
  }

  #[test]
  fn show_dates_use_short_weekday_and_month() {
    assert_eq!(show_date(dec_first()), "Mon, Dec 1, 2025");
    let later = Timestamp::parse_date_input("2026-01-17").unwrap();
    assert_eq!(show_date(later), "Sat, Jan 17, 2026");
  }

  #[test]
  fn prices_are_whole_units() {
    assert_eq!(plan_price(0), "$0/month");
    assert_eq!(plan_price(12), "$12/month");
  }
}
