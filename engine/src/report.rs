//! Stock reports and counter parsing.
//!
//! Machines report their counters as text. A [`CounterPolicy`] decides what
//! happens to text that is not a clean integer.

use crate::{error::Result, Counter, Counters, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Raw report as received from a machine.
///
/// Every field is optional here; presence is checked by the reconciler
/// before the store is touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReport {
    pub machine_id: Option<String>,
    #[serde(rename = "Stock_Available")]
    pub stock_available: Option<String>,
    #[serde(rename = "Upi_Sold")]
    pub upi_sold: Option<String>,
    #[serde(rename = "Coin_Sold")]
    pub coin_sold: Option<String>,
    pub location: Option<String>,
}

impl StockReport {
    /// Build a complete report from typed counters.
    pub fn new(machine_id: impl Into<String>, stock_available: i64, upi_sold: i64, coin_sold: i64) -> Self {
        Self {
            machine_id: Some(machine_id.into()),
            stock_available: Some(stock_available.to_string()),
            upi_sold: Some(upi_sold.to_string()),
            coin_sold: Some(coin_sold.to_string()),
            location: None,
        }
    }

    /// Attach a location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Check presence of every required field and parse the counters.
    pub fn validate(&self, policy: CounterPolicy) -> Result<ValidReport> {
        let machine_id = match self.machine_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(Error::MissingField("machine_id")),
        };

        let stock_available = required(&self.stock_available, "Stock_Available")?;
        let upi_sold = required(&self.upi_sold, "Upi_Sold")?;
        let coin_sold = required(&self.coin_sold, "Coin_Sold")?;

        Ok(ValidReport {
            machine_id,
            counters: Counters {
                stock_available: policy.parse("Stock_Available", stock_available)?,
                upi_sold: policy.parse("Upi_Sold", upi_sold)?,
                coin_sold: policy.parse("Coin_Sold", coin_sold)?,
            },
            location: self.location.clone().filter(|l| !l.is_empty()),
        })
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    value.as_deref().ok_or(Error::MissingField(field))
}

/// A report whose fields passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReport {
    pub machine_id: String,
    pub counters: Counters,
    pub location: Option<String>,
}

/// How counter text is turned into numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterPolicy {
    /// Reject anything that is not an integer (default)
    #[default]
    Strict,
    /// Coerce like a loose number parser; unparseable text becomes the
    /// not-a-number sentinel and is stored as such
    Lenient,
}

impl CounterPolicy {
    /// Parse one counter.
    pub fn parse(self, field: &'static str, text: &str) -> Result<Counter> {
        let trimmed = text.trim();

        match self {
            CounterPolicy::Strict => trimmed.parse::<i64>().map(Some).map_err(|_| {
                Error::InvalidNumber {
                    field,
                    value: text.to_string(),
                }
            }),
            CounterPolicy::Lenient => Ok(coerce(trimmed)),
        }
    }
}

fn coerce(trimmed: &str) -> Counter {
    if trimmed.is_empty() {
        return Some(0);
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }

    // "1e3" and "12.0" are whole numbers written loosely.
    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

impl FromStr for CounterPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(CounterPolicy::Strict),
            "lenient" => Ok(CounterPolicy::Lenient),
            other => Err(format!("unknown counter policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_complete_report() {
        let report = StockReport::new("VM-1", 12, 3, 4).with_location("Gate 3");
        let valid = report.validate(CounterPolicy::Strict).unwrap();

        assert_eq!(valid.machine_id, "VM-1");
        assert_eq!(valid.counters, Counters::new(12, 3, 4));
        assert_eq!(valid.location.as_deref(), Some("Gate 3"));
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let mut report = StockReport::new("VM-1", 12, 3, 4);
        report.machine_id = Some(String::new());
        assert_eq!(
            report.validate(CounterPolicy::Strict),
            Err(Error::MissingField("machine_id"))
        );

        let mut report = StockReport::new("VM-1", 12, 3, 4);
        report.upi_sold = None;
        assert_eq!(
            report.validate(CounterPolicy::Lenient),
            Err(Error::MissingField("Upi_Sold"))
        );

        let report = StockReport::default();
        assert_eq!(
            report.validate(CounterPolicy::Strict),
            Err(Error::MissingField("machine_id"))
        );
    }

    #[test]
    fn strict_rejects_non_integers() {
        let policy = CounterPolicy::Strict;
        assert_eq!(policy.parse("Upi_Sold", " 42 "), Ok(Some(42)));
        assert_eq!(policy.parse("Upi_Sold", "-3"), Ok(Some(-3)));
        assert_eq!(
            policy.parse("Upi_Sold", "forty"),
            Err(Error::InvalidNumber {
                field: "Upi_Sold",
                value: "forty".into()
            })
        );
        assert!(policy.parse("Upi_Sold", "").is_err());
        assert!(policy.parse("Upi_Sold", "4.5").is_err());
    }

    #[test]
    fn lenient_coerces_like_a_loose_number_parser() {
        let policy = CounterPolicy::Lenient;
        assert_eq!(policy.parse("Coin_Sold", "7"), Ok(Some(7)));
        assert_eq!(policy.parse("Coin_Sold", ""), Ok(Some(0)));
        assert_eq!(policy.parse("Coin_Sold", "   "), Ok(Some(0)));
        assert_eq!(policy.parse("Coin_Sold", "1e3"), Ok(Some(1000)));
        assert_eq!(policy.parse("Coin_Sold", "12.0"), Ok(Some(12)));
        assert_eq!(policy.parse("Coin_Sold", "12.5"), Ok(None));
        assert_eq!(policy.parse("Coin_Sold", "abc"), Ok(None));
        assert_eq!(policy.parse("Coin_Sold", "NaN"), Ok(None));
        assert_eq!(policy.parse("Coin_Sold", "inf"), Ok(None));
    }

    #[test]
    fn policy_from_str() {
        assert_eq!("strict".parse(), Ok(CounterPolicy::Strict));
        assert_eq!(" LENIENT ".parse(), Ok(CounterPolicy::Lenient));
        assert!("loose".parse::<CounterPolicy>().is_err());
        assert_eq!(CounterPolicy::default(), CounterPolicy::Strict);
    }
}
