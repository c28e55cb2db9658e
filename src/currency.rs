//! Currency types and tracked pair identity

use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency enumeration (ISO 4217 codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
    /// Australian Dollar
    AUD,
    /// Canadian Dollar
    CAD,
    /// Chinese Yuan
    CNY,
    /// Hong Kong Dollar
    HKD,
    /// Singapore Dollar
    SGD,
    /// Indian Rupee
    INR,
    /// New Zealand Dollar
    NZD,
}

impl Currency {
    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::CNY => "CNY",
            Currency::HKD => "HKD",
            Currency::SGD => "SGD",
            Currency::INR => "INR",
            Currency::NZD => "NZD",
        }
    }

    /// Parse from ISO code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CHF" => Some(Currency::CHF),
            "AUD" => Some(Currency::AUD),
            "CAD" => Some(Currency::CAD),
            "CNY" => Some(Currency::CNY),
            "HKD" => Some(Currency::HKD),
            "SGD" => Some(Currency::SGD),
            "INR" => Some(Currency::INR),
            "NZD" => Some(Currency::NZD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A tracked base/quote currency combination
///
/// Identity key for all per-pair state: window statistics, channel bands,
/// and store collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create new currency pair
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Parse from `"EUR/USD"` notation
    pub fn parse(s: &str) -> Result<Self> {
        let (base, quote) = s.split_once('/').ok_or_else(|| {
            TrackerError::ParseError(format!("Invalid pair '{}': expected BASE/QUOTE", s))
        })?;

        let base = Currency::from_code(base.trim())
            .ok_or_else(|| TrackerError::ParseError(format!("Unknown currency: {}", base)))?;
        let quote = Currency::from_code(quote.trim())
            .ok_or_else(|| TrackerError::ParseError(format!("Unknown currency: {}", quote)))?;

        Ok(Self { base, quote })
    }

    /// Name of the pair's raw sample collection, e.g. `EUR_USD`
    pub fn collection_name(&self) -> String {
        format!("{}_{}", self.base.code(), self.quote.code())
    }

    /// Name of the pair's window summary collection, e.g. `final_EUR_USD`
    pub fn summary_collection_name(&self) -> String {
        format!("final_{}_{}", self.base.code(), self.quote.code())
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code() {
        assert_eq!(Currency::USD.code(), "USD");
        assert_eq!(Currency::EUR.code(), "EUR");
        assert_eq!(Currency::INR.code(), "INR");
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("INVALID"), None);
    }

    #[test]
    fn test_pair_display() {
        let pair = CurrencyPair::new(Currency::EUR, Currency::USD);
        assert_eq!(format!("{}", pair), "EUR/USD");
    }

    #[test]
    fn test_pair_parse() {
        let pair = CurrencyPair::parse("GBP/INR").unwrap();
        assert_eq!(pair.base, Currency::GBP);
        assert_eq!(pair.quote, Currency::INR);

        assert!(CurrencyPair::parse("GBPINR").is_err());
        assert!(CurrencyPair::parse("GBP/XYZ").is_err());
    }

    #[test]
    fn test_collection_names() {
        let pair = CurrencyPair::new(Currency::CHF, Currency::JPY);
        assert_eq!(pair.collection_name(), "CHF_JPY");
        assert_eq!(pair.summary_collection_name(), "final_CHF_JPY");
    }
}
