//! Currency conversion over a fixed rate table.

use std::collections::HashMap;

use thiserror::Error;

/// Supported currencies, code and display name.
pub const CURRENCIES: [(&str, &str); 8] = [
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("JPY", "Japanese Yen"),
    ("INR", "Indian Rupee"),
    ("CAD", "Canadian Dollar"),
    ("AUD", "Australian Dollar"),
    ("CNY", "Chinese Yuan"),
];

const PIVOT: &str = "USD";

#[derive(Debug, Error, PartialEq)]
pub enum CurrencyError {
    #[error("unknown currency '{0}'")]
    UnknownCurrency(String),

    #[error("no rate from {from} to {to}")]
    NoRate { from: String, to: String },

    #[error("amount must be a finite number")]
    InvalidAmount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub rate: f64,
    pub result: f64,
}

/// Exchange rates keyed by (from, to). Lookups try the direct rate, then the
/// inverse of the opposite rate, then a route through USD.
#[derive(Debug, Clone)]
pub struct RateTable {
    rates: HashMap<(String, String), f64>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::empty()
            .with_rate("USD", "INR", 83.2)
            .with_rate("EUR", "USD", 1.08)
            .with_rate("GBP", "USD", 1.26)
            .with_rate("JPY", "USD", 0.0067)
            .with_rate("CAD", "USD", 0.74)
            .with_rate("AUD", "USD", 0.65)
            .with_rate("CNY", "USD", 0.14)
    }
}

impl RateTable {
    pub fn empty() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    pub fn with_rate(mut self, from: &str, to: &str, rate: f64) -> Self {
        self.rates
            .insert((from.to_ascii_uppercase(), to.to_ascii_uppercase()), rate);
        self
    }

    pub fn rate(&self, from: &str, to: &str) -> Result<f64, CurrencyError> {
        let from = known_code(from)?;
        let to = known_code(to)?;
        if from == to {
            return Ok(1.0);
        }
        if let Some(rate) = self.direct_or_inverse(&from, &to) {
            return Ok(rate);
        }

        match (self.to_pivot(&from), self.to_pivot(&to)) {
            (Some(from_usd), Some(to_usd)) => Ok(from_usd / to_usd),
            _ => Err(CurrencyError::NoRate { from, to }),
        }
    }

    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<Conversion, CurrencyError> {
        if !amount.is_finite() {
            return Err(CurrencyError::InvalidAmount);
        }
        let rate = self.rate(from, to)?;
        Ok(Conversion {
            from: from.trim().to_ascii_uppercase(),
            to: to.trim().to_ascii_uppercase(),
            amount,
            rate,
            result: amount * rate,
        })
    }

    fn direct_or_inverse(&self, from: &str, to: &str) -> Option<f64> {
        if let Some(rate) = self.rates.get(&(from.to_string(), to.to_string())) {
            return Some(*rate);
        }
        self.rates
            .get(&(to.to_string(), from.to_string()))
            .filter(|rate| **rate != 0.0)
            .map(|rate| 1.0 / rate)
    }

    /// Value of one unit of `code` in USD.
    fn to_pivot(&self, code: &str) -> Option<f64> {
        if code == PIVOT {
            Some(1.0)
        } else {
            self.direct_or_inverse(code, PIVOT)
        }
    }
}

fn known_code(code: &str) -> Result<String, CurrencyError> {
    let code = code.trim().to_ascii_uppercase();
    if CURRENCIES.iter().any(|(known, _)| *known == code) {
        Ok(code)
    } else {
        Err(CurrencyError::UnknownCurrency(code))
    }
}
