//! Markets, marketplace identities, and the static exchange-rate table.

use std::borrow::Cow;
use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Currency every sourcing-marketplace price is quoted in.
pub const SOURCING_CURRENCY: &str = "CNY";

/// One of the two resale regions the scorer ranks categories for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    Nz,
    Au,
}

impl Market {
    pub const ALL: [Market; 2] = [Market::Nz, Market::Au];

    /// Two-letter region code, e.g. `"NZ"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Market::Nz => "NZ",
            Market::Au => "AU",
        }
    }

    /// ISO 4217 code of the currency goods are resold in.
    #[must_use]
    pub fn currency(self) -> &'static str {
        match self {
            Market::Nz => "NZD",
            Market::Au => "AUD",
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Market {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NZ" => Ok(Market::Nz),
            "AU" => Ok(Market::Au),
            _ => Err(CoreError::UnknownMarket(s.to_string())),
        }
    }
}

/// Stable identifier of a Market Data Source, e.g. `"trademe"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(Cow<'static, str>);

impl SourceId {
    pub const TRADEME: SourceId = SourceId(Cow::Borrowed("trademe"));
    pub const AMAZON: SourceId = SourceId(Cow::Borrowed("amazon"));
    pub const EBAY: SourceId = SourceId(Cow::Borrowed("ebay"));
    pub const TEMU: SourceId = SourceId(Cow::Borrowed("temu"));

    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static currency conversion table keyed by `"{FROM}_{TO}"`.
///
/// Lookups never fail: callers supply the fallback rate used for pairs the
/// table does not know.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRates {
    rates: HashMap<String, f64>,
}

impl ExchangeRates {
    /// Fallback for `{MARKET}_CNY` pairs missing from the table.
    pub const DEFAULT_TO_SOURCING: f64 = 4.5;
    /// Fallback for `CNY_{MARKET}` pairs missing from the table.
    pub const DEFAULT_FROM_SOURCING: f64 = 0.22;

    pub fn new<I, K>(rates: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            rates: rates
                .into_iter()
                .map(|(k, v)| (k.into().to_ascii_uppercase(), v))
                .collect(),
        }
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::new([
            ("AUD_CNY", 4.70),
            ("NZD_CNY", 4.30),
            ("CNY_AUD", 0.213),
            ("CNY_NZD", 0.233),
        ])
    }

    /// Rate for converting one unit of `from` into `to`, if the table has it.
    #[must_use]
    pub fn get(&self, from: &str, to: &str) -> Option<f64> {
        if from.eq_ignore_ascii_case(to) {
            return Some(1.0);
        }
        let key = format!("{from}_{to}").to_ascii_uppercase();
        self.rates.get(&key).copied()
    }

    #[must_use]
    pub fn rate_or(&self, from: &str, to: &str, fallback: f64) -> f64 {
        self.get(from, to).unwrap_or(fallback)
    }

    /// Converts `amount` from `from` into `to`, directly or through the
    /// sourcing currency. `None` when the table has no path; no fallback rate
    /// is applied.
    #[must_use]
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        let rate = self.get(from, to).or_else(|| {
            Some(self.get(from, SOURCING_CURRENCY)? * self.get(SOURCING_CURRENCY, to)?)
        })?;
        Some(amount * rate)
    }

    /// Units of sourcing currency per unit of `currency`.
    #[must_use]
    pub fn to_sourcing(&self, currency: &str) -> f64 {
        self.rate_or(currency, SOURCING_CURRENCY, Self::DEFAULT_TO_SOURCING)
    }

    /// Units of `currency` per unit of sourcing currency.
    #[must_use]
    pub fn from_sourcing(&self, currency: &str) -> f64 {
        self.rate_or(SOURCING_CURRENCY, currency, Self::DEFAULT_FROM_SOURCING)
    }
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self::builtin()
    }
}
