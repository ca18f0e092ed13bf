use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::constants::query::{
    ASSET_CHOICES, DEFAULT_ASSET, DEFAULT_CURRENCY, DEFAULT_WINDOW_DAYS,
};

/// What the user asked to see: one asset, over a trailing window, priced in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryParameters {
    pub asset: String,
    pub window_days: u32,
    pub currency: String,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            asset: DEFAULT_ASSET.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl QueryParameters {
    pub fn new(asset: impl Into<String>, window_days: u32, currency: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            window_days,
            currency: currency.into(),
        }
    }

    /// Ticker label for known assets, upper-cased id otherwise.
    pub fn asset_label(&self) -> String {
        asset_label(&self.asset)
    }

    pub fn currency_label(&self) -> String {
        self.currency.to_uppercase()
    }
}

impl fmt::Display for QueryParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}d {}", self.asset, self.window_days, self.currency)
    }
}

pub fn asset_label(asset: &str) -> String {
    ASSET_CHOICES
        .iter()
        .find(|(id, _)| *id == asset)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| asset.to_uppercase())
}

/// A partial change to the query. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryUpdate {
    pub asset: Option<String>,
    pub window_days: Option<u32>,
    pub currency: Option<String>,
}

impl QueryUpdate {
    pub fn asset(asset: impl Into<String>) -> Self {
        Self {
            asset: Some(asset.into()),
            ..Self::default()
        }
    }

    pub fn window_days(days: u32) -> Self {
        Self {
            window_days: Some(days),
            ..Self::default()
        }
    }

    pub fn currency(currency: impl Into<String>) -> Self {
        Self {
            currency: Some(currency.into()),
            ..Self::default()
        }
    }

    /// Every field set, e.g. from the command line.
    pub fn all(params: &QueryParameters) -> Self {
        Self {
            asset: Some(params.asset.clone()),
            window_days: Some(params.window_days),
            currency: Some(params.currency.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.asset.is_none() && self.window_days.is_none() && self.currency.is_none()
    }
}
