use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarClock, SAO_PAULO_OFFSET_MINUTES};
use crate::currency::CurrencyFormat;
use crate::errors::{LedgerError, Result};

/// ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub currency: CurrencyFormat,
    pub calendar: CalendarConfig,
    pub display: DisplayConfig,
}

/// how instants map to calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// minutes east of utc used to decide "today" and the day a payment happened
    pub utc_offset_minutes: i32,
}

/// labels and chart settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// shown when a loan references a client that no longer exists
    pub unknown_client_label: String,
    /// shown for expenses without a category
    pub uncategorized_label: String,
    /// trailing months in the profit series, current month included
    pub series_months: u32,
    /// height of the tallest bar in the profit chart
    pub chart_max_height: u32,
}

impl LedgerConfig {
    /// brazilian real, sao paulo offset, portuguese labels
    pub fn brazil() -> Self {
        Self {
            currency: CurrencyFormat::brl(),
            calendar: CalendarConfig {
                utc_offset_minutes: SAO_PAULO_OFFSET_MINUTES,
            },
            display: DisplayConfig {
                unknown_client_label: "Cliente Desconhecido".to_string(),
                uncategorized_label: "Sem categoria".to_string(),
                series_months: 6,
                chart_max_height: 100,
            },
        }
    }

    /// utc calendar, useful for tests and servers
    pub fn utc() -> Self {
        let mut config = Self::brazil();
        config.calendar.utc_offset_minutes = 0;
        config
    }

    /// parse and validate a json configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LedgerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// read and validate a json configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// reject settings the engine cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.display.series_months == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "series_months must be at least 1".to_string(),
            });
        }
        if self.display.chart_max_height == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "chart_max_height must be at least 1".to_string(),
            });
        }
        if self.currency.decimal_separator == self.currency.grouping_separator {
            return Err(LedgerError::InvalidConfiguration {
                message: "decimal and grouping separators must differ".to_string(),
            });
        }
        self.clock().map(|_| ())
    }

    /// calendar clock for the configured offset
    pub fn clock(&self) -> Result<CalendarClock> {
        CalendarClock::from_offset_minutes(self.calendar.utc_offset_minutes)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::brazil()
    }
}
