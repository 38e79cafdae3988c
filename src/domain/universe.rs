//! Symbol universe the scanner walks.
//!
//! Parsed once from configuration as `symbol|name|sector` entries separated by
//! commas. Falls back to a built-in list of eight large Taiwan listings.

use crate::domain::error::UniverseError;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniverseEntry {
    pub symbol: String,
    pub name: String,
    pub sector: String,
}

impl UniverseEntry {
    pub fn new(symbol: &str, name: &str, sector: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            sector: sector.to_string(),
        }
    }

    /// Symbol as shown to users, with the exchange suffix.
    pub fn display_symbol(&self) -> String {
        format!("{}.TW", self.symbol)
    }
}

pub fn parse_universe(input: &str) -> Result<Vec<UniverseEntry>, UniverseError> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyEntry);
        }

        let parts: Vec<&str> = trimmed.split('|').map(str::trim).collect();
        let [symbol, name, sector] = parts[..] else {
            return Err(UniverseError::Malformed {
                entry: trimmed.to_string(),
            });
        };
        if symbol.is_empty() {
            return Err(UniverseError::Malformed {
                entry: trimmed.to_string(),
            });
        }

        let symbol = symbol.to_uppercase().trim_end_matches(".TW").to_string();
        if !seen.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
        entries.push(UniverseEntry::new(&symbol, name, sector));
    }

    Ok(entries)
}

pub fn default_universe() -> Vec<UniverseEntry> {
    [
        ("2330", "TSMC", "Semiconductors"),
        ("2454", "MediaTek", "IC Design"),
        ("3661", "Alchip", "IC Design"),
        ("2317", "Hon Hai", "Contract Manufacturing"),
        ("2603", "Evergreen Marine", "Shipping"),
        ("3035", "Faraday", "IC Design"),
        ("3037", "Unimicron", "PCB"),
        ("2382", "Quanta", "Computer Peripherals"),
    ]
    .iter()
    .map(|(symbol, name, sector)| UniverseEntry::new(symbol, name, sector))
    .collect()
}
