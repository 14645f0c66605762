use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// A postal code after normalization, ready to be placed in a provider URL.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct FormattedCode(String);

impl FormattedCode {
    pub(crate) fn new(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormattedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-agnostic address record, the shape every provider response maps into.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CepRecord {
    /// Display name of the provider that answered, e.g. "ViaCEP".
    pub provider: String,
    pub code: String,
    pub locality: String,
    pub region: String,
    pub street: String,
}

/// What a single race resolves to. Exactly one per input code.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RaceOutcome {
    Winner(CepRecord),
    Timeout,
}

impl RaceOutcome {
    pub fn winner(&self) -> Option<&CepRecord> {
        match self {
            RaceOutcome::Winner(rec) => Some(rec),
            RaceOutcome::Timeout => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RaceOutcome::Timeout)
    }
}

/// Message a provider task delivers to its race: success or failure, never silence.
#[derive(Debug)]
pub struct ProviderReport {
    pub provider: String,
    pub elapsed_ms: u128,
    pub result: CoreResult<CepRecord>,
}
