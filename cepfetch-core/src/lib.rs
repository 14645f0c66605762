pub mod config;
pub mod error;
pub mod http_client;
pub mod model;
pub mod normalizer;
pub mod provider;
pub mod provider_factory;
pub mod providers;
pub mod race;
pub mod report;
#[cfg(test)]
pub mod test_util;

pub use error::{CepError, CoreResult};
pub use model::{CepRecord, FormattedCode, RaceOutcome};
pub use normalizer::format_code;
pub use race::{Racer, race};
