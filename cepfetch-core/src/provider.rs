use async_trait::async_trait;

use crate::error::CoreResult;
use crate::model::{CepRecord, FormattedCode};

/// A postal-code lookup service that can take part in a race.
#[async_trait]
pub trait CepProvider: Send + Sync {
    /// Display name, also used to tag the record this provider produces.
    fn name(&self) -> &str;

    /// Perform one lookup and map the provider's wire record into a `CepRecord`.
    async fn lookup(&self, code: &FormattedCode) -> CoreResult<CepRecord>;
}
