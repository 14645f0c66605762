//! First-answer-wins racing of providers under a per-code deadline.
//!
//! Every provider task reports back through a channel owned by its race,
//! whether it succeeded or failed. The race resolves on the first success,
//! on the deadline, or as soon as no provider is left that could still answer.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Instant, timeout_at};
use tracing_futures::Instrument;

use crate::config::RaceCfg;
use crate::model::{FormattedCode, ProviderReport, RaceOutcome};
use crate::normalizer::format_code;
use crate::provider::CepProvider;
use crate::provider_factory::ProviderRegistry;

/// Race `providers` for `code` and return the first successful record,
/// or `Timeout` once `deadline` has passed.
///
/// Losing tasks are detached, not cancelled. Their reports land in a buffer
/// sized for every provider, so a late send never blocks and is dropped once
/// the race is gone.
pub async fn race(
    code: &FormattedCode,
    providers: &[Arc<dyn CepProvider>],
    deadline: Duration,
) -> RaceOutcome {
    let span = tracing::info_span!(
        "race",
        cep.code = %code,
        cep.providers = providers.len(),
        deadline_ms = deadline.as_millis() as u64
    );
    run_race(code, providers, deadline).instrument(span).await
}

async fn run_race(
    code: &FormattedCode,
    providers: &[Arc<dyn CepProvider>],
    deadline: Duration,
) -> RaceOutcome {
    let deadline_at = Instant::now() + deadline;

    if providers.is_empty() {
        tracing::warn!("no providers to race");
        return RaceOutcome::Timeout;
    }

    let (tx, mut rx) = mpsc::channel::<ProviderReport>(providers.len());
    for provider in providers {
        let provider = Arc::clone(provider);
        let tx = tx.clone();
        let code = code.clone();
        let span = tracing::debug_span!("provider", cep.provider = %provider.name());
        tokio::spawn(
            async move {
                let started = Instant::now();
                let result = provider.lookup(&code).await;
                let report = ProviderReport {
                    provider: provider.name().to_string(),
                    elapsed_ms: started.elapsed().as_millis(),
                    result,
                };
                // capacity == provider count, so this only fails once the receiver is dropped
                if tx.try_send(report).is_err() {
                    tracing::debug!("race already resolved, report dropped");
                }
            }
            .instrument(span),
        );
    }
    drop(tx);

    let mut pending = providers.len();
    loop {
        match timeout_at(deadline_at, rx.recv()).await {
            Ok(Some(ProviderReport {
                provider,
                elapsed_ms,
                result,
            })) => match result {
                Ok(record) => {
                    tracing::info!(winner = %provider, elapsed_ms = elapsed_ms as u64, "race won");
                    return RaceOutcome::Winner(record);
                }
                Err(err) => {
                    pending -= 1;
                    tracing::warn!(
                        provider = %provider,
                        error.kind = err.kind(),
                        error.message = %err,
                        elapsed_ms = elapsed_ms as u64,
                        pending,
                        "provider failed, out of the race"
                    );
                    if pending == 0 {
                        tracing::warn!("every provider failed before the deadline");
                        return RaceOutcome::Timeout;
                    }
                }
            },
            // Every sender is gone without a report: a provider task panicked.
            Ok(None) => {
                tracing::warn!(pending, "provider tasks ended without reporting");
                return RaceOutcome::Timeout;
            }
            Err(_elapsed) => {
                tracing::info!(pending, "deadline elapsed");
                return RaceOutcome::Timeout;
            }
        }
    }
}

/// Drives races for many codes against one provider set.
pub struct Racer {
    registry: ProviderRegistry,
    deadline: Duration,
    concurrency: usize,
}

impl Racer {
    pub fn new(registry: ProviderRegistry, cfg: &RaceCfg) -> Self {
        Self {
            registry,
            deadline: cfg.deadline(),
            concurrency: cfg.concurrency.max(1),
        }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Format one raw code and race it.
    pub async fn race_code(&self, raw: &str) -> (FormattedCode, RaceOutcome) {
        let code = format_code(raw);
        let outcome = race(&code, self.registry.providers(), self.deadline).await;
        (code, outcome)
    }

    /// Race every code, at most `concurrency` at a time.
    /// Outcomes are yielded in the same order as `codes`.
    pub fn run(&self, codes: Vec<String>) -> impl Stream<Item = (FormattedCode, RaceOutcome)> {
        stream::iter(codes)
            .map(move |raw| async move { self.race_code(&raw).await })
            .buffered(self.concurrency)
    }

    pub async fn run_all(&self, codes: Vec<String>) -> Vec<(FormattedCode, RaceOutcome)> {
        self.run(codes).collect().await
    }
}
