use std::sync::Arc;

use crate::config::Config;
use crate::error::CoreResult;
use crate::http_client::HttpClient;
use crate::provider::CepProvider;
use crate::providers::{apicep::ApiCep, viacep::ViaCep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    ViaCep,
    ApiCep,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::ViaCep, ProviderKind::ApiCep];
}

/// The fixed set of providers that race for every code.
/// Both share one `HttpClient` so they share its connection pool and timeouts.
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn CepProvider>>,
}

impl ProviderRegistry {
    pub fn from_config(cfg: &Config) -> CoreResult<Self> {
        cfg.validate()?;
        let http = HttpClient::from_cfg(&cfg.http)?;
        let providers = ProviderKind::ALL
            .iter()
            .map(|kind| -> Arc<dyn CepProvider> {
                match kind {
                    ProviderKind::ViaCep => Arc::new(ViaCep::new(
                        http.clone(),
                        cfg.providers.viacep_base.clone(),
                    )),
                    ProviderKind::ApiCep => Arc::new(ApiCep::new(
                        http.clone(),
                        cfg.providers.apicep_base.clone(),
                    )),
                }
            })
            .collect();
        Ok(Self { providers })
    }

    /// Build a registry from arbitrary providers; used by tests to race stubs.
    pub fn with_providers(providers: Vec<Arc<dyn CepProvider>>) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &[Arc<dyn CepProvider>] {
        &self.providers
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CepError;

    #[test]
    fn builds_both_fixed_providers_in_order() {
        let reg = ProviderRegistry::from_config(&Config::default()).unwrap();
        assert_eq!(reg.names(), vec!["ViaCEP", "APICEP"]);
        assert_eq!(reg.providers().len(), 2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = Config::default();
        cfg.race.concurrency = 0;
        let err = ProviderRegistry::from_config(&cfg).err().expect("invalid");
        assert!(matches!(err, CepError::Validation(_)));
    }
}
