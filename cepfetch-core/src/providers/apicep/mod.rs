use async_trait::async_trait;
use serde::Deserialize;

use crate::error::CoreResult;
use crate::http_client::HttpClient;
use crate::model::{CepRecord, FormattedCode};
use crate::provider::CepProvider;

#[derive(Debug, Clone)]
pub struct ApiCep {
    http: HttpClient,
    base: String,
    name: String, // "APICEP"
}

impl ApiCep {
    pub fn new(http: HttpClient, base: String) -> Self {
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
            name: "APICEP".into(),
        }
    }

    #[cfg(test)]
    pub fn new_for_tests(server_base: &str) -> Self {
        ApiCep::new(HttpClient::new_default().unwrap(), server_base.to_string())
    }

    pub fn url(&self, code: &FormattedCode) -> String {
        format!("{}/file/apicep/{}.json", self.base, code)
    }

    pub async fn fetch(&self, code: &FormattedCode) -> CoreResult<ApiCepResponse> {
        let (resp, latency_ms) = self
            .http
            .get_json::<ApiCepResponse>(&self.name, &self.url(code))
            .await?;
        tracing::trace!(provider = %self.name, latency_ms, status = resp.status, "response decoded");
        Ok(resp)
    }
}

// ----- Wire struct -----
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiCepResponse {
    pub code: String,
    pub state: String,
    pub city: String,
    pub district: String,
    pub address: String,
    pub status: i64,
    pub ok: bool,
    #[serde(rename = "statusText")]
    pub status_text: String,
}

impl ApiCepResponse {
    pub fn into_record(self, provider: &str) -> CepRecord {
        CepRecord {
            provider: provider.to_string(),
            code: self.code,
            locality: self.city,
            region: self.state,
            street: self.address,
        }
    }
}

#[async_trait]
impl CepProvider for ApiCep {
    fn name(&self) -> &str {
        &self.name
    }

    async fn lookup(&self, code: &FormattedCode) -> CoreResult<CepRecord> {
        let resp = self.fetch(code).await?;
        Ok(resp.into_record(&self.name))
    }
}
