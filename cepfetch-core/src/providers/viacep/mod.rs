use async_trait::async_trait;
use serde::Deserialize;

use crate::error::CoreResult;
use crate::http_client::HttpClient;
use crate::model::{CepRecord, FormattedCode};
use crate::provider::CepProvider;

#[derive(Debug, Clone)]
pub struct ViaCep {
    http: HttpClient,
    base: String,
    name: String, // "ViaCEP"
}

impl ViaCep {
    pub fn new(http: HttpClient, base: String) -> Self {
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
            name: "ViaCEP".into(),
        }
    }

    #[cfg(test)]
    pub fn new_for_tests(server_base: &str) -> Self {
        ViaCep::new(HttpClient::new_default().unwrap(), server_base.to_string())
    }

    pub fn url(&self, code: &FormattedCode) -> String {
        format!("{}/ws/{}/json/", self.base, code)
    }

    /// One GET against the provider, decoded into its wire record.
    pub async fn fetch(&self, code: &FormattedCode) -> CoreResult<ViaCepResponse> {
        let (resp, latency_ms) = self
            .http
            .get_json::<ViaCepResponse>(&self.name, &self.url(code))
            .await?;
        tracing::trace!(provider = %self.name, latency_ms, "response decoded");
        Ok(resp)
    }
}

// ----- Wire struct -----
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViaCepResponse {
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
}

impl ViaCepResponse {
    pub fn into_record(self, provider: &str) -> CepRecord {
        CepRecord {
            provider: provider.to_string(),
            code: self.cep,
            locality: self.localidade,
            region: self.uf,
            street: self.logradouro,
        }
    }
}

#[async_trait]
impl CepProvider for ViaCep {
    fn name(&self) -> &str {
        &self.name
    }

    async fn lookup(&self, code: &FormattedCode) -> CoreResult<CepRecord> {
        let resp = self.fetch(code).await?;
        Ok(resp.into_record(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CepError;
    use crate::normalizer::format_code;
    use httpmock::{Method::GET, MockServer};
    use serde_json::json;

    fn se_payload() -> serde_json::Value {
        json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308",
            "gia": "1004",
            "ddd": "11",
            "siafi": "7107"
        })
    }

    #[test]
    fn builds_url_from_formatted_code() {
        let p = ViaCep::new(HttpClient::new_default().unwrap(), "https://viacep.com.br/".into());
        assert_eq!(
            p.url(&format_code("01001000")),
            "https://viacep.com.br/ws/01001-000/json/"
        );
    }

    #[tokio::test]
    async fn lookup_200_maps_fields() {
        let server = MockServer::start();
        let provider = ViaCep::new_for_tests(&server.base_url());
        let m = server.mock(|when, then| {
            when.method(GET).path("/ws/01001-000/json/");
            then.status(200).json_body(se_payload());
        });
        let rec = provider.lookup(&format_code("01001000")).await.expect("lookup ok");
        m.assert();
        assert_eq!(
            rec,
            CepRecord {
                provider: "ViaCEP".into(),
                code: "01001-000".into(),
                locality: "São Paulo".into(),
                region: "SP".into(),
                street: "Praça da Sé".into(),
            }
        );
    }

    #[tokio::test]
    async fn fetch_keeps_bookkeeping_fields() {
        let server = MockServer::start();
        let provider = ViaCep::new_for_tests(&server.base_url());
        let _m = server.mock(|when, then| {
            when.method(GET).path("/ws/01001-000/json/");
            then.status(200).json_body(se_payload());
        });
        let resp = provider.fetch(&format_code("01001000")).await.expect("fetch ok");
        assert_eq!(resp.bairro, "Sé");
        assert_eq!(resp.ibge, "3550308");
        assert_eq!(resp.ddd, "11");
    }

    #[tokio::test]
    async fn missing_fields_default_to_empty() {
        let server = MockServer::start();
        let provider = ViaCep::new_for_tests(&server.base_url());
        let _m = server.mock(|when, then| {
            when.method(GET).path("/ws/99999-999/json/");
            then.status(200).json_body(json!({"erro": true}));
        });
        let rec = provider.lookup(&format_code("99999999")).await.expect("decodes");
        assert_eq!(rec.provider, "ViaCEP");
        assert!(rec.code.is_empty());
        assert!(rec.street.is_empty());
    }

    #[tokio::test]
    async fn html_error_page_is_decode_error() {
        let server = MockServer::start();
        let provider = ViaCep::new_for_tests(&server.base_url());
        let _m = server.mock(|when, then| {
            when.method(GET).path("/ws/abc/json/");
            then.status(400).body("<html><h1>Bad Request</h1></html>");
        });
        let err = provider.lookup(&format_code("abc")).await.unwrap_err();
        assert!(matches!(err, CepError::Decode { ref provider, .. } if provider == "ViaCEP"));
    }
}
