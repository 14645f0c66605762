use std::time::{Duration, Instant};

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::HttpCfg;
use crate::error::{CepError, CoreResult};

/// Thin wrapper around reqwest::Client with defaults and helpers.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new_default() -> CoreResult<Self> {
        Self::from_cfg(&HttpCfg::default())
    }

    pub fn from_cfg(cfg: &HttpCfg) -> CoreResult<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
            .timeout(Duration::from_millis(cfg.request_timeout_ms));
        if let Some(n) = cfg.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(n);
        }
        let inner = builder
            .build()
            .map_err(|e| CepError::Other(anyhow::anyhow!("http client build failed: {e}")))?;
        Ok(Self {
            inner,
            user_agent: "cepfetch/0.1".to_string(),
        })
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// The status code is not inspected: any response whose body decodes into
    /// `R` is a success. Returns the decoded value and the elapsed milliseconds.
    pub async fn get_json<R: DeserializeOwned>(
        &self,
        provider: &str,
        url: &str,
    ) -> CoreResult<(R, u32)> {
        let start = Instant::now();
        let resp = self
            .inner
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| CepError::Transport {
                provider: provider.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| CepError::Decode {
            provider: provider.to_string(),
            message: format!("body read failed: {e}"),
        })?;
        let latency = start.elapsed().as_millis() as u32;

        let parsed = serde_json::from_slice::<R>(&body).map_err(|e| CepError::Decode {
            provider: provider.to_string(),
            message: format!(
                "json decode error (status {}): {e}: {}",
                status.as_u16(),
                truncate(&String::from_utf8_lossy(&body), 300)
            ),
        })?;
        Ok((parsed, latency))
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => {
            let mut t = s[..idx].to_string();
            t.push_str("...");
            t
        }
        None => s.to_string(),
    }
}
