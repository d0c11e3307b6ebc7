use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::error::{MembershipError, Result};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

#[derive(Clone, Default)]
pub struct ReqwestHttp {
    client: reqwest::blocking::Client,
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HttpClientPort for ReqwestHttp {
    fn get(&self, url: &str, query: &[(&str, &str)], timeout: Duration) -> Result<HttpGetResult> {
        let transport = |e: reqwest::Error| MembershipError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let resp = self
            .client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .map_err(transport)?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = resp.bytes().map_err(transport)?.to_vec();
        debug!("GET {} -> {} ({} bytes)", url, status, bytes.len());
        Ok(HttpGetResult {
            status,
            bytes,
            content_type,
        })
    }
}
