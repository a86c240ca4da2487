//! HTTP client for the PostgREST-style backend

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Thin wrapper adding base URL and API key headers to every request
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(auth_headers(&config.api_key)?)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` with query parameters
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let request = self.client.get(self.url(path)).query(query);
        Self::send(request).await
    }

    /// POST a JSON body, optionally with a `Prefer` header
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        prefer: Option<&str>,
    ) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(prefer) = prefer {
            request = request.header("Prefer", prefer);
        }
        Self::send(request).await
    }

    /// POST raw bytes (object upload); the response body is ignored
    pub async fn post_bytes(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> ClientResult<()> {
        let request = self
            .client
            .post(self.url(path))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes);

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(ClientError::from_status(status, text));
        }
        Ok(())
    }

    /// Send and decode the HTTP response
    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            tracing::debug!(status = %status, body = %text, "Backend request failed");
            return Err(ClientError::from_status(status, text));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }
}

fn auth_headers(api_key: &str) -> ClientResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    if api_key.is_empty() {
        return Ok(headers);
    }

    let invalid = |_| ClientError::InvalidResponse("API key is not a valid header value".into());
    let mut key = HeaderValue::from_str(api_key).map_err(invalid)?;
    key.set_sensitive(true);
    let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(invalid)?;
    bearer.set_sensitive(true);

    headers.insert("apikey", key);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}
