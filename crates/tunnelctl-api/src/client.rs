// Async HTTP client for the tunnel provisioning backend.
//
// Base path: {endpoint}/v1/
// Auth: optional X-API-KEY header

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types;

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the tunnel backend.
///
/// One instance serves both the tunnel-creation endpoint and the
/// instance-port inventory; every call is a single request with no retry.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
}

impl BackendClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, an optional API key and a transport config.
    ///
    /// When a key is present it is injected as `X-API-KEY` on every request.
    pub fn new(
        base_url: &str,
        api_key: Option<&SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let mut key_value =
                HeaderValue::from_str(key.expose_secret()).map_err(|e| Error::Authentication {
                    message: format!("invalid API key header value: {e}"),
                })?;
            key_value.set_sensitive(true);
            headers.insert("X-API-KEY", key_value);
        }

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            timeout_secs: transport.timeout.as_secs(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            timeout_secs: 0,
        })
    }

    /// Parse the base URL and make sure it ends with `/` so relative
    /// joins keep any path prefix (`https://host/api` → `https://host/api/`).
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await.map_err(|e| self.transport_error(e))?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }

        let raw = resp.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            Error::Api {
                status: status.as_u16(),
                message: err.message.unwrap_or_else(|| status.to_string()),
                code: err.code,
            }
        } else {
            Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
            }
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Tunnels ──────────────────────────────────────────────────────

    /// Submit a tunnel for creation. Returns the identifier allocated by
    /// the backend.
    pub async fn create_tunnel(
        &self,
        body: &types::CreateTunnelBody,
    ) -> Result<types::TunnelCreatedResponse, Error> {
        self.post("v1/tunnels", body).await
    }

    // ── Instance ports ───────────────────────────────────────────────

    pub async fn list_instance_ports(&self) -> Result<Vec<types::InstancePortResponse>, Error> {
        self.get("v1/instance-ports").await
    }
}
