use crate::envelope::{CreatedResource, Page, ResponseEnvelope};
use crate::error::{Error, Result};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Production endpoint of the encoding platform.
pub const DEFAULT_BASE_URL: &str = "https://api.bitmovin.com/v1";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size used when walking list endpoints.
pub const PAGE_SIZE: u32 = 100;

const USER_AGENT: &str = concat!("vodforge/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`BitmovinClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    /// Organization to act on behalf of (sent as `X-Tenant-Org-Id`).
    pub tenant_org_id: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Settings for the production endpoint with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            tenant_org_id: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_tenant_org_id(mut self, org_id: impl Into<String>) -> Self {
        self.tenant_org_id = Some(org_id.into());
        self
    }
}

/// Client for the encoding platform REST API.
///
/// Resource-specific calls live in [`crate::resources`] as further `impl`
/// blocks on this type; this file only holds the transport plumbing.
pub struct BitmovinClient {
    client: Client,
    base_url: String,
    api_key: String,
    tenant_org_id: Option<String>,
}

impl BitmovinClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::invalid_argument("API key must not be empty"));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            tenant_org_id: config
                .tenant_org_id
                .clone()
                .filter(|org| !org.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header("X-Api-Key", &self.api_key);

        match &self.tenant_org_id {
            Some(org) => builder.header("X-Tenant-Org-Id", org),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, path: &str) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(path, status = status.as_u16(), "Request rejected by platform");
            return Err(Error::from_response(status.as_u16(), path, &body));
        }

        let envelope: ResponseEnvelope<T> =
            serde_json::from_str(&body).map_err(|source| Error::Decode {
                path: path.to_string(),
                source,
            })?;

        Ok(envelope.data.result)
    }

    /// POST a JSON body and decode the result.
    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::trace!(path, "POST");
        let builder = self.request(Method::POST, path).json(body);
        self.send(builder, path).await
    }

    /// POST without a body (used by start actions).
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::trace!(path, "POST");
        let builder = self.request(Method::POST, path);
        self.send(builder, path).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::trace!(path, "GET");
        let builder = self.request(Method::GET, path);
        self.send(builder, path).await
    }

    /// Create a resource and return its identifier.
    pub(crate) async fn create<B, I>(&self, path: &str, body: &B) -> Result<I>
    where
        B: Serialize + ?Sized,
        I: From<String>,
    {
        let created: CreatedResource = self.post(path, body).await?;
        tracing::debug!(path, id = %created.id, "Created resource");
        Ok(I::from(created.id))
    }

    /// Walk every page of a list endpoint.
    pub(crate) async fn list_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut offset: u64 = 0;

        loop {
            tracing::trace!(path, offset, "GET page");
            let builder = self
                .request(Method::GET, path)
                .query(&[("offset", offset), ("limit", u64::from(PAGE_SIZE))]);
            let page: Page<T> = self.send(builder, path).await?;

            let fetched = page.items.len() as u64;
            items.extend(page.items);
            offset += fetched;

            let exhausted = match page.total_count {
                Some(total) => offset >= total,
                None => fetched < u64::from(PAGE_SIZE),
            };
            if exhausted || fetched == 0 {
                break;
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_is_rejected() {
        let result = BitmovinClient::new(&ClientConfig::new("  "));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let config = ClientConfig::new("key").with_base_url("http://localhost:1234/v1/");
        let client = BitmovinClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/v1");
        assert_eq!(
            client.url("/encoding/encodings"),
            "http://localhost:1234/v1/encoding/encodings"
        );
    }

    #[test]
    fn test_blank_org_id_is_dropped() {
        let config = ClientConfig::new("key").with_tenant_org_id(" ");
        let client = BitmovinClient::new(&config).unwrap();
        assert!(client.tenant_org_id.is_none());
    }
}
