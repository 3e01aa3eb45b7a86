use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::models::Page;
use super::{next_offset, ApiError, DedicatedServerApi, ErrorBody, PublicCloudApi, PAGE_SIZE};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.leaseweb.com";

const AUTH_HEADER: HeaderName = HeaderName::from_static("x-lsw-auth");

/// HTTP client shared by every Leaseweb API group.
#[derive(Clone)]
pub struct LeasewebClient {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for LeasewebClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeasewebClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl LeasewebClient {
    pub fn new(token: &str) -> Result<Self, ApiError> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// NOTE: Primarily used for testing with mock servers.
    pub fn with_base_url(token: &str, base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::create_client(token, base_url.into())
    }

    fn create_client(token: &str, base_url: String) -> Result<Self, ApiError> {
        let mut token = HeaderValue::from_str(token)?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, token);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("terraform-provider-leaseweb/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn public_cloud(&self) -> PublicCloudApi {
        PublicCloudApi::new(self.clone())
    }

    pub fn dedicated_server(&self) -> DedicatedServerApi {
        DedicatedServerApi::new(self.clone())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Send a request, turning non-2xx responses into [`ApiError::Response`].
    async fn execute(&self, builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let request = builder.build()?;
        let method = request.method().to_string();
        let url = request.url().to_string();
        debug!(%method, path = request.url().path(), "calling Leaseweb API");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The error body is best effort; gateways answer with HTML.
        let body = response.json::<ErrorBody>().await.ok();
        warn!(
            %method,
            %url,
            status = status.as_u16(),
            correlation_id = body.as_ref().map(|b| b.correlation_id.as_str()).unwrap_or_default(),
            "Leaseweb API returned an error"
        );

        Err(ApiError::Response {
            status: status.as_u16(),
            method,
            url,
            body,
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::PUT, path).json(body))
            .await?;
        Ok(response.json().await?)
    }

    /// PUT without a request or response body.
    pub(crate) async fn put_empty(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::PUT, path)).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    pub(crate) async fn delete_with_body<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(self.request(Method::DELETE, path).json(body))
            .await?;
        Ok(())
    }

    /// Fetch every page of a list endpoint.
    pub(crate) async fn list_all<P: Page>(&self, path: &str) -> Result<Vec<P::Item>, ApiError> {
        let mut items = Vec::new();
        let mut offset = 0;

        loop {
            let builder = self
                .request(Method::GET, path)
                .query(&[("limit", PAGE_SIZE), ("offset", offset)]);
            let page: P = self.execute(builder).await?.json().await?;
            let (mut batch, metadata) = page.into_parts();
            items.append(&mut batch);

            match next_offset(metadata.limit, metadata.offset, metadata.total_count) {
                Some(next) => offset = next,
                None => break,
            }
        }

        Ok(items)
    }
}
