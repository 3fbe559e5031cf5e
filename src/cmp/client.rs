use super::documents::{CatalogDoc, ModuleUpdate, NewModule, RemoteEntity, ServiceDefinitionDoc};
use crate::core::{CatalogError, CatalogResult};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Longest response body excerpt kept in transport errors
const ERROR_BODY_LIMIT: usize = 200;

/// The CMP operations the reconciler depends on.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    async fn list_modules(&self) -> CatalogResult<Vec<RemoteEntity>>;

    async fn create_module(&self, module: &NewModule) -> CatalogResult<RemoteEntity>;

    async fn update_module(&self, module_id: &str, module: &ModuleUpdate) -> CatalogResult<()>;

    async fn list_service_definitions(&self) -> CatalogResult<Vec<RemoteEntity>>;

    async fn create_service_definition(
        &self,
        service_definition: &ServiceDefinitionDoc,
    ) -> CatalogResult<RemoteEntity>;

    async fn get_service_catalog(&self) -> CatalogResult<CatalogDoc>;

    async fn update_service_catalog(&self, catalog: &CatalogDoc) -> CatalogResult<()>;
}

/// Client for the CMP REST API, authenticated with basic credentials
pub struct CmpClient {
    client: Client,
    base_address: String,
    api_key: String,
    secret_key: String,
}

impl CmpClient {
    /// Create a new CMP API client
    ///
    /// `api_key` and `secret_key` are the basic auth username and password.
    pub fn new(base_address: &str, api_key: &str, secret_key: &str) -> CatalogResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("catalog-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_address: base_address.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            secret_key: secret_key.to_string(),
        })
    }

    fn url(&self, relative_url: &str) -> String {
        format!("{}{}", self.base_address, relative_url)
    }

    fn request(&self, method: Method, relative_url: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(relative_url))
            .basic_auth(&self.api_key, Some(&self.secret_key))
            .header("Accept", "application/json")
    }

    /// Send a request, turning any non-2xx status into a transport error
    async fn send(&self, method: Method, relative_url: &str, request: RequestBuilder) -> CatalogResult<Response> {
        debug!(%method, url = %self.url(relative_url), "CMP request");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Transport {
                method: method.to_string(),
                url: self.url(relative_url),
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, relative_url: &str) -> CatalogResult<T> {
        let request = self.request(Method::GET, relative_url);
        let response = self.send(Method::GET, relative_url, request).await?;
        Ok(response.json().await?)
    }

    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        relative_url: &str,
        body: &B,
    ) -> CatalogResult<Response> {
        let request = self.request(method.clone(), relative_url).json(body);
        self.send(method, relative_url, request).await
    }
}

impl CatalogApi for CmpClient {
    async fn list_modules(&self) -> CatalogResult<Vec<RemoteEntity>> {
        self.get("/modules").await
    }

    async fn create_module(&self, module: &NewModule) -> CatalogResult<RemoteEntity> {
        let response = self.send_json(Method::POST, "/modules", module).await?;
        Ok(response.json().await?)
    }

    async fn update_module(&self, module_id: &str, module: &ModuleUpdate) -> CatalogResult<()> {
        let relative_url = format!("/modules/{}", urlencoding::encode(module_id));
        self.send_json(Method::PATCH, &relative_url, module).await?;
        Ok(())
    }

    async fn list_service_definitions(&self) -> CatalogResult<Vec<RemoteEntity>> {
        self.get("/service_defs").await
    }

    async fn create_service_definition(
        &self,
        service_definition: &ServiceDefinitionDoc,
    ) -> CatalogResult<RemoteEntity> {
        let response = self
            .send_json(Method::POST, "/service_defs", service_definition)
            .await?;
        Ok(response.json().await?)
    }

    async fn get_service_catalog(&self) -> CatalogResult<CatalogDoc> {
        self.get("/service_catalog").await
    }

    async fn update_service_catalog(&self, catalog: &CatalogDoc) -> CatalogResult<()> {
        self.send_json(Method::PUT, "/service_catalog", catalog).await?;
        Ok(())
    }
}
