//! Picnic storefront HTTP client
//!
//! Speaks the storefront REST API directly: login exchanges the account
//! e-mail and MD5-hashed password for a session token returned in the
//! `x-picnic-auth` response header, which is then sent on every call.

use std::sync::Arc;

use async_trait::async_trait;
use md5::{Digest, Md5};
use picnic_common::SecureString;
use picnic_core::{ClientFactory, ClientOptions, PicnicClient, PicnicLogin, RemoteMethod};
use picnic_domain::{CountryCode, PicnicError, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

pub const AUTH_HEADER: &str = "x-picnic-auth";
const CLIENT_ID: u32 = 30100;
const USER_AGENT: &str = concat!("picnic-node/", env!("CARGO_PKG_VERSION"));

/// Storefront base URL for a deployment
pub fn storefront_url(country_code: CountryCode, api_version: &str) -> String {
    format!(
        "https://storefront-prod.{}.picnicinternational.com/api/{}",
        country_code.as_str().to_lowercase(),
        api_version
    )
}

/// Connected storefront handle
pub struct PicnicHttpClient {
    http: HttpClient,
    base_url: Url,
    auth_key: Option<SecureString>,
}

impl PicnicHttpClient {
    /// Create a handle against `base_url`, optionally seeded with a token.
    ///
    /// # Errors
    /// Returns `PicnicError::Config` when `base_url` is not a valid URL.
    pub fn new(http: HttpClient, base_url: &str, auth_key: Option<&str>) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|err| PicnicError::Config(format!("Invalid Picnic base URL '{base_url}': {err}")))?;

        Ok(Self { http, base_url, auth_key: auth_key.and_then(|key| SecureString::new(key).trimmed()) })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}/{}", url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth_key {
            Some(key) => builder.header(AUTH_HEADER, key.expose()),
            None => builder,
        }
    }

    async fn call(&self, method: Method, url: Url, body: Option<Value>) -> Result<Value> {
        let mut builder = self.authorized(self.http.request(method, url));
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        read_json(self.http.send_checked(builder).await?).await
    }
}

#[async_trait]
impl PicnicLogin for PicnicHttpClient {
    async fn login(&mut self, user_id: &str, password: &str) -> Result<()> {
        let body = json!({
            "key": user_id,
            "secret": hex::encode(Md5::digest(password.as_bytes())),
            "client_id": CLIENT_ID,
        });
        let builder = self.http.request(Method::POST, self.endpoint("user/login")).json(&body);
        let response = self.http.send_checked(builder).await?;

        match response
            .headers()
            .get(AUTH_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| SecureString::new(value).trimmed())
        {
            Some(token) => self.auth_key = Some(token),
            None => debug!("login_response_without_session_token"),
        }
        Ok(())
    }
}

#[async_trait]
impl PicnicClient for PicnicHttpClient {
    fn auth_key(&self) -> Option<String> {
        self.auth_key.as_ref().map(|key| key.expose().to_string())
    }

    fn supports(&self, _method: RemoteMethod) -> bool {
        true
    }

    async fn invoke(&self, method: RemoteMethod, args: &[Value]) -> Result<Value> {
        debug!(method = method.as_str(), "picnic_request");

        match method {
            RemoteMethod::Search => {
                let query = string_arg(args, 0, "query")?;
                let mut url = self.endpoint("search");
                url.query_pairs_mut().append_pair("search_term", &query);
                self.call(Method::GET, url, None).await
            }
            RemoteMethod::GetShoppingCart | RemoteMethod::GetCart => {
                self.call(Method::GET, self.endpoint("cart"), None).await
            }
            RemoteMethod::AddProductToShoppingCart => {
                let product_id = string_arg(args, 0, "productId")?;
                let count = args.get(1).and_then(Value::as_u64).unwrap_or(1);
                let body = json!({ "product_id": product_id, "count": count });
                self.call(Method::POST, self.endpoint("cart/add_product"), Some(body)).await
            }
            RemoteMethod::ClearShoppingCart | RemoteMethod::ClearCart => {
                self.call(Method::POST, self.endpoint("cart/clear"), None).await
            }
            RemoteMethod::GetDeliveries => {
                self.call(Method::POST, self.endpoint("deliveries/summary"), Some(json!([]))).await
            }
            RemoteMethod::GetUserDetails => {
                self.call(Method::GET, self.endpoint("user"), None).await
            }
        }
    }
}

fn string_arg(args: &[Value], index: usize, name: &str) -> Result<String> {
    match args.get(index) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Number(value)) => Ok(value.to_string()),
        _ => Err(PicnicError::invalid_parameter(name, "is required")),
    }
}

async fn read_json(response: Response) -> Result<Value> {
    let body = response
        .text()
        .await
        .map_err(|err| PicnicError::Network(format!("Failed to read response body: {err}")))?;

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body)
        .map_err(|err| PicnicError::RemoteOperation(format!("Invalid response body: {err}")))
}

/// Builds [`PicnicHttpClient`] handles sharing one connection pool
#[derive(Clone)]
pub struct PicnicHttpClientFactory {
    http: HttpClient,
    base_url: Option<String>,
}

impl PicnicHttpClientFactory {
    pub fn new() -> Result<Self> {
        let http = HttpClient::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_http_client(http))
    }

    pub fn with_http_client(http: HttpClient) -> Self {
        Self { http, base_url: None }
    }

    /// Send every request to `base_url` instead of the storefront URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn into_shared(self) -> Arc<dyn ClientFactory> {
        Arc::new(self)
    }
}

impl ClientFactory for PicnicHttpClientFactory {
    fn create(&self, options: &ClientOptions) -> Result<Box<dyn PicnicClient>> {
        let base_url = match &self.base_url {
            Some(url) => url.clone(),
            None => storefront_url(options.country_code, &options.api_version),
        };
        let client = PicnicHttpClient::new(self.http.clone(), &base_url, options.auth_key.as_deref())?;
        Ok(Box::new(client))
    }
}
