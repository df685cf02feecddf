mod api;

pub use api::{call_api, CallResult};

use crate::config::ClientConfig;
use async_trait::async_trait;
use keygate_protocol::{endpoints, LoginRequest, RegisterRequest};
use reqwest::Method;
use serde::Serialize;

/// The two calls the form controller needs from the authentication API.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> CallResult;
    async fn register(&self, request: &RegisterRequest) -> CallResult;
}

/// HTTP client bound to one API base URL for its whole lifetime.
#[derive(Clone)]
pub struct NetworkClient {
    http: reqwest::Client,
    base_url: String,
}

impl NetworkClient {
    pub fn new(config: &ClientConfig) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self::with_client(http, &config.api_base))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub async fn call<B: Serialize + ?Sized + Sync>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&B>,
    ) -> CallResult {
        call_api(&self.http, &self.url(endpoint), method, body).await
    }
}

#[async_trait]
impl AuthApi for NetworkClient {
    async fn login(&self, request: &LoginRequest) -> CallResult {
        self.call(endpoints::LOGIN, Method::POST, Some(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> CallResult {
        self.call(endpoints::REGISTER, Method::POST, Some(request)).await
    }
}
