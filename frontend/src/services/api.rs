use crate::config::ClientConfig;
use crate::services::session::{SessionStorage, JWT_KEY};
use crate::services::store::{BillStore, CreateBillRequest, StoreError};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{ApiErrorResponse, Bill, CreateBillResponse};
use std::sync::Arc;
use serde_json::Value;
use tracing::{debug, warn};

/// HTTP client for the bills API
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Option<Arc<dyn SessionStorage>>,
}

impl ApiClient {
    /// Create a client with the default configuration
    pub fn new() -> anyhow::Result<Self> {
        Self::from_config(&ClientConfig::default())
    }

    /// Create a client with a custom base URL and default timeout
    pub fn with_base_url(base_url: &str) -> anyhow::Result<Self> {
        Self::from_config(&ClientConfig::default().with_base_url(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    /// Send the session's `jwt` item as a bearer token
    pub fn with_session(mut self, session: Arc<dyn SessionStorage>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bills_url(&self) -> String {
        format!("{}/bills", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.as_ref().and_then(|s| s.get_item(JWT_KEY)) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| StoreError::Decode(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(error) if !error.message.is_empty() => Err(StoreError::Status {
                status: status.as_u16(),
                message: error.message,
            }),
            _ => Err(StoreError::status(status.as_u16())),
        }
    }
}

/// Decode list rows one by one; a row that is not a bill record is skipped
fn decode_bills(rows: Vec<Value>) -> Vec<Bill> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<Bill>(row) {
            Ok(bill) => Some(bill),
            Err(e) => {
                warn!("Skipping bill row {}: {}", index, e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl BillStore for ApiClient {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let url = self.bills_url();
        debug!("GET {}", url);
        let response = self.authorize(self.client.get(&url)).send().await?;
        let rows: Vec<Value> = Self::parse_response(response).await?;
        Ok(decode_bills(rows))
    }

    async fn create(&self, request: CreateBillRequest) -> Result<CreateBillResponse, StoreError> {
        let url = self.bills_url();
        debug!("POST {} ({} fields)", url, request.data.len());
        let builder = self.authorize(self.client.post(&url));
        let builder = if request.headers.no_content_type {
            builder.multipart(request.data.to_multipart()?)
        } else {
            builder.json(&request.data.to_json())
        };
        let response = builder.send().await?;
        Self::parse_response(response).await
    }
}
