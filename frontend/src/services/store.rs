//! # Store Traits
//!
//! Abstraction over the remote store's `bills` resource so the containers
//! can run against the HTTP API, the in-memory store, or a test double.

use crate::services::form_data::FormData;
use async_trait::async_trait;
use shared::{Bill, CreateBillResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status; `message` comes from the response body or is "Erreur <status>"
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode store response: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl StoreError {
    pub fn status(status: u16) -> Self {
        StoreError::Status {
            status,
            message: format!("Erreur {}", status),
        }
    }
}

/// Request options the store honours
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    /// Do not set a content type; the multipart body carries its own boundary
    pub no_content_type: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateBillRequest {
    pub data: FormData,
    pub headers: RequestHeaders,
}

impl CreateBillRequest {
    /// Multipart upload request
    pub fn multipart(data: FormData) -> Self {
        Self {
            data,
            headers: RequestHeaders {
                no_content_type: true,
            },
        }
    }
}

/// The remote store's `bills` resource
#[async_trait]
pub trait BillStore: Send + Sync {
    /// List every bill visible to the current session
    async fn list(&self) -> Result<Vec<Bill>, StoreError>;

    /// Create a bill from a form payload
    async fn create(&self, request: CreateBillRequest) -> Result<CreateBillResponse, StoreError>;
}
