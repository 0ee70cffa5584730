//! In-process bill store for demos, headless runs and tests.

use crate::services::form_data::FormData;
use crate::services::store::{BillStore, CreateBillRequest, StoreError};
use async_trait::async_trait;
use shared::{Bill, BillStatus, CreateBillResponse};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;
use uuid::Uuid;

const FILE_URL_PREFIX: &str = "https://localhost:3456/images/";

#[derive(Debug, Default)]
struct Inner {
    bills: Vec<Bill>,
    requests: Vec<CreateBillRequest>,
    list_failure: Option<u16>,
    create_failure: Option<u16>,
    next_key: Option<String>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bills(bills: Vec<Bill>) -> Self {
        let store = Self::new();
        store.lock().bills = bills;
        store
    }

    /// Store seeded with four sample bills of various statuses
    pub fn with_fixtures() -> Self {
        Self::with_bills(fixture_bills())
    }

    /// Make `list` fail with the given HTTP status
    pub fn fail_list_with_status(&self, status: u16) {
        self.lock().list_failure = Some(status);
    }

    /// Make `create` fail with the given HTTP status
    pub fn fail_create_with_status(&self, status: u16) {
        self.lock().create_failure = Some(status);
    }

    /// Use a fixed key for the next created bill instead of a random one
    pub fn set_next_key(&self, key: &str) {
        self.lock().next_key = Some(key.to_string());
    }

    /// Every create request received, in order
    pub fn create_requests(&self) -> Vec<CreateBillRequest> {
        self.lock().requests.clone()
    }

    pub fn bills(&self) -> Vec<Bill> {
        self.lock().bills.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BillStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let inner = self.lock();
        if let Some(status) = inner.list_failure {
            return Err(StoreError::status(status));
        }
        Ok(inner.bills.clone())
    }

    async fn create(&self, request: CreateBillRequest) -> Result<CreateBillResponse, StoreError> {
        let mut inner = self.lock();
        inner.requests.push(request.clone());
        if let Some(status) = inner.create_failure {
            return Err(StoreError::status(status));
        }

        let key = inner
            .next_key
            .take()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let file_name = request
            .data
            .get_file("file")
            .map(|file| file.name.clone())
            .unwrap_or_default();
        let file_url = format!("{}{}", FILE_URL_PREFIX, file_name);

        let bill = bill_from_form(&key, &file_url, &file_name, &request.data);
        info!("Stored bill {} ({})", key, bill.name);
        inner.bills.push(bill);

        Ok(CreateBillResponse { file_url, key })
    }
}

fn bill_from_form(key: &str, file_url: &str, file_name: &str, data: &FormData) -> Bill {
    let text = |name: &str| data.get_text(name).unwrap_or_default().to_string();
    let integer = |name: &str| -> i64 {
        data.get_text(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    };

    Bill {
        id: key.to_string(),
        email: text("email"),
        expense_type: text("type"),
        name: text("name"),
        amount: integer("amount"),
        date: text("date"),
        vat: text("vat"),
        pct: integer("pct"),
        commentary: text("commentary"),
        file_url: file_url.to_string(),
        file_name: file_name.to_string(),
        status: BillStatus::from(text("status")),
        comment_admin: None,
    }
}

fn fixture_bill(id: &str, name: &str, date: &str, amount: i64, status: BillStatus) -> Bill {
    Bill {
        id: id.to_string(),
        email: "a@a".to_string(),
        expense_type: "Hôtel et logement".to_string(),
        name: name.to_string(),
        amount,
        date: date.to_string(),
        vat: "80".to_string(),
        pct: 20,
        commentary: "séminaire billed".to_string(),
        file_url: format!("{}preview-facture-free-201801-pdf-1.jpg", FILE_URL_PREFIX),
        file_name: "preview-facture-free-201801-pdf-1.jpg".to_string(),
        status,
        comment_admin: None,
    }
}

pub fn fixture_bills() -> Vec<Bill> {
    vec![
        fixture_bill("47qAXb6fIm2zOKkLzMro", "encore", "2004-04-04", 400, BillStatus::Pending),
        fixture_bill("BeKy5Mo4jkmdfPGYpTxZ", "test1", "2001-01-01", 100, BillStatus::Refused),
        fixture_bill("UIUZtnPQvnbFnB0ozvJh", "test3", "2003-03-03", 300, BillStatus::Accepted),
        fixture_bill("qcCK3SzECmaZAGRrHjaC", "test2", "2002-02-02", 200, BillStatus::Refused),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::form_data::Attachment;

    #[tokio::test]
    async fn test_fixtures_list() {
        let store = MemoryStore::with_fixtures();
        let bills = store.list().await.unwrap();
        assert_eq!(bills.len(), 4);
    }

    #[tokio::test]
    async fn test_create_stores_the_bill() {
        let store = MemoryStore::new();
        store.set_next_key("1234");

        let mut data = FormData::new();
        data.append_file("file", Attachment::new("receipt.jpg", vec![1]));
        data.append_text("email", "a@a");
        data.append_text("name", "Vol Paris Londres");
        data.append_text("amount", 348);
        data.append_text("pct", 20);
        data.append_text("status", "pending");

        let response = store.create(CreateBillRequest::multipart(data)).await.unwrap();

        assert_eq!(response.key, "1234");
        assert_eq!(response.file_url, "https://localhost:3456/images/receipt.jpg");
        let bills = store.list().await.unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].id, "1234");
        assert_eq!(bills[0].amount, 348);
        assert_eq!(bills[0].status, BillStatus::Pending);
        assert_eq!(store.create_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_generated_keys_are_unique() {
        let store = MemoryStore::new();
        let first = store.create(CreateBillRequest::multipart(FormData::new())).await.unwrap();
        let second = store.create(CreateBillRequest::multipart(FormData::new())).await.unwrap();
        assert_ne!(first.key, second.key);
    }

    #[tokio::test]
    async fn test_configured_failures() {
        let store = MemoryStore::with_fixtures();
        store.fail_list_with_status(500);
        store.fail_create_with_status(404);

        let list_error = store.list().await.unwrap_err();
        assert_eq!(list_error.to_string(), "Erreur 500");

        let create_error = store
            .create(CreateBillRequest::multipart(FormData::new()))
            .await
            .unwrap_err();
        assert_eq!(create_error.to_string(), "Erreur 404");
        assert_eq!(store.bills().len(), 4);
        assert_eq!(store.create_requests().len(), 1);
    }
}
