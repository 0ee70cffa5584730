use crate::constants::RoutePath;
use crate::services::bill_formatter::BillFormatter;
use crate::services::logging::{ErrorReport, ErrorReporter, Logger, TracingReporter};
use crate::services::navigation::Navigator;
use crate::services::store::{BillStore, StoreError};
use shared::FormattedBill;
use std::sync::Arc;

const COMPONENT: &str = "Bills";

/// What the bill list page should show
#[derive(Debug, Clone, PartialEq)]
pub enum BillsView {
    Loaded(Vec<FormattedBill>),
    /// Error page carrying the store's message, e.g. "Erreur 404"
    Failed { message: String },
}

/// Receipt preview shown in the attachment modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPreview {
    pub file_url: String,
    pub width: u32,
}

/// Controller behind the employee bill list
#[derive(Clone)]
pub struct Bills {
    navigator: Arc<dyn Navigator>,
    store: Option<Arc<dyn BillStore>>,
    reporter: Arc<dyn ErrorReporter>,
    formatter: BillFormatter,
}

impl Bills {
    pub fn new(navigator: Arc<dyn Navigator>, store: Option<Arc<dyn BillStore>>) -> Self {
        Self {
            navigator,
            store,
            reporter: Arc::new(TracingReporter),
            formatter: BillFormatter::new(),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// "New bill" button
    pub fn handle_click_new_bill(&self) {
        self.navigator.on_navigate(RoutePath::NewBill);
    }

    /// Eye icon on a row: the receipt at half the modal's width
    pub fn handle_click_icon_eye(&self, file_url: &str, modal_width: u32) -> AttachmentPreview {
        AttachmentPreview {
            file_url: file_url.to_string(),
            width: modal_width / 2,
        }
    }

    /// Fetch and format the bill list
    ///
    /// `Ok(None)` when no store is configured. A store failure is reported
    /// and returned so the page can show it; both share the same error.
    pub async fn get_bills(&self) -> Result<Option<Vec<FormattedBill>>, Arc<StoreError>> {
        let Some(store) = self.store.as_ref() else {
            return Ok(None);
        };

        let bills = match store.list().await {
            Ok(bills) => bills,
            Err(error) => {
                let error = Arc::new(error);
                self.reporter
                    .report(ErrorReport::from_shared(COMPONENT, error.clone()));
                return Err(error);
            }
        };

        Logger::debug_with_component(COMPONENT, &format!("Fetched {} bills", bills.len()));
        Ok(Some(self.formatter.format_bills(&bills)))
    }

    /// Load the page content, turning store failures into an error page
    pub async fn load_view(&self) -> BillsView {
        match self.get_bills().await {
            Ok(bills) => BillsView::Loaded(bills.unwrap_or_default()),
            Err(error) => BillsView::Failed {
                message: error.to_string(),
            },
        }
    }
}
