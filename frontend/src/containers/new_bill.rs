//! New bill workflow.
//!
//! Controller bound to a single creation form. It checks the picked
//! attachment, turns the submitted form into the multipart payload, hands it
//! to the store and sends the user back to the bill list.
//!
//! Navigation on submit is optimistic: the user lands on the bill list right
//! away while the upload completes in the background. Creation failures are
//! reported to the operator channel only.

use crate::constants::RoutePath;
use crate::services::form_data::{file_extension, Attachment, FormData};
use crate::services::logging::{ErrorReport, ErrorReporter, Logger, Severity, TracingReporter};
use crate::services::navigation::{Navigator, Notifier};
use crate::services::session::{current_user, SessionStorage};
use crate::services::store::{BillStore, CreateBillRequest};
use shared::{BillStatus, CreateBillResponse};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

const COMPONENT: &str = "NewBill";

/// Status given to every newly submitted bill
pub const PENDING_STATUS: BillStatus = BillStatus::Pending;
/// VAT percentage used when the form value is missing or not an integer
pub const DEFAULT_PCT: i64 = 20;
pub const ACCEPTED_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];
pub const INVALID_ATTACHMENT_MESSAGE: &str =
    "Veuillez sélectionner un fichier de type .png, .jpg ou .jpeg.";

/// Multipart field order expected by the store
pub const PAYLOAD_FIELDS: [&str; 10] = [
    "file", "email", "type", "name", "amount", "date", "vat", "pct", "commentary", "status",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("Unsupported attachment {file_name:?}: expected .png, .jpg or .jpeg")]
    UnsupportedExtension { file_name: String },
}

/// Check a file name against the accepted image extensions (case-insensitive)
pub fn validate_attachment_name(file_name: &str) -> Result<(), AttachmentError> {
    match file_extension(file_name) {
        Some(extension) if ACCEPTED_EXTENSIONS.contains(&extension.as_str()) => Ok(()),
        _ => Err(AttachmentError::UnsupportedExtension {
            file_name: file_name.to_string(),
        }),
    }
}

/// Result of picking an attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentOutcome {
    Accepted { file_name: String },
    Rejected(AttachmentError),
}

impl AttachmentOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AttachmentOutcome::Accepted { .. })
    }
}

/// Raw values of the new bill form, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub amount: String,
    /// "YYYY-MM-DD" from the date picker
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    /// Name of the last accepted attachment
    pub file_name: Option<String>,
    /// Set once the store has created the bill
    pub file_url: Option<String>,
    pub bill_id: Option<String>,
    /// Current selection of the attachment input; cleared on rejection
    pub selected_file: Option<Attachment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowConfig {
    pub default_pct: i64,
    pub status: BillStatus,
    /// Navigate to the bill list again once creation succeeds
    pub navigate_after_create: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            default_pct: DEFAULT_PCT,
            status: PENDING_STATUS,
            navigate_after_create: true,
        }
    }
}

#[derive(Clone)]
pub struct NewBill {
    navigator: Arc<dyn Navigator>,
    store: Option<Arc<dyn BillStore>>,
    session: Arc<dyn SessionStorage>,
    notifier: Arc<dyn Notifier>,
    reporter: Arc<dyn ErrorReporter>,
    config: WorkflowConfig,
    state: Arc<Mutex<WorkflowState>>,
}

impl NewBill {
    /// Bind a workflow to its collaborators; without a store, creation is a no-op
    pub fn new(
        navigator: Arc<dyn Navigator>,
        store: Option<Arc<dyn BillStore>>,
        session: Arc<dyn SessionStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            navigator,
            store,
            session,
            notifier,
            reporter: Arc::new(TracingReporter),
            config: WorkflowConfig::default(),
            state: Arc::new(Mutex::new(WorkflowState::default())),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    /// Snapshot of the workflow state
    pub fn state(&self) -> WorkflowState {
        self.lock_state().clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attachment input changed
    ///
    /// A rejected file warns the user and clears the input selection. The
    /// previously accepted `file_name` is left as it was.
    pub fn handle_change_file(&self, file: Attachment) -> AttachmentOutcome {
        match validate_attachment_name(&file.name) {
            Ok(()) => {
                let file_name = file.name.clone();
                let mut state = self.lock_state();
                state.file_name = Some(file_name.clone());
                state.selected_file = Some(file);
                AttachmentOutcome::Accepted { file_name }
            }
            Err(error) => {
                Logger::warn_with_component(COMPONENT, &error.to_string());
                self.notifier.alert(INVALID_ATTACHMENT_MESSAGE);
                self.lock_state().selected_file = None;
                AttachmentOutcome::Rejected(error)
            }
        }
    }

    /// Form submitted
    ///
    /// Navigates to the bill list exactly once before returning. When a store
    /// is configured the creation runs on the current tokio runtime and the
    /// returned handle resolves once it completes.
    pub fn handle_submit(&self, form: NewBillForm) -> Option<JoinHandle<Option<CreateBillResponse>>> {
        let payload = self.build_payload(&form);
        Logger::info_with_component(COMPONENT, &format!("Submitting bill {:?}", form.name));

        let creation = self.store.is_some().then(|| {
            let workflow = self.clone();
            async move { workflow.create_bill(payload).await }
        });

        self.navigator.on_navigate(RoutePath::Bills);

        let creation = creation?;
        match Handle::try_current() {
            Ok(runtime) => Some(runtime.spawn(creation)),
            Err(error) => {
                self.reporter.report(ErrorReport::from_error(COMPONENT, error));
                None
            }
        }
    }

    /// Assemble the multipart payload in store field order
    pub fn build_payload(&self, form: &NewBillForm) -> FormData {
        let selected_file = self.lock_state().selected_file.clone();
        let email = self.current_email();
        let amount = parse_leading_int(&form.amount)
            .map(|amount| amount.to_string())
            .unwrap_or_default();
        let pct = parse_leading_int(&form.pct).unwrap_or(self.config.default_pct);

        let mut payload = FormData::new();
        match selected_file {
            Some(file) => payload.append_file("file", file),
            None => payload.append_text("file", ""),
        }
        payload.append_text("email", email);
        payload.append_text("type", &form.expense_type);
        payload.append_text("name", &form.name);
        payload.append_text("amount", amount);
        payload.append_text("date", &form.date);
        payload.append_text("vat", &form.vat);
        payload.append_text("pct", pct);
        payload.append_text("commentary", &form.commentary);
        payload.append_text("status", &self.config.status);
        payload
    }

    /// Send the payload to the store and record the created bill
    ///
    /// Returns `None` when no store is configured or the store failed; a
    /// failure is reported once with the original error.
    pub async fn create_bill(&self, payload: FormData) -> Option<CreateBillResponse> {
        let store = self.store.as_ref()?;

        match store.create(CreateBillRequest::multipart(payload)).await {
            Ok(response) => {
                {
                    let mut state = self.lock_state();
                    state.bill_id = Some(response.key.clone());
                    state.file_url = Some(response.file_url.clone());
                }
                Logger::info_with_component(COMPONENT, &format!("Bill {} created", response.key));
                if self.config.navigate_after_create {
                    self.navigator.on_navigate(RoutePath::Bills);
                }
                Some(response)
            }
            Err(error) => {
                self.reporter.report(ErrorReport::from_error(COMPONENT, error));
                None
            }
        }
    }

    fn current_email(&self) -> String {
        match current_user(self.session.as_ref()) {
            Ok(Some(user)) => user.email.unwrap_or_default(),
            Ok(None) => {
                self.reporter.report(ErrorReport::new(
                    Severity::Warn,
                    COMPONENT,
                    "No user in session, submitting without email",
                ));
                String::new()
            }
            Err(error) => {
                self.reporter
                    .report(ErrorReport::new(Severity::Warn, COMPONENT, format!("{:#}", error)));
                String::new()
            }
        }
    }
}

/// Leading integer of a form value: "12" and "12.5" give 12, "abc" and "" give nothing
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(|c: char| c == '+' || c == '-'));
    let end = trimmed[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed.len(), |index| index + sign_len);
    if end == sign_len {
        return None;
    }
    trimmed[..end].parse().ok()
}
