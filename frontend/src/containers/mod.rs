pub mod bills;
pub mod new_bill;

pub use bills::{AttachmentPreview, Bills, BillsView};
pub use new_bill::{AttachmentOutcome, NewBill, NewBillForm, WorkflowConfig, WorkflowState};
