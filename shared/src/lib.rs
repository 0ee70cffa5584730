use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// One expense report as stored by the remote store
///
/// Store records are not validated, so every field decodes leniently: `null`
/// or a missing field takes its empty value, numbers arriving as floats or
/// strings are truncated to their integer part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Email of the employee who submitted the bill
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    /// Expense category, free text from the form's category list
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub expense_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Amount in whole currency units
    #[serde(default, deserialize_with = "lenient_integer")]
    pub amount: i64,
    /// Calendar date as sent by the store, normally "YYYY-MM-DD"
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vat: String,
    /// VAT percentage
    #[serde(default, deserialize_with = "lenient_integer")]
    pub pct: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub commentary: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub file_url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub file_name: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: BillStatus,
    /// Comment left by an administrator when accepting or refusing the bill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.trunc() as i64)),
        Value::String(text) => text.trim().parse::<f64>().ok().map(|float| float.trunc() as i64),
        _ => None,
    };
    Ok(number.unwrap_or_default())
}

fn lenient_status<'de, D>(deserializer: D) -> Result<BillStatus, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer).map(BillStatus::from)
}

/// Review status of a bill
///
/// Values the client does not know about are kept verbatim so they can still
/// be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
    Other(String),
}

/// A record without status keeps an empty label
impl Default for BillStatus {
    fn default() -> Self {
        BillStatus::Other(String::new())
    }
}

impl BillStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
            BillStatus::Other(raw) => raw,
        }
    }

    /// Label shown in the bill list
    pub fn label(&self) -> &str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
            BillStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for BillStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => BillStatus::Pending,
            "accepted" => BillStatus::Accepted,
            "refused" => BillStatus::Refused,
            _ => BillStatus::Other(raw),
        }
    }
}

impl From<&str> for BillStatus {
    fn from(raw: &str) -> Self {
        BillStatus::from(raw.to_string())
    }
}

impl From<BillStatus> for String {
    fn from(status: BillStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bill ready for the list view: display date and status label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedBill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: i64,
    /// e.g. "4 Avr. 24", or the raw store value when it does not parse
    pub date: String,
    pub vat: String,
    pub pct: i64,
    pub commentary: String,
    pub file_url: String,
    pub file_name: String,
    /// Human-readable status label, e.g. "En attente"
    pub status: String,
    /// Status as sent by the store, for row styling
    pub raw_status: BillStatus,
}

/// User record kept in session storage under the `user` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "type")]
    pub user_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Response returned by the store after creating a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillResponse {
    pub file_url: String,
    pub key: String,
}

/// Error body returned by the API on failed requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
}
