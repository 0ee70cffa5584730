//! Bill list formatting.
//!
//! Turns raw bills from the store into rows for the bill list: most recent
//! first, dates rendered as "D Mon YY" and statuses as readable labels.
//! Malformed records never abort formatting; an unparseable date is shown as
//! sent and sorts after every dated bill.

use crate::services::date_utils::{format_short_date, parse_bill_date};
use chrono::NaiveDate;
use shared::{Bill, FormattedBill};
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, Default)]
pub struct BillFormatter;

impl BillFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Sort bills by date, most recent first, and format them for display
    ///
    /// The sort is stable: bills sharing a date keep their input order.
    pub fn format_bills(&self, bills: &[Bill]) -> Vec<FormattedBill> {
        let mut dated: Vec<(Option<NaiveDate>, &Bill)> = bills
            .iter()
            .map(|bill| (parse_bill_date(&bill.date), bill))
            .collect();

        // None < Some(_), so reversing puts undated bills last
        dated.sort_by_key(|(date, _)| Reverse(*date));

        dated
            .into_iter()
            .map(|(date, bill)| self.format_with_date(bill, date))
            .collect()
    }

    /// Format a single bill without reordering
    pub fn format_single_bill(&self, bill: &Bill) -> FormattedBill {
        self.format_with_date(bill, parse_bill_date(&bill.date))
    }

    fn format_with_date(&self, bill: &Bill, date: Option<NaiveDate>) -> FormattedBill {
        FormattedBill {
            id: bill.id.clone(),
            email: bill.email.clone(),
            expense_type: bill.expense_type.clone(),
            name: bill.name.clone(),
            amount: bill.amount,
            date: date
                .map(format_short_date)
                .unwrap_or_else(|| bill.date.clone()),
            vat: bill.vat.clone(),
            pct: bill.pct,
            commentary: bill.commentary.clone(),
            file_url: bill.file_url.clone(),
            file_name: bill.file_name.clone(),
            status: bill.status.label().to_string(),
            raw_status: bill.status.clone(),
        }
    }
}

/// Format bills for the list view with the default formatter
pub fn format_bills(bills: &[Bill]) -> Vec<FormattedBill> {
    BillFormatter::new().format_bills(bills)
}
