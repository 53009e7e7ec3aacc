use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::bill::Bill;
use crate::entities::estimate::Estimate;
use crate::entities::invoice::Invoice;
use crate::entities::journal_entry::JournalEntry;
use crate::entities::sales_receipt::SalesReceipt;
use crate::operations::{DeleteNoId, Query, Read, qb_object};

/// A recurring transaction template. The wire format nests the templated
/// transaction under its own type key, with the recurrence schedule inside
/// that transaction's `RecurringInfo`; deletion sends the full body because
/// the wrapper has no id of its own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecurringTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<Invoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill: Option<Bill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Estimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_entry: Option<JournalEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_receipt: Option<SalesReceipt>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

qb_object!(RecurringTransaction, "RecurringTransaction");

impl Read for RecurringTransaction {}
impl Query for RecurringTransaction {}
impl DeleteNoId for RecurringTransaction {}
