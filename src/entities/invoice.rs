use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;

use crate::entities::base::{
    Address, CustomField, CustomerMemo, EmailAddress, LinkedTxn, MetaData, Ref,
};
use crate::entities::line::{Line, TxnTaxDetail};
use crate::operations::{Delete, DownloadPdf, Query, Read, Save, SendEmail, Void, qb_entity};
use crate::utils::date_format::qb_date_format_option;

/// A sales invoice.
///
/// Supports the full transaction lifecycle: query, save, delete, void,
/// emailing to the customer, and PDF download.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_number: Option<String>,
    #[serde(
        default,
        with = "qb_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub txn_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_memo: Option<CustomerMemo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_addr: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_addr: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_term_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_ref: Option<Ref>,
    #[serde(
        default,
        with = "qb_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Date>,
    #[serde(
        default,
        with = "qb_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub ship_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_num: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txn_tax_detail: Option<TxnTaxDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_txn: Vec<LinkedTxn>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_field: Vec<CustomField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amt: Option<Decimal>,
    /// Amount still owed; server-computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_tax_after_discount: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_email: Option<EmailAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_email_cc: Option<EmailAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_email_bcc: Option<EmailAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_online_credit_card_payment: Option<bool>,
    #[serde(rename = "AllowOnlineACHPayment", skip_serializing_if = "Option::is_none")]
    pub allow_online_ach_payment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<MetaData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

qb_entity!(Invoice, "Invoice");

impl Read for Invoice {}
impl Query for Invoice {}
impl Save for Invoice {}
impl Delete for Invoice {}
impl SendEmail for Invoice {}
impl Void for Invoice {}
impl DownloadPdf for Invoice {}
