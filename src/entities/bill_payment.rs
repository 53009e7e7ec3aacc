use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;

use crate::entities::base::{MetaData, Ref};
use crate::entities::line::Line;
use crate::operations::{Delete, Query, Read, Save, Void, qb_entity};
use crate::utils::date_format::qb_date_format_option;

/// Check details for a bill payment made by check.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillPaymentCheck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_status: Option<String>,
}

/// Credit-card details for a bill payment charged to a card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillPaymentCreditCard {
    #[serde(rename = "CCAccountRef", skip_serializing_if = "Option::is_none")]
    pub cc_account_ref: Option<Ref>,
}

/// A payment applied against vendor bills.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillPayment {
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
    pub vendor_ref: Option<Ref>,
    /// `Check` or `CreditCard`; selects which detail block applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_payment: Option<BillPaymentCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card_payment: Option<BillPaymentCreditCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amt: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<MetaData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

qb_entity!(BillPayment, "BillPayment");

impl Read for BillPayment {}
impl Query for BillPayment {}
impl Save for BillPayment {}
impl Delete for BillPayment {}
impl Void for BillPayment {}
