use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::base::{Address, EmailAddress, MetaData, PhoneNumber, Ref, WebAddress};
use crate::operations::{Query, Read, Save, qb_entity};

/// A supplier the company purchases from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vendor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_on_check_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_phone: Option<PhoneNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email_addr: Option<EmailAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_addr: Option<WebAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_addr: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acct_num: Option<String>,
    /// True when the vendor is eligible for a 1099 form.
    #[serde(rename = "Vendor1099", skip_serializing_if = "Option::is_none")]
    pub vendor_1099: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<MetaData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

qb_entity!(Vendor, "Vendor");

impl Read for Vendor {}
impl Query for Vendor {}
impl Save for Vendor {}
