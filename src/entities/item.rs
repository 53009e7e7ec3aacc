use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;

use crate::entities::base::{MetaData, Ref};
use crate::operations::{Query, Read, Save, qb_entity};
use crate::utils::date_format::qb_date_format_option;

/// A product or service that can appear on transaction lines.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_tax_included: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    /// `Inventory`, `NonInventory`, `Service`, or `Category`.
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_account_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_cost: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_account_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_account_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_qty_on_hand: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty_on_hand: Option<Decimal>,
    #[serde(
        default,
        with = "qb_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub inv_start_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_item: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<MetaData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

qb_entity!(Item, "Item");

impl Read for Item {}

impl Query for Item {
    // The vendor omits Sku from `SELECT *` results; it has to be asked for.
    const EXTRA_SELECT_FIELDS: &'static [&'static str] = &["Sku"];
}

impl Save for Item {}
