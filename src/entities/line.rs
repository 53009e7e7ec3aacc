//! The polymorphic transaction line shared by invoices, bills, journal
//! entries, and the other transaction types.
//!
//! On the wire a line carries its common fields plus a `DetailType`
//! discriminator, with the concrete detail payload nested under a key named
//! after the discriminator value:
//!
//! ```json
//! {
//!     "Amount": 25.54,
//!     "DetailType": "JournalEntryLineDetail",
//!     "JournalEntryLineDetail": { "PostingType": "Debit" }
//! }
//! ```
//!
//! [`LineDetail`] implements that mapping itself so that a `DetailType`
//! without a known variant falls back to [`LineDetail::Raw`], retaining the
//! data instead of failing the decode.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use time::Date;

use crate::entities::base::{CustomField, LinkedTxn, Ref};
use crate::entities::journal_entry::JournalEntryLineDetail;
use crate::utils::date_format::qb_date_format_option;

/// One line of a transaction body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_num: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_txn: Vec<LinkedTxn>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_field: Vec<CustomField>,
    #[serde(flatten)]
    pub detail: LineDetail,
}

/// The concrete detail of a [`Line`], selected by the `DetailType`
/// discriminator.
#[derive(Clone, Debug, PartialEq)]
pub enum LineDetail {
    SalesItem(SalesItemLineDetail),
    ItemBasedExpense(ItemBasedExpenseLineDetail),
    AccountBasedExpense(AccountBasedExpenseLineDetail),
    Group(GroupLineDetail),
    DescriptionOnly(DescriptionLineDetail),
    Discount(DiscountLineDetail),
    SubTotal(SubTotalLineDetail),
    JournalEntry(JournalEntryLineDetail),
    Tax(TaxLineDetail),
    /// Fallback for lines without a recognized `DetailType`; the original
    /// keys are retained as-is.
    Raw(Map<String, Value>),
}

impl Default for LineDetail {
    fn default() -> Self {
        Self::Raw(Map::new())
    }
}

impl Serialize for LineDetail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Self::SalesItem(detail) => {
                map.serialize_entry("DetailType", "SalesItemLineDetail")?;
                map.serialize_entry("SalesItemLineDetail", detail)?;
            }
            Self::ItemBasedExpense(detail) => {
                map.serialize_entry("DetailType", "ItemBasedExpenseLineDetail")?;
                map.serialize_entry("ItemBasedExpenseLineDetail", detail)?;
            }
            Self::AccountBasedExpense(detail) => {
                map.serialize_entry("DetailType", "AccountBasedExpenseLineDetail")?;
                map.serialize_entry("AccountBasedExpenseLineDetail", detail)?;
            }
            Self::Group(detail) => {
                map.serialize_entry("DetailType", "GroupLineDetail")?;
                map.serialize_entry("GroupLineDetail", detail)?;
            }
            Self::DescriptionOnly(detail) => {
                map.serialize_entry("DetailType", "DescriptionOnly")?;
                map.serialize_entry("DescriptionLineDetail", detail)?;
            }
            Self::Discount(detail) => {
                map.serialize_entry("DetailType", "DiscountLineDetail")?;
                map.serialize_entry("DiscountLineDetail", detail)?;
            }
            Self::SubTotal(detail) => {
                map.serialize_entry("DetailType", "SubTotalLineDetail")?;
                map.serialize_entry("SubTotalLineDetail", detail)?;
            }
            Self::JournalEntry(detail) => {
                map.serialize_entry("DetailType", "JournalEntryLineDetail")?;
                map.serialize_entry("JournalEntryLineDetail", detail)?;
            }
            Self::Tax(detail) => {
                map.serialize_entry("DetailType", "TaxLineDetail")?;
                map.serialize_entry("TaxLineDetail", detail)?;
            }
            Self::Raw(raw) => {
                for (key, value) in raw {
                    map.serialize_entry(key, value)?;
                }
            }
        }
        map.end()
    }
}

fn take_detail<T, E>(map: &mut Map<String, Value>, key: &str) -> Result<T, E>
where
    T: DeserializeOwned + Default,
    E: serde::de::Error,
{
    match map.remove(key) {
        Some(value) => serde_json::from_value(value).map_err(E::custom),
        None => Ok(T::default()),
    }
}

impl<'de> Deserialize<'de> for LineDetail {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        let tag = map
            .get("DetailType")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let detail = match tag.as_deref() {
            Some("SalesItemLineDetail") => {
                Self::SalesItem(take_detail(&mut map, "SalesItemLineDetail")?)
            }
            Some("ItemBasedExpenseLineDetail") => {
                Self::ItemBasedExpense(take_detail(&mut map, "ItemBasedExpenseLineDetail")?)
            }
            Some("AccountBasedExpenseLineDetail") => {
                Self::AccountBasedExpense(take_detail(&mut map, "AccountBasedExpenseLineDetail")?)
            }
            Some("GroupLineDetail") => Self::Group(take_detail(&mut map, "GroupLineDetail")?),
            Some("DescriptionOnly") => {
                Self::DescriptionOnly(take_detail(&mut map, "DescriptionLineDetail")?)
            }
            Some("DiscountLineDetail") => {
                Self::Discount(take_detail(&mut map, "DiscountLineDetail")?)
            }
            Some("SubTotalLineDetail") => {
                Self::SubTotal(take_detail(&mut map, "SubTotalLineDetail")?)
            }
            Some("JournalEntryLineDetail") => {
                Self::JournalEntry(take_detail(&mut map, "JournalEntryLineDetail")?)
            }
            Some("TaxLineDetail") => Self::Tax(take_detail(&mut map, "TaxLineDetail")?),
            _ => Self::Raw(map),
        };
        Ok(detail)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SalesItemLineDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code_ref: Option<Ref>,
    #[serde(
        default,
        with = "qb_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amt: Option<Decimal>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemBasedExpenseLineDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_status: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountBasedExpenseLineDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_status: Option<String>,
}

/// Detail for a line grouping other lines (a bundle), recursive.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupLineDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_item_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<Line>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescriptionLineDetail {
    #[serde(
        default,
        with = "qb_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code_ref: Option<Ref>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiscountLineDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_account_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_based: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<Decimal>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubTotalLineDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_ref: Option<Ref>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxLineDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_based: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_amount_taxable: Option<Decimal>,
}

/// Transaction-level tax summary; its `TaxLine` entries reuse [`Line`] with
/// [`TaxLineDetail`] details.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TxnTaxDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txn_tax_code_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tax: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax_line: Vec<Line>,
}
