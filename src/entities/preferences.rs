use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;

use crate::entities::base::{MetaData, Ref};
use crate::operations::{Preference, SaveNoId, qb_object};
use crate::utils::date_format::qb_date_format_option;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountingInfoPrefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_departments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_tracking_per_txn: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_tracking_per_txn_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_terminology: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_terminology: Option<String>,
    #[serde(
        default,
        with = "qb_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub book_close_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_month_of_fiscal_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_year_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_form: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductAndServicesPrefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub for_sales: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub for_purchase: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_with_price_and_rate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_on_hand: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SalesFormsPrefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_deposit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_discount: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_estimates: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_service_date: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_apply_credit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_txn_numbers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_terms: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_copy_to_company: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VendorAndPurchasesPrefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_terms: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_expense_tracking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_by_customer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_markup: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeTrackingPrefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_services: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_customers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_bill_rate_to_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_week_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_time_entries_billable: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxPrefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub using_sales_tax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_tax_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_group_code_ref: Option<Ref>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrencyPrefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_currency: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_currency_enabled: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportPrefs {
    /// `Accrual` or `Cash`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_basis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calc_aging_report_from_txn_date: Option<bool>,
}

/// The company-wide settings singleton, fetched from the fixed
/// `company/<realm>/preferences` endpoint. Updates go through the normal
/// object endpoint and require the current `SyncToken`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting_info_prefs: Option<AccountingInfoPrefs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_and_services_prefs: Option<ProductAndServicesPrefs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_forms_prefs: Option<SalesFormsPrefs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_and_purchases_prefs: Option<VendorAndPurchasesPrefs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_tracking_prefs: Option<TimeTrackingPrefs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_prefs: Option<TaxPrefs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_prefs: Option<CurrencyPrefs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_prefs: Option<ReportPrefs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<MetaData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

qb_object!(Preferences, "Preferences");

impl Preference for Preferences {}
impl SaveNoId for Preferences {}
